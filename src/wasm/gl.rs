use js_sys::{Float32Array, Object, Reflect, Uint16Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, WebGl2RenderingContext as GL, WebGlBuffer,
    WebGlProgram, WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::texture::ImageTexture;
use crate::animator::Frame;
use crate::camera::Viewport;
use crate::error::{MenuError, Result};
use crate::geometry::PlaneGeometry;

const VERTEX_SHADER: &str = include_str!("../shaders/vertex.glsl");
const FRAGMENT_SHADER: &str = include_str!("../shaders/fragment.glsl");

#[derive(Default)]
struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    model_view: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    alpha: Option<WebGlUniformLocation>,
    offset: Option<WebGlUniformLocation>,
}

/// Owns the canvas, its WebGL2 context and the single textured plane.
pub struct GlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    index_count: i32,
    uniforms: Uniforms,
    pixel_ratio: f64,
}

impl GlRenderer {
    /// Create a canvas inside `container` sized to `viewport`.
    pub fn new(
        document: &Document,
        container: &HtmlElement,
        viewport: Viewport,
        pixel_ratio: f64,
        geometry: &PlaneGeometry,
    ) -> Result<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MenuError::Js("created element is not a canvas".into()))?;

        let options = Object::new();
        Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(MenuError::Context)?
            .dyn_into()
            .map_err(|_| MenuError::Context)?;

        gl.enable(GL::BLEND);
        gl.blend_func_separate(
            GL::SRC_ALPHA,
            GL::ONE_MINUS_SRC_ALPHA,
            GL::ONE,
            GL::ONE_MINUS_SRC_ALPHA,
        );
        gl.disable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| MenuError::Js("failed to create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));
        let buffers = vec![
            upload_attribute(&gl, &program, "position", 3, &geometry.positions)?,
            upload_attribute(&gl, &program, "uv", 2, &geometry.uvs)?,
            upload_indices(&gl, &geometry.indices)?,
        ];
        gl.bind_vertex_array(None);

        let uniforms = Uniforms {
            projection: gl.get_uniform_location(&program, "projectionMatrix"),
            model_view: gl.get_uniform_location(&program, "modelViewMatrix"),
            texture: gl.get_uniform_location(&program, "uTexture"),
            alpha: gl.get_uniform_location(&program, "uAlpha"),
            offset: gl.get_uniform_location(&program, "uOffset"),
        };

        container.append_child(&canvas)?;

        let mut renderer = GlRenderer {
            canvas,
            gl,
            program,
            vao,
            buffers,
            index_count: geometry.indices.len() as i32,
            uniforms,
            pixel_ratio: 1.0,
        };
        renderer.set_pixel_ratio(pixel_ratio);
        renderer.set_size(viewport);
        Ok(renderer)
    }

    pub fn gl(&self) -> &GL {
        &self.gl
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = if ratio > 0.0 { ratio } else { 1.0 };
    }

    /// Resize the drawing buffer to `viewport` at the current pixel ratio;
    /// the CSS size stays in CSS pixels.
    pub fn set_size(&mut self, viewport: Viewport) {
        let width = (viewport.width as f64 * self.pixel_ratio).round() as u32;
        let height = (viewport.height as f64 * self.pixel_ratio).round() as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    pub fn render(&self, frame: &Frame<'_, ImageTexture>) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(frame.texture.texture()));

        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.projection.as_ref(),
            false,
            &frame.projection.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.model_view.as_ref(),
            false,
            &frame.model_view().to_cols_array(),
        );
        gl.uniform1i(self.uniforms.texture.as_ref(), 0);
        gl.uniform1f(self.uniforms.alpha.as_ref(), frame.alpha);
        gl.uniform2f(self.uniforms.offset.as_ref(), frame.offset.x, frame.offset.y);

        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }

    /// Release GL objects and take the canvas off the page.
    pub fn dispose(&mut self) {
        for buffer in self.buffers.drain(..) {
            self.gl.delete_buffer(Some(&buffer));
        }
        self.gl.delete_vertex_array(Some(&self.vao));
        self.gl.delete_program(Some(&self.program));
        self.canvas.remove();
    }
}

fn upload_attribute(
    gl: &GL,
    program: &WebGlProgram,
    name: &str,
    size: i32,
    data: &[f32],
) -> Result<WebGlBuffer> {
    let location = gl.get_attrib_location(program, name);
    if location < 0 {
        return Err(MenuError::Shader(format!("attribute `{name}` not found")));
    }
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| MenuError::Js("failed to create buffer".into()))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    // SAFETY: the view is consumed by `buffer_data` before any allocation
    // can move the wasm memory.
    unsafe {
        let view = Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.vertex_attrib_pointer_with_i32(location as u32, size, GL::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(location as u32);
    Ok(buffer)
}

fn upload_indices(gl: &GL, indices: &[u16]) -> Result<WebGlBuffer> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| MenuError::Js("failed to create index buffer".into()))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buffer));
    // SAFETY: as above.
    unsafe {
        let view = Uint16Array::view(indices);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    Ok(buffer)
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl
        .create_program()
        .ok_or_else(|| MenuError::Shader("failed to create program".into()))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown link error".into());
        gl.delete_program(Some(&program));
        Err(MenuError::Shader(format!("link failed: {info}")))
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| MenuError::Shader("failed to create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown compile error".into());
        gl.delete_shader(Some(&shader));
        Err(MenuError::Shader(format!("compile failed: {info}")))
    }
}
