use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::{MenuError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Pending,
    Loaded,
    Failed,
}

/// A texture fed from an image URL. Until the image arrives the texture
/// holds a single transparent texel, so it can be bound right away.
pub struct ImageTexture {
    texture: WebGlTexture,
    image: HtmlImageElement,
    state: Rc<Cell<TextureState>>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl ImageTexture {
    pub fn load(gl: &GL, url: &str) -> Result<Self> {
        let texture = gl
            .create_texture()
            .ok_or_else(|| MenuError::Js("failed to create texture".into()))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            1,
            1,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(&[0u8; 4][..]),
        )?;
        set_sampling(gl);

        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));
        let state = Rc::new(Cell::new(TextureState::Pending));

        let onload = {
            let gl = gl.clone();
            let texture = texture.clone();
            let image = image.clone();
            let state = state.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move || {
                gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
                gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
                let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                    GL::TEXTURE_2D,
                    0,
                    GL::RGBA as i32,
                    GL::RGBA,
                    GL::UNSIGNED_BYTE,
                    &image,
                );
                gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
                match uploaded {
                    Ok(()) => {
                        set_sampling(&gl);
                        state.set(TextureState::Loaded);
                        log::info!(
                            "loaded {url} ({}x{})",
                            image.natural_width(),
                            image.natural_height()
                        );
                    }
                    Err(err) => {
                        state.set(TextureState::Failed);
                        log::error!("uploading {url}: {err:?}");
                    }
                }
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let state = state.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move || {
                state.set(TextureState::Failed);
                log::error!("failed to load image {url}");
            }) as Box<dyn FnMut()>)
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(url);

        Ok(ImageTexture {
            texture,
            image,
            state,
            _onload: onload,
            _onerror: onerror,
        })
    }

    pub fn texture(&self) -> &WebGlTexture {
        &self.texture
    }

    /// `Failed` keeps the transparent placeholder bound.
    pub fn state(&self) -> TextureState {
        self.state.get()
    }

    /// Stop listening for the image and free the GL texture.
    pub fn dispose(&self, gl: &GL) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
        gl.delete_texture(Some(&self.texture));
    }
}

impl Drop for ImageTexture {
    fn drop(&mut self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

fn set_sampling(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}
