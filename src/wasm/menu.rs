use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    Event, HtmlCanvasElement, HtmlElement, MouseEvent, WebGl2RenderingContext, WebGlTexture,
};

use super::dom;
use super::gl::GlRenderer;
use super::listeners::Listener;
use super::render::RenderLoop;
use super::texture::{ImageTexture, TextureState};
use crate::animator::{Animator, InputEvent};
use crate::camera::Viewport;
use crate::config::Config;
use crate::error::Result;
use crate::gallery::{Gallery, LinkId};
use crate::geometry::PlaneGeometry;
use crate::motion::Motion;

struct Stage {
    animator: Animator<ImageTexture>,
    renderer: GlRenderer,
    links: Vec<HtmlElement>,
}

impl Stage {
    fn handle(&mut self, event: InputEvent) -> Result<()> {
        self.animator.handle(event)?;
        if let InputEvent::Resize(viewport) = event {
            self.renderer.set_size(viewport);
        }
        Ok(())
    }

    fn frame(&mut self) -> Result<()> {
        let frame = self.animator.advance();
        dom::set_opacity(&self.links, frame.link_opacity)?;
        self.renderer.render(&frame);
        Ok(())
    }
}

fn submit(stage: &Rc<RefCell<Stage>>, event: InputEvent) {
    if let Err(err) = stage.borrow_mut().handle(event) {
        log::error!("{event:?}: {err}");
    }
}

/// A mounted menu effect. Dropping it tears everything down.
pub struct Menu {
    stage: Rc<RefCell<Stage>>,
    listeners: Vec<Listener>,
    frames: Option<RenderLoop>,
    stopped: bool,
}

impl Menu {
    /// Find the menu elements, set up the canvas and start animating.
    pub fn mount(config: Config) -> Result<Menu> {
        let window = dom::window()?;
        let document = dom::document()?;
        let container = dom::query(&document, &config.container)?;
        let list = dom::query(&document, &config.list)?;
        let links = dom::query_all(&list, &config.links)?;

        // Validate the link/image pairing before touching WebGL.
        let urls = Gallery::new(links.len(), config.images.clone())?;

        let viewport = dom::viewport(&window)?;
        let geometry = PlaneGeometry::new(1.0, 1.0, config.segments.x, config.segments.y);
        let mut renderer = GlRenderer::new(
            &document,
            &container,
            viewport,
            window.device_pixel_ratio(),
            &geometry,
        )?;
        let gallery = match urls.try_map(|url| ImageTexture::load(renderer.gl(), &url)) {
            Ok(gallery) => gallery,
            Err(err) => {
                renderer.dispose();
                return Err(err);
            }
        };

        let link_count = links.len();
        let stage = Rc::new(RefCell::new(Stage {
            animator: Animator::new(config, viewport, gallery),
            renderer,
            links: links.clone(),
        }));

        // From here on a failure drops `menu`, which undoes the partial setup.
        let mut menu = Menu {
            stage,
            listeners: Vec::with_capacity(link_count + 4),
            frames: None,
            stopped: false,
        };
        let stage = &menu.stage;
        let listeners = &mut menu.listeners;
        {
            let stage = stage.clone();
            let window_for_size = window.clone();
            listeners.push(Listener::new(&window, "resize", move |_: Event| {
                let viewport = match dom::viewport(&window_for_size) {
                    Ok(viewport) => viewport,
                    Err(err) => {
                        log::error!("reading viewport: {err}");
                        return;
                    }
                };
                stage
                    .borrow_mut()
                    .renderer
                    .set_pixel_ratio(window_for_size.device_pixel_ratio());
                submit(&stage, InputEvent::Resize(viewport));
            })?);
        }
        {
            let stage = stage.clone();
            listeners.push(Listener::new(&window, "mousemove", move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                    submit(&stage, InputEvent::PointerMove { x, y });
                }
            })?);
        }
        {
            let stage = stage.clone();
            listeners.push(Listener::new(&list, "mouseenter", move |_: Event| {
                log::debug!("list enter");
                submit(&stage, InputEvent::ListEnter);
            })?);
        }
        {
            let stage = stage.clone();
            listeners.push(Listener::new(&list, "mouseleave", move |_: Event| {
                log::debug!("list leave");
                submit(&stage, InputEvent::ListLeave);
            })?);
        }
        for (index, link) in links.iter().enumerate() {
            let stage = stage.clone();
            listeners.push(Listener::new(link, "mouseenter", move |_: Event| {
                submit(&stage, InputEvent::LinkEnter(LinkId(index)));
            })?);
        }

        let frames = {
            let stage = stage.clone();
            RenderLoop::start(move || {
                if let Err(err) = stage.borrow_mut().frame() {
                    log::error!("frame: {err}");
                }
            })?
        };
        menu.frames = Some(frames);

        log::info!(
            "menu mounted: {link_count} links, viewport {}x{}",
            viewport.width,
            viewport.height
        );
        Ok(menu)
    }

    /// Feed an input event as if it came from the page.
    pub fn dispatch(&self, event: InputEvent) -> Result<()> {
        self.stage.borrow_mut().handle(event)
    }

    /// Run one frame now, outside the animation-frame schedule.
    pub fn tick(&self) -> Result<()> {
        self.stage.borrow_mut().frame()
    }

    pub fn is_running(&self) -> bool {
        self.frames.as_ref().is_some_and(RenderLoop::is_running)
    }

    pub fn motion(&self) -> Motion {
        *self.stage.borrow().animator.motion()
    }

    pub fn active_link(&self) -> LinkId {
        self.stage.borrow().animator.gallery().active_link()
    }

    pub fn viewport(&self) -> Viewport {
        self.stage.borrow().animator.viewport()
    }

    pub fn fov(&self) -> f32 {
        self.stage.borrow().animator.camera().fov
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        self.stage.borrow().renderer.canvas().clone()
    }

    pub fn context(&self) -> WebGl2RenderingContext {
        self.stage.borrow().renderer.gl().clone()
    }

    /// GL textures in link order.
    pub fn textures(&self) -> Vec<WebGlTexture> {
        let stage = self.stage.borrow();
        stage.animator.gallery().iter().map(|t| t.texture().clone()).collect()
    }

    pub fn texture_states(&self) -> Vec<TextureState> {
        let stage = self.stage.borrow();
        stage.animator.gallery().iter().map(ImageTexture::state).collect()
    }

    /// Cancel the render loop, remove listeners, free GL objects, detach the
    /// canvas and restore link opacity. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(mut frames) = self.frames.take() {
            frames.stop();
        }
        self.listeners.clear();
        let mut stage = self.stage.borrow_mut();
        let stage = &mut *stage;
        for texture in stage.animator.gallery().iter() {
            texture.dispose(stage.renderer.gl());
        }
        stage.renderer.dispose();
        dom::clear_opacity(&stage.links);
        log::info!("menu stopped");
    }
}

impl Drop for Menu {
    fn drop(&mut self) {
        self.stop();
    }
}
