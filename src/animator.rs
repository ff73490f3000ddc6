//! The target-independent half of the menu: everything that happens between
//! an input event and the values handed to the GPU.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::{PerspectiveCamera, Viewport};
use crate::config::Config;
use crate::error::Result;
use crate::gallery::{Gallery, LinkId};
use crate::motion::Motion;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in client coordinates.
    PointerMove { x: f32, y: f32 },
    ListEnter,
    ListLeave,
    LinkEnter(LinkId),
    Resize(Viewport),
}

/// Values for one render.
#[derive(Debug)]
pub struct Frame<'a, T> {
    pub texture: &'a T,
    pub alpha: f32,
    pub offset: Vec2,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub link_opacity: f32,
}

impl<T> Frame<'_, T> {
    pub fn model_view(&self) -> Mat4 {
        self.view * self.model
    }
}

pub struct Animator<T> {
    config: Config,
    viewport: Viewport,
    camera: PerspectiveCamera,
    motion: Motion,
    gallery: Gallery<T>,
}

impl<T> Animator<T> {
    pub fn new(config: Config, viewport: Viewport, gallery: Gallery<T>) -> Self {
        let camera = PerspectiveCamera::new(viewport, config.perspective, config.near, config.far);
        Animator {
            config,
            viewport,
            camera,
            motion: Motion::default(),
            gallery,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerMove { x, y } => self.motion.set_target(x, y),
            InputEvent::ListEnter => self.motion.set_hovering(true),
            InputEvent::ListLeave => self.motion.set_hovering(false),
            InputEvent::LinkEnter(link) => {
                self.gallery.select(link)?;
            }
            InputEvent::Resize(viewport) => {
                self.viewport = viewport;
                self.camera.resize(viewport);
            }
        }
        Ok(())
    }

    /// Advance the smoothing by one frame and collect what the renderer needs.
    pub fn advance(&mut self) -> Frame<'_, T> {
        self.motion.step(self.config.ease);

        let position = self.motion.mesh_position(self.viewport);
        let model = Mat4::from_scale_rotation_translation(
            self.config.mesh_size.extend(1.0),
            glam::Quat::IDENTITY,
            Vec3::new(position.x, position.y, 0.0),
        );

        Frame {
            texture: self.gallery.active(),
            alpha: self.motion.alpha,
            offset: self.motion.distortion(self.config.distortion),
            model,
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            link_opacity: self.motion.link_opacity(self.config.dimmed_opacity),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn gallery(&self) -> &Gallery<T> {
        &self.gallery
    }
}
