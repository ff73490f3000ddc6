use glam::Vec2;

use crate::camera::Viewport;

pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Pointer-following state of the image plane.
///
/// `step` is a fixed-ratio exponential smoothing, so the remaining distance
/// to the target shrinks by `1 - ease` every frame regardless of frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub target: Vec2,
    pub offset: Vec2,
    pub alpha: f32,
    pub hovering: bool,
}

impl Motion {
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn step(&mut self, ease: f32) {
        self.offset.x = lerp(self.offset.x, self.target.x, ease);
        self.offset.y = lerp(self.offset.y, self.target.y, ease);

        let goal = if self.hovering { 1.0 } else { 0.0 };
        self.alpha = lerp(self.alpha, goal, ease);
    }

    /// Lag between pointer and plane, scaled for the shader. Y is negated
    /// because screen y grows downward and world y grows upward.
    pub fn distortion(&self, scale: f32) -> Vec2 {
        let lag = self.target - self.offset;
        Vec2::new(lag.x * scale, -lag.y * scale)
    }

    /// World position of the plane; offset (0, 0) is the top-left corner of
    /// the viewport, the world origin is its centre.
    pub fn mesh_position(&self, viewport: Viewport) -> Vec2 {
        let center = viewport.center();
        Vec2::new(self.offset.x - center.x, -self.offset.y + center.y)
    }

    /// Every link is dimmed while the list is hovered, including the one
    /// under the pointer.
    pub fn link_opacity(&self, dimmed: f32) -> f32 {
        if self.hovering {
            dimmed
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert!((lerp(0.0, 500.0, 0.1) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn mesh_centred_when_offset_is_viewport_centre() {
        let motion = Motion {
            offset: Vec2::new(400.0, 300.0),
            ..Default::default()
        };
        let pos = motion.mesh_position(Viewport::new(800.0, 600.0));
        assert_eq!(pos, Vec2::ZERO);
    }
}
