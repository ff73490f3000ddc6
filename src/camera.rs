use glam::{Mat4, Vec2, Vec3};

/// Visible surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Vertical field of view, in degrees, at which a plane `perspective` units
/// in front of the camera spans exactly `height` units.
pub fn fov_for(height: f32, perspective: f32) -> f32 {
    (2.0 * (height / 2.0 / perspective).atan()).to_degrees()
}

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    perspective: f32,
    projection: Mat4,
    needs_update: bool,
}

impl PerspectiveCamera {
    pub fn new(viewport: Viewport, perspective: f32, near: f32, far: f32) -> Self {
        let mut camera = PerspectiveCamera {
            fov: fov_for(viewport.height, perspective),
            aspect: viewport.aspect(),
            near,
            far,
            position: Vec3::new(0.0, 0.0, perspective),
            perspective,
            projection: Mat4::IDENTITY,
            needs_update: true,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Refit to a new viewport. The projection is rebuilt on the next
    /// `projection_matrix` call.
    pub fn resize(&mut self, viewport: Viewport) {
        self.fov = fov_for(viewport.height, self.perspective);
        self.aspect = viewport.aspect();
        self.needs_update = true;
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.needs_update = false;
    }

    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.needs_update {
            self.update_projection_matrix();
        }
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }
}
