//! The per-frame scene transform.
//!
//! The tumble angle is always derived from the absolute elapsed time since start-up, never
//! accumulated frame by frame, so rounding error cannot build up over a long run.

use std::time::Duration;

use glam::{Mat4, Vec3};

/// Constant-speed rotation about the three principal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tumble {
    pub degrees_per_second: f32,
    /// Per-axis multipliers applied to the base angle.
    pub axis_rates: Vec3,
}

impl Tumble {
    /// Every axis turns at the base speed.
    pub fn uniform(degrees_per_second: f32) -> Self {
        Self {
            degrees_per_second,
            axis_rates: Vec3::ONE,
        }
    }

    /// The base angle in degrees after `elapsed`.
    pub fn angle(&self, elapsed: Duration) -> f32 {
        elapsed.as_secs_f32() * self.degrees_per_second
    }

    /// `Rz * Rx * Ry` at the angle reached after `elapsed`.
    pub fn rotation(&self, elapsed: Duration) -> Mat4 {
        let angle = self.angle(elapsed).to_radians();
        let rates = self.axis_rates;
        Mat4::from_rotation_z(angle * rates.z)
            * Mat4::from_rotation_x(angle * rates.x)
            * Mat4::from_rotation_y(angle * rates.y)
    }
}

/// Fixed camera and perspective settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    /// Looking down from slightly above at a point four units in front of the origin.
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 0.0),
            target: Vec3::new(0.0, 0.0, -4.0),
            up: Vec3::Y,
            fov_degrees: 45.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            aspect_ratio,
            self.near,
            self.far,
        )
    }
}

/// Everything needed to turn elapsed time into a model-view-projection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    pub tumble: Tumble,
    pub camera: Camera,
    pub model: Mat4,
    aspect_ratio: f32,
}

impl SceneTransform {
    pub fn new(tumble: Tumble, camera: Camera, model: Mat4, width: u32, height: u32) -> Self {
        let mut transform = Self {
            tumble,
            camera,
            model,
            aspect_ratio: 1.0,
        };
        transform.resize(width, height);
        transform
    }

    /// Updates the aspect ratio. A degenerate size keeps the previous one.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn projection(&self) -> Mat4 {
        self.camera.projection(self.aspect_ratio)
    }

    /// `projection * view * model * rotation` after `elapsed`.
    pub fn mvp(&self, elapsed: Duration) -> Mat4 {
        self.projection() * self.camera.view() * self.model * self.tumble.rotation(elapsed)
    }
}
