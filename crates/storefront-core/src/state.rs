//! Visual-side state types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! use on both native and web targets. The web frontend consumes them to
//! build camera matrices for the starfield pass.

use crate::constants::{CAMERA_FOVY_RADIANS, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the scroll axis at `depth`, looking further down -Z.
    pub fn at_depth(depth: f32, aspect: f32) -> Self {
        let eye = Vec3::new(0.0, 0.0, depth);
        Self {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
