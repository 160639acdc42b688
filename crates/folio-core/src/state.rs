//! Camera description shared with the web renderer.
//!
//! Kept free of platform APIs so scene logic can be exercised on the host.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};
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
    /// Hero camera: 65° vertical field of view, five units back from the origin.
    pub fn hero(width: f32, height: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect_of(width, height),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = aspect_of(width, height);
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[inline]
fn aspect_of(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_camera_matches_page_layout() {
        let cam = Camera::hero(1600.0, 800.0);
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 5.0));
        assert!((cam.aspect - 2.0).abs() < 1e-6);
        assert!((cam.fovy_radians - 65f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn degenerate_viewport_falls_back_to_square() {
        let mut cam = Camera::hero(0.0, 0.0);
        assert_eq!(cam.aspect, 1.0);
        cam.set_viewport(300.0, 600.0);
        assert!((cam.aspect - 0.5).abs() < 1e-6);
    }
}
