use std::f32::consts::TAU;

use glam::Vec3;

use super::core::Camera;
use crate::options::CameraOptions;

const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 1000.0;

/// Orbit controller around the origin, parameterized by azimuth (about +Y,
/// measured from +Z toward +X), polar angle (from +Y), and distance.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    azimuth: f32,
    polar: f32,
    distance: f32,

    min_distance: f32,
    max_distance: f32,
    max_polar: f32,

    /// Projection state; `eye` is kept in sync with the orbit.
    pub camera: Camera,
}

impl OrbitCamera {
    /// Camera at `options.start_position`, looking at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let start = Vec3::from_array(options.start_position);
        let distance = start.length().max(f32::EPSILON);
        let mut orbit = Self {
            azimuth: start.x.atan2(start.z),
            polar: (start.y / distance).clamp(-1.0, 1.0).acos(),
            distance,
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
            max_polar: options.max_polar_angle,
            camera: Camera {
                eye: start,
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect,
                fovy: options.fovy,
                znear: ZNEAR,
                zfar: ZFAR,
            },
        };
        orbit.clamp();
        orbit.update_camera_pos();
        orbit
    }

    /// Current azimuth in `[0, 2π)`.
    #[must_use]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Current polar angle.
    #[must_use]
    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    /// Spin about the vertical axis by `delta` radians.
    pub fn rotate_azimuth(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        self.azimuth = (self.azimuth + delta).rem_euclid(TAU);
        self.update_camera_pos();
    }

    /// Drag-style orbit: spin by `azimuth_delta`, tilt by `polar_delta`.
    pub fn rotate(&mut self, azimuth_delta: f32, polar_delta: f32) {
        self.azimuth = (self.azimuth + azimuth_delta).rem_euclid(TAU);
        self.polar += polar_delta;
        self.clamp();
        self.update_camera_pos();
    }

    /// Scale the distance by `1 − delta`, within the configured limits.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta;
        self.clamp();
        self.update_camera_pos();
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    fn clamp(&mut self) {
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(1e-3, self.max_polar);
    }

    fn update_camera_pos(&mut self) {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.camera.eye =
            Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_configured_eye() {
        let orbit = OrbitCamera::new(&CameraOptions::default(), 1.0);
        assert!((orbit.eye() - Vec3::new(0.0, 5.0, 50.0)).length() < 1e-3);
        assert!(orbit.azimuth().abs() < 1e-6);
    }

    #[test]
    fn azimuth_spin_keeps_distance_and_height() {
        let mut orbit = OrbitCamera::new(&CameraOptions::default(), 1.0);
        let before = orbit.eye();
        orbit.rotate_azimuth(std::f32::consts::FRAC_PI_2);
        let after = orbit.eye();
        assert!((after.length() - before.length()).abs() < 1e-3);
        assert!((after.y - before.y).abs() < 1e-3);
        assert!((after.x - 50.0).abs() < 1e-2);
    }

    #[test]
    fn zoom_and_tilt_are_limited() {
        let opts = CameraOptions::default();
        let mut orbit = OrbitCamera::new(&opts, 1.0);
        orbit.zoom(0.99);
        assert!((orbit.distance() - opts.min_distance).abs() < 1e-4);
        orbit.zoom(-100.0);
        assert!((orbit.distance() - opts.max_distance).abs() < 1e-4);
        orbit.rotate(0.0, 10.0);
        assert!((orbit.polar() - opts.max_polar_angle).abs() < 1e-6);
    }
}
