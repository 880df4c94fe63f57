//! Orbit camera, Y-up, spherical coordinates around a focus point
//!
//! Camera state is (distance, polar, azimuth) relative to a target; `polar`
//! is measured down from the +Y zenith, so the horizon sits at pi/2 and a
//! cap just short of it keeps the viewer above the ground.

use cgmath::*;
use std::f32::consts::PI;

use super::camera_utils::{Camera, CameraUniform};

/// wgpu clip space spans z in [0, 1] where OpenGL used [-1, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Motion limits for the orbit
#[derive(Debug, Clone, Copy)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            max_distance: 1000.0,
            min_polar: 0.05,
            max_polar: PI - 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub target: Vector3<f32>,
    pub eye: Vector3<f32>,
    pub limits: OrbitLimits,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            Vector3::unit_y(),
        );
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, polar: f32, azimuth: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            polar,
            azimuth,
            target,
            eye: Vector3::zero(),
            limits: OrbitLimits::default(),
            aspect,
            fovy: Rad(PI / 3.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.refresh_eye();
        camera
    }

    /// Rotates around the target, clamping `polar` against the limits
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth += d_azimuth;
        self.polar = (self.polar + d_polar).clamp(self.limits.min_polar, self.limits.max_polar);
        self.refresh_eye();
    }

    /// Dollies along the view ray; positive `amount` zooms out
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (1.0 + amount))
            .clamp(self.limits.min_distance, self.limits.max_distance);
        self.refresh_eye();
    }

    /// Slides the focus point across the current view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward);

        // Scale by distance so panning feels the same at every zoom level
        let step = self.distance * 0.1;
        self.target += right * dx * step + up * dy * step;
        self.refresh_eye();
    }

    fn refresh_eye(&mut self) {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.eye = self.target
            + self.distance
                * Vector3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Snapshots eye position and view-projection into the uploadable uniform
    pub fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::capture(self.eye, self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_respects_distance_limits() {
        let mut camera = OrbitCamera::new(40.0, 1.0, 0.0, Vector3::zero(), 1.0);
        camera.limits.min_distance = 15.0;
        camera.limits.max_distance = 100.0;
        camera.zoom(-0.9);
        assert_eq!(camera.distance, 15.0);
        camera.zoom(100.0);
        assert_eq!(camera.distance, 100.0);
    }

    #[test]
    fn polar_cap_keeps_the_eye_above_the_horizon() {
        let mut camera = OrbitCamera::new(40.0, 1.0, 0.0, Vector3::zero(), 1.0);
        camera.limits.max_polar = PI / 2.1;
        camera.orbit(0.0, 2.0);
        assert!(camera.polar <= PI / 2.1);
        assert!(camera.eye.y > 0.0);
    }

    #[test]
    fn eye_sits_at_distance_from_target() {
        let camera =
            OrbitCamera::new(49.0, 1.04, std::f32::consts::FRAC_PI_4, Vector3::zero(), 1.5);
        assert!((camera.eye.magnitude() - 49.0).abs() < 1e-3);
    }

    #[test]
    fn panning_slides_the_target_not_the_orbit() {
        let mut camera = OrbitCamera::new(30.0, 1.0, 0.0, Vector3::zero(), 1.0);
        camera.pan(1.0, 0.0);
        assert!(((camera.eye - camera.target).magnitude() - 30.0).abs() < 1e-3);
        assert!(camera.target.magnitude() > 0.0);
    }
}
