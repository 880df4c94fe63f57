//! Camera plumbing shared by the app shell and the renderer

use cgmath::{Matrix4, SquareMatrix, Vector3};
use winit::{
    event::{DeviceEvent, KeyEvent},
    window::Window,
};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

/// Anything that can produce a combined view-projection matrix
pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Per-frame camera state, uploaded as part of the global uniform buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Eye position in homogeneous coordinates; the w component only pads
    /// the field to the 16-byte alignment uniform buffers require
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Snapshots the eye position and combined matrix for upload
    pub fn capture(eye: Vector3<f32>, view_proj: Matrix4<f32>) -> Self {
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: view_proj.into(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::capture(Vector3::new(0.0, 0.0, 0.0), Matrix4::identity())
    }
}

/// Owns the orbit camera and routes input events through its controller
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Mouse buttons, motion, and wheel
    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) {
        self.controller
            .handle_device_event(event, window, &mut self.camera);
    }

    /// Modifier keys the controller tracks (shift switches drag to pan)
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller.handle_key_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_pads_the_eye_to_homogeneous() {
        let uniform = CameraUniform::capture(Vector3::new(30.0, 25.0, 30.0), Matrix4::identity());
        assert_eq!(uniform.view_position, [30.0, 25.0, 30.0, 1.0]);
    }

    #[test]
    fn default_uniform_is_the_identity() {
        let uniform = CameraUniform::default();
        assert_eq!(uniform.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniform.view_proj[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
