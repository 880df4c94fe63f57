//! Mouse-driven orbit control: drag rotates, shift-drag pans, scroll zooms

use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// What the active mouse drag is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Idle,
    Orbit,
    Pan,
}

pub struct CameraController {
    pub orbit_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    drag: Drag,
    shift_down: bool,
}

impl CameraController {
    pub fn new(orbit_speed: f32, zoom_speed: f32) -> Self {
        Self {
            orbit_speed,
            zoom_speed,
            pan_speed: 0.01,
            drag: Drag::Idle,
            shift_down: false,
        }
    }

    /// Routes raw mouse input into camera motion, requesting a redraw for
    /// anything that moved the view
    pub fn handle_device_event(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button { button: 0, state } => {
                // Shift at press time decides the drag mode for the whole drag
                self.drag = match state {
                    ElementState::Pressed if self.shift_down => Drag::Pan,
                    ElementState::Pressed => Drag::Orbit,
                    ElementState::Released => Drag::Idle,
                };
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32,
                };
                camera.zoom(-notches * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta: (dx, dy) } => match self.drag {
                Drag::Orbit => {
                    camera.orbit(
                        -*dx as f32 * self.orbit_speed,
                        -*dy as f32 * self.orbit_speed,
                    );
                    window.request_redraw();
                }
                Drag::Pan => {
                    camera.pan(-*dx as f32 * self.pan_speed, *dy as f32 * self.pan_speed);
                    window.request_redraw();
                }
                Drag::Idle => {}
            },
            _ => {}
        }
    }

    /// Tracks the shift modifier that switches dragging from orbit to pan
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) = event.physical_key {
            self.shift_down = event.state == ElementState::Pressed;
        }
    }
}
