//! Floating crystals and drifting clouds

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::scene::Scene;
use crate::worldgen::{CloudHandle, CrystalHandle};

use super::Animation;

/// Vertical travel of the crystal float
pub const FLOAT_AMPLITUDE: f32 = 0.3;
/// Crystal spin, radians per second
pub const SPIN_RATE: f32 = 0.6;
/// Cloud ring yaw, radians per second
pub const CLOUD_DRIFT_RATE: f32 = 0.012;

/// The crystal float curve: periodic in `t` with period 2*pi, returning to
/// `base` whenever `t + phase` is a multiple of 2*pi
pub fn float_height(base: f32, amplitude: f32, phase: f32, t: f32) -> f32 {
    base + (t + phase).sin() * amplitude
}

/// Bobs each crystal on its own phase, spins it, and drags its glow light
/// along
pub struct CrystalFloat {
    crystals: Vec<CrystalHandle>,
    spin: f32,
}

impl CrystalFloat {
    pub fn new(crystals: Vec<CrystalHandle>) -> Self {
        Self {
            crystals,
            spin: 0.0,
        }
    }
}

impl Animation for CrystalFloat {
    fn name(&self) -> &str {
        "crystal-float"
    }

    fn update(&mut self, dt: f32, elapsed: f32, scene: &mut Scene) {
        self.spin += SPIN_RATE * dt;

        for crystal in &self.crystals {
            let y = float_height(
                crystal.base_position.y,
                FLOAT_AMPLITUDE,
                crystal.phase,
                elapsed,
            );
            let position = Vector3::new(crystal.base_position.x, y, crystal.base_position.z);

            if let Some(object) = scene.object_mut(crystal.object) {
                object.transform = Matrix4::from_translation(position)
                    * Matrix4::from_angle_y(Rad(self.spin + crystal.phase));
            }
            if let Some(light) = scene.point_lights.get_mut(crystal.light) {
                light.position = position;
            }
        }
    }
}

/// Slowly yaws the whole cloud ring around the scene axis
pub struct CloudDrift {
    clouds: Vec<CloudHandle>,
    angle: f32,
}

impl CloudDrift {
    pub fn new(clouds: Vec<CloudHandle>) -> Self {
        Self { clouds, angle: 0.0 }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Animation for CloudDrift {
    fn name(&self) -> &str {
        "cloud-drift"
    }

    fn update(&mut self, dt: f32, _elapsed: f32, scene: &mut Scene) {
        self.angle += CLOUD_DRIFT_RATE * dt;
        let rotation = Matrix4::from_angle_y(Rad(self.angle));

        for cloud in &self.clouds {
            if let Some(object) = scene.object_mut(cloud.object) {
                object.transform = rotation * cloud.base_transform;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    };
    use crate::gfx::scene::{Object, PointLight};
    use cgmath::Zero;
    use std::f32::consts::TAU;

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.5, 0.0, Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn float_returns_to_baseline_each_period() {
        let (base, phase) = (7.25, 1.1);
        for k in 0..4 {
            let t = k as f32 * TAU - phase;
            let y = float_height(base, FLOAT_AMPLITUDE, phase, t);
            assert!((y - base).abs() < 1e-4);
        }
    }

    #[test]
    fn float_is_periodic() {
        for t in [0.0, 0.5, 2.0, 13.7] {
            let a = float_height(3.0, FLOAT_AMPLITUDE, 0.4, t);
            let b = float_height(3.0, FLOAT_AMPLITUDE, 0.4, t + TAU);
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn float_stays_within_amplitude() {
        let mut t = 0.0;
        while t < 20.0 {
            let y = float_height(5.0, FLOAT_AMPLITUDE, 0.9, t);
            assert!((y - 5.0).abs() <= FLOAT_AMPLITUDE + 1e-6);
            t += 0.05;
        }
    }

    #[test]
    fn crystal_update_moves_object_and_light_together() {
        let mut scene = test_scene();
        let base_position = Vector3::new(25.0, 6.3, 0.0);
        let object = scene.add_object(Object::new("crystal_0"));
        let light = scene.add_point_light(PointLight {
            position: base_position,
            color: [1.0, 0.0, 1.0],
            intensity: 1.5,
            range: 5.0,
        });

        let mut animation = CrystalFloat::new(vec![CrystalHandle {
            object,
            light,
            base_position,
            phase: 0.0,
        }]);

        // At elapsed = pi/2 the sine peaks
        animation.update(0.016, std::f32::consts::FRAC_PI_2, &mut scene);

        let expected_y = base_position.y + FLOAT_AMPLITUDE;
        assert!((scene.point_lights[light].position.y - expected_y).abs() < 1e-4);
        let w = scene.object(object).unwrap().transform.w;
        assert!((w.y - expected_y).abs() < 1e-4);
        assert!((w.x - base_position.x).abs() < 1e-4);
    }

    #[test]
    fn cloud_drift_rotates_around_the_scene_axis() {
        let mut scene = test_scene();
        let base_transform =
            Matrix4::from_translation(Vector3::new(40.0, 20.0, 0.0));
        let object = scene.add_object(Object::new("cloud_0"));
        scene.object_mut(object).unwrap().transform = base_transform;

        let mut animation = CloudDrift::new(vec![CloudHandle {
            object,
            base_transform,
        }]);

        // Drive a quarter turn through many small steps
        let target = TAU / 4.0;
        let steps = 100;
        for _ in 0..steps {
            animation.update(target / CLOUD_DRIFT_RATE / steps as f32, 0.0, &mut scene);
        }
        assert!((animation.angle() - target).abs() < 1e-3);

        let w = scene.object(object).unwrap().transform.w;
        // (40, 20, 0) rotated a quarter turn about +Y lands on -Z
        assert!(w.x.abs() < 0.1);
        assert!((w.z + 40.0).abs() < 0.1);
        // Height untouched: the drift is pure yaw
        assert!((w.y - 20.0).abs() < 1e-4);
    }
}
