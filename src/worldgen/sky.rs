//! Sky dome and cloud ring
//!
//! The dome is an inward-facing sphere with a vertex-color gradient, unlit
//! and excluded from fog. Clouds are puff-ball composites spread evenly
//! around the ring with jittered radius, height, and scale.

use std::f32::consts::TAU;

use cgmath::{Matrix4, Vector3};
use rand::Rng;

use crate::gfx::geometry::generate_sphere;
use crate::gfx::resources::material::Material;
use crate::gfx::scene::{Object, Scene};

use super::config::WorldConfig;
use super::field;
use super::CloudHandle;

pub const PUFFS_PER_CLOUD: usize = 5;

pub fn build_sky_dome(scene: &mut Scene, config: &WorldConfig) -> usize {
    scene.add_material(
        Material::new("sky", [1.0, 1.0, 1.0], 0.0)
            .unlit()
            .without_fog(),
    );

    let mut geometry = generate_sphere(32, 32);
    geometry.transform(&Matrix4::from_scale(config.sky_radius));
    // Viewed from inside
    geometry.invert_winding();

    for position in &geometry.vertices {
        geometry
            .colors
            .push(field::sky_gradient(position[1], config.sky_radius));
    }

    let mut object = Object::new("sky");
    object.add_part(&geometry, "sky");
    scene.add_object(object)
}

/// Builds one cloud from overlapping translucent puffs
pub fn cloud_object<R: Rng + ?Sized>(rng: &mut R, name: &str) -> Object {
    let mut object = Object::new(name);

    for _ in 0..PUFFS_PER_CLOUD {
        let mut puff = generate_sphere(8, 8);
        let radius = 1.0 + rng.random_range(0.0..1.0);
        let scale = 0.8 + rng.random_range(0.0..0.4);
        let offset = Vector3::new(
            (rng.random_range(0.0..1.0) - 0.5) * 3.0,
            (rng.random_range(0.0..1.0) - 0.5) * 1.0,
            (rng.random_range(0.0..1.0) - 0.5) * 2.0,
        );
        puff.transform(
            &(Matrix4::from_translation(offset) * Matrix4::from_scale(radius * scale)),
        );
        object.add_part(&puff, "cloud");
    }

    object
}

pub fn build_clouds<R: Rng + ?Sized>(
    scene: &mut Scene,
    rng: &mut R,
    config: &WorldConfig,
) -> Vec<CloudHandle> {
    scene.add_material(Material::new("cloud", [1.0, 1.0, 1.0], 0.0).with_alpha(0.7));

    let mut handles = Vec::with_capacity(config.cloud_count);
    for i in 0..config.cloud_count {
        // Even angular spread, jittered ring distance
        let angle = i as f32 / config.cloud_count as f32 * TAU;
        let distance = rng.random_range(config.cloud_distance.clone());
        let height = rng.random_range(config.cloud_height.clone());
        let scale = rng.random_range(config.cloud_scale.clone());

        let mut object = cloud_object(rng, &format!("cloud_{}", i));
        let base_transform = Matrix4::from_translation(Vector3::new(
            angle.cos() * distance,
            height,
            angle.sin() * distance,
        )) * Matrix4::from_scale(scale);
        object.transform = base_transform;

        let index = scene.add_object(object);
        handles.push(CloudHandle {
            object: index,
            base_transform,
        });
    }

    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    };
    use cgmath::Zero;
    use rand::{rngs::StdRng, SeedableRng};

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.5, 0.0, Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn clouds_have_five_puffs_each() {
        let mut rng = StdRng::seed_from_u64(3);
        let cloud = cloud_object(&mut rng, "cloud");
        assert_eq!(cloud.parts.len(), PUFFS_PER_CLOUD);
    }

    #[test]
    fn cloud_ring_matches_configured_count() {
        let mut scene = test_scene();
        let mut rng = StdRng::seed_from_u64(11);
        let config = WorldConfig::default();
        let handles = build_clouds(&mut scene, &mut rng, &config);
        assert_eq!(handles.len(), config.cloud_count);
        // One object per cloud
        assert_eq!(scene.objects.len(), config.cloud_count);
    }

    #[test]
    fn sky_colors_brighten_toward_the_horizon() {
        let mut scene = test_scene();
        let config = WorldConfig::default();
        let index = build_sky_dome(&mut scene, &config);
        let sky = scene.object(index).unwrap();
        let vertices = sky.parts[0].mesh.vertices();

        let top = vertices
            .iter()
            .max_by(|a, b| a.position[1].total_cmp(&b.position[1]))
            .unwrap();
        let bottom = vertices
            .iter()
            .min_by(|a, b| a.position[1].total_cmp(&b.position[1]))
            .unwrap();
        // Horizon tone has the higher red channel of the two gradient stops
        assert!(bottom.color[0] > top.color[0]);
    }
}
