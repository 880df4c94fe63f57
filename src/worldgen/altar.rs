//! Altars with floating crystals
//!
//! Each altar stacks three shrinking base tiers, a lathe-turned column with a
//! slight entasis and a flared capital, and three top tiers. A faceted
//! crystal hovers above the capital as its own object so the animation
//! updater can float and spin it, paired with a point light in the crystal's
//! color.

use std::f32::consts::TAU;

use cgmath::{Matrix4, Vector3};
use rand::Rng;

use crate::gfx::geometry::{generate_cube, generate_lathe, generate_octahedron};
use crate::gfx::resources::material::{rgb, Material};
use crate::gfx::scene::{Object, PointLight, Scene};

use super::config::ALTAR_RING;
use super::CrystalHandle;

/// The six hues a crystal may take
pub const CRYSTAL_PALETTE: [u32; 6] =
    [0x9b59b6, 0x3498db, 0x1abc9c, 0xe74c3c, 0xf39c12, 0x00ffff];

/// Base tiers: (side, height), widest first
const BASE_TIERS: [(f32, f32); 3] = [(2.5, 0.3), (2.2, 0.3), (1.9, 0.3)];
/// Top tiers under the crystal
const TOP_TIERS: [(f32, f32); 3] = [(2.0, 0.25), (1.7, 0.25), (1.4, 0.2)];

const COLUMN_HEIGHT: f32 = 4.0;
const COLUMN_RADIUS: f32 = 0.5;
const CRYSTAL_HOVER: f32 = 1.5;
const CRYSTAL_RADIUS: f32 = 0.5;

/// (radius, height) pairs for the column lathe, base to capital
pub fn column_profile() -> Vec<[f32; 2]> {
    let mut profile = vec![
        [COLUMN_RADIUS * 1.2, 0.0],
        [COLUMN_RADIUS * 1.1, 0.2],
        [COLUMN_RADIUS, 0.4],
    ];

    // Shaft with a gentle entasis bulge
    for i in 0..8 {
        let t = i as f32 / 7.0;
        profile.push([
            COLUMN_RADIUS + (t * std::f32::consts::PI).sin() * 0.08,
            0.4 + t * (COLUMN_HEIGHT - 1.0),
        ]);
    }

    // Capital flare
    profile.push([COLUMN_RADIUS * 1.15, COLUMN_HEIGHT - 0.3]);
    profile.push([COLUMN_RADIUS * 1.3, COLUMN_HEIGHT - 0.2]);
    profile.push([COLUMN_RADIUS * 1.2, COLUMN_HEIGHT]);

    profile
}

/// Builds the static altar stack and returns it with the height of its top
/// surface
pub fn altar_object(name: &str) -> (Object, f32) {
    let mut altar = Object::new(name);
    let mut current_y = 0.0;

    for (side, height) in BASE_TIERS {
        let mut tier = generate_cube();
        tier.transform(
            &(Matrix4::from_translation(Vector3::new(0.0, current_y + height / 2.0, 0.0))
                * Matrix4::from_nonuniform_scale(side, height, side)),
        );
        altar.add_part(&tier, "altar_stone");
        current_y += height;
    }

    let mut column = generate_lathe(&column_profile(), 16);
    column.transform(&Matrix4::from_translation(Vector3::new(0.0, current_y, 0.0)));
    altar.add_part(&column, "altar_column");
    current_y += COLUMN_HEIGHT;

    for (side, height) in TOP_TIERS {
        let mut tier = generate_cube();
        tier.transform(
            &(Matrix4::from_translation(Vector3::new(0.0, current_y + height / 2.0, 0.0))
                * Matrix4::from_nonuniform_scale(side, height, side)),
        );
        altar.add_part(&tier, "altar_top");
        current_y += height;
    }

    (altar, current_y)
}

pub fn build_altars<R: Rng + ?Sized>(scene: &mut Scene, rng: &mut R) -> Vec<CrystalHandle> {
    scene.add_material(Material::from_hex("altar_stone", 0xcccccc, 30.0));
    scene.add_material(Material::from_hex("altar_top", 0xd4a574, 30.0));
    scene.add_material(Material::from_hex("altar_column", 0xf5f5dc, 40.0));
    for (i, hex) in CRYSTAL_PALETTE.iter().enumerate() {
        scene.add_material(
            Material::from_hex(&format!("crystal_{}", i), *hex, 100.0)
                .with_alpha(0.9)
                .with_emission(rgb(*hex), 0.6),
        );
    }

    let mut handles = Vec::with_capacity(ALTAR_RING.len());

    for (i, (angle, distance)) in ALTAR_RING.iter().enumerate() {
        let position = Vector3::new(angle.cos() * distance, 0.0, angle.sin() * distance);

        let (mut altar, top_y) = altar_object(&format!("altar_{}", i));
        altar.set_translation(position);
        scene.add_object(altar);

        // Crystal color drawn uniformly from the palette
        let palette_index = rng.random_range(0..CRYSTAL_PALETTE.len());
        let base_position = position + Vector3::new(0.0, top_y + CRYSTAL_HOVER, 0.0);

        let mut crystal = Object::new(&format!("crystal_{}", i));
        crystal.add_part(
            &generate_octahedron(CRYSTAL_RADIUS),
            &format!("crystal_{}", palette_index),
        );
        crystal.set_translation(base_position);
        let object = scene.add_object(crystal);

        let light = scene.add_point_light(PointLight {
            position: base_position,
            color: rgb(CRYSTAL_PALETTE[palette_index]),
            intensity: 1.5,
            range: 5.0,
        });

        handles.push(CrystalHandle {
            object,
            light,
            base_position,
            phase: rng.random_range(0.0..TAU),
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
    fn altar_stacks_tiers_around_the_column() {
        let (altar, top_y) = altar_object("a");
        assert_eq!(
            altar.parts.len(),
            BASE_TIERS.len() + 1 + TOP_TIERS.len()
        );
        let tier_heights: f32 = BASE_TIERS.iter().chain(TOP_TIERS.iter()).map(|t| t.1).sum();
        assert!((top_y - (tier_heights + COLUMN_HEIGHT)).abs() < 1e-5);
    }

    #[test]
    fn column_profile_rises_monotonically() {
        let profile = column_profile();
        assert!(profile.windows(2).all(|w| w[1][1] >= w[0][1]));
        assert_eq!(profile.last().unwrap()[1], COLUMN_HEIGHT);
        // Entasis bulges past the nominal shaft radius
        assert!(profile.iter().any(|p| p[0] > COLUMN_RADIUS));
    }

    #[test]
    fn every_altar_gets_a_crystal_and_a_light() {
        let mut scene = test_scene();
        let mut rng = StdRng::seed_from_u64(21);
        let handles = build_altars(&mut scene, &mut rng);

        assert_eq!(handles.len(), ALTAR_RING.len());
        assert_eq!(scene.point_lights.len(), ALTAR_RING.len());
        // altar + crystal per ring slot
        assert_eq!(scene.objects.len(), 2 * ALTAR_RING.len());

        for handle in &handles {
            let crystal = scene.object(handle.object).unwrap();
            assert!(crystal.name.starts_with("crystal_"));
            assert!((0.0..TAU).contains(&handle.phase));
            // Crystal hovers above its altar top
            assert!(handle.base_position.y > COLUMN_HEIGHT);
        }
    }

    #[test]
    fn crystal_colors_come_from_the_palette() {
        let mut scene = test_scene();
        let mut rng = StdRng::seed_from_u64(4);
        build_altars(&mut scene, &mut rng);

        let palette: Vec<[f32; 3]> = CRYSTAL_PALETTE.iter().map(|hex| rgb(*hex)).collect();
        for light in &scene.point_lights {
            assert!(palette.contains(&light.color));
        }
    }
}
