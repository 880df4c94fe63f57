//! Trees and mushrooms
//!
//! Deciduous trees are a tapered trunk under a cluster of foliage spheres;
//! pines stack cones on a thinner trunk. Mushrooms are a stem, a
//! hemispherical cap, and five white spots scattered across the cap. All
//! three are scattered on rings with the placement sampler.

use std::f32::consts::{FRAC_PI_2, TAU};

use cgmath::{Matrix4, Rad, Vector3};
use rand::Rng;

use crate::gfx::geometry::{
    generate_cone, generate_cylinder, generate_disc, generate_sphere, generate_sphere_section,
};
use crate::gfx::resources::material::Material;
use crate::gfx::scene::{Object, Scene};

use super::config::WorldConfig;
use super::placement::PlacementSampler;

pub const MUSHROOM_SPOTS: usize = 5;

/// Foliage blobs for the deciduous tree: (offset, radius)
const FOLIAGE_BLOBS: [([f32; 3], f32); 4] = [
    ([0.0, 4.5, 0.0], 2.2),
    ([-0.8, 4.0, 0.5], 1.6),
    ([0.7, 4.2, -0.6], 1.8),
    ([0.0, 5.5, 0.0], 1.4),
];

/// Pine canopy layers: (height, radius, cone height)
const PINE_LAYERS: [(f32, f32, f32); 4] = [
    (3.0, 2.0, 2.5),
    (4.5, 1.5, 2.0),
    (5.8, 1.0, 1.5),
    (6.8, 0.6, 1.2),
];

pub fn deciduous_tree(name: &str) -> Object {
    let mut tree = Object::new(name);

    let mut trunk = generate_cylinder(0.3, 0.5, 4.0, 8);
    trunk.transform(&Matrix4::from_translation(Vector3::new(0.0, 2.0, 0.0)));
    tree.add_part(&trunk, "trunk");

    for (offset, radius) in FOLIAGE_BLOBS {
        let mut blob = generate_sphere(8, 8);
        blob.transform(
            &(Matrix4::from_translation(Vector3::from(offset)) * Matrix4::from_scale(radius)),
        );
        tree.add_part(&blob, "foliage");
    }

    tree
}

pub fn pine_tree(name: &str) -> Object {
    let mut tree = Object::new(name);

    let mut trunk = generate_cylinder(0.25, 0.4, 5.0, 8);
    trunk.transform(&Matrix4::from_translation(Vector3::new(0.0, 2.5, 0.0)));
    tree.add_part(&trunk, "pine_trunk");

    for (height, radius, cone_height) in PINE_LAYERS {
        let mut layer = generate_cone(radius, cone_height, 8);
        layer.transform(&Matrix4::from_translation(Vector3::new(0.0, height, 0.0)));
        tree.add_part(&layer, "pine_foliage");
    }

    tree
}

/// Builds one mushroom: stem, cap, and exactly five spots jittered over the
/// cap surface
pub fn mushroom<R: Rng + ?Sized>(rng: &mut R, name: &str) -> Object {
    let mut object = Object::new(name);

    let mut stem = generate_cylinder(0.15, 0.2, 1.0, 8);
    stem.transform(&Matrix4::from_translation(Vector3::new(0.0, 0.5, 0.0)));
    object.add_part(&stem, "mushroom_stem");

    let mut cap = generate_sphere_section(16, 16, 0.0, FRAC_PI_2);
    cap.transform(
        &(Matrix4::from_translation(Vector3::new(0.0, 1.0, 0.0)) * Matrix4::from_scale(0.6)),
    );
    object.add_part(&cap, "mushroom_cap");

    for _ in 0..MUSHROOM_SPOTS {
        let angle = rng.random_range(0.0..TAU);
        let radius = rng.random_range(0.0..0.4);
        let height = 1.2 + rng.random_range(0.0..0.1);
        let tilt = -FRAC_PI_2 + rng.random_range(-0.25..0.25);

        let mut spot = generate_disc(0.1, 8, 1);
        spot.transform(
            &(Matrix4::from_translation(Vector3::new(
                angle.cos() * radius,
                height,
                angle.sin() * radius,
            )) * Matrix4::from_angle_x(Rad(tilt))),
        );
        object.add_part(&spot, "mushroom_spot");
    }

    object
}

pub fn scatter_trees<R: Rng + ?Sized>(scene: &mut Scene, rng: &mut R, config: &WorldConfig) {
    scene.add_material(Material::from_hex("trunk", 0x4a3520, 0.0));
    scene.add_material(Material::from_hex("foliage", 0x2d5016, 0.0));
    scene.add_material(Material::from_hex("pine_trunk", 0x3d2817, 0.0));
    scene.add_material(Material::from_hex("pine_foliage", 0x1a4d2e, 0.0));

    let deciduous = PlacementSampler::full_circle(
        config.deciduous_distance.clone(),
        config.deciduous_scale.clone(),
    );
    for (i, placement) in deciduous
        .sample_n(rng, config.deciduous_count)
        .iter()
        .enumerate()
    {
        let mut tree = deciduous_tree(&format!("deciduous_{}", i));
        tree.set_transform_trs(placement.position(), Rad(0.0), placement.scale);
        scene.add_object(tree);
    }

    let pines =
        PlacementSampler::full_circle(config.pine_distance.clone(), config.pine_scale.clone());
    for (i, placement) in pines.sample_n(rng, config.pine_count).iter().enumerate() {
        let mut tree = pine_tree(&format!("pine_{}", i));
        tree.set_transform_trs(placement.position(), Rad(0.0), placement.scale);
        scene.add_object(tree);
    }
}

pub fn scatter_mushrooms<R: Rng + ?Sized>(scene: &mut Scene, rng: &mut R, config: &WorldConfig) {
    scene.add_material(Material::from_hex("mushroom_stem", 0xf0e6d2, 0.0));
    scene.add_material(Material::from_hex("mushroom_cap", 0xc85a54, 0.0));
    scene.add_material(Material::new("mushroom_spot", [1.0, 1.0, 1.0], 0.0));

    let sampler = PlacementSampler::full_circle(
        config.mushroom_distance.clone(),
        config.mushroom_scale.clone(),
    );
    for (i, placement) in sampler
        .sample_n(rng, config.mushroom_count)
        .iter()
        .enumerate()
    {
        let mut object = mushroom(rng, &format!("mushroom_{}", i));
        let yaw = rng.random_range(0.0..TAU);
        object.set_transform_trs(placement.position(), Rad(yaw), placement.scale);
        scene.add_object(object);
    }
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
    fn mushroom_has_stem_cap_and_five_spots() {
        let mut rng = StdRng::seed_from_u64(5);
        let object = mushroom(&mut rng, "m");
        assert_eq!(object.parts.len(), 2 + MUSHROOM_SPOTS);
        assert_eq!(object.parts[0].material, "mushroom_stem");
        assert_eq!(object.parts[1].material, "mushroom_cap");
        let spots = object
            .parts
            .iter()
            .filter(|p| p.material == "mushroom_spot")
            .count();
        assert_eq!(spots, MUSHROOM_SPOTS);
    }

    #[test]
    fn twenty_placements_yield_twenty_mushrooms() {
        let mut scene = test_scene();
        let mut rng = StdRng::seed_from_u64(9);
        let config = WorldConfig::default();
        scatter_mushrooms(&mut scene, &mut rng, &config);
        assert_eq!(scene.objects.len(), 20);
        for object in &scene.objects {
            assert_eq!(object.parts.len(), 2 + MUSHROOM_SPOTS);
        }
    }

    #[test]
    fn tree_part_counts() {
        assert_eq!(deciduous_tree("d").parts.len(), 1 + FOLIAGE_BLOBS.len());
        assert_eq!(pine_tree("p").parts.len(), 1 + PINE_LAYERS.len());
    }

    #[test]
    fn scattered_trees_cover_both_kinds() {
        let mut scene = test_scene();
        let mut rng = StdRng::seed_from_u64(2);
        let config = WorldConfig::default();
        scatter_trees(&mut scene, &mut rng, &config);
        assert_eq!(
            scene.objects.len(),
            config.deciduous_count + config.pine_count
        );
        assert!(scene.objects.iter().any(|o| o.name.starts_with("pine_")));
        assert!(scene
            .objects
            .iter()
            .any(|o| o.name.starts_with("deciduous_")));
    }
}
