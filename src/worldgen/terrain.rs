//! Ground terrain
//!
//! A tessellated disc displaced and colored by the surface noise field, then
//! laid flat into the XZ plane.

use cgmath::Rad;
use std::f32::consts::FRAC_PI_2;

use crate::gfx::geometry::{generate_disc, GeometryData};
use crate::gfx::resources::material::Material;
use crate::gfx::scene::{Object, Scene};

use super::config::WorldConfig;
use super::field;

/// Builds the displaced, vertex-colored disc while it still lies in the XY
/// plane; the caller rotates it flat
pub fn ground_geometry(config: &WorldConfig) -> GeometryData {
    let mut geometry = generate_disc(
        config.ground_radius,
        config.ground_segments,
        config.ground_rings,
    );

    for position in &mut geometry.vertices {
        let (x, y) = (position[0], position[1]);
        position[2] = field::ground_height(x, y);
        geometry.colors.push(field::ground_color(x, y));
    }

    // Displacement invalidated the flat +Z normals
    geometry.compute_smooth_normals();
    geometry
}

pub fn build_ground(scene: &mut Scene, config: &WorldConfig) -> usize {
    scene.add_material(Material::new("ground", [1.0, 1.0, 1.0], 0.0));

    let mut object = Object::new("ground");
    object.add_part(&ground_geometry(config), "ground");
    object.set_rotation_x(Rad(-FRAC_PI_2));

    scene.add_object(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heights_follow_the_noise_field() {
        let config = WorldConfig::default();
        let geometry = ground_geometry(&config);

        for position in &geometry.vertices {
            let expected = field::ground_height(position[0], position[1]);
            assert!((position[2] - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn every_vertex_gets_a_terrain_color() {
        let config = WorldConfig::default();
        let geometry = ground_geometry(&config);
        assert_eq!(geometry.colors.len(), geometry.vertices.len());
        for color in &geometry.colors {
            assert!(
                *color == field::GRASS || *color == field::DARK_GRASS || *color == field::DIRT
            );
        }
    }

    #[test]
    fn disc_radius_matches_config() {
        let config = WorldConfig::default();
        let geometry = ground_geometry(&config);
        let max_radius = geometry
            .vertices
            .iter()
            .map(|v| (v[0] * v[0] + v[1] * v[1]).sqrt())
            .fold(0.0f32, f32::max);
        assert!((max_radius - config.ground_radius).abs() < 1e-3);
    }
}
