//! The mushroom temple
//!
//! A tapered stone drum with a domed cap, a vesica-piscis door in a torus
//! frame, and two rings of emissive stained-glass windows. Everything is
//! baked into one composite object; the temple never moves.

use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::geometry::{
    generate_cylinder, generate_disc, generate_extrusion, generate_sphere_section,
    generate_torus, GeometryData,
};
use crate::gfx::resources::material::{rgb, Material};
use crate::gfx::scene::{Object, Scene};

/// Stained glass: (ring angle, 0xRRGGBB) per window
pub const LOWER_WINDOWS: [(f32, u32); 3] = [
    (FRAC_PI_2, 0x3498db),
    (PI, 0xe74c3c),
    (-FRAC_PI_2, 0xf39c12),
];
pub const DOME_WINDOWS: [(f32, u32); 3] = [
    (0.0, 0x9b59b6),
    (2.0 * PI / 3.0, 0x1abc9c),
    (4.0 * PI / 3.0, 0xe67e22),
];

const BASE_RADIUS_TOP: f32 = 6.0;
const BASE_RADIUS_BOTTOM: f32 = 6.5;
const BASE_HEIGHT: f32 = 8.0;
const DOME_RADIUS: f32 = 5.0;
const DOOR_RADIUS: f32 = 1.5;

/// Samples the vesica piscis outline: two circular arcs of the same radius
/// whose centers sit half a radius apart, meeting at the top and bottom
/// points of the lens
pub fn vesica_outline(radius: f32, steps: usize) -> Vec<[f32; 2]> {
    let mut outline = Vec::with_capacity(2 * steps + 1);
    let sweep = 2.0 * PI / 3.0;

    // Right-hand bulge, bottom to top
    for i in 0..=steps {
        let angle = -PI / 3.0 + sweep * i as f32 / steps as f32;
        outline.push([-radius / 2.0 + radius * angle.cos(), radius * angle.sin()]);
    }
    // Left-hand bulge, top back to bottom; endpoints already emitted
    for i in 1..steps {
        let angle = 2.0 * PI / 3.0 + sweep * i as f32 / steps as f32;
        outline.push([radius / 2.0 + radius * angle.cos(), radius * angle.sin()]);
    }

    outline
}

/// Yaw that turns a +Z-facing part toward the temple axis from ring angle
/// `angle`
fn face_axis_yaw(angle: f32) -> f32 {
    f32::atan2(-angle.cos(), -angle.sin())
}

fn window_pane(size: f32) -> GeometryData {
    generate_disc(size, 32, 1)
}

fn window_frame(size: f32) -> GeometryData {
    generate_torus(size, 0.08, 8, 32)
}

pub fn build_temple(scene: &mut Scene) -> usize {
    scene.add_material(Material::from_hex("temple_base", 0xd4a574, 10.0));
    scene.add_material(Material::from_hex("temple_dome", 0xc85a54, 30.0));
    scene.add_material(Material::from_hex("temple_door", 0x6b4423, 20.0));
    scene.add_material(Material::from_hex("temple_frame", 0x8b6914, 50.0));
    for (_, hex) in LOWER_WINDOWS.iter().chain(DOME_WINDOWS.iter()) {
        scene.add_material(
            Material::from_hex(&format!("window_{:06x}", hex), *hex, 100.0)
                .with_alpha(0.7)
                .with_emission(rgb(*hex), 0.3),
        );
    }

    let mut temple = Object::new("temple");

    // Tapered drum, resting on the ground
    let mut base = generate_cylinder(BASE_RADIUS_TOP, BASE_RADIUS_BOTTOM, BASE_HEIGHT, 32);
    base.transform(&Matrix4::from_translation(Vector3::new(
        0.0,
        BASE_HEIGHT / 2.0,
        0.0,
    )));
    temple.add_part(&base, "temple_base");

    // Dome cap
    let mut dome = generate_sphere_section(32, 16, 0.0, FRAC_PI_2);
    dome.transform(
        &(Matrix4::from_translation(Vector3::new(0.0, BASE_HEIGHT, 0.0))
            * Matrix4::from_scale(DOME_RADIUS)),
    );
    temple.add_part(&dome, "temple_dome");

    // Vesica piscis door on the +Z face, frame slightly proud of the wall
    let mut door = generate_extrusion(&vesica_outline(DOOR_RADIUS, 24), 0.3);
    door.transform(&Matrix4::from_translation(Vector3::new(0.0, 2.5, 6.5)));
    temple.add_part(&door, "temple_door");

    let mut door_frame = generate_torus(1.8, 0.15, 8, 32);
    door_frame.transform(&Matrix4::from_translation(Vector3::new(0.0, 2.5, 6.65)));
    temple.add_part(&door_frame, "temple_frame");

    // Lower ring of windows on the drum wall
    for (angle, hex) in LOWER_WINDOWS {
        add_window(&mut temple, angle, 6.3, 5.0, 0.8, hex);
    }
    // Upper ring set into the dome
    for (angle, hex) in DOME_WINDOWS {
        add_window(&mut temple, angle, 4.5, 9.0, 0.6, hex);
    }

    scene.add_object(temple)
}

fn add_window(temple: &mut Object, angle: f32, ring_radius: f32, height: f32, size: f32, hex: u32) {
    let position = Vector3::new(angle.cos() * ring_radius, height, angle.sin() * ring_radius);
    let orient = Matrix4::from_translation(position)
        * Matrix4::from_angle_y(Rad(face_axis_yaw(angle)));

    let mut pane = window_pane(size);
    pane.transform(&orient);
    temple.add_part(&pane, &format!("window_{:06x}", hex));

    let mut frame = window_frame(size);
    frame.transform(&orient);
    temple.add_part(&frame, "temple_frame");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    };
    use cgmath::Zero;
    use std::f32::consts::TAU;

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.5, 0.0, Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn vesica_outline_is_a_closed_vertical_lens() {
        let outline = vesica_outline(DOOR_RADIUS, 24);
        let top = outline
            .iter()
            .map(|p| p[1])
            .fold(f32::NEG_INFINITY, f32::max);
        let bottom = outline.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
        // The lens meets at +-r*sin(60 deg)
        let expected = DOOR_RADIUS * (PI / 3.0).sin();
        assert!((top - expected).abs() < 1e-4);
        assert!((bottom + expected).abs() < 1e-4);
        // Taller than it is wide
        let width = outline.iter().map(|p| p[0].abs()).fold(0.0f32, f32::max);
        assert!(top - bottom > 2.0 * width);
    }

    #[test]
    fn windows_face_the_temple_axis() {
        for angle in [0.0, FRAC_PI_2, PI, 4.0 * PI / 3.0, TAU - 0.3] {
            let yaw = face_axis_yaw(angle);
            // Rotating the +Z normal by yaw must point back at the axis
            let normal = [yaw.sin(), yaw.cos()];
            let inward = [-angle.cos(), -angle.sin()];
            assert!((normal[0] - inward[0]).abs() < 1e-5);
            assert!((normal[1] - inward[1]).abs() < 1e-5);
        }
    }

    #[test]
    fn temple_is_one_composite_with_all_parts() {
        let mut scene = test_scene();
        let index = build_temple(&mut scene);
        let temple = scene.object(index).unwrap();
        // drum + dome + door + door frame + 6 * (pane + frame)
        assert_eq!(temple.parts.len(), 16);

        let panes = temple
            .parts
            .iter()
            .filter(|p| p.material.starts_with("window_"))
            .count();
        assert_eq!(panes, 6);
    }

    #[test]
    fn window_materials_glow_in_their_own_color() {
        let mut scene = test_scene();
        build_temple(&mut scene);
        for (_, hex) in LOWER_WINDOWS.iter().chain(DOME_WINDOWS.iter()) {
            let material = scene
                .material_manager
                .get_material(&format!("window_{:06x}", hex))
                .expect("window material registered");
            assert_eq!(material.emissive, rgb(*hex));
            assert!(material.emissive_strength > 0.0);
            assert!(material.base_color[3] < 1.0);
        }
    }
}
