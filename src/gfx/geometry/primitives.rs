//! # Primitive Shape Generation
//!
//! This module contains functions to generate common 3D primitive shapes.
//! All shapes are generated with proper normals and texture coordinates,
//! use a Y-up coordinate system, and wind triangles counter-clockwise when
//! viewed from outside.

use super::GeometryData;
use std::f32::consts::{PI, TAU};

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes. Each face is
/// built from its own four vertices so normals stay flat.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // (normal, tangent, bitangent) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // front
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // back
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]), // right
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]), // left
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]), // top
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]), // bottom
    ];

    for (normal, tangent, bitangent) in faces {
        let base = data.vertices.len() as u32;
        for (du, dv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let position = [
                normal[0] * 0.5 + tangent[0] * du + bitangent[0] * dv,
                normal[1] * 0.5 + tangent[1] * du + bitangent[1] * dv,
                normal[2] * 0.5 + tangent[2] * du + bitangent[2] * dv,
            ];
            data.vertices.push(position);
            data.normals.push(normal);
            data.tex_coords.push([du + 0.5, dv + 0.5]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    generate_sphere_section(longitude_segments, latitude_segments, 0.0, PI)
}

/// Generate a partial UV sphere swept from `theta_start` (measured from the
/// +Y pole) over `theta_length`
///
/// A sweep of `0.0..PI/2` produces a dome open at its equator, which is how
/// the temple roof and mushroom caps are built.
pub fn generate_sphere_section(
    longitude_segments: u32,
    latitude_segments: u32,
    theta_start: f32,
    theta_length: f32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = theta_start + lat as f32 * theta_length / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;

            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]);
            data.tex_coords.push([
                long as f32 / long_segs as f32,
                lat as f32 / lat_segs as f32,
            ]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(first + 1);
            data.indices.push(second);

            data.indices.push(second);
            data.indices.push(first + 1);
            data.indices.push(second + 1);
        }
    }

    data
}

/// Generate a tessellated disc in the XY plane facing +Z
///
/// # Arguments
/// * `radius` - Disc radius
/// * `segments` - Angular subdivisions
/// * `rings` - Radial subdivisions; more rings give displacement shaders and
///   vertex noise something to work with
pub fn generate_disc(radius: f32, segments: u32, rings: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let rings = rings.max(1);

    // Center vertex, then concentric rings of (segs + 1) vertices each
    data.vertices.push([0.0, 0.0, 0.0]);
    data.normals.push([0.0, 0.0, 1.0]);
    data.tex_coords.push([0.5, 0.5]);

    for ring in 1..=rings {
        let ring_radius = radius * ring as f32 / rings as f32;
        for s in 0..=segs {
            let angle = s as f32 * TAU / segs as f32;
            let (x, y) = (ring_radius * angle.cos(), ring_radius * angle.sin());
            data.vertices.push([x, y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords
                .push([0.5 + x / (2.0 * radius), 0.5 + y / (2.0 * radius)]);
        }
    }

    let ring_start = |ring: u32| 1 + (ring - 1) * (segs + 1);

    // Innermost fan
    for s in 0..segs {
        data.indices.push(0);
        data.indices.push(ring_start(1) + s);
        data.indices.push(ring_start(1) + s + 1);
    }

    // Quads between rings
    for ring in 1..rings {
        for s in 0..segs {
            let inner = ring_start(ring) + s;
            let outer = ring_start(ring + 1) + s;

            data.indices.push(inner);
            data.indices.push(outer);
            data.indices.push(inner + 1);

            data.indices.push(outer);
            data.indices.push(outer + 1);
            data.indices.push(inner + 1);
        }
    }

    data
}

/// Generate a cylinder along the Y axis, centered at the origin
///
/// Separate top and bottom radii give tapered trunks and temple walls; a zero
/// top radius collapses the top ring into an apex. Caps are emitted only for
/// non-zero radii.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;
    // Side normals tilt with the taper
    let slope = (radius_bottom - radius_top) / height;

    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (cos_a, sin_a) = (angle.cos(), angle.sin());
        let normal = unit([cos_a, slope, sin_a]);
        let u = i as f32 / segs as f32;

        data.vertices
            .push([radius_bottom * cos_a, -half_height, radius_bottom * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 0.0]);

        data.vertices
            .push([radius_top * cos_a, half_height, radius_top * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 1.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        data.indices.push(top_current);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    if radius_bottom > 0.0 {
        emit_cap(&mut data, radius_bottom, -half_height, segs, false);
    }
    if radius_top > 0.0 {
        emit_cap(&mut data, radius_top, half_height, segs, true);
    }

    data
}

/// Generate a cone along the Y axis, centered at the origin
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    generate_cylinder(0.0, radius, height, segments)
}

fn emit_cap(data: &mut GeometryData, radius: f32, y: f32, segments: u32, facing_up: bool) {
    let normal = if facing_up {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, -1.0, 0.0]
    };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push(normal);
    data.tex_coords.push([0.5, 0.5]);

    let ring = data.vertices.len() as u32;
    for i in 0..=segments {
        let angle = i as f32 * TAU / segments as f32;
        data.vertices
            .push([radius * angle.cos(), y, radius * angle.sin()]);
        data.normals.push(normal);
        data.tex_coords
            .push([0.5 + angle.cos() * 0.5, 0.5 + angle.sin() * 0.5]);
    }

    for i in 0..segments {
        if facing_up {
            data.indices.push(center);
            data.indices.push(ring + i + 1);
            data.indices.push(ring + i);
        } else {
            data.indices.push(center);
            data.indices.push(ring + i);
            data.indices.push(ring + i + 1);
        }
    }
}

/// Generate a torus in the XY plane facing +Z
///
/// # Arguments
/// * `radius` - Distance from the torus center to the tube center
/// * `tube_radius` - Radius of the tube itself
pub fn generate_torus(
    radius: f32,
    tube_radius: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        let v = j as f32 * TAU / radial as f32;
        for i in 0..=tubular {
            let u = i as f32 * TAU / tubular as f32;

            let ring = radius + tube_radius * v.cos();
            let position = [ring * u.cos(), ring * u.sin(), tube_radius * v.sin()];
            let center = [radius * u.cos(), radius * u.sin(), 0.0];

            data.vertices.push(position);
            data.normals.push(unit([
                position[0] - center[0],
                position[1] - center[1],
                position[2] - center[2],
            ]));
            data.tex_coords
                .push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    for j in 0..radial {
        for i in 0..tubular {
            let a = j * (tubular + 1) + i;
            let b = (j + 1) * (tubular + 1) + i;

            data.indices.push(a);
            data.indices.push(a + 1);
            data.indices.push(b);

            data.indices.push(b);
            data.indices.push(a + 1);
            data.indices.push(b + 1);
        }
    }

    data
}

/// Generate a surface of revolution around the Y axis
///
/// `profile` lists (radius, height) pairs from bottom to top. Normals are
/// reconstructed smoothly from the triangulation, which handles profiles with
/// entasis and capital flares without per-segment math.
pub fn generate_lathe(profile: &[[f32; 2]], segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    assert!(profile.len() >= 2, "lathe profile needs at least two points");

    for (p, point) in profile.iter().enumerate() {
        for s in 0..=segs {
            let angle = s as f32 * TAU / segs as f32;
            data.vertices
                .push([point[0] * angle.cos(), point[1], point[0] * angle.sin()]);
            data.normals.push([0.0, 0.0, 0.0]);
            data.tex_coords.push([
                s as f32 / segs as f32,
                p as f32 / (profile.len() - 1) as f32,
            ]);
        }
    }

    let index = |p: u32, s: u32| p * (segs + 1) + s;
    for p in 0..(profile.len() as u32 - 1) {
        for s in 0..segs {
            data.indices.push(index(p, s));
            data.indices.push(index(p + 1, s));
            data.indices.push(index(p, s + 1));

            data.indices.push(index(p + 1, s));
            data.indices.push(index(p + 1, s + 1));
            data.indices.push(index(p, s + 1));
        }
    }

    data.compute_smooth_normals();
    data
}

/// Extrude a convex 2D outline along +Z
///
/// The outline lies in the XY plane, wound counter-clockwise; the result has
/// a front face at `z = depth`, a back face at `z = 0`, and flat side walls.
pub fn generate_extrusion(outline: &[[f32; 2]], depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let n = outline.len();
    assert!(n >= 3, "extrusion outline needs at least three points");

    // Front face (fan triangulation is valid because the outline is convex)
    let front = data.vertices.len() as u32;
    for point in outline {
        data.vertices.push([point[0], point[1], depth]);
        data.normals.push([0.0, 0.0, 1.0]);
        data.tex_coords.push([point[0], point[1]]);
    }
    for i in 1..(n as u32 - 1) {
        data.indices.push(front);
        data.indices.push(front + i);
        data.indices.push(front + i + 1);
    }

    // Back face
    let back = data.vertices.len() as u32;
    for point in outline {
        data.vertices.push([point[0], point[1], 0.0]);
        data.normals.push([0.0, 0.0, -1.0]);
        data.tex_coords.push([point[0], point[1]]);
    }
    for i in 1..(n as u32 - 1) {
        data.indices.push(back);
        data.indices.push(back + i + 1);
        data.indices.push(back + i);
    }

    // Side walls, one quad per edge with a flat outward normal
    for i in 0..n {
        let j = (i + 1) % n;
        let edge = [outline[j][0] - outline[i][0], outline[j][1] - outline[i][1]];
        let normal = unit([edge[1], -edge[0], 0.0]);

        let base = data.vertices.len() as u32;
        for (point, z) in [
            (outline[i], 0.0),
            (outline[j], 0.0),
            (outline[j], depth),
            (outline[i], depth),
        ] {
            data.vertices.push([point[0], point[1], z]);
            data.normals.push(normal);
            data.tex_coords.push([point[0], z]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a flat-shaded octahedron, the classic faceted crystal body
pub fn generate_octahedron(radius: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let top = [0.0, radius, 0.0];
    let bottom = [0.0, -radius, 0.0];
    let px = [radius, 0.0, 0.0];
    let nx = [-radius, 0.0, 0.0];
    let pz = [0.0, 0.0, radius];
    let nz = [0.0, 0.0, -radius];

    let faces = [
        [top, pz, px],
        [top, px, nz],
        [top, nz, nx],
        [top, nx, pz],
        [bottom, px, pz],
        [bottom, nz, px],
        [bottom, nx, nz],
        [bottom, pz, nx],
    ];

    for face in faces {
        let base = data.vertices.len() as u32;
        let e1 = sub(face[1], face[0]);
        let e2 = sub(face[2], face[0]);
        let normal = unit(cross(e1, e2));
        for vertex in face {
            data.vertices.push(vertex);
            data.normals.push(normal);
            data.tex_coords.push([0.5, 0.5]);
        }
        data.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    data
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn unit(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(data: &GeometryData) {
        assert_eq!(data.vertices.len(), data.normals.len());
        assert_eq!(data.vertices.len(), data.tex_coords.len());
        assert_eq!(data.indices.len() % 3, 0);
        let max = *data.indices.iter().max().unwrap() as usize;
        assert!(max < data.vertices.len());
    }

    /// Every non-degenerate triangle must wind counter-clockwise as seen from
    /// the side its vertex normals point toward, or back-face culling would
    /// hide the outside of the shape
    fn assert_winding_faces_outward(data: &GeometryData) {
        for triangle in data.indices.chunks(3) {
            let [a, b, c] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            let face = cross(
                sub(data.vertices[b], data.vertices[a]),
                sub(data.vertices[c], data.vertices[a]),
            );
            let area2 = face[0] * face[0] + face[1] * face[1] + face[2] * face[2];
            if area2 < 1e-12 {
                continue;
            }
            let n = data.normals[a];
            let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
            assert!(dot > 0.0, "triangle winds away from its normals");
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
        assert_consistent(&cube);
        assert_winding_faces_outward(&cube);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_consistent(&sphere);
        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_dome_stays_above_equator() {
        let dome = generate_sphere_section(16, 8, 0.0, std::f32::consts::FRAC_PI_2);
        assert_consistent(&dome);
        for v in &dome.vertices {
            assert!(v[1] >= -1e-5, "dome vertex below its equator: {:?}", v);
        }
    }

    #[test]
    fn test_disc_generation() {
        let disc = generate_disc(4.0, 8, 3);
        assert_consistent(&disc);
        // Center + 3 rings of 9 vertices
        assert_eq!(disc.vertices.len(), 1 + 3 * 9);
        for v in &disc.vertices {
            assert!((v[0] * v[0] + v[1] * v[1]).sqrt() <= 4.0 + 1e-4);
            assert_eq!(v[2], 0.0);
        }
    }

    #[test]
    fn test_cylinder_taper_and_caps() {
        let cylinder = generate_cylinder(0.3, 0.5, 2.0, 8);
        assert_consistent(&cylinder);
        let top: Vec<_> = cylinder.vertices.iter().filter(|v| v[1] == 1.0).collect();
        assert!(!top.is_empty());

        // A cone has no top cap ring beyond the collapsed apex
        let cone = generate_cone(1.0, 2.0, 8);
        assert_consistent(&cone);
        assert!(cone.triangle_count() < cylinder.triangle_count());
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(1.8, 0.15, 8, 32);
        assert_consistent(&torus);
        assert_winding_faces_outward(&torus);
        for v in &torus.vertices {
            let ring_distance = (v[0] * v[0] + v[1] * v[1]).sqrt();
            assert!((ring_distance - 1.8).abs() <= 0.15 + 1e-4);
        }
    }

    #[test]
    fn test_lathe_generation() {
        let profile = [[0.6, 0.0], [0.5, 0.4], [0.5, 3.6], [0.6, 4.0]];
        let lathe = generate_lathe(&profile, 16);
        assert_consistent(&lathe);
        for n in &lathe.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "lathe normals must be unit length");
        }
    }

    #[test]
    fn test_extrusion_generation() {
        let outline = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        let extrusion = generate_extrusion(&outline, 0.3);
        assert_consistent(&extrusion);
        assert_winding_faces_outward(&extrusion);
        assert!(extrusion.vertices.iter().any(|v| v[2] == 0.3));
        assert!(extrusion.vertices.iter().any(|v| v[2] == 0.0));
    }

    #[test]
    fn test_octahedron_generation() {
        let crystal = generate_octahedron(0.5);
        assert_consistent(&crystal);
        assert_winding_faces_outward(&crystal);
        assert_eq!(crystal.triangle_count(), 8);
        // Flat shading duplicates vertices per face
        assert_eq!(crystal.vertices.len(), 24);
    }
}
