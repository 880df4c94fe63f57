//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive shapes the scene
//! builders compose, eliminating the need for any external model files.
//!
//! ## Supported Primitives
//!
//! - **Cube / box**: unit cube, scaled through a baked transform
//! - **Sphere / sphere section**: UV sphere, hemispheres and domes
//! - **Disc**: tessellated circle with concentric rings
//! - **Cylinder / cone**: tapered side walls with optional caps
//! - **Torus**: ring frames
//! - **Lathe**: profile revolved around the vertical axis
//! - **Extrusion**: convex 2D outline extruded along Z
//! - **Octahedron**: flat-shaded crystal body

pub mod primitives;

pub use primitives::*;

use cgmath::{InnerSpace, Matrix3, Matrix4, Point3, Transform, Vector3};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Optional per-vertex colors; empty means white
    pub colors: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bakes a transform into the vertex data.
    ///
    /// Positions go through the full matrix; normals only through its rotation
    /// part and are re-normalized, which is exact for the rigid and uniformly
    /// scaled transforms the builders use and close enough for their
    /// axis-aligned non-uniform ones.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        let normal_matrix = Matrix3::from_cols(
            matrix.x.truncate(),
            matrix.y.truncate(),
            matrix.z.truncate(),
        );

        for position in &mut self.vertices {
            let p = matrix.transform_point(Point3::new(position[0], position[1], position[2]));
            *position = [p.x, p.y, p.z];
        }

        for normal in &mut self.normals {
            let n = normal_matrix * Vector3::new(normal[0], normal[1], normal[2]);
            if n.magnitude2() > 0.0 {
                let n = n.normalize();
                *normal = [n.x, n.y, n.z];
            }
        }
    }

    /// Recomputes smooth per-vertex normals by accumulating area-weighted
    /// face normals, then normalizing.
    pub fn compute_smooth_normals(&mut self) {
        let mut accumulated = vec![Vector3::new(0.0f32, 0.0, 0.0); self.vertices.len()];

        for triangle in self.indices.chunks(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            let v0 = Vector3::from(self.vertices[i0]);
            let v1 = Vector3::from(self.vertices[i1]);
            let v2 = Vector3::from(self.vertices[i2]);

            // Cross product length encodes triangle area, which weights the sum
            let face_normal = (v1 - v0).cross(v2 - v0);
            accumulated[i0] += face_normal;
            accumulated[i1] += face_normal;
            accumulated[i2] += face_normal;
        }

        self.normals = accumulated
            .into_iter()
            .map(|n| {
                if n.magnitude2() > 0.0 {
                    let n = n.normalize();
                    [n.x, n.y, n.z]
                } else {
                    [0.0, 1.0, 0.0]
                }
            })
            .collect();
    }

    /// Flips triangle winding and negates normals, turning an outward-facing
    /// shell into an inward-facing one (used for the sky dome).
    pub fn invert_winding(&mut self) {
        for triangle in self.indices.chunks_mut(3) {
            triangle.swap(1, 2);
        }
        for normal in &mut self.normals {
            normal[0] = -normal[0];
            normal[1] = -normal[1];
            normal[2] = -normal[2];
        }
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Rad;

    #[test]
    fn transform_bakes_translation_into_positions() {
        let mut geo = generate_cube();
        geo.transform(&Matrix4::from_translation(Vector3::new(0.0, 3.0, 0.0)));
        assert!(geo.vertices.iter().all(|v| v[1] >= 2.5 && v[1] <= 3.5));
    }

    #[test]
    fn transform_keeps_normals_unit_length() {
        let mut geo = generate_sphere(12, 8);
        geo.transform(&(Matrix4::from_angle_y(Rad(0.7)) * Matrix4::from_scale(5.0)));
        for n in &geo.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn smooth_normals_of_a_sphere_point_outward() {
        let mut geo = generate_sphere(16, 12);
        geo.compute_smooth_normals();
        for (v, n) in geo.vertices.iter().zip(geo.normals.iter()) {
            let dot = v[0] * n[0] + v[1] * n[1] + v[2] * n[2];
            assert!(dot > 0.0, "normal should face away from the center");
        }
    }

    #[test]
    fn invert_winding_negates_normals() {
        let mut geo = generate_sphere(8, 6);
        let before = geo.normals.clone();
        geo.invert_winding();
        for (a, b) in before.iter().zip(geo.normals.iter()) {
            assert_eq!([-a[0], -a[1], -a[2]], *b);
        }
    }
}
