//! # Scene Management Module
//!
//! Holds the scene container and the composite object types the world
//! builders produce.
//!
//! ## Key Components
//!
//! - [`Scene`] - objects, materials, point lights, and the camera manager
//! - [`Object`] - a named transform node owning mesh/material parts
//! - [`Vertex3D`] - vertex format with position, normal, and color

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawMesh, Mesh, Object, Part};
pub use scene::{PointLight, Scene};
pub use vertex::Vertex3D;
