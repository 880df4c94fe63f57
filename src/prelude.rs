//! # Glade Prelude
//!
//! Brings the types a typical demo assembly needs into scope:
//!
//! ```no_run
//! use glade::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut app = glade::default();
//! let mut rng = StdRng::seed_from_u64(7);
//! let handles = build_world(app.scene_mut(), &mut rng, &WorldConfig::default());
//! app.attach_animation(CrystalFloat::new(handles.crystals));
//! app.attach_animation(CloudDrift::new(handles.clouds));
//! app.run();
//! ```

// Re-export core application types
pub use crate::app::GladeApp;
pub use crate::default;

// Re-export graphics and scene types
pub use crate::gfx::camera::CameraManager;
pub use crate::gfx::geometry::{
    generate_cone, generate_cube, generate_cylinder, generate_disc, generate_lathe,
    generate_octahedron, generate_sphere, generate_torus, GeometryData,
};
pub use crate::gfx::resources::material::Material;
pub use crate::gfx::scene::{Object, PointLight, Scene};

// Re-export world generation and animation
pub use crate::animation::{Animation, AnimationManager, CloudDrift, CrystalFloat};
pub use crate::worldgen::{build_world, PlacementSampler, WorldConfig, WorldHandles};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
