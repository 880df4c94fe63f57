//! # Procedural world generation
//!
//! Assembles the whole fantasy-nature scene: terrain, sky, clouds, the
//! temple, trees, mushrooms, and crystal altars. All randomness flows from a
//! caller-supplied [`rand::Rng`] and all constants from [`WorldConfig`], so a
//! seeded build is reproducible object-for-object.

pub mod altar;
pub mod config;
pub mod field;
pub mod flora;
pub mod placement;
pub mod sky;
pub mod temple;
pub mod terrain;

pub use config::WorldConfig;
pub use placement::{Placement, PlacementSampler};

use cgmath::{Matrix4, Vector3};
use rand::Rng;

use crate::gfx::scene::Scene;

/// Links an animated crystal to its scene object and glow light
#[derive(Debug, Clone, Copy)]
pub struct CrystalHandle {
    /// Index of the crystal object in the scene
    pub object: usize,
    /// Index of the paired point light
    pub light: usize,
    /// Resting position the float oscillates around
    pub base_position: Vector3<f32>,
    /// Phase offset so the crystals bob out of step
    pub phase: f32,
}

/// Links a drifting cloud to its scene object and resting transform
#[derive(Debug, Clone, Copy)]
pub struct CloudHandle {
    pub object: usize,
    pub base_transform: Matrix4<f32>,
}

/// Everything the animation updater needs to drive the built world
pub struct WorldHandles {
    pub crystals: Vec<CrystalHandle>,
    pub clouds: Vec<CloudHandle>,
}

/// Builds the complete scene and returns the animation handles.
///
/// Translucent surfaces rely on draw order instead of a sorting pass: the
/// sky goes in first and the clouds last.
pub fn build_world<R: Rng + ?Sized>(
    scene: &mut Scene,
    rng: &mut R,
    config: &WorldConfig,
) -> WorldHandles {
    sky::build_sky_dome(scene, config);
    terrain::build_ground(scene, config);
    temple::build_temple(scene);
    flora::scatter_trees(scene, rng, config);
    flora::scatter_mushrooms(scene, rng, config);
    let crystals = altar::build_altars(scene, rng);
    let clouds = sky::build_clouds(scene, rng, config);

    log::info!(
        "built world: {} objects, {} point lights",
        scene.objects.len(),
        scene.point_lights.len()
    );

    WorldHandles { crystals, clouds }
}
