// src/lib.rs
//! Glade
//!
//! A procedural "fantasy nature" scene demo built on wgpu and winit: terrain
//! shaped by a sine-sum noise field, a sky dome, drifting clouds, a domed
//! mushroom temple, scattered trees and mushrooms, and crystal altars whose
//! gems float and glow, all composited through an optional watercolor
//! post-processing pass.

pub mod animation;
pub mod app;
pub mod gfx;
pub mod prelude;
pub mod wgpu_utils;
pub mod worldgen;

// Re-export main types for convenience
pub use app::GladeApp;

/// Creates a default Glade application instance
pub fn default() -> GladeApp {
    pollster::block_on(GladeApp::new())
}
