//! Per-frame animation
//!
//! A single driving trait with a manager that dispatches once per displayed
//! frame. There is one state - running - and halting the frame loop is the
//! only cancellation.

pub mod drift;

pub use drift::{float_height, CloudDrift, CrystalFloat};

use crate::gfx::scene::Scene;

/// Something advanced once per frame
pub trait Animation {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Advance by `dt` seconds; `elapsed` is the time since startup, the `t`
    /// of every periodic term
    fn update(&mut self, dt: f32, elapsed: f32, scene: &mut Scene);
}

/// Owns the attached animations and runs them in attachment order
pub struct AnimationManager {
    animations: Vec<Box<dyn Animation>>,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self {
            animations: Vec::new(),
        }
    }

    pub fn attach(&mut self, animation: impl Animation + 'static) {
        log::debug!("attaching animation '{}'", animation.name());
        self.animations.push(Box::new(animation));
    }

    pub fn update_all(&mut self, dt: f32, elapsed: f32, scene: &mut Scene) {
        for animation in &mut self.animations {
            animation.update(dt, elapsed, scene);
        }
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}
