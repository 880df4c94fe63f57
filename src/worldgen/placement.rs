//! Angular/radial scatter sampling
//!
//! Repeated scene elements (trees, mushrooms, clouds) are placed on rings
//! around the temple: a uniform angle, a uniform distance, and a uniform
//! scale jitter per instance. No minimum-separation guarantee is made;
//! overlapping placements are accepted behavior.

use std::f32::consts::TAU;
use std::ops::Range;

use cgmath::Vector3;
use rand::Rng;

/// One sampled placement, consumed to build an object transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub angle: f32,
    pub distance: f32,
    pub scale: f32,
}

impl Placement {
    /// Ground-level world position for this placement
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(
            self.angle.cos() * self.distance,
            0.0,
            self.angle.sin() * self.distance,
        )
    }
}

/// Uniform sampler over an angle/distance/scale box
#[derive(Debug, Clone)]
pub struct PlacementSampler {
    pub angle: Range<f32>,
    pub distance: Range<f32>,
    pub scale: Range<f32>,
}

impl PlacementSampler {
    pub fn new(angle: Range<f32>, distance: Range<f32>, scale: Range<f32>) -> Self {
        Self {
            angle,
            distance,
            scale,
        }
    }

    /// Sampler covering the whole circle, the common case for scatter
    pub fn full_circle(distance: Range<f32>, scale: Range<f32>) -> Self {
        Self::new(0.0..TAU, distance, scale)
    }

    /// Draws one placement from the given randomness source
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Placement {
        Placement {
            angle: rng.random_range(self.angle.clone()),
            distance: rng.random_range(self.distance.clone()),
            scale: rng.random_range(self.scale.clone()),
        }
    }

    /// Draws `count` independent placements
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Placement> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}
