//! World generation constants
//!
//! Every count, range, and placement the builders use lives here, passed
//! explicitly so nothing reads global state and tests can shrink or grow the
//! world at will.

use std::f32::consts::PI;
use std::ops::Range;

/// Fixed altar ring: (angle, distance) pairs around the temple
pub const ALTAR_RING: [(f32, f32); 5] = [
    (0.0, 25.0),
    (2.0 * PI / 3.0, 25.0),
    (4.0 * PI / 3.0, 25.0),
    (PI / 3.0, 28.0),
    (PI, 28.0),
];

#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub ground_radius: f32,
    pub ground_segments: u32,
    pub ground_rings: u32,

    pub sky_radius: f32,

    pub cloud_count: usize,
    pub cloud_distance: Range<f32>,
    pub cloud_height: Range<f32>,
    pub cloud_scale: Range<f32>,

    pub deciduous_count: usize,
    pub deciduous_distance: Range<f32>,
    pub deciduous_scale: Range<f32>,

    pub pine_count: usize,
    pub pine_distance: Range<f32>,
    pub pine_scale: Range<f32>,

    pub mushroom_count: usize,
    pub mushroom_distance: Range<f32>,
    pub mushroom_scale: Range<f32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_radius: 40.0,
            ground_segments: 64,
            ground_rings: 16,

            sky_radius: 500.0,

            cloud_count: 15,
            cloud_distance: 30.0..70.0,
            cloud_height: 15.0..30.0,
            cloud_scale: 0.8..1.4,

            deciduous_count: 8,
            deciduous_distance: 15.0..30.0,
            deciduous_scale: 0.8..1.3,

            pine_count: 6,
            pine_distance: 18.0..30.0,
            pine_scale: 0.7..1.3,

            mushroom_count: 20,
            mushroom_distance: 8.0..33.0,
            mushroom_scale: 0.3..0.7,
        }
    }
}
