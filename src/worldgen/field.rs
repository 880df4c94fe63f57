//! Deterministic surface fields
//!
//! A hand-rolled low-frequency noise proxy built from summed sine/cosine
//! terms. The same scalar field displaces the terrain vertices and picks
//! among the three ground colors, so height and color stay correlated. The
//! field is pure: identical inputs always produce identical outputs, with no
//! seed and no state.

use crate::gfx::resources::material::rgb;

/// Vertical exaggeration applied to the raw noise value
pub const HEIGHT_SCALE: f32 = 0.8;

pub const GRASS: [f32; 3] = [0x5d as f32 / 255.0, 0x8a as f32 / 255.0, 0x3a as f32 / 255.0];
pub const DARK_GRASS: [f32; 3] = [0x4a as f32 / 255.0, 0x6b as f32 / 255.0, 0x2f as f32 / 255.0];
pub const DIRT: [f32; 3] = [0x8b as f32 / 255.0, 0x73 as f32 / 255.0, 0x55 as f32 / 255.0];

/// Low-frequency noise proxy in roughly [-1.6, 1.6]
pub fn surface_noise(x: f32, y: f32) -> f32 {
    0.5 * ((0.3 * x).sin() + (0.3 * y).cos()) + 0.3 * ((0.7 * x).sin() + (0.5 * y).cos())
}

/// Terrain height displacement at planar coordinates (x, y)
pub fn ground_height(x: f32, y: f32) -> f32 {
    surface_noise(x, y) * HEIGHT_SCALE
}

/// Terrain color at planar coordinates (x, y)
pub fn ground_color(x: f32, y: f32) -> [f32; 3] {
    let mix_factor = ((0.5 * x + 0.7 * y).sin() + 1.0) * 0.5;
    let noise_factor = (surface_noise(x, y) + 1.0) * 0.5;
    select_ground_color(mix_factor, noise_factor)
}

/// Threshold logic shared by [`ground_color`]: dirt on high mix, darker
/// grass on high noise, grass otherwise
pub fn select_ground_color(mix_factor: f32, noise_factor: f32) -> [f32; 3] {
    if mix_factor > 0.7 {
        DIRT
    } else if noise_factor > 0.6 {
        DARK_GRASS
    } else {
        GRASS
    }
}

/// Sky dome vertex color: a lerp from the horizon tone up to the zenith
pub fn sky_gradient(height: f32, radius: f32) -> [f32; 3] {
    let horizon = rgb(0xb0d4f1);
    let zenith = rgb(0x4a90d9);
    let t = ((height + radius) / (2.0 * radius)).clamp(0.0, 1.0);
    [
        horizon[0] + (zenith[0] - horizon[0]) * t,
        horizon[1] + (zenith[1] - horizon[1]) * t,
        horizon[2] + (zenith[2] - horizon[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_pure() {
        for &(x, y) in &[(0.0, 0.0), (12.5, -3.75), (-40.0, 40.0), (0.1, 999.9)] {
            assert_eq!(surface_noise(x, y), surface_noise(x, y));
            assert_eq!(ground_height(x, y), ground_height(x, y));
            assert_eq!(ground_color(x, y), ground_color(x, y));
        }
    }

    #[test]
    fn height_is_scaled_noise() {
        let (x, y) = (7.3, -2.1);
        assert_eq!(ground_height(x, y), surface_noise(x, y) * HEIGHT_SCALE);
    }

    #[test]
    fn origin_value_is_known() {
        // sin(0) = 0, cos(0) = 1 in both bands
        assert!((surface_noise(0.0, 0.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn color_thresholds_pick_each_band() {
        assert_eq!(select_ground_color(0.8, 0.1), DIRT);
        assert_eq!(select_ground_color(0.71, 0.9), DIRT); // mix wins over noise
        assert_eq!(select_ground_color(0.2, 0.7), DARK_GRASS);
        assert_eq!(select_ground_color(0.2, 0.2), GRASS);
    }

    #[test]
    fn all_three_colors_appear_on_the_ground() {
        let mut seen_grass = false;
        let mut seen_dark = false;
        let mut seen_dirt = false;
        for i in -40..=40 {
            for j in -40..=40 {
                match ground_color(i as f32, j as f32) {
                    c if c == GRASS => seen_grass = true,
                    c if c == DARK_GRASS => seen_dark = true,
                    c if c == DIRT => seen_dirt = true,
                    _ => unreachable!(),
                }
            }
        }
        assert!(seen_grass && seen_dark && seen_dirt);
    }

    #[test]
    fn sky_gradient_interpolates_horizon_to_zenith() {
        let radius = 500.0;
        assert_eq!(sky_gradient(-radius, radius), rgb(0xb0d4f1));
        let zenith = sky_gradient(radius, radius);
        for (channel, expected) in zenith.iter().zip(rgb(0x4a90d9)) {
            assert!((channel - expected).abs() < 1e-6);
        }
        let mid = sky_gradient(0.0, radius);
        assert!(mid[2] > rgb(0x4a90d9)[2].min(rgb(0xb0d4f1)[2]));
    }
}
