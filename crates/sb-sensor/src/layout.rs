//! Obstacle placement helpers.

use sb_core::Vec2;
use sb_core::math::{EPSILON, rotate_deg};

use crate::Obstacle;

/// Place obstacles of radius `obstacle_radius` around an axis-aligned ellipse
/// with semi-axes `radii`, spaced so that neighbours on the mean-radius circle
/// just touch.
///
/// Returns an empty list when the ellipse is too small to hold two touching
/// obstacles or any input is non-positive.
pub fn obstacle_ring(center: Vec2, radii: Vec2, obstacle_radius: f32) -> Vec<Obstacle> {
    let mean = 0.5 * (radii.x + radii.y);
    if mean <= EPSILON || obstacle_radius <= EPSILON || obstacle_radius > mean {
        return Vec::new();
    }

    // Chord of length 2r on a circle of radius m subtends acos(1 - 2r²/m²).
    let cos = 1.0 - 2.0 * obstacle_radius * obstacle_radius / (mean * mean);
    let delta = cos.clamp(-1.0, 1.0).acos();
    if delta <= EPSILON {
        return Vec::new();
    }
    let count = (std::f32::consts::TAU / delta).ceil() as usize;
    let step = 360.0 / count as f32;

    let mut dir = Vec2::Y;
    (0..count)
        .map(|_| {
            dir = rotate_deg(dir, step);
            Obstacle::new(center + dir * radii, obstacle_radius)
        })
        .collect()
}
