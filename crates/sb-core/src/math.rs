//! Planar angle and interpolation helpers.
//!
//! All angles are in **degrees**.  A *bearing* is measured clockwise from
//! `+Y`, so `bearing_deg(Vec2::Y) == 0` and `bearing_deg(Vec2::X) == 90`.
//! A positive [`delta_angle_deg`] therefore means "turn right".

use glam::Vec2;

/// Threshold below which lengths, speeds and squared magnitudes are treated
/// as zero.
pub const EPSILON: f32 = 1e-6;

/// Tolerance used when checking that a direction argument is unit length.
pub const UNIT_TOLERANCE: f32 = 1e-3;

/// Bearing of `v` in `(-180, 180]`.  Returns 0 for the zero vector.
#[inline]
pub fn bearing_deg(v: Vec2) -> f32 {
    v.x.atan2(v.y).to_degrees()
}

/// Unit vector pointing along `bearing` degrees.
#[inline]
pub fn from_bearing_deg(bearing: f32) -> Vec2 {
    let (sin, cos) = bearing.to_radians().sin_cos();
    Vec2::new(sin, cos)
}

/// Shortest signed difference `to - from`, wrapped into `(-180, 180]`.
pub fn delta_angle_deg(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Signed angle (degrees, clockwise positive) that rotates `from` onto `to`.
#[inline]
pub fn signed_angle_deg(from: Vec2, to: Vec2) -> f32 {
    delta_angle_deg(bearing_deg(from), bearing_deg(to))
}

/// `v` rotated clockwise by `degrees`.
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos)
}

/// The agent-local right axis: `forward` rotated by −90°.
#[inline]
pub fn right_of(forward: Vec2) -> Vec2 {
    Vec2::new(forward.y, -forward.x)
}

/// Where `value` sits between `a` and `b`, unclamped.  Returns 0 when the
/// interval is degenerate.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < EPSILON {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// `true` if `v` is unit length within [`UNIT_TOLERANCE`].
#[inline]
pub fn is_unit(v: Vec2) -> bool {
    (v.length() - 1.0).abs() <= UNIT_TOLERANCE
}

/// Sign with `0.0` mapped to `+1.0`, so callers always get a side.
#[inline]
pub fn side_sign(x: f32) -> f32 {
    if x < 0.0 { -1.0 } else { 1.0 }
}
