//! Pure geometry shared by the avoidance behaviours.

use sb_core::Vec2;
use sb_core::math::{self, EPSILON};

// ── Closest approach ──────────────────────────────────────────────────────────

/// When and how close two constant-velocity bodies pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClosestApproach {
    /// Seconds from now, `>= 0`.
    pub time:     f32,
    /// Separation at `time`.
    pub distance: f32,
    /// Offset of the other body from this one at `time`.
    pub offset:   Vec2,
}

/// Time and distance of closest approach given the other body's position
/// and velocity relative to this one.
///
/// Returns `None` when the bodies are not converging: equal velocities
/// (`|rel_vel|² ≈ 0`) or a closest approach already in the past.
pub fn closest_approach(rel_pos: Vec2, rel_vel: Vec2) -> Option<ClosestApproach> {
    let speed_sq = rel_vel.length_squared();
    if speed_sq < EPSILON {
        return None;
    }
    let time = -rel_pos.dot(rel_vel) / speed_sq;
    if time < 0.0 {
        return None;
    }
    let offset = rel_pos + rel_vel * time;
    Some(ClosestApproach { time, distance: offset.length(), offset })
}

// ── Obstacle cone ─────────────────────────────────────────────────────────────

/// How a circular obstacle sits relative to the agent's heading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleCone {
    /// Signed angle from `forward` to the obstacle centre, clockwise positive.
    pub relative_bearing: f32,
    /// Half-angle subtended by the obstacle inflated by the clearance, in
    /// `[0, 90]`.
    pub half_angle:       f32,
    /// Distance from the agent to the obstacle's (uninflated) boundary.
    pub distance_to_boundary: f32,
    pub distance_to_center:   f32,
}

impl ObstacleCone {
    /// `true` if the inflated cone contains the forward axis.
    #[inline]
    pub fn blocks_forward(&self) -> bool {
        self.relative_bearing.abs() <= self.half_angle
    }

    /// Bearing offset from `forward` to the edge of the cone nearest the
    /// forward axis.
    #[inline]
    pub fn nearer_edge(&self) -> f32 {
        self.relative_bearing - math::side_sign(self.relative_bearing) * self.half_angle
    }
}

/// Angular footprint of an obstacle at `center` with `radius`, inflated by
/// `clearance`, as seen from `position` facing `forward`.
///
/// `None` when the agent sits on the obstacle centre.
pub fn obstacle_cone(
    position:  Vec2,
    forward:   Vec2,
    center:    Vec2,
    radius:    f32,
    clearance: f32,
) -> Option<ObstacleCone> {
    let to_center = center - position;
    let distance = to_center.length();
    if distance < EPSILON {
        return None;
    }
    let ratio = ((radius + clearance) / distance).min(1.0);
    Some(ObstacleCone {
        relative_bearing:     math::signed_angle_deg(forward, to_center),
        half_angle:           ratio.asin().to_degrees(),
        distance_to_boundary: distance - radius,
        distance_to_center:   distance,
    })
}
