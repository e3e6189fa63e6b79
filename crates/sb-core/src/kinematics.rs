//! Per-agent kinematic state and the limits that bound steering forces.

use glam::Vec2;

use crate::math::{self, EPSILON};
use crate::{SbError, SbResult};

// ── KinematicState ────────────────────────────────────────────────────────────

/// Snapshot of one agent's body: what the integrator last wrote and what
/// every behaviour reads.
///
/// `forward` is owned by the steering controller (re-estimated from velocity
/// each tick) and is kept unit length.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub forward:  Vec2,
    /// Always `> 0`.
    pub mass:     f32,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            forward:  Vec2::Y,
            mass:     1.0,
        }
    }
}

impl KinematicState {
    /// A stationary body at `position` facing `bearing` degrees.
    pub fn at_rest(position: Vec2, bearing: f32, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            forward:  math::from_bearing_deg(bearing),
            mass,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Bearing of `forward` in degrees.
    #[inline]
    pub fn bearing_deg(&self) -> f32 {
        math::bearing_deg(self.forward)
    }

    #[inline]
    pub fn right(&self) -> Vec2 {
        math::right_of(self.forward)
    }
}

// ── KinematicLimits ───────────────────────────────────────────────────────────

/// Force and speed bounds for one agent, plus the gains used to turn a
/// desired velocity into force components.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KinematicLimits {
    pub max_speed:              f32,
    pub max_acceleration_force: f32,
    pub max_braking_force:      f32,
    /// Lateral force cap reached at `speed_for_max_steering_force`.
    pub max_steering_force:     f32,
    /// Speed at which the full steering cap becomes available.  The cap
    /// ramps linearly from 0 at rest.  `0` disables the ramp.
    pub speed_for_max_steering_force: f32,
    /// Tangent force per unit of speed error.
    pub tangent_force_slope:    f32,
    /// Normal force per degree of heading error.
    pub normal_force_slope:     f32,
}

impl Default for KinematicLimits {
    fn default() -> Self {
        Self {
            max_speed:                    10.0,
            max_acceleration_force:       10.0,
            max_braking_force:            10.0,
            max_steering_force:           10.0,
            speed_for_max_steering_force: 10.0,
            tangent_force_slope:          10.0,
            normal_force_slope:           0.5,
        }
    }
}

impl KinematicLimits {
    /// Lateral force cap at `speed`.
    pub fn steering_force_at(&self, speed: f32) -> f32 {
        if self.speed_for_max_steering_force <= EPSILON {
            return self.max_steering_force;
        }
        let t = math::clamp01(math::inverse_lerp(0.0, self.speed_for_max_steering_force, speed));
        math::lerp(0.0, self.max_steering_force, t)
    }

    /// Distance needed to stop from `max_speed` under full braking.
    ///
    /// Returns 0 if braking force is zero (the agent can never stop, so any
    /// radius derived from this collapses).
    pub fn max_stopping_distance(&self, mass: f32) -> f32 {
        if self.max_braking_force <= EPSILON {
            return 0.0;
        }
        self.max_speed * self.max_speed * mass / (2.0 * self.max_braking_force)
    }

    /// Reject negative or non-finite values.
    pub fn validate(&self) -> SbResult<()> {
        let fields = [
            ("max_speed", self.max_speed),
            ("max_acceleration_force", self.max_acceleration_force),
            ("max_braking_force", self.max_braking_force),
            ("max_steering_force", self.max_steering_force),
            ("speed_for_max_steering_force", self.speed_for_max_steering_force),
            ("tangent_force_slope", self.tangent_force_slope),
            ("normal_force_slope", self.normal_force_slope),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SbError::Config(format!(
                    "kinematic limit `{name}` must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
