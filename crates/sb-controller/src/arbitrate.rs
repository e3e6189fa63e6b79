//! Pure stages of the arbitration pipeline.
//!
//! Kept free of controller state so each stage can be tested on its own and
//! reused by callers that bring their own behaviour storage.

use sb_behavior::LocalForce;
use sb_core::math::EPSILON;
use sb_core::{KinematicLimits, Vec2};

/// Weighted average of the non-abstaining contributions.
///
/// Each item is `(weight, activation, force)`; `None` forces are excluded
/// from both sums.  Returns the blended force and the weight sum.  When the
/// weight sum is zero the force is exactly [`LocalForce::ZERO`].
///
/// # Panics
/// Panics on a negative weight.
pub fn blend<I>(contributions: I) -> (LocalForce, f32)
where
    I: IntoIterator<Item = (f32, f32, Option<LocalForce>)>,
{
    let mut sum = LocalForce::ZERO;
    let mut weight_sum = 0.0f32;
    for (weight, activation, force) in contributions {
        assert!(weight >= 0.0, "behavior weight must be >= 0, got {weight}");
        let Some(force) = force else { continue };
        let w = weight * activation;
        sum += force * w;
        weight_sum += w;
    }
    if weight_sum <= 0.0 {
        return (LocalForce::ZERO, 0.0);
    }
    (sum / weight_sum, weight_sum)
}

/// Tangent bounds for one tick: within the braking/acceleration limits and
/// unable to take speed outside `[0, max_speed]` in a single `dt`.
///
/// If the two intervals do not overlap (the agent is already over
/// `max_speed`), the lower bound wins.
pub fn tangent_bounds(speed: f32, mass: f32, dt: f32, limits: &KinematicLimits) -> (f32, f32) {
    let per_dt = mass / dt;
    let lo = (-speed * per_dt).max(-limits.max_braking_force);
    let hi = ((limits.max_speed - speed) * per_dt).min(limits.max_acceleration_force);
    (lo, hi.max(lo))
}

/// Clamp a blended local force to what the body can do this tick.
///
/// Idempotent: clamping an already clamped force returns it unchanged.
pub fn clamp_local(
    force:  LocalForce,
    speed:  f32,
    mass:   f32,
    dt:     f32,
    limits: &KinematicLimits,
) -> LocalForce {
    let (lo, hi) = tangent_bounds(speed, mass, dt, limits);
    let cap = limits.steering_force_at(speed);
    LocalForce {
        tangent: force.tangent.max(lo).min(hi),
        normal:  force.normal.max(-cap).min(cap),
    }
}

/// Corrective force along the velocity when speed exceeds `max_speed`;
/// zero otherwise.
pub fn speed_governor(velocity: Vec2, max_speed: f32, rate: f32) -> Vec2 {
    let speed = velocity.length();
    if speed <= max_speed || speed < EPSILON {
        return Vec2::ZERO;
    }
    velocity / speed * (max_speed - speed) * rate
}
