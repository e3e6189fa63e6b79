//! Shared steering helpers every behaviour delegates to.
//!
//! All helpers turn a *desire* (velocity, direction, point) into local force
//! components using the agent's [`KinematicLimits`](sb_core::KinematicLimits)
//! gains.  None of them clamp; that is the controller's job.

use sb_core::Vec2;
use sb_core::math::{self, EPSILON};

use crate::{LocalForce, SteeringContext};

/// Normal force that turns the agent towards `desired_bearing`.
///
/// Heading error is `wrap(current − desired)` in `(−180, 180]`; the force is
/// `−error · normal_force_slope`, so a target to the right yields a positive
/// (rightward) normal.
#[inline]
pub fn normal_for_bearing(ctx: &SteeringContext<'_>, desired_bearing: f32) -> f32 {
    let error = math::delta_angle_deg(desired_bearing, ctx.kinematics.bearing_deg());
    -error * ctx.limits.normal_force_slope
}

/// Local force that drives the agent's velocity towards `desired`.
///
/// A (near-)zero `desired` has no heading, so only the tangent component is
/// produced: the agent brakes without turning.
pub fn force_for_velocity(ctx: &SteeringContext<'_>, desired: Vec2) -> LocalForce {
    let desired_speed = desired.length();
    let tangent = (desired_speed - ctx.speed()) * ctx.limits.tangent_force_slope;
    let normal = if desired_speed < EPSILON {
        0.0
    } else {
        normal_for_bearing(ctx, math::bearing_deg(desired))
    };
    LocalForce { normal, tangent }
}

/// [`force_for_velocity`] with `desired = dir · max_speed · speed_multiplier`.
///
/// # Panics
/// Panics if `dir` is not unit length.
pub fn force_for_direction(ctx: &SteeringContext<'_>, dir: Vec2, speed_multiplier: f32) -> LocalForce {
    assert!(math::is_unit(dir), "steering direction must be unit length, got {dir}");
    force_for_velocity(ctx, dir * ctx.limits.max_speed * speed_multiplier)
}

/// Speed scale for approaching a point `distance` away.
///
/// Ramps linearly from 0 at the point to 1 at `braking_radius` (no ramp when
/// `braking_radius <= 0`), and is exactly 0 inside `epsilon_radius`.
pub fn arrival_speed_multiplier(distance: f32, braking_radius: f32, epsilon_radius: f32) -> f32 {
    if distance < epsilon_radius {
        return 0.0;
    }
    if braking_radius > 0.0 {
        math::clamp01(math::inverse_lerp(0.0, braking_radius, distance))
    } else {
        1.0
    }
}

/// Head for `target` at full speed, slowing inside `braking_radius` and
/// stopping inside `epsilon_radius`.
///
/// Returns `None` when the agent sits on the target and no braking applies,
/// since there is no direction to steer in.
pub fn seek(
    ctx:            &SteeringContext<'_>,
    target:         Vec2,
    braking_radius: f32,
    epsilon_radius: f32,
) -> Option<LocalForce> {
    let offset = target - ctx.position();
    let distance = offset.length();
    let multiplier = arrival_speed_multiplier(distance, braking_radius, epsilon_radius);
    if multiplier <= 0.0 {
        return Some(force_for_velocity(ctx, Vec2::ZERO));
    }
    if distance < EPSILON {
        return None;
    }
    Some(force_for_direction(ctx, offset / distance, multiplier))
}

/// [`seek`] with an arrival ramp.
#[inline]
pub fn arrival(
    ctx:            &SteeringContext<'_>,
    target:         Vec2,
    braking_radius: f32,
    epsilon_radius: f32,
) -> Option<LocalForce> {
    seek(ctx, target, braking_radius, epsilon_radius)
}

/// Full speed directly away from `threat`.  `None` when standing on it.
pub fn flee(ctx: &SteeringContext<'_>, threat: Vec2) -> Option<LocalForce> {
    let away = ctx.position() - threat;
    let distance = away.length();
    if distance < EPSILON {
        return None;
    }
    Some(force_for_direction(ctx, away / distance, 1.0))
}
