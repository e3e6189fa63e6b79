//! Avoidance behaviours: static obstacles and moving agents.

use sb_core::math::{self, EPSILON};
use sb_core::{SensorId, Vec2};
use tracing::warn;

use crate::geometry::{self, ClosestApproach, ObstacleCone};
use crate::steer;
use crate::{BehaviorError, BehaviorResult, BehaviorState, LocalForce, SteeringBehavior, SteeringContext};

// ── ObstacleAvoidance ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObstacleAvoidanceConfig {
    /// Radius of the agent's own hull.
    pub hull_radius:     f32,
    /// Extra clearance added to every obstacle when sizing its cone.
    pub safety_distance: f32,
    /// Boundary distance at which avoidance reaches full severity.
    pub min_distance:    f32,
    /// Boundary distance beyond which avoidance has no effect.
    pub max_distance:    f32,
}

impl Default for ObstacleAvoidanceConfig {
    fn default() -> Self {
        Self {
            hull_radius:     0.5,
            safety_distance: 0.0,
            min_distance:    1.0,
            max_distance:    5.0,
        }
    }
}

impl ObstacleAvoidanceConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !(self.hull_radius >= 0.0 && self.safety_distance >= 0.0) {
            return Err(BehaviorError::Config(format!(
                "hull radius and safety distance must be >= 0, got {} and {}",
                self.hull_radius, self.safety_distance
            )));
        }
        if !(self.min_distance.is_finite() && self.max_distance.is_finite())
            || self.min_distance >= self.max_distance
        {
            return Err(BehaviorError::Config(format!(
                "obstacle avoidance needs min_distance < max_distance, got {} >= {}",
                self.min_distance, self.max_distance
            )));
        }
        Ok(())
    }
}

/// Steer around sensed circular obstacles that block the forward axis.
///
/// Each obstacle is inflated by the hull radius plus a safety distance and
/// seen as an angular cone.  Of the cones containing the forward axis, the
/// obstacle whose boundary is nearest wins, and the agent turns towards the
/// nearer edge of its cone with severity
/// `clamp01(inverse_lerp(max_distance, min_distance, boundary_distance))`.
/// An agent already inside an obstacle's hull gets full steering authority
/// away from it.
#[derive(Clone, Debug)]
pub struct ObstacleAvoidance {
    pub sensor: SensorId,
    pub config: ObstacleAvoidanceConfig,
    state:      BehaviorState,
}

impl ObstacleAvoidance {
    pub fn new(sensor: SensorId, config: ObstacleAvoidanceConfig, weight: f32) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self { sensor, config, state: BehaviorState::new(weight) })
    }

    fn severity(&self, distance_to_boundary: f32) -> f32 {
        math::clamp01(math::inverse_lerp(
            self.config.max_distance,
            self.config.min_distance,
            distance_to_boundary,
        ))
    }
}

impl SteeringBehavior for ObstacleAvoidance {
    fn name(&self) -> &'static str {
        "obstacle_avoidance"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let clearance = self.config.hull_radius + self.config.safety_distance;

        let mut inside: Option<ObstacleCone> = None;
        let mut nearest: Option<ObstacleCone> = None;
        for obstacle in ctx.sensed_obstacles(self.sensor) {
            let Some(cone) = geometry::obstacle_cone(
                ctx.position(),
                ctx.forward(),
                obstacle.position,
                obstacle.radius,
                clearance,
            ) else {
                continue;
            };

            if cone.distance_to_center < obstacle.radius + self.config.hull_radius {
                if inside.is_none_or(|c| cone.distance_to_boundary < c.distance_to_boundary) {
                    inside = Some(cone);
                }
                continue;
            }
            if !cone.blocks_forward() {
                continue;
            }
            if nearest.is_none_or(|c| cone.distance_to_boundary < c.distance_to_boundary) {
                nearest = Some(cone);
            }
        }

        if let Some(cone) = inside {
            warn!(
                agent = %ctx.agent,
                distance = cone.distance_to_center,
                "agent is inside an obstacle hull"
            );
            self.state.activation = 1.0;
            let away = -math::side_sign(cone.relative_bearing);
            return Some(LocalForce::lateral(away * ctx.limits.max_steering_force));
        }

        let cone = nearest?;
        let severity = self.severity(cone.distance_to_boundary);
        let target_bearing = ctx.kinematics.bearing_deg() + cone.nearer_edge();
        self.state.activate(severity);
        Some(LocalForce::lateral(steer::normal_for_bearing(ctx, target_bearing) * severity))
    }
}

// ── AgentAvoidance ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentAvoidanceConfig {
    /// Predicted separation below which a collision is flagged.
    pub safety_distance: f32,
    /// Collisions further than this many seconds ahead are ignored.
    pub time_horizon:    f32,
}

impl Default for AgentAvoidanceConfig {
    fn default() -> Self {
        Self { safety_distance: 0.5, time_horizon: 2.0 }
    }
}

impl AgentAvoidanceConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !(self.safety_distance > 0.0 && self.safety_distance.is_finite()) {
            return Err(BehaviorError::Config(format!(
                "agent avoidance safety_distance must be > 0, got {}",
                self.safety_distance
            )));
        }
        if !(self.time_horizon > 0.0 && self.time_horizon.is_finite()) {
            return Err(BehaviorError::Config(format!(
                "agent avoidance time_horizon must be > 0, got {}",
                self.time_horizon
            )));
        }
        Ok(())
    }
}

/// Predictive avoidance of sensed agents by time of closest approach.
///
/// Every sensed agent whose predicted minimum separation falls below
/// `safety_distance` within `time_horizon` is flagged; the earliest one
/// wins.  The response is a lateral push of
/// `max_steering_force · severity` away from the side the other agent will
/// be on at closest approach, where
/// `severity = (1 − distance / safety_distance) · clamp01(inverse_lerp(time_horizon, 0, time))`.
/// A dead-centre approach turns right.
#[derive(Clone, Debug)]
pub struct AgentAvoidance {
    pub sensor: SensorId,
    pub config: AgentAvoidanceConfig,
    state:      BehaviorState,
}

impl AgentAvoidance {
    pub fn new(sensor: SensorId, config: AgentAvoidanceConfig, weight: f32) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self { sensor, config, state: BehaviorState::new(weight) })
    }

    /// Earliest flagged approach among the agents inside the sensor.
    pub fn predicted_collision(&self, ctx: &SteeringContext<'_>) -> Option<ClosestApproach> {
        let agents = ctx.world.agents;
        let mut earliest: Option<ClosestApproach> = None;
        for other in ctx.sensed_agents(self.sensor) {
            let i = other.index();
            let rel_pos = agents.position[i] - ctx.position();
            let rel_vel = agents.velocity[i] - ctx.velocity();
            let Some(approach) = geometry::closest_approach(rel_pos, rel_vel) else {
                continue;
            };
            if approach.distance >= self.config.safety_distance
                || approach.time > self.config.time_horizon
            {
                continue;
            }
            if earliest.is_none_or(|e| approach.time < e.time) {
                earliest = Some(approach);
            }
        }
        earliest
    }
}

impl SteeringBehavior for AgentAvoidance {
    fn name(&self) -> &'static str {
        "agent_avoidance"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let approach = self.predicted_collision(ctx)?;

        let closeness = 1.0 - approach.distance / self.config.safety_distance;
        let urgency = math::clamp01(math::inverse_lerp(self.config.time_horizon, 0.0, approach.time));
        let severity = math::clamp01(closeness * urgency);

        let side = approach.offset.dot(ctx.kinematics.right());
        let away = if side > EPSILON { -1.0 } else { 1.0 };
        self.state.activate(severity);
        Some(LocalForce::lateral(away * ctx.limits.max_steering_force * severity))
    }
}

// ── ObstacleEvade ─────────────────────────────────────────────────────────────

/// Flee the mean position of every obstacle inside `sensor`.
#[derive(Clone, Debug)]
pub struct ObstacleEvade {
    pub sensor: SensorId,
    state:      BehaviorState,
}

impl ObstacleEvade {
    pub fn new(sensor: SensorId, weight: f32) -> Self {
        Self { sensor, state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for ObstacleEvade {
    fn name(&self) -> &'static str {
        "obstacle_evade"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let (sum, count) = ctx
            .sensed_obstacles(self.sensor)
            .fold((Vec2::ZERO, 0u32), |(s, n), o| (s + o.position, n + 1));
        if count == 0 {
            return None;
        }
        let force = steer::flee(ctx, sum / count as f32)?;
        self.state.activation = 1.0;
        Some(force)
    }
}
