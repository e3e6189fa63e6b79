//! Neighbour-driven behaviours fed by a sensor.

use sb_core::{SensorId, Vec2};

use crate::steer;
use crate::{BehaviorState, LocalForce, SteeringBehavior, SteeringContext};

/// Flee the mean position of all agents inside `sensor`.
#[derive(Clone, Debug)]
pub struct Separation {
    pub sensor: SensorId,
    state:      BehaviorState,
}

impl Separation {
    pub fn new(sensor: SensorId, weight: f32) -> Self {
        Self { sensor, state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for Separation {
    fn name(&self) -> &'static str {
        "separation"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let positions = &ctx.world.agents.position;
        let (sum, count) = ctx
            .sensed_agents(self.sensor)
            .fold((Vec2::ZERO, 0u32), |(s, n), a| (s + positions[a.index()], n + 1));
        if count == 0 {
            return None;
        }
        let force = steer::flee(ctx, sum / count as f32)?;
        self.state.activation = 1.0;
        Some(force)
    }
}

/// Match the mean velocity of all agents inside `sensor`.
#[derive(Clone, Debug)]
pub struct Alignment {
    pub sensor: SensorId,
    state:      BehaviorState,
}

impl Alignment {
    pub fn new(sensor: SensorId, weight: f32) -> Self {
        Self { sensor, state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for Alignment {
    fn name(&self) -> &'static str {
        "alignment"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let velocities = &ctx.world.agents.velocity;
        let (sum, count) = ctx
            .sensed_agents(self.sensor)
            .fold((Vec2::ZERO, 0u32), |(s, n), a| (s + velocities[a.index()], n + 1));
        if count == 0 {
            return None;
        }
        self.state.activation = 1.0;
        Some(steer::force_for_velocity(ctx, sum / count as f32))
    }
}
