//! Predictive pursuit and evasion.
//!
//! Both use a single linear extrapolation of the target,
//! `position + velocity · prediction_time`, and then seek or flee that
//! point.  There is no interception solve.

use sb_core::Vec2;

use crate::steer;
use crate::{BehaviorState, LocalForce, SteeringBehavior, SteeringContext, Target};

fn predicted(ctx: &SteeringContext<'_>, target: Target, prediction_time: f32) -> Option<Vec2> {
    let position = ctx.resolve(target)?;
    let velocity = ctx.velocity_of(target)?;
    Some(position + velocity * prediction_time)
}

#[derive(Clone, Debug)]
pub struct Pursuit {
    pub target:          Option<Target>,
    /// Seconds ahead to extrapolate the target.
    pub prediction_time: f32,
    state:               BehaviorState,
}

impl Pursuit {
    pub fn new(target: Target, prediction_time: f32, weight: f32) -> Self {
        Self { target: Some(target), prediction_time, state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for Pursuit {
    fn name(&self) -> &'static str {
        "pursuit"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let point = predicted(ctx, self.target?, self.prediction_time)?;
        let force = steer::seek(ctx, point, 0.0, 0.0)?;
        self.state.activation = 1.0;
        Some(force)
    }
}

#[derive(Clone, Debug)]
pub struct Evade {
    pub threat:          Option<Target>,
    pub prediction_time: f32,
    state:               BehaviorState,
}

impl Evade {
    pub fn new(threat: Target, prediction_time: f32, weight: f32) -> Self {
        Self { threat: Some(threat), prediction_time, state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for Evade {
    fn name(&self) -> &'static str {
        "evade"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let point = predicted(ctx, self.threat?, self.prediction_time)?;
        let force = steer::flee(ctx, point)?;
        self.state.activation = 1.0;
        Some(force)
    }
}
