//! Point-directed behaviours: seek, arrival, flee, and cruise.

use crate::steer;
use crate::{BehaviorState, LocalForce, SteeringBehavior, SteeringContext, Target};

/// How a seeking agent decides where to start slowing down.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrakingRadius {
    /// A fixed distance from the target.
    Fixed(f32),
    /// A multiple of the distance the agent needs to stop from full speed.
    StoppingDistanceMultiple(f32),
}

impl BrakingRadius {
    pub fn resolve(self, ctx: &SteeringContext<'_>) -> f32 {
        match self {
            BrakingRadius::Fixed(r) => r,
            BrakingRadius::StoppingDistanceMultiple(k) => {
                ctx.limits.max_stopping_distance(ctx.kinematics.mass) * k
            }
        }
    }
}

// ── Seek ──────────────────────────────────────────────────────────────────────

/// Head for a target at full speed, optionally slowing near it.
#[derive(Clone, Debug)]
pub struct Seek {
    pub target:         Option<Target>,
    /// `None` keeps full speed all the way in.
    pub slowdown:       Option<BrakingRadius>,
    pub epsilon_radius: f32,
    state:              BehaviorState,
}

impl Seek {
    pub fn new(target: Target, weight: f32) -> Self {
        Self {
            target:         Some(target),
            slowdown:       None,
            epsilon_radius: 0.1,
            state:          BehaviorState::new(weight),
        }
    }

    pub fn with_slowdown(mut self, braking: BrakingRadius, epsilon_radius: f32) -> Self {
        self.slowdown = Some(braking);
        self.epsilon_radius = epsilon_radius;
        self
    }
}

impl SteeringBehavior for Seek {
    fn name(&self) -> &'static str {
        "seek"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let point = ctx.resolve(self.target?)?;
        let (braking, epsilon) = match self.slowdown {
            Some(b) => (b.resolve(ctx), self.epsilon_radius),
            None => (0.0, 0.0),
        };
        let force = steer::seek(ctx, point, braking, epsilon)?;
        self.state.activation = 1.0;
        Some(force)
    }
}

// ── Arrival ───────────────────────────────────────────────────────────────────

/// Approach a target, ramping speed down inside `braking_radius` and coming
/// to a full stop inside `epsilon_radius`.
#[derive(Clone, Debug)]
pub struct Arrival {
    pub target:         Option<Target>,
    pub braking_radius: f32,
    pub epsilon_radius: f32,
    state:              BehaviorState,
}

impl Arrival {
    pub fn new(target: Target, braking_radius: f32, epsilon_radius: f32, weight: f32) -> Self {
        Self {
            target: Some(target),
            braking_radius,
            epsilon_radius,
            state: BehaviorState::new(weight),
        }
    }
}

impl SteeringBehavior for Arrival {
    fn name(&self) -> &'static str {
        "arrival"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let point = ctx.resolve(self.target?)?;
        let force = steer::arrival(ctx, point, self.braking_radius, self.epsilon_radius)?;
        self.state.activation = 1.0;
        Some(force)
    }
}

// ── Flee ──────────────────────────────────────────────────────────────────────

/// Run directly away from a threat at full speed.
#[derive(Clone, Debug)]
pub struct Flee {
    pub threat: Option<Target>,
    state:      BehaviorState,
}

impl Flee {
    pub fn new(threat: Target, weight: f32) -> Self {
        Self { threat: Some(threat), state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for Flee {
    fn name(&self) -> &'static str {
        "flee"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 0.0;
        let threat = ctx.resolve(self.threat?)?;
        let force = steer::flee(ctx, threat)?;
        self.state.activation = 1.0;
        Some(force)
    }
}

// ── Cruise ────────────────────────────────────────────────────────────────────

/// Keep the current heading at full speed.
#[derive(Clone, Debug, Default)]
pub struct Cruise {
    state: BehaviorState,
}

impl Cruise {
    pub fn new(weight: f32) -> Self {
        Self { state: BehaviorState::new(weight) }
    }
}

impl SteeringBehavior for Cruise {
    fn name(&self) -> &'static str {
        "cruise"
    }

    fn state(&self) -> &BehaviorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BehaviorState {
        &mut self.state
    }

    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
        self.state.activation = 1.0;
        steer::seek(ctx, ctx.position() + ctx.forward(), 0.0, 0.0)
    }
}
