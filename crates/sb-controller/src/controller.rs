//! The steering controller: one per agent.

use std::fmt;

use sb_behavior::{SteeringBehavior, SteeringContext, WorldView};
use sb_core::{AgentId, BehaviorId, KinematicLimits, SbError, Vec2, math};
use sb_physics::ForceSink;
use tracing::{debug, trace, warn};

use crate::arbitrate::{blend, clamp_local, speed_governor};
use crate::{Contribution, ControllerConfig, ControllerError, ControllerResult, StepReport};

/// Owns an agent's behaviours and turns their outputs into one bounded force
/// per tick.
///
/// Behaviours are evaluated in registration order.  The controller holds no
/// kinematic state of its own: position, velocity and the previous heading
/// are read from the [`WorldView`] each tick, and the re-estimated heading is
/// returned in the [`StepReport`] for the caller to store.
pub struct SteeringController {
    pub limits: KinematicLimits,
    pub config: ControllerConfig,
    behaviors:  Vec<(BehaviorId, Box<dyn SteeringBehavior>)>,
    next_id:    u32,
}

impl SteeringController {
    /// Create a controller with no behaviours.
    pub fn new(limits: KinematicLimits, config: ControllerConfig) -> ControllerResult<Self> {
        limits.validate()?;
        config.validate()?;
        Ok(Self { limits, config, behaviors: Vec::new(), next_id: 0 })
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `behavior` under `id`.  Returns its evaluation index.
    pub fn register(
        &mut self,
        id:       BehaviorId,
        behavior: Box<dyn SteeringBehavior>,
    ) -> ControllerResult<usize> {
        if self.contains(id) {
            return Err(ControllerError::DuplicateBehavior(id));
        }
        debug!(behavior = %id, name = behavior.name(), weight = behavior.weight(), "registered behavior");
        if let Some(next) = id.0.checked_add(1) {
            self.next_id = self.next_id.max(next);
        }
        self.behaviors.push((id, behavior));
        Ok(self.behaviors.len() - 1)
    }

    /// Register `behavior` under a fresh id.
    pub fn add(&mut self, behavior: impl SteeringBehavior) -> BehaviorId {
        let id = self.fresh_id();
        debug!(behavior = %id, name = behavior.name(), weight = behavior.weight(), "registered behavior");
        self.behaviors.push((id, Box::new(behavior)));
        id
    }

    /// Next unused id, skipping the `INVALID` sentinel and wrapping past it.
    fn fresh_id(&mut self) -> BehaviorId {
        loop {
            let id = BehaviorId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if id != BehaviorId::INVALID && !self.contains(id) {
                return id;
            }
        }
    }

    /// Remove a behaviour and hand it back.
    pub fn unregister(&mut self, id: BehaviorId) -> ControllerResult<Box<dyn SteeringBehavior>> {
        let index = self
            .behaviors
            .iter()
            .position(|(b, _)| *b == id)
            .ok_or(ControllerError::UnknownBehavior(id))?;
        let (_, behavior) = self.behaviors.remove(index);
        debug!(behavior = %id, name = behavior.name(), "unregistered behavior");
        Ok(behavior)
    }

    pub fn contains(&self, id: BehaviorId) -> bool {
        self.behaviors.iter().any(|(b, _)| *b == id)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Registered ids in evaluation order.
    pub fn ids(&self) -> impl Iterator<Item = BehaviorId> + '_ {
        self.behaviors.iter().map(|(id, _)| *id)
    }

    pub fn behavior(&self, id: BehaviorId) -> Option<&dyn SteeringBehavior> {
        self.behaviors.iter().find(|(b, _)| *b == id).map(|(_, b)| b.as_ref())
    }

    pub fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut (dyn SteeringBehavior + 'static)> {
        self.behaviors.iter_mut().find(|(b, _)| *b == id).map(|(_, b)| b.as_mut())
    }

    pub fn weight(&self, id: BehaviorId) -> Option<f32> {
        self.behavior(id).map(|b| b.weight())
    }

    /// Activation computed in the most recent tick.
    pub fn activation(&self, id: BehaviorId) -> Option<f32> {
        self.behavior(id).map(|b| b.activation())
    }

    pub fn set_weight(&mut self, id: BehaviorId, weight: f32) -> ControllerResult<()> {
        let b = self.behavior_mut(id).ok_or(ControllerError::UnknownBehavior(id))?;
        b.state_mut().set_weight(weight);
        Ok(())
    }

    /// Keep a behaviour registered but skip it until re-enabled.
    pub fn set_enabled(&mut self, id: BehaviorId, enabled: bool) -> ControllerResult<()> {
        let b = self.behavior_mut(id).ok_or(ControllerError::UnknownBehavior(id))?;
        let state = b.state_mut();
        state.enabled = enabled;
        if !enabled {
            state.activation = 0.0;
        }
        Ok(())
    }

    // ── Pipeline ──────────────────────────────────────────────────────────

    /// New unit heading given the previous one and the current velocity.
    pub fn estimate_forward(&self, previous: Vec2, velocity: Vec2) -> Vec2 {
        let previous = previous.try_normalize().unwrap_or(Vec2::Y);
        let speed = velocity.length();
        if speed <= self.config.forward_epsilon {
            return previous;
        }
        let candidate = velocity / speed;
        if self.config.forward_hysteresis && candidate.dot(previous) < 0.0 {
            return previous;
        }
        candidate
    }

    /// Run the arbitration pipeline for `agent` without applying the result.
    pub fn compute(
        &mut self,
        agent: AgentId,
        world: WorldView<'_>,
        dt:    f32,
        time:  f32,
    ) -> ControllerResult<StepReport> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SbError::Config(format!("timestep must be > 0, got {dt}")).into());
        }
        let mut kinematics = world.agents.get(agent).ok_or(ControllerError::UnknownAgent(agent))?;
        kinematics.forward = self.estimate_forward(kinematics.forward, kinematics.velocity);
        let forward = kinematics.forward;
        let right = math::right_of(forward);
        let speed = kinematics.speed();

        let ctx = SteeringContext { agent, kinematics, limits: &self.limits, dt, time, world };

        let mut contributions = Vec::with_capacity(self.behaviors.len());
        for (id, behavior) in &mut self.behaviors {
            if !behavior.is_enabled() {
                continue;
            }
            let mut force = behavior.evaluate(&ctx);
            if force.is_some_and(|f| !f.is_finite()) {
                warn!(agent = %agent, behavior = behavior.name(), "discarding non-finite force");
                force = None;
            }
            let activation = behavior.activation();
            debug_assert!((0.0..=1.0).contains(&activation), "activation out of range: {activation}");
            contributions.push(Contribution {
                id: *id,
                name: behavior.name(),
                weight: behavior.weight(),
                activation,
                force,
            });
        }

        let (blended, weight_sum) =
            blend(contributions.iter().map(|c| (c.weight, c.activation, c.force)));
        let local = clamp_local(blended, speed, kinematics.mass, dt, &self.limits);
        let steering_force = local.to_world(forward, right);
        let governor_force =
            speed_governor(kinematics.velocity, self.limits.max_speed, self.config.speed_control_rate);
        let total_force = steering_force + governor_force;

        trace!(
            agent = %agent,
            weight_sum,
            normal = local.normal,
            tangent = local.tangent,
            fx = total_force.x,
            fy = total_force.y,
            "arbitrated"
        );

        Ok(StepReport {
            agent,
            forward,
            contributions,
            blended,
            weight_sum,
            local,
            steering_force,
            governor_force,
            total_force,
        })
    }

    /// [`compute`](Self::compute), then submit the total force to `sink`.
    pub fn step(
        &mut self,
        agent: AgentId,
        world: WorldView<'_>,
        dt:    f32,
        time:  f32,
        sink:  &mut dyn ForceSink,
    ) -> ControllerResult<StepReport> {
        let report = self.compute(agent, world, dt, time)?;
        sink.apply_force(agent, report.total_force);
        Ok(report)
    }
}

impl fmt::Debug for SteeringController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteeringController")
            .field("limits", &self.limits)
            .field("config", &self.config)
            .field(
                "behaviors",
                &self.behaviors.iter().map(|(id, b)| (*id, b.name())).collect::<Vec<_>>(),
            )
            .finish()
    }
}
