//! Traits connecting the steering engine to a physics backend.

use sb_agent::AgentStore;
use sb_core::{AgentId, Vec2};

use crate::PhysicsResult;

/// Receives world-space forces.
///
/// Forces applied to the same agent within one tick add up.
pub trait ForceSink {
    fn apply_force(&mut self, agent: AgentId, force: Vec2);
}

/// A [`ForceSink`] that can also advance bodies.
pub trait Integrator: ForceSink + Send {
    /// Advance every agent in `agents` by `dt` under the forces accumulated
    /// since the previous call, then clear them.
    fn integrate(&mut self, agents: &mut AgentStore, dt: f32) -> PhysicsResult<()>;
}

/// Recording sink, handy for inspecting what a controller emitted.
impl ForceSink for Vec<(AgentId, Vec2)> {
    fn apply_force(&mut self, agent: AgentId, force: Vec2) {
        self.push((agent, force));
    }
}
