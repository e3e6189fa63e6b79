//! Reference integrator.

use sb_agent::AgentStore;
use sb_core::{AgentId, Vec2};
use tracing::trace;

use crate::{ForceSink, Integrator, PhysicsError, PhysicsResult};

/// Semi-implicit Euler with a per-agent force accumulator.
#[derive(Clone, Debug, Default)]
pub struct EulerIntegrator {
    forces: Vec<Vec2>,
}

impl EulerIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sized for `count` agents up front.
    pub fn with_capacity(count: usize) -> Self {
        Self { forces: vec![Vec2::ZERO; count] }
    }

    /// Force accumulated so far this tick.
    pub fn pending(&self, agent: AgentId) -> Vec2 {
        self.forces.get(agent.index()).copied().unwrap_or(Vec2::ZERO)
    }
}

impl ForceSink for EulerIntegrator {
    fn apply_force(&mut self, agent: AgentId, force: Vec2) {
        let i = agent.index();
        if i >= self.forces.len() {
            self.forces.resize(i + 1, Vec2::ZERO);
        }
        self.forces[i] += force;
    }
}

impl Integrator for EulerIntegrator {
    fn integrate(&mut self, agents: &mut AgentStore, dt: f32) -> PhysicsResult<()> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        if let Some(stray) = self.forces[agents.count.min(self.forces.len())..]
            .iter()
            .position(|f| *f != Vec2::ZERO)
        {
            return Err(PhysicsError::UnknownAgent(AgentId((agents.count + stray) as u32)));
        }
        self.forces.resize(agents.count, Vec2::ZERO);

        for i in 0..agents.count {
            let accel = self.forces[i] / agents.mass[i];
            agents.velocity[i] += accel * dt;
            agents.position[i] += agents.velocity[i] * dt;
        }
        trace!(agents = agents.count, dt, "integrated");
        self.forces.fill(Vec2::ZERO);
        Ok(())
    }
}
