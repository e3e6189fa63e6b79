//! Core agent storage: `AgentStore`.
//!
//! # Why SoA?
//!
//! Neighbour queries (separation, alignment, predictive avoidance) scan the
//! positions and velocities of many agents per tick.  Keeping each field in
//! its own contiguous `Vec` makes those scans cache-friendly, and lets the
//! integrator update all velocities in one pass.

use sb_core::{AgentId, KinematicState, Vec2};

/// Structure-of-Arrays storage for all agent kinematic state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];  // O(1), cache-friendly
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub position: Vec<Vec2>,
    pub velocity: Vec<Vec2>,

    /// Unit heading, owned by the steering controller.
    pub forward: Vec<Vec2>,

    /// Body mass, always `> 0`.
    pub mass: Vec<f32>,

    /// Radius of the agent's own collision hull, used by the detector when
    /// other agents' sensors test for overlap.
    pub hull_radius: Vec<f32>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Copy out one agent's kinematic state.
    ///
    /// # Panics
    /// Panics if `agent` is out of range.
    #[inline]
    pub fn state(&self, agent: AgentId) -> KinematicState {
        let i = agent.index();
        KinematicState {
            position: self.position[i],
            velocity: self.velocity[i],
            forward:  self.forward[i],
            mass:     self.mass[i],
        }
    }

    /// Like [`state`](Self::state) but `None` for unknown agents.
    pub fn get(&self, agent: AgentId) -> Option<KinematicState> {
        self.contains(agent).then(|| self.state(agent))
    }

    /// Overwrite one agent's kinematic state.
    pub fn set_state(&mut self, agent: AgentId, state: KinematicState) {
        let i = agent.index();
        self.position[i] = state.position;
        self.velocity[i] = state.velocity;
        self.forward[i] = state.forward;
        self.mass[i] = state.mass;
    }

    /// Append an agent and return its id.
    pub fn push(&mut self, state: KinematicState, hull_radius: f32) -> AgentId {
        debug_assert!(state.mass > 0.0, "agent mass must be positive");
        let id = AgentId(self.count as u32);
        self.position.push(state.position);
        self.velocity.push(state.velocity);
        self.forward.push(state.forward);
        self.mass.push(state.mass);
        self.hull_radius.push(hull_radius);
        self.count += 1;
        id
    }
}
