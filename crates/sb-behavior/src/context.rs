//! Read-only state passed to every behaviour evaluation.

use sb_agent::AgentStore;
use sb_core::{AgentId, KinematicLimits, KinematicState, SensorId, Vec2};
use sb_sensor::{BodyTable, Obstacle, SensorSet};

// ── Target ────────────────────────────────────────────────────────────────────

/// Something a behaviour steers relative to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// A fixed world point.
    Point(Vec2),
    /// Another agent, tracked at its current position.
    Agent(AgentId),
}

// ── WorldView ─────────────────────────────────────────────────────────────────

/// Immutable view of the whole world for one tick.
///
/// Built once by the simulation and shared by every controller; nothing
/// behind these borrows changes until all agents have been evaluated.
#[derive(Copy, Clone)]
pub struct WorldView<'a> {
    pub agents:  &'a AgentStore,
    pub bodies:  &'a BodyTable,
    pub sensors: &'a SensorSet,
}

impl<'a> WorldView<'a> {
    #[inline]
    pub fn new(agents: &'a AgentStore, bodies: &'a BodyTable, sensors: &'a SensorSet) -> Self {
        Self { agents, bodies, sensors }
    }
}

// ── SteeringContext ───────────────────────────────────────────────────────────

/// Everything a behaviour may read while computing one agent's force.
///
/// `kinematics` is the agent's own snapshot with `forward` already
/// re-estimated by the controller for this tick.
pub struct SteeringContext<'a> {
    pub agent:      AgentId,
    pub kinematics: KinematicState,
    pub limits:     &'a KinematicLimits,
    /// Seconds per tick.
    pub dt:         f32,
    /// Simulated seconds since the start of the run.
    pub time:       f32,
    pub world:      WorldView<'a>,
}

impl<'a> SteeringContext<'a> {
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.kinematics.velocity
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        self.kinematics.forward
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.kinematics.speed()
    }

    /// Current world position of `target`, `None` if it names an unknown
    /// agent.
    pub fn resolve(&self, target: Target) -> Option<Vec2> {
        match target {
            Target::Point(p) => Some(p),
            Target::Agent(a) => self.world.agents.get(a).map(|s| s.position),
        }
    }

    /// Current velocity of `target`; fixed points are stationary.
    pub fn velocity_of(&self, target: Target) -> Option<Vec2> {
        match target {
            Target::Point(_) => Some(Vec2::ZERO),
            Target::Agent(a) => self.world.agents.get(a).map(|s| s.velocity),
        }
    }

    /// Other agents currently inside `sensor`, ascending by body id.
    /// Yields nothing for an unknown sensor.
    pub fn sensed_agents(&self, sensor: SensorId) -> impl Iterator<Item = AgentId> + '_ {
        let bodies = self.world.bodies;
        let me = self.agent;
        self.world
            .sensors
            .get(sensor)
            .into_iter()
            .flat_map(|s| s.touching_objects())
            .filter_map(move |b| bodies.agent(b))
            .filter(move |a| *a != me && self.world.agents.contains(*a))
    }

    /// Obstacles currently inside `sensor`.
    pub fn sensed_obstacles(&self, sensor: SensorId) -> impl Iterator<Item = &'a Obstacle> + '_ {
        let bodies = self.world.bodies;
        self.world
            .sensors
            .get(sensor)
            .into_iter()
            .flat_map(|s| s.touching_objects())
            .filter_map(move |b| bodies.obstacle_of(b))
    }
}
