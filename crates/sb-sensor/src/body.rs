//! Detectable bodies: agent hulls and static circular obstacles.

use sb_agent::AgentStore;
use sb_core::{AgentId, BodyId, ObstacleId, Vec2};

// ── LayerMask ─────────────────────────────────────────────────────────────────

/// Bit set of collision layers.  A body sits on one or more layers; a sensor
/// filter detects a body when the two masks intersect.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing only `layer` (0..32).
    #[inline]
    pub const fn layer(layer: u8) -> LayerMask {
        LayerMask(1 << (layer as u32 & 31))
    }

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::layer(0)
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A static circle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Vec2,
    pub radius:   f32,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

// ── BodyTable ─────────────────────────────────────────────────────────────────

/// What a [`BodyId`] refers to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyKind {
    Agent(AgentId),
    Obstacle(ObstacleId),
}

/// Registry of every detectable body in the world.
///
/// Bodies are appended and never removed during a run, so `BodyId`s stay
/// valid for the lifetime of the table.  Agent bodies read their position
/// from the [`AgentStore`]; obstacles are stored here.
#[derive(Clone, Debug, Default)]
pub struct BodyTable {
    kinds:       Vec<BodyKind>,
    layers:      Vec<LayerMask>,
    obstacles:   Vec<Obstacle>,
    /// `AgentId` → `BodyId`, `INVALID` for agents without a body.
    agent_body:  Vec<BodyId>,
}

impl BodyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent's hull on `layer`.  Calling twice for the same agent
    /// returns the existing body.
    pub fn add_agent(&mut self, agent: AgentId, layer: LayerMask) -> BodyId {
        if let Some(existing) = self.body_of_agent(agent) {
            return existing;
        }
        let id = self.push(BodyKind::Agent(agent), layer);
        if self.agent_body.len() <= agent.index() {
            self.agent_body.resize(agent.index() + 1, BodyId::INVALID);
        }
        self.agent_body[agent.index()] = id;
        id
    }

    /// Register every agent in `agents` on `layer`.
    pub fn add_all_agents(&mut self, agents: &AgentStore, layer: LayerMask) {
        for agent in agents.agent_ids() {
            self.add_agent(agent, layer);
        }
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle, layer: LayerMask) -> (ObstacleId, BodyId) {
        let oid = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(obstacle);
        (oid, self.push(BodyKind::Obstacle(oid), layer))
    }

    fn push(&mut self, kind: BodyKind, layer: LayerMask) -> BodyId {
        let id = BodyId(self.kinds.len() as u32);
        self.kinds.push(kind);
        self.layers.push(layer);
        id
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn body_ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.kinds.len() as u32).map(BodyId)
    }

    #[inline]
    pub fn kind(&self, body: BodyId) -> Option<BodyKind> {
        self.kinds.get(body.index()).copied()
    }

    #[inline]
    pub fn layer(&self, body: BodyId) -> Option<LayerMask> {
        self.layers.get(body.index()).copied()
    }

    pub fn body_of_agent(&self, agent: AgentId) -> Option<BodyId> {
        self.agent_body
            .get(agent.index())
            .copied()
            .filter(|b| *b != BodyId::INVALID)
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Agent behind `body`, if it is an agent hull.
    pub fn agent(&self, body: BodyId) -> Option<AgentId> {
        match self.kind(body)? {
            BodyKind::Agent(a) => Some(a),
            BodyKind::Obstacle(_) => None,
        }
    }

    /// Obstacle behind `body`, if it is one.
    pub fn obstacle_of(&self, body: BodyId) -> Option<&Obstacle> {
        match self.kind(body)? {
            BodyKind::Obstacle(o) => self.obstacle(o),
            BodyKind::Agent(_) => None,
        }
    }

    /// Current world circle `(center, radius)` of `body`.
    pub fn circle(&self, body: BodyId, agents: &AgentStore) -> Option<(Vec2, f32)> {
        match self.kind(body)? {
            BodyKind::Agent(a) if agents.contains(a) => {
                Some((agents.position[a.index()], agents.hull_radius[a.index()]))
            }
            BodyKind::Agent(_) => None,
            BodyKind::Obstacle(o) => self.obstacle(o).map(|o| (o.position, o.radius)),
        }
    }
}
