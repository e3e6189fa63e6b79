//! Fluent builder for constructing an `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use sb_agent::{AgentStoreBuilder, ScatterSpec};
//! use sb_core::{KinematicState, Vec2};
//!
//! let store = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .agent(KinematicState::at_rest(Vec2::ZERO, 0.0, 1.0))
//!     .scatter(ScatterSpec { count: 5, radius: 2.0, ..ScatterSpec::default() })
//!     .build();
//!
//! assert_eq!(store.count, 6);
//! ```

use sb_core::{KinematicState, SimRng, Vec2};
use tracing::debug;

use crate::AgentStore;

/// A group of agents spawned at random offsets inside a disk, each facing a
/// random bearing.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterSpec {
    pub count:  usize,
    pub center: Vec2,
    pub radius: f32,
    /// Initial bearings are drawn uniformly from `[min, max]` degrees.
    pub bearing_range: (f32, f32),
    /// Initial speed along the drawn bearing.
    pub initial_speed: f32,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        Self {
            count:         5,
            center:        Vec2::ZERO,
            radius:        0.5,
            bearing_range: (-45.0, 45.0),
            initial_speed: 0.0,
        }
    }
}

/// Fluent builder for [`AgentStore`].
pub struct AgentStoreBuilder {
    rng:         SimRng,
    mass:        f32,
    hull_radius: f32,
    store:       AgentStore,
}

impl AgentStoreBuilder {
    /// Create a builder whose scattered spawns draw from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng:         SimRng::new(seed),
            mass:        1.0,
            hull_radius: 0.5,
            store:       AgentStore::default(),
        }
    }

    /// Mass used by subsequent `scatter` calls.
    pub fn mass(mut self, mass: f32) -> Self {
        assert!(mass > 0.0, "agent mass must be positive, got {mass}");
        self.mass = mass;
        self
    }

    /// Hull radius used by subsequent `agent`/`scatter` calls.
    pub fn hull_radius(mut self, radius: f32) -> Self {
        self.hull_radius = radius.max(0.0);
        self
    }

    /// Add one agent with an explicit initial state.
    pub fn agent(mut self, state: KinematicState) -> Self {
        self.store.push(state, self.hull_radius);
        self
    }

    /// Add `spec.count` agents at random offsets around `spec.center`.
    pub fn scatter(mut self, spec: ScatterSpec) -> Self {
        let (lo, hi) = spec.bearing_range;
        for _ in 0..spec.count {
            let offset = self.rng.inside_unit_circle() * spec.radius;
            let bearing = if hi > lo { self.rng.gen_range(lo..=hi) } else { lo };
            let mut state = KinematicState::at_rest(spec.center + offset, bearing, self.mass);
            state.velocity = state.forward * spec.initial_speed;
            self.store.push(state, self.hull_radius);
        }
        debug!(count = spec.count, radius = spec.radius, "scattered agents");
        self
    }

    pub fn build(self) -> AgentStore {
        self.store
    }
}
