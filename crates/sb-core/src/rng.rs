//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent's noise generators are seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Behaviours that need noise (wander) derive their own seed from
//! [`AgentRng::derive_seed`] so replays are reproducible regardless of the
//! order agents are stepped in.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent seed derivation.
pub struct AgentRng;

impl AgentRng {
    /// Stable seed for a behaviour owned by `agent` that keeps its own
    /// generator.
    pub fn derive_seed(global_seed: u64, agent: AgentId) -> u64 {
        global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (spawning, scenario layout).
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform point inside the unit disk (rejection sampling).
    pub fn inside_unit_circle(&mut self) -> glam::Vec2 {
        loop {
            let p = glam::Vec2::new(self.0.gen_range(-1.0..=1.0), self.0.gen_range(-1.0..=1.0));
            if p.length_squared() <= 1.0 {
                return p;
            }
        }
    }
}
