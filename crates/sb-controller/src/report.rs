//! Per-tick arbitration snapshot.

use sb_behavior::LocalForce;
use sb_core::{AgentId, BehaviorId, Vec2};

/// What one behaviour produced this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Contribution {
    pub id:         BehaviorId,
    pub name:       &'static str,
    pub weight:     f32,
    pub activation: f32,
    /// `None` if the behaviour abstained.
    pub force:      Option<LocalForce>,
}

/// Everything the controller computed for one agent in one tick.
///
/// Observers receive this to draw or log what the arbitration did; the
/// simulation reads `forward` and `total_force` from it.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub agent:          AgentId,
    /// Re-estimated unit heading.
    pub forward:        Vec2,
    pub contributions:  Vec<Contribution>,
    /// Weighted average before clamping.
    pub blended:        LocalForce,
    pub weight_sum:     f32,
    /// After clamping.
    pub local:          LocalForce,
    /// `local` in world space.
    pub steering_force: Vec2,
    pub governor_force: Vec2,
    /// `steering_force + governor_force`.
    pub total_force:    Vec2,
}

impl StepReport {
    /// Contributions that did not abstain.
    pub fn active(&self) -> impl Iterator<Item = &Contribution> {
        self.contributions.iter().filter(|c| c.force.is_some())
    }
}
