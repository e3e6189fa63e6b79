//! The `SteeringBehavior` trait: the main extension point for user code.

use crate::{LocalForce, SteeringContext};

// ── BehaviorState ─────────────────────────────────────────────────────────────

/// Arbitration inputs every behaviour carries.
///
/// `weight` is static configuration; `activation` is rewritten by the
/// behaviour on every evaluation.  A disabled behaviour stays registered but
/// is skipped entirely by the controller.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorState {
    weight:         f32,
    pub activation: f32,
    pub enabled:    bool,
}

impl BehaviorState {
    /// # Panics
    /// Panics if `weight` is negative or non-finite.
    pub fn new(weight: f32) -> Self {
        assert_weight(weight);
        Self { weight, activation: 0.0, enabled: true }
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// # Panics
    /// Panics if `weight` is negative or non-finite.
    pub fn set_weight(&mut self, weight: f32) {
        assert_weight(weight);
        self.weight = weight;
    }

    /// Set activation from a severity-like value, clamped into `[0, 1]`.
    #[inline]
    pub fn activate(&mut self, activation: f32) {
        self.activation = activation.clamp(0.0, 1.0);
    }
}

impl Default for BehaviorState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn assert_weight(weight: f32) {
    assert!(
        weight.is_finite() && weight >= 0.0,
        "behavior weight must be finite and >= 0, got {weight}"
    );
}

// ── SteeringBehavior ──────────────────────────────────────────────────────────

/// Pluggable steering behaviour.
///
/// Implement this trait to add a new way for agents to move.  The controller
/// calls [`evaluate`][Self::evaluate] once per tick and blends every returned
/// force by `weight · activation`.
///
/// # Contract
///
/// - Return `None` to abstain.  An abstaining behaviour contributes to
///   neither the force sum nor the weight sum.
/// - Set `state_mut().activation` during `evaluate`; the controller reads it
///   afterwards.  Abstaining behaviours should leave it at 0.
/// - Degenerate geometry (zero distances, zero relative speeds) must
///   short-circuit to `None`, never produce non-finite values.
///
/// # Example
///
/// ```rust,ignore
/// struct HoldStill(BehaviorState);
///
/// impl SteeringBehavior for HoldStill {
///     fn name(&self) -> &'static str { "hold_still" }
///     fn state(&self) -> &BehaviorState { &self.0 }
///     fn state_mut(&mut self) -> &mut BehaviorState { &mut self.0 }
///     fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce> {
///         self.0.activate(1.0);
///         Some(steer::force_for_velocity(ctx, Vec2::ZERO))
///     }
/// }
/// ```
pub trait SteeringBehavior: Send + 'static {
    /// Short stable identifier used in logs and traces.
    fn name(&self) -> &'static str;

    fn state(&self) -> &BehaviorState;

    fn state_mut(&mut self) -> &mut BehaviorState;

    /// Compute this tick's local force, or `None` to abstain.
    fn evaluate(&mut self, ctx: &SteeringContext<'_>) -> Option<LocalForce>;

    #[inline]
    fn weight(&self) -> f32 {
        self.state().weight()
    }

    #[inline]
    fn activation(&self) -> f32 {
        self.state().activation
    }

    #[inline]
    fn is_enabled(&self) -> bool {
        self.state().enabled
    }
}
