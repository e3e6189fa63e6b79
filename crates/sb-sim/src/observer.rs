//! Simulation observer trait for progress reporting and data collection.

use sb_agent::AgentStore;
use sb_controller::StepReport;
use sb_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: closest-approach tracker
///
/// ```rust,ignore
/// struct Closest { best: f32 }
///
/// impl SimObserver for Closest {
///     fn on_snapshot(&mut self, _tick: Tick, agents: &AgentStore) {
///         let d = agents.position[0].distance(agents.position[1]);
///         self.best = self.best.min(d);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before sensing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per agent per tick, in ascending `AgentId` order, after
    /// arbitration and before integration.
    ///
    /// The report carries every behaviour's contribution plus the clamped
    /// local force and the world force handed to the integrator, which is
    /// what a debug view would draw.
    fn on_agent_steered(&mut self, _tick: Tick, _report: &StepReport) {}

    /// Called at the end of each tick, after integration.
    ///
    /// `steered` is the number of agents whose controller ran this tick.
    fn on_tick_end(&mut self, _tick: Tick, _steered: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the post-integration agent state.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
