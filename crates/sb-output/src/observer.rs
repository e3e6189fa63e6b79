//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use sb_agent::AgentStore;
use sb_controller::StepReport;
use sb_core::{SimConfig, Tick};
use sb_sim::SimObserver;
use tracing::warn;

use crate::row::{AgentSnapshotRow, ContributionRow, SteeringTraceRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots and steering traces to any
/// [`OutputWriter`] backend.
///
/// Steering rows are buffered while agents are steered and written in one
/// batch at the end of the tick.  Both snapshots and traces follow
/// `config.output_interval_ticks`; an interval of 0 disables them.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    dt:            f32,
    interval:      u64,
    contributions: bool,
    steering_buf:  Vec<SteeringTraceRow>,
    contrib_buf:   Vec<ContributionRow>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the trace
    /// interval and tick-to-seconds conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            dt:            config.dt,
            interval:      config.output_interval_ticks,
            contributions: true,
            steering_buf:  Vec::new(),
            contrib_buf:   Vec::new(),
            last_error:    None,
        }
    }

    /// Skip the per-behaviour rows, which dominate output size.
    pub fn without_contributions(mut self) -> Self {
        self.contributions = false;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn traced(&self, tick: Tick) -> bool {
        self.interval > 0 && tick.0.is_multiple_of(self.interval)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_agent_steered(&mut self, tick: Tick, report: &StepReport) {
        if !self.traced(tick) {
            return;
        }
        self.steering_buf.push(SteeringTraceRow::new(tick, report));
        if self.contributions {
            self.contrib_buf
                .extend(report.contributions.iter().map(|c| ContributionRow::new(report.agent, tick, c)));
        }
    }

    fn on_tick_end(&mut self, _tick: Tick, _steered: usize) {
        if !self.steering_buf.is_empty() {
            let result = self.writer.write_steering(&self.steering_buf);
            self.store_err(result);
            self.steering_buf.clear();
        }
        if !self.contrib_buf.is_empty() {
            let result = self.writer.write_contributions(&self.contrib_buf);
            self.store_err(result);
            self.contrib_buf.clear();
        }
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        let time_secs = tick.0 as f32 * self.dt;
        let rows: Vec<AgentSnapshotRow> = agents
            .agent_ids()
            .map(|a| AgentSnapshotRow::new(a, tick, time_secs, &agents.state(a)))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
