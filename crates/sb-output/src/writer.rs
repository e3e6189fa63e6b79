//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, ContributionRow, OutputResult, SteeringTraceRow};

/// Sink for the three row kinds.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when driven by the observer.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write a batch of per-agent steering results.
    fn write_steering(&mut self, rows: &[SteeringTraceRow]) -> OutputResult<()>;

    /// Write a batch of per-behaviour contributions.
    fn write_contributions(&mut self, rows: &[ContributionRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
