//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `steering_trace.csv`
//! - `contributions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, ContributionRow, OutputResult, SteeringTraceRow};

pub const SNAPSHOT_HEADERS: [&str; 8] =
    ["agent_id", "tick", "time_secs", "x", "y", "vx", "vy", "bearing_deg"];

pub const STEERING_HEADERS: [&str; 12] = [
    "agent_id",
    "tick",
    "active",
    "weight_sum",
    "blended_normal",
    "blended_tangent",
    "normal",
    "tangent",
    "fx",
    "fy",
    "governor_fx",
    "governor_fy",
];

pub const CONTRIBUTION_HEADERS: [&str; 8] =
    ["agent_id", "tick", "behavior_id", "behavior", "weight", "activation", "normal", "tangent"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots:     Writer<File>,
    steering:      Writer<File>,
    contributions: Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the three CSV files, and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut steering = Writer::from_path(dir.join("steering_trace.csv"))?;
        steering.write_record(STEERING_HEADERS)?;

        let mut contributions = Writer::from_path(dir.join("contributions.csv"))?;
        contributions.write_record(CONTRIBUTION_HEADERS)?;

        Ok(Self {
            snapshots,
            steering,
            contributions,
            finished: false,
        })
    }
}

fn opt(v: Option<f32>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
                row.bearing_deg.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_steering(&mut self, rows: &[SteeringTraceRow]) -> OutputResult<()> {
        for row in rows {
            self.steering.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.active.to_string(),
                row.weight_sum.to_string(),
                row.blended_normal.to_string(),
                row.blended_tangent.to_string(),
                row.normal.to_string(),
                row.tangent.to_string(),
                row.fx.to_string(),
                row.fy.to_string(),
                row.governor_fx.to_string(),
                row.governor_fy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_contributions(&mut self, rows: &[ContributionRow]) -> OutputResult<()> {
        for row in rows {
            self.contributions.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.behavior_id.to_string(),
                row.behavior.to_string(),
                row.weight.to_string(),
                row.activation.to_string(),
                opt(row.normal),
                opt(row.tangent),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.steering.flush()?;
        self.contributions.flush()?;
        Ok(())
    }
}
