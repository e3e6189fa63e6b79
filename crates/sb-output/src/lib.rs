//! `sb-output`: simulation output writers for the rust_steer framework.
//!
//! What a debug view would draw each tick (every behaviour's force, the
//! clamped result, the world force) is written as rows instead.
//!
//! | File                  | One row per                                         |
//! |-----------------------|-----------------------------------------------------|
//! | `agent_snapshots.csv` | agent per snapshot tick: position, velocity, bearing |
//! | `steering_trace.csv`  | agent per traced tick: blended/clamped/world force  |
//! | `contributions.csv`   | behaviour per agent per traced tick                 |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `sb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sb_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, ContributionRow, SteeringTraceRow};
pub use writer::OutputWriter;
