//! `sb-core`: foundational types for the `rust_steer` steering framework.
//!
//! This crate is a dependency of every other `sb-*` crate.  It has no `sb-*`
//! dependencies and minimal external ones (`glam`, `rand`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `BodyId`, `ObstacleId`, `SensorId`, `BehaviorId` |
//! | [`math`]        | bearings, angle wrapping, `inverse_lerp`, `clamp01`         |
//! | [`kinematics`]  | `KinematicState`, `KinematicLimits`                         |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                             |
//! | [`rng`]         | `AgentRng::derive_seed` (per-agent), `SimRng` (global)      |
//! | [`error`]       | `SbError`, `SbResult`                                       |
//!
//! # Angle convention
//!
//! Headings are **bearings**: degrees measured clockwise from `+Y`.  An agent
//! facing `+Y` has bearing 0, facing `+X` has bearing 90.  The agent's
//! `right` vector is `forward` rotated by −90°.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod ids;
pub mod kinematics;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use glam::Vec2;

pub use error::{SbError, SbResult};
pub use ids::{AgentId, BehaviorId, BodyId, ObstacleId, SensorId};
pub use kinematics::{KinematicLimits, KinematicState};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
