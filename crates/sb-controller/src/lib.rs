//! `sb-controller`: behaviour registration and force arbitration.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`config`]     | `ControllerConfig`: speed governor and heading estimation   |
//! | [`arbitrate`]  | pure pipeline stages: `blend`, `clamp_local`, `speed_governor` |
//! | [`report`]     | `StepReport`, `Contribution`: per-tick arbitration snapshot |
//! | [`controller`] | `SteeringController`: owns behaviours, runs the pipeline    |
//! | [`error`]      | `ControllerError`, `ControllerResult<T>`                     |
//!
//! # Per-tick pipeline
//!
//! 1. Re-estimate `forward` from velocity (optionally with hysteresis).
//! 2. Evaluate every enabled behaviour; accumulate
//!    `Σ force · weight · activation` and `Σ weight · activation` over the
//!    ones that did not abstain.
//! 3. Divide by the weight sum, or produce exactly zero if it is zero.
//! 4. Clamp tangent and normal to what the body can do in one `dt`.
//! 5. Convert to world space: `tangent · forward + normal · right`.
//! 6. Add the speed governor force.
//! 7. Hand the total to a [`ForceSink`](sb_physics::ForceSink).

pub mod arbitrate;
pub mod config;
pub mod controller;
pub mod error;
pub mod report;

#[cfg(test)]
mod tests;

pub use config::ControllerConfig;
pub use controller::SteeringController;
pub use error::{ControllerError, ControllerResult};
pub use report::{Contribution, StepReport};
