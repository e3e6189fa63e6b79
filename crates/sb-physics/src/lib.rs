//! `sb-physics`: where steering forces leave the engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`sink`]    | `ForceSink`, `Integrator`: the seam to any physics backend    |
//! | [`euler`]   | `EulerIntegrator`: semi-implicit Euler reference integrator   |
//! | [`error`]   | `PhysicsError`, `PhysicsResult<T>`                             |
//!
//! # Integration model
//!
//! Controllers push one world-space force per agent per tick into a
//! [`ForceSink`].  An [`Integrator`] accumulates those forces and, once per
//! tick, advances every body:
//!
//! ```text
//! v ← v + F / m · dt
//! p ← p + v · dt
//! ```
//!
//! Forces are cleared after each integration.  A real physics engine can
//! stand in for [`EulerIntegrator`] by implementing the same two traits.

pub mod error;
pub mod euler;
pub mod sink;

#[cfg(test)]
mod tests;

pub use error::{PhysicsError, PhysicsResult};
pub use euler::EulerIntegrator;
pub use sink::{ForceSink, Integrator};
