//! `sb-agent`: Structure-of-Arrays kinematic storage for the `rust_steer` framework.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA position/velocity/forward/mass arrays)  |
//! | [`builder`]     | `AgentStoreBuilder` (explicit and scattered spawning)     |
//!
//! The store is the "kinematic state" leaf of the pipeline: the integrator
//! writes it once per tick, the steering controller writes `forward`, and
//! every behaviour reads it through a shared borrow.

pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::{AgentStoreBuilder, ScatterSpec};
pub use store::AgentStore;
