//! `sb-sim`: fixed-timestep tick loop for the rust_steer framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Sense    : drain the sensor inbox, then diff every sensor against
//!                 the proximity detector and apply enter/exit events.
//!   ② Arbitrate: SteeringController::compute for every agent against one
//!                 shared, read-only WorldView (parallel with `parallel`).
//!   ③ Apply    : in ascending AgentId order: store the re-estimated
//!                 heading and hand the total force to the integrator.
//!   ④ Integrate: Integrator::integrate advances all bodies by dt.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the arbitration phase on Rayon's thread pool.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sb_agent::AgentStoreBuilder;
//! use sb_core::SimConfig;
//! use sb_sim::{NoopObserver, SimBuilder};
//!
//! let agents = AgentStoreBuilder::new(42).scatter(spec).build();
//! let mut sim = SimBuilder::new(config, agents).build()?;
//! sim.controller_mut(AgentId(0))?.add(Cruise::new(1.0));
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
