//! `sb-behavior`: steering behaviour trait, shared geometry, and the
//! built-in behaviours.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`force`]    | `LocalForce`: (normal, tangent) in the agent's own frame       |
//! | [`behavior`] | `SteeringBehavior` trait, `BehaviorState` (weight, activation)  |
//! | [`context`]  | `SteeringContext<'a>`, `WorldView<'a>`, `Target`                |
//! | [`steer`]    | `force_for_velocity`, `force_for_direction`, `seek`, `flee`, …  |
//! | [`geometry`] | `closest_approach`, `obstacle_cone`                             |
//! | [`seek`]     | `Seek`, `Arrival`, `Flee`, `Cruise`                             |
//! | [`pursuit`]  | `Pursuit`, `Evade`                                              |
//! | [`path`]     | `Path`, `PathFollowing`                                         |
//! | [`flock`]    | `Separation`, `Alignment`                                       |
//! | [`wander`]   | `Wander`, `NoiseSource`, `WanderMode`                           |
//! | [`avoid`]    | `ObstacleAvoidance`, `AgentAvoidance`, `ObstacleEvade`          |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! A behaviour never touches the world directly.  Each tick the controller
//! hands it a [`SteeringContext`] holding the agent's own kinematic snapshot
//! and a read-only [`WorldView`] over every agent, body and sensor.  The
//! behaviour returns `None` to abstain or a [`LocalForce`], and records how
//! strongly it wants to be heard in its [`BehaviorState::activation`].
//!
//! Behaviours keep private per-agent state (path cursor, wander angle), so
//! `evaluate` takes `&mut self`.  They must be `Send` so a controller can be
//! evaluated on a worker thread.

pub mod avoid;
pub mod behavior;
pub mod context;
pub mod error;
pub mod flock;
pub mod force;
pub mod geometry;
pub mod path;
pub mod pursuit;
pub mod seek;
pub mod steer;
pub mod wander;


pub use avoid::{AgentAvoidance, AgentAvoidanceConfig, ObstacleAvoidance, ObstacleAvoidanceConfig, ObstacleEvade};
pub use behavior::{BehaviorState, SteeringBehavior};
pub use context::{SteeringContext, Target, WorldView};
pub use error::{BehaviorError, BehaviorResult};
pub use flock::{Alignment, Separation};
pub use force::LocalForce;
pub use path::{Path, PathFollowing};
pub use pursuit::{Evade, Pursuit};
pub use seek::{Arrival, BrakingRadius, Cruise, Flee, Seek};
pub use wander::{NoiseSource, Wander, WanderConfig, WanderMode};
