//! `sb-sensor`: perception primitives for the `rust_steer` framework.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`body`]    | `BodyTable`, `BodyKind`, `Obstacle`, `LayerMask`                  |
//! | [`sensor`]  | `Sensor`, `SensorSet` (factory), `SensorEvent`, `SensorInbox`     |
//! | [`detect`]  | `ProximityDetector`: R-tree overlap detection producing events   |
//! | [`layout`]  | `obstacle_ring`: obstacles placed around an ellipse              |
//! | [`error`]   | `SensorError`, `SensorResult<T>`                                  |
//!
//! # Event flow
//!
//! A sensor never looks at the world itself.  Some collision system (the
//! bundled [`ProximityDetector`] or any external one) produces
//! `(SensorId, SensorEvent)` pairs; they are applied to the [`SensorSet`]
//! at a tick boundary, either directly via [`SensorSet::apply`] or through
//! the thread-safe [`SensorInbox`] handoff queue.  Between boundaries the
//! membership set is read-only, so every behaviour evaluated in a tick sees
//! the same membership.

pub mod body;
pub mod detect;
pub mod error;
pub mod layout;
pub mod sensor;


pub use body::{BodyKind, BodyTable, LayerMask, Obstacle};
pub use detect::ProximityDetector;
pub use error::{SensorError, SensorResult};
pub use layout::obstacle_ring;
pub use sensor::{Sensor, SensorEvent, SensorEventSender, SensorInbox, SensorSet, SensorShape};
