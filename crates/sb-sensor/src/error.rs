//! Sensor-subsystem error type.

use thiserror::Error;

use sb_core::{BodyId, SensorId};

/// Errors produced by `sb-sensor`.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor {0} does not exist")]
    UnknownSensor(SensorId),

    #[error("body {0} does not exist")]
    UnknownBody(BodyId),

    #[error("invalid sensor shape: {0}")]
    InvalidShape(String),
}

pub type SensorResult<T> = Result<T, SensorError>;
