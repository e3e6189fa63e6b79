use sb_controller::ControllerError;
use sb_core::{AgentId, SbError};
use sb_physics::PhysicsError;
use sb_sensor::SensorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] SbError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {0} has no controller")]
    UnknownAgent(AgentId),

    #[error("controller error: {0}")]
    Controller(#[from] ControllerError),

    #[error("sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),
}

pub type SimResult<T> = Result<T, SimError>;
