use sb_core::{AgentId, BehaviorId, SbError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("behavior {0} is already registered")]
    DuplicateBehavior(BehaviorId),

    #[error("behavior {0} is not registered")]
    UnknownBehavior(BehaviorId),

    #[error("agent {0} is not in the world")]
    UnknownAgent(AgentId),

    #[error("controller configuration error: {0}")]
    Config(#[from] SbError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
