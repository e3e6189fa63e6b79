use sb_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("force applied to agent {0} which is not in the store")]
    UnknownAgent(AgentId),

    #[error("invalid timestep {0}")]
    InvalidTimestep(f32),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
