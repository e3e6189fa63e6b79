//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `SbError` into them
//! via `From` impls where a core validation can fail inside their APIs.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `sb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SbError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `sb-*` crates.
pub type SbResult<T> = Result<T, SbError>;
