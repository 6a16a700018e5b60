//! Chain error types

use thiserror::Error;

/// Error types for chain operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A step aborted the chain
    #[error("Chain interrupted: {0}")]
    Interrupted(String),

    #[error("Chain has already been started")]
    AlreadyStarted,

    #[error("Context is already bound to a runner")]
    RunnerAlreadyBound,
}
