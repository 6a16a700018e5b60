//! bootchain - a music player bootstrapped through a sequential step chain

pub mod cli;
pub mod core;
pub mod execution;
pub mod player;

// Re-export commonly used types
pub use crate::core::{ChainContext, ChainError, ChainStatus, FnStep, Step, Transition};
pub use crate::execution::{ChainEvent, ChainExit, ChainRunner, HandlerId};
pub use crate::player::{Bootstrap, Notification};
