//! Core domain models for the step chain
//!
//! This module defines the context shared by steps, the step abstraction
//! itself, the run state machine and the bootstrap configuration.

pub mod config;
pub mod context;
pub mod error;
pub mod state;
pub mod step;

pub use context::*;
pub use error::*;
pub use state::*;
pub use step::*;
