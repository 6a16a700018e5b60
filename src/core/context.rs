//! Chain context - payload and step counter shared by every step

use crate::core::error::ChainError;
use crate::execution::runner::RunnerCore;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::warn;

/// Execution context for a chain run
///
/// Owned by exactly one [`ChainRunner`](crate::execution::ChainRunner) and
/// handed to each step as `&mut` while it executes. Holds a non-owning
/// back-reference to the runner so outcomes can be signalled without the
/// context keeping the runner alive.
pub struct ChainContext<P> {
    /// Opaque application data
    payload: P,

    /// Number of advances to a next step
    step_index: usize,

    /// Back-reference to the owning runner
    runner: Option<Weak<RunnerCore>>,
}

impl<P> ChainContext<P> {
    /// Create an unbound context holding `payload`
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            step_index: 0,
            runner: None,
        }
    }

    /// Get the current payload
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Get the current payload for in-place edits
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Replace the payload, returning the previous one
    pub fn set_payload(&mut self, payload: P) -> P {
        std::mem::replace(&mut self.payload, payload)
    }

    /// Consume the context and return the payload
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Index of the last step the chain advanced into
    pub fn last_run_step_index(&self) -> usize {
        self.step_index
    }

    /// Whether a runner has been bound
    pub fn is_bound(&self) -> bool {
        self.runner.is_some()
    }

    pub(crate) fn increment_step_counter(&mut self) {
        self.step_index += 1;
    }

    /// Bind the owning runner. Only the first binding is kept.
    pub(crate) fn bind_runner(&mut self, runner: Weak<RunnerCore>) -> Result<(), ChainError> {
        if self.runner.is_some() {
            return Err(ChainError::RunnerAlreadyBound);
        }
        self.runner = Some(runner);
        Ok(())
    }

    pub(crate) fn signal_complete(&self) {
        match self.runner() {
            Some(runner) => runner.signal_complete(),
            None => warn!("Chain completed but the context has no live runner"),
        }
    }

    pub(crate) fn signal_interruption(&self, message: &str) {
        match self.runner() {
            Some(runner) => runner.signal_interruption(message),
            None => warn!(
                "Chain interrupted ({}) but the context has no live runner",
                message
            ),
        }
    }

    fn runner(&self) -> Option<Arc<RunnerCore>> {
        self.runner.as_ref().and_then(Weak::upgrade)
    }
}

impl<P: Default> Default for ChainContext<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P: fmt::Debug> fmt::Debug for ChainContext<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainContext")
            .field("payload", &self.payload)
            .field("step_index", &self.step_index)
            .field("bound", &self.is_bound())
            .finish()
    }
}
