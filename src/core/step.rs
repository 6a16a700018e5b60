//! Step domain model

use crate::core::context::ChainContext;
use std::fmt;

/// How a step resolves once its work is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Run the next step, or complete the chain if this was the last one
    Advance,
    /// Abandon the rest of the chain with a human-readable reason
    Interrupt(String),
}

impl Transition {
    /// Build an interruption with the given reason
    pub fn interrupt(message: impl Into<String>) -> Self {
        Transition::Interrupt(message.into())
    }

    pub fn is_advance(&self) -> bool {
        matches!(self, Transition::Advance)
    }
}

/// A single unit of sequential work in a chain
///
/// `execute` must resolve to exactly one [`Transition`]. Because the
/// resolution is the return value, a step cannot leave the chain stalled and
/// cannot both advance and interrupt.
pub trait Step<P>: Send {
    /// Human-readable step name (for logging/events)
    fn name(&self) -> &str;

    /// Do the step's work against the shared context
    fn execute(&mut self, ctx: &mut ChainContext<P>) -> Transition;
}

/// A step built from a closure
pub struct FnStep<F> {
    name: String,
    run: F,
}

impl<F> FnStep<F> {
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }
}

impl<P, F> Step<P> for FnStep<F>
where
    F: FnMut(&mut ChainContext<P>) -> Transition + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, ctx: &mut ChainContext<P>) -> Transition {
        (self.run)(ctx)
    }
}

/// A registered step and its link to the following one
pub struct ChainLink<P> {
    step: Box<dyn Step<P>>,
    next: Option<usize>,
}

impl<P> ChainLink<P> {
    pub(crate) fn new(step: Box<dyn Step<P>>) -> Self {
        Self { step, next: None }
    }

    pub fn name(&self) -> &str {
        self.step.name()
    }

    /// Position of the following link, `None` for the tail
    pub fn next_step(&self) -> Option<usize> {
        self.next
    }

    /// Link this step to the one registered after it. Set once.
    pub(crate) fn set_next_step(&mut self, next: usize) {
        debug_assert!(self.next.is_none(), "chain links are fixed once set");
        self.next = Some(next);
    }

    pub(crate) fn execute(&mut self, ctx: &mut ChainContext<P>) -> Transition {
        self.step.execute(ctx)
    }
}

impl<P> fmt::Debug for ChainLink<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainLink")
            .field("step", &self.name())
            .field("next", &self.next)
            .finish()
    }
}
