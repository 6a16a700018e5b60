//! Chain runner - owns the steps and drives them in registration order

use crate::core::{ChainContext, ChainError, ChainLink, ChainState, ChainStatus, Step, Transition};
use crate::execution::notify::{
    ChainEvent, ChainExit, EventHandler, ExitHandler, ExitHandlers, HandlerId,
};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Runner state shared with the context's back-reference
///
/// The completion and interruption paths live here so that a context can
/// reach them through a `Weak` without owning the runner.
pub(crate) struct RunnerCore {
    state: Mutex<ChainState>,
    exits: ExitHandlers,
}

impl RunnerCore {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(ChainState::new()),
            exits: ExitHandlers::new(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> ChainState {
        self.lock_state().clone()
    }

    pub(crate) fn start(&self, total_steps: usize) -> bool {
        self.lock_state().start(total_steps)
    }

    pub(crate) fn add_complete_handler(&self, handler: ExitHandler) -> HandlerId {
        self.exits.subscribe(handler)
    }

    pub(crate) fn remove_complete_handler(&self, id: HandlerId) -> bool {
        self.exits.unsubscribe(id)
    }

    pub(crate) fn handler_count(&self) -> usize {
        self.exits.len()
    }

    /// Publish `(true, None)`, once, if the chain is running
    pub(crate) fn signal_complete(&self) {
        let changed = self.lock_state().complete();
        if !changed {
            warn!("Ignoring completion signal: chain is not running");
            return;
        }
        info!("Chain completed");
        self.exits.publish(&ChainExit::completed());
    }

    /// Publish `(false, message)`, once, if the chain is running
    pub(crate) fn signal_interruption(&self, message: &str) {
        let changed = self.lock_state().interrupt(message);
        if !changed {
            warn!("Ignoring interruption signal ({}): chain is not running", message);
            return;
        }
        info!("Chain interrupted: {}", message);
        self.exits.publish(&ChainExit::interrupted(message));
    }
}

/// Owns an ordered, singly linked chain of steps and the context they share
pub struct ChainRunner<P> {
    core: Arc<RunnerCore>,
    context: ChainContext<P>,
    links: Vec<ChainLink<P>>,
    first: Option<usize>,
    last: Option<usize>,
    event_handlers: Vec<EventHandler>,
}

impl<P> ChainRunner<P> {
    /// Create a runner whose context starts with `payload`
    pub fn new(payload: P) -> Self {
        let core = Arc::new(RunnerCore::new());
        let mut context = ChainContext::new(payload);
        let bound = context.bind_runner(Arc::downgrade(&core));
        debug_assert!(bound.is_ok());

        Self {
            core,
            context,
            links: Vec::new(),
            first: None,
            last: None,
            event_handlers: Vec::new(),
        }
    }

    /// Append a step to the end of the chain
    ///
    /// All steps must be registered before `process_chain` is called.
    pub fn add_step<S>(&mut self, step: S) -> Result<(), ChainError>
    where
        S: Step<P> + 'static,
    {
        self.add_boxed_step(Box::new(step))
    }

    pub fn add_boxed_step(&mut self, step: Box<dyn Step<P>>) -> Result<(), ChainError> {
        if self.status() != ChainStatus::NotStarted {
            warn!("Rejected step '{}': chain already started", step.name());
            return Err(ChainError::AlreadyStarted);
        }

        let index = self.links.len();
        debug!("Registering step {} '{}'", index, step.name());
        self.links.push(ChainLink::new(step));

        if self.first.is_none() {
            self.first = Some(index);
        }
        if let Some(last) = self.last {
            self.links[last].set_next_step(index);
        }
        self.last = Some(index);

        Ok(())
    }

    /// Subscribe to the chain outcome
    pub fn add_complete_handler<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&ChainExit) + Send + Sync + 'static,
    {
        self.core.add_complete_handler(Arc::new(handler))
    }

    /// Drop a completion subscription. Returns false if it was not registered.
    pub fn remove_complete_handler(&self, id: HandlerId) -> bool {
        self.core.remove_complete_handler(id)
    }

    /// Number of completion subscribers
    pub fn complete_handler_count(&self) -> usize {
        self.core.handler_count()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&ChainEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ChainEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Run the chain from its first step
    ///
    /// Returns the same outcome the completion handlers receive. A chain can
    /// only be processed once; later calls return `ChainError::AlreadyStarted`
    /// and notify nobody. An empty chain completes immediately.
    pub fn process_chain(&mut self) -> Result<ChainExit, ChainError> {
        if !self.core.start(self.links.len()) {
            warn!("process_chain called on a chain that was already started");
            return Err(ChainError::AlreadyStarted);
        }

        let run_id = self.core.state().run_id;
        info!("Starting chain {} ({} steps)", run_id, self.links.len());
        self.emit_event(ChainEvent::ChainStarted {
            run_id,
            total_steps: self.links.len(),
        });

        let Some(mut current) = self.first else {
            debug!("No steps registered, completing immediately");
            self.context.signal_complete();
            return Ok(self.finish());
        };

        loop {
            let name = self.links[current].name().to_string();
            debug!("Executing step {} '{}'", current, name);
            self.emit_event(ChainEvent::StepStarted {
                index: current,
                name: name.clone(),
            });

            match self.links[current].execute(&mut self.context) {
                Transition::Advance => {
                    self.emit_event(ChainEvent::StepAdvanced {
                        index: current,
                        name,
                    });
                    match self.advance(current) {
                        Some(next) => current = next,
                        None => break,
                    }
                }
                Transition::Interrupt(message) => {
                    warn!("Step '{}' interrupted the chain: {}", name, message);
                    self.emit_event(ChainEvent::StepInterrupted {
                        index: current,
                        name,
                        message: message.clone(),
                    });
                    self.interrupt(&message);
                    break;
                }
            }
        }

        Ok(self.finish())
    }

    /// Move past the step at `from`: complete at the tail, else bump the counter
    fn advance(&mut self, from: usize) -> Option<usize> {
        match self.links[from].next_step() {
            None => {
                self.context.signal_complete();
                None
            }
            Some(next) => {
                self.context.increment_step_counter();
                Some(next)
            }
        }
    }

    /// Abandon the chain; no further step runs
    fn interrupt(&self, message: &str) {
        self.context.signal_interruption(message);
    }

    fn finish(&self) -> ChainExit {
        let state = self.core.state();
        self.emit_event(ChainEvent::ChainFinished {
            run_id: state.run_id,
            status: state.status,
        });

        match state.status {
            ChainStatus::Completed => ChainExit::completed(),
            _ => ChainExit::interrupted(state.message.unwrap_or_default()),
        }
    }

    /// Publish a successful outcome (ignored unless the chain is running)
    pub fn signal_complete(&self) {
        self.core.signal_complete();
    }

    /// Publish an interruption (ignored unless the chain is running)
    pub fn signal_interruption(&self, message: &str) {
        self.core.signal_interruption(message);
    }

    pub fn last_run_step_index(&self) -> usize {
        self.context.last_run_step_index()
    }

    pub fn context(&self) -> &ChainContext<P> {
        &self.context
    }

    pub fn payload(&self) -> &P {
        self.context.payload()
    }

    pub fn payload_mut(&mut self) -> &mut P {
        self.context.payload_mut()
    }

    pub fn set_payload(&mut self, payload: P) -> P {
        self.context.set_payload(payload)
    }

    /// Consume the runner and return the payload
    pub fn into_payload(self) -> P {
        self.context.into_payload()
    }

    pub fn first_step(&self) -> Option<usize> {
        self.first
    }

    pub fn last_step(&self) -> Option<usize> {
        self.last
    }

    pub fn links(&self) -> &[ChainLink<P>] {
        &self.links
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Snapshot of the run state
    pub fn state(&self) -> ChainState {
        self.core.state()
    }

    pub fn status(&self) -> ChainStatus {
        self.core.state().status
    }
}

impl<P: Default> Default for ChainRunner<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P: fmt::Debug> fmt::Debug for ChainRunner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainRunner")
            .field("context", &self.context)
            .field("links", &self.links)
            .field("status", &self.status())
            .finish()
    }
}
