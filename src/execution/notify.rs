//! Completion notification channel and step events

use crate::core::{ChainError, ChainStatus};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Final outcome of a chain run, as delivered to completion handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainExit {
    pub success: bool,
    pub message: Option<String>,
}

impl ChainExit {
    pub fn completed() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn interrupted(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Turn an interruption into `ChainError::Interrupted`
    pub fn into_result(self) -> Result<(), ChainError> {
        if self.success {
            Ok(())
        } else {
            Err(ChainError::Interrupted(self.message.unwrap_or_default()))
        }
    }
}

/// Type for completion handlers
pub type ExitHandler = Arc<dyn Fn(&ChainExit) + Send + Sync>;

/// Registration token returned when subscribing a completion handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Ordered list of completion subscribers
pub(crate) struct ExitHandlers {
    handlers: Mutex<Vec<(HandlerId, ExitHandler)>>,
    next_id: AtomicU64,
}

impl ExitHandlers {
    pub(crate) fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub(crate) fn subscribe(&self, handler: ExitHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, handler));
        id
    }

    pub(crate) fn unsubscribe(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Deliver `exit` to every handler in registration order
    pub(crate) fn publish(&self, exit: &ChainExit) {
        // Snapshot so handlers can (un)subscribe while being called
        let snapshot: Vec<ExitHandler> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in snapshot {
            handler(exit);
        }
    }
}

/// Events that can occur during a chain run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    ChainStarted {
        run_id: Uuid,
        total_steps: usize,
    },
    StepStarted {
        index: usize,
        name: String,
    },
    StepAdvanced {
        index: usize,
        name: String,
    },
    StepInterrupted {
        index: usize,
        name: String,
        message: String,
    },
    ChainFinished {
        run_id: Uuid,
        status: ChainStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ChainEvent) + Send + Sync>;
