//! Chain run state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall chain status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainStatus {
    /// `process_chain` has not been called yet
    NotStarted,
    /// A step is currently executing
    Running,
    /// The last step advanced
    Completed,
    /// A step interrupted the chain
    Interrupted,
}

impl ChainStatus {
    /// Check if the status is final
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChainStatus::Completed | ChainStatus::Interrupted)
    }
}

/// State of a single chain run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainState {
    /// Unique run ID
    pub run_id: Uuid,

    /// Current status
    pub status: ChainStatus,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run completed or was interrupted
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of registered steps at start
    pub total_steps: usize,

    /// Interruption reason, if any
    pub message: Option<String>,
}

impl ChainState {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: ChainStatus::NotStarted,
            started_at: None,
            finished_at: None,
            total_steps: 0,
            message: None,
        }
    }

    /// Move to `Running`. Returns false if the run was already started.
    pub fn start(&mut self, total_steps: usize) -> bool {
        if self.status != ChainStatus::NotStarted {
            return false;
        }
        self.status = ChainStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_steps = total_steps;
        true
    }

    /// Move to `Completed`. Returns false unless the run is `Running`.
    pub fn complete(&mut self) -> bool {
        if self.status != ChainStatus::Running {
            return false;
        }
        self.status = ChainStatus::Completed;
        self.finished_at = Some(Utc::now());
        true
    }

    /// Move to `Interrupted`. Returns false unless the run is `Running`.
    pub fn interrupt(&mut self, message: &str) -> bool {
        if self.status != ChainStatus::Running {
            return false;
        }
        self.status = ChainStatus::Interrupted;
        self.finished_at = Some(Utc::now());
        self.message = Some(message.to_string());
        true
    }
}

impl Default for ChainState {
    fn default() -> Self {
        Self::new()
    }
}
