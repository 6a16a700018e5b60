//! Player bootstrap sequence
//!
//! Wires the three player steps into a [`ChainRunner`] in a fixed order,
//! subscribes one completion handler that turns the outcome into a
//! user-visible [`Notification`], and runs the chain once.

use crate::core::config::BootstrapConfig;
use crate::core::{ChainError, ChainState};
use crate::execution::{ChainExit, ChainRunner};
use crate::player::options::OptionStore;
use crate::player::probe::CapabilityProbe;
use crate::player::steps::{BuildViewModelStep, ConfigureOptionsStep, ValidateCapabilitiesStep};
use crate::player::view_model::UiBinder;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// What the user is told once the bootstrap finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Ready,
    Failed(String),
}

impl Notification {
    pub fn from_exit(exit: &ChainExit) -> Self {
        if exit.success {
            Notification::Ready
        } else {
            Notification::Failed(exit.message.clone().unwrap_or_default())
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failed(_))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Ready => f.write_str("Player ready"),
            Notification::Failed(message) => {
                write!(f, "Couldn't complete bootstrap sequence: {}", message)
            }
        }
    }
}

/// Type for notification sinks
pub type Notifier = Arc<dyn Fn(&Notification) + Send + Sync>;

fn log_notification(notification: &Notification) {
    if notification.is_failure() {
        error!("{}", notification);
    } else {
        info!("{}", notification);
    }
}

/// Result of a bootstrap run
#[derive(Debug, Clone)]
pub struct BootReport {
    pub exit: ChainExit,
    pub state: ChainState,
    pub last_step_index: usize,
    pub payload: Value,
}

/// Builder for the player bootstrap chain
pub struct Bootstrap<C, S, B> {
    config: BootstrapConfig,
    probe: C,
    store: S,
    binder: B,
    payload: Value,
    notifier: Option<Notifier>,
}

impl<C, S, B> Bootstrap<C, S, B>
where
    C: CapabilityProbe + 'static,
    S: OptionStore + 'static,
    B: UiBinder + 'static,
{
    pub fn new(config: BootstrapConfig, probe: C, store: S, binder: B) -> Self {
        Self {
            config,
            probe,
            store,
            binder,
            payload: Value::Object(Default::default()),
            notifier: None,
        }
    }

    /// Initial chain payload (defaults to an empty JSON object)
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Where the final notification goes (defaults to the log)
    pub fn on_notification<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Register the steps and the completion handler without running
    pub fn build(self) -> Result<ChainRunner<Value>, ChainError> {
        let Bootstrap {
            config,
            probe,
            store,
            binder,
            payload,
            notifier,
        } = self;

        let mut runner = ChainRunner::new(payload);
        let validate = ValidateCapabilitiesStep::new(probe).with_required(config.required_formats);
        runner.add_step(validate)?;
        runner.add_step(ConfigureOptionsStep::new(store, config.player))?;
        runner.add_step(BuildViewModelStep::new(binder, config.playlist))?;

        let notify = notifier.unwrap_or_else(|| Arc::new(log_notification) as Notifier);
        runner.add_complete_handler(move |exit| notify(&Notification::from_exit(exit)));

        Ok(runner)
    }

    /// Build and run the chain once
    pub fn run(self) -> Result<BootReport, ChainError> {
        let name = self.config.name.clone();
        let mut runner = self.build()?;
        info!("Bootstrapping {}", name);

        let exit = runner.process_chain()?;
        let state = runner.state();
        let last_step_index = runner.last_run_step_index();

        Ok(BootReport {
            exit,
            state,
            last_step_index,
            payload: runner.into_payload(),
        })
    }
}
