//! Test utility functions for chain scenarios

use bootchain::core::{ChainContext, Step, Transition};
use bootchain::execution::{ChainExit, ChainRunner};
use std::sync::{Arc, Mutex};

/// Shared log of executed step names, in execution order
#[derive(Clone, Default)]
pub struct Recorder {
    executed: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.executed.lock().unwrap().push(name.to_string());
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

/// Step that records its execution and resolves to a fixed transition
pub struct RecordingStep {
    name: String,
    outcome: Transition,
    recorder: Recorder,
}

impl RecordingStep {
    pub fn advancing(name: &str, recorder: &Recorder) -> Self {
        Self {
            name: name.to_string(),
            outcome: Transition::Advance,
            recorder: recorder.clone(),
        }
    }

    pub fn interrupting(name: &str, message: &str, recorder: &Recorder) -> Self {
        Self {
            name: name.to_string(),
            outcome: Transition::interrupt(message),
            recorder: recorder.clone(),
        }
    }
}

impl<P> Step<P> for RecordingStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, _ctx: &mut ChainContext<P>) -> Transition {
        self.recorder.record(&self.name);
        self.outcome.clone()
    }
}

/// Subscribe a handler that collects every notification
pub fn capture_exits<P>(runner: &ChainRunner<P>) -> Arc<Mutex<Vec<ChainExit>>> {
    let exits = Arc::new(Mutex::new(Vec::new()));
    let sink = exits.clone();
    runner.add_complete_handler(move |exit| sink.lock().unwrap().push(exit.clone()));
    exits
}

/// Build a runner from `(name, interrupt message)` pairs; `None` advances
pub fn runner_from(steps: &[(&str, Option<&str>)]) -> (ChainRunner<()>, Recorder) {
    let recorder = Recorder::new();
    let mut runner = ChainRunner::new(());

    for (name, interrupt) in steps {
        let step = match interrupt {
            Some(message) => RecordingStep::interrupting(name, message, &recorder),
            None => RecordingStep::advancing(name, &recorder),
        };
        runner.add_step(step).unwrap();
    }

    (runner, recorder)
}

/// Assert the steps ran exactly in this order
pub fn assert_execution_order(recorder: &Recorder, expected: &[&str]) {
    let executed = recorder.executed();
    assert_eq!(
        executed, expected,
        "Execution order mismatch: expected {:?}, got {:?}",
        expected, executed
    );
}

/// Assert exactly one notification was delivered, and that it matches
pub fn assert_single_exit(exits: &Arc<Mutex<Vec<ChainExit>>>, expected: ChainExit) {
    let exits = exits.lock().unwrap();
    assert_eq!(exits.len(), 1, "Expected exactly one notification, got {:?}", *exits);
    assert_eq!(exits[0], expected);
}
