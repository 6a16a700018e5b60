//! Test: Guards - misuse of a runner is reported, never re-notified

use crate::helpers::*;
use bootchain::core::{ChainError, ChainStatus};
use bootchain::execution::{ChainExit, ChainRunner};

/// A second run is rejected and notifies nobody
#[test]
fn test_process_chain_twice() {
    let (mut runner, recorder) = runner_from(&[("a", None), ("b", None)]);
    let exits = capture_exits(&runner);

    runner.process_chain().unwrap();
    let second = runner.process_chain();

    assert_eq!(second, Err(ChainError::AlreadyStarted));
    assert_execution_order(&recorder, &["a", "b"]);
    assert_single_exit(&exits, ChainExit::completed());
}

/// Registration is closed once the chain has run
#[test]
fn test_add_step_after_start() {
    let (mut runner, recorder) = runner_from(&[("a", None)]);
    runner.process_chain().unwrap();

    let late = RecordingStep::advancing("late", &recorder);
    assert_eq!(runner.add_step(late), Err(ChainError::AlreadyStarted));
    assert_eq!(runner.step_names(), vec!["a"]);
}

/// An empty chain completes at once
#[test]
fn test_empty_chain_completes() {
    let mut runner: ChainRunner<()> = ChainRunner::new(());
    let exits = capture_exits(&runner);

    let exit = runner.process_chain().unwrap();

    assert_eq!(exit, ChainExit::completed());
    assert_single_exit(&exits, ChainExit::completed());
    assert_eq!(runner.last_run_step_index(), 0);
    assert_eq!(runner.state().total_steps, 0);
}

/// Outside signals after the outcome is published are ignored
#[test]
fn test_signals_after_finish_ignored() {
    let (mut runner, _recorder) = runner_from(&[("a", Some("first"))]);
    let exits = capture_exits(&runner);

    runner.process_chain().unwrap();
    runner.signal_complete();
    runner.signal_interruption("second");

    assert_single_exit(&exits, ChainExit::interrupted("first"));
    assert_eq!(runner.status(), ChainStatus::Interrupted);
}

/// Signals before the chain starts are ignored too
#[test]
fn test_signals_before_start_ignored() {
    let (mut runner, recorder) = runner_from(&[("a", None)]);
    let exits = capture_exits(&runner);

    runner.signal_interruption("too early");
    assert_eq!(runner.status(), ChainStatus::NotStarted);
    assert!(exits.lock().unwrap().is_empty());

    runner.process_chain().unwrap();

    assert_execution_order(&recorder, &["a"]);
    assert_single_exit(&exits, ChainExit::completed());
}
