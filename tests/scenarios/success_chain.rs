//! Test: Success Chain - linear execution where every step advances

use crate::helpers::*;
use bootchain::core::ChainStatus;
use bootchain::execution::ChainExit;

/// Steps A, B, C all advance
#[test]
fn test_three_steps_complete() {
    let (mut runner, recorder) = runner_from(&[("a", None), ("b", None), ("c", None)]);
    let exits = capture_exits(&runner);

    let exit = runner.process_chain().unwrap();

    assert_eq!(exit, ChainExit::completed());
    assert_execution_order(&recorder, &["a", "b", "c"]);
    assert_eq!(runner.last_run_step_index(), 2);
    assert_single_exit(&exits, ChainExit::completed());
    assert_eq!(runner.status(), ChainStatus::Completed);
}

/// Registration order is execution order, for any length
#[test]
fn test_order_matches_registration() {
    for n in 1..=12 {
        let names: Vec<String> = (0..n).map(|i| format!("step-{}", i)).collect();
        let steps: Vec<(&str, Option<&str>)> = names.iter().map(|s| (s.as_str(), None)).collect();

        let (mut runner, recorder) = runner_from(&steps);
        let exits = capture_exits(&runner);
        runner.process_chain().unwrap();

        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_execution_order(&recorder, &expected);
        // The counter moves on each advance into a next step, not on completion
        assert_eq!(runner.last_run_step_index(), n - 1);
        assert_single_exit(&exits, ChainExit::completed());
    }
}

/// A single step completes without touching the counter
#[test]
fn test_single_step_chain() {
    let (mut runner, recorder) = runner_from(&[("only", None)]);
    let exits = capture_exits(&runner);

    runner.process_chain().unwrap();

    assert_execution_order(&recorder, &["only"]);
    assert_eq!(runner.last_run_step_index(), 0);
    assert_single_exit(&exits, ChainExit::completed());
}

/// The run state records timing and size
#[test]
fn test_state_after_completion() {
    let (mut runner, _recorder) = runner_from(&[("a", None), ("b", None)]);
    assert_eq!(runner.status(), ChainStatus::NotStarted);

    runner.process_chain().unwrap();

    let state = runner.state();
    assert_eq!(state.total_steps, 2);
    assert!(state.started_at.is_some());
    assert!(state.finished_at.is_some());
    assert!(state.message.is_none());
}
