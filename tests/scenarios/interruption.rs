//! Test: Interruption - a step aborts the rest of the chain

use crate::helpers::*;
use bootchain::core::{ChainError, ChainStatus};
use bootchain::execution::ChainExit;

/// A advances, B interrupts with "no-format", C never runs
#[test]
fn test_interrupt_in_the_middle() {
    let (mut runner, recorder) = runner_from(&[("a", None), ("b", Some("no-format")), ("c", None)]);
    let exits = capture_exits(&runner);

    let exit = runner.process_chain().unwrap();

    assert_execution_order(&recorder, &["a", "b"]);
    assert_eq!(runner.last_run_step_index(), 1);
    assert_single_exit(&exits, ChainExit::interrupted("no-format"));
    assert_eq!(exit, ChainExit::interrupted("no-format"));
    assert_eq!(runner.status(), ChainStatus::Interrupted);
    assert_eq!(runner.state().message.as_deref(), Some("no-format"));
}

/// Interrupting at position k leaves the counter at k and skips the rest
#[test]
fn test_interrupt_at_every_position() {
    let names = ["s0", "s1", "s2", "s3", "s4"];

    for k in 0..names.len() {
        let steps: Vec<(&str, Option<&str>)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, if i == k { Some("X") } else { None }))
            .collect();

        let (mut runner, recorder) = runner_from(&steps);
        let exits = capture_exits(&runner);
        runner.process_chain().unwrap();

        assert_execution_order(&recorder, &names[..=k]);
        assert_eq!(runner.last_run_step_index(), k);
        assert_single_exit(&exits, ChainExit::interrupted("X"));
    }
}

/// The first step interrupting never advances the counter
#[test]
fn test_interrupt_first_step() {
    let (mut runner, recorder) = runner_from(&[("gate", Some("closed")), ("after", None)]);
    let exits = capture_exits(&runner);

    runner.process_chain().unwrap();

    assert_execution_order(&recorder, &["gate"]);
    assert_eq!(runner.last_run_step_index(), 0);
    assert_single_exit(&exits, ChainExit::interrupted("closed"));
}

/// Interruption converts into a typed error for `?` callers
#[test]
fn test_interrupt_into_result() {
    let (mut runner, _recorder) = runner_from(&[("a", Some("broken"))]);

    let result = runner.process_chain().unwrap().into_result();

    assert_eq!(result, Err(ChainError::Interrupted("broken".to_string())));
}
