//! Tests for the console component.

use super::command::{Action, CommandSet, CommandSpec};
use super::model::{new, Model, OUTPUT_CAPACITY};
use super::types::{OutputLine, OutputSink, Phase};
use crate::clock::ManualClock;
use crate::Component;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;

fn fixed_clock_console() -> Model {
    let mut console = new();
    console.set_clock(Arc::new(ManualClock::at_unix_secs(1_700_000_000)));
    console
}

fn key(code: KeyCode) -> Box<KeyMsg> {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn texts(lines: &[OutputLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn test_session_starts_once() {
    let mut console = fixed_clock_console();
    assert_eq!(console.phase(), Phase::Idle);

    console.start_session();
    assert_eq!(console.phase(), Phase::AwaitingInput);
    let after_first = console.output_lines().count();
    assert_eq!(after_first, console.banner.len());

    // Idempotent: the banner is not printed again.
    console.start_session();
    assert_eq!(console.output_lines().count(), after_first);
}

#[test]
fn test_execute_on_idle_console_starts_session() {
    let mut console = fixed_clock_console();
    console.execute("status");
    assert_eq!(console.phase(), Phase::AwaitingInput);
    // Banner lines precede the echo in the output log.
    let first = console.output_lines().next().expect("banner line");
    assert_eq!(first.text, console.banner[0]);
}

#[test]
fn test_echo_preserves_raw_case_dispatch_does_not() {
    let mut console = fixed_clock_console();
    console.start_session();

    let upper = console.execute("HELP");
    assert_eq!(upper[0].text, "> HELP");

    let lower = console.execute("help");
    assert_eq!(lower[0].text, "> help");

    // Identical dispatch output either way.
    assert_eq!(texts(&upper[1..]), texts(&lower[1..]));
    assert!(upper.len() > 1);
}

#[test]
fn test_empty_and_whitespace_submissions_are_no_ops() {
    let mut console = fixed_clock_console();
    console.start_session();
    let baseline = console.output_lines().count();

    assert!(console.execute("").is_empty());
    assert!(console.execute("   ").is_empty());
    assert!(console.execute("\t").is_empty());

    assert_eq!(console.output_lines().count(), baseline);
    assert_eq!(console.history_entries().count(), 0);
    assert_eq!(console.phase(), Phase::AwaitingInput);
}

#[test]
fn test_consecutive_duplicates_collapse_in_history_not_output() {
    let mut console = fixed_clock_console();
    console.start_session();

    let first = console.execute("status");
    let second = console.execute("status");

    assert_eq!(console.history_entries().collect::<Vec<_>>(), vec!["status"]);
    // Output is not deduplicated: both echoes and both responses landed.
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);

    console.execute("venue");
    console.execute("status");
    assert_eq!(
        console.history_entries().collect::<Vec<_>>(),
        vec!["status", "venue", "status"]
    );
}

#[test]
fn test_unknown_command_is_one_line_and_recorded() {
    let mut console = fixed_clock_console();
    console.start_session();

    let produced = console.execute("xyzzy");
    assert_eq!(produced.len(), 2); // echo + exactly one informational line
    assert_eq!(produced[0].text, "> xyzzy");
    assert!(produced[1].text.contains("command not found: xyzzy"));
    assert_eq!(console.history_entries().collect::<Vec<_>>(), vec!["xyzzy"]);
}

#[test]
fn test_output_buffer_never_exceeds_capacity() {
    let mut console = fixed_clock_console();
    console.start_session();

    for _ in 0..10 {
        console.execute("journey");
        console.execute("venue");
        assert!(console.output_lines().count() <= OUTPUT_CAPACITY);
    }
}

#[test]
fn test_clear_resets_output_but_not_history() {
    let mut console = fixed_clock_console();
    console.start_session();
    console.execute("journey");
    console.execute("venue");
    assert!(console.output_lines().count() > 0);

    let produced = console.execute("clear");
    assert!(produced.is_empty());
    assert_eq!(console.output_lines().count(), 0);
    assert_eq!(
        console.history_entries().collect::<Vec<_>>(),
        vec!["journey", "venue", "clear"]
    );

    // The console keeps working after a clear.
    console.execute("status");
    assert!(console.output_lines().count() > 0);
}

#[test]
fn test_history_navigation_clamps_and_walks() {
    let mut console = fixed_clock_console();
    console.start_session();
    console.execute("marriage");
    console.execute("venue");
    console.execute("journey");

    console.history_previous();
    assert_eq!(console.input(), "journey");
    console.history_previous();
    assert_eq!(console.input(), "venue");
    console.history_previous();
    assert_eq!(console.input(), "marriage");
    // Clamped at the oldest; never wraps.
    console.history_previous();
    assert_eq!(console.input(), "marriage");

    console.history_next();
    assert_eq!(console.input(), "venue");
    console.history_next();
    assert_eq!(console.input(), "journey");
    // Past the newest: empty pending input, not an error.
    console.history_next();
    assert_eq!(console.input(), "");
}

#[test]
fn test_navigation_on_empty_history_is_harmless() {
    let mut console = fixed_clock_console();
    console.start_session();
    console.history_previous();
    console.history_next();
    assert_eq!(console.input(), "");
}

#[test]
fn test_submission_resets_navigation_to_newest() {
    let mut console = fixed_clock_console();
    console.start_session();
    console.execute("marriage");
    console.execute("venue");

    console.history_previous();
    console.history_previous();
    assert_eq!(console.input(), "marriage");

    console.set_input("");
    console.execute("journey");
    console.history_previous();
    assert_eq!(console.input(), "journey");
}

#[test]
fn test_key_driven_round_trip() {
    let mut console = fixed_clock_console();
    console.focus();

    for ch in "STATUS".chars() {
        console.update(key(KeyCode::Char(ch)));
    }
    assert_eq!(console.input(), "STATUS");

    console.update(key(KeyCode::Enter));
    assert_eq!(console.input(), "");
    assert_eq!(console.history_entries().collect::<Vec<_>>(), vec!["STATUS"]);

    // Up recalls the raw submission.
    console.update(key(KeyCode::Up));
    assert_eq!(console.input(), "STATUS");

    // Backspace edits it, ctrl+u discards it.
    console.update(key(KeyCode::Backspace));
    assert_eq!(console.input(), "STATU");
    console.update(Box::new(KeyMsg {
        key: KeyCode::Char('u'),
        modifiers: KeyModifiers::CONTROL,
    }));
    assert_eq!(console.input(), "");
}

#[test]
fn test_unfocused_console_ignores_keys() {
    let mut console = fixed_clock_console();
    console.start_session();
    console.update(key(KeyCode::Char('x')));
    assert_eq!(console.input(), "");
}

#[test]
fn test_control_characters_are_not_inserted() {
    let mut console = fixed_clock_console();
    console.focus();
    console.update(Box::new(KeyMsg {
        key: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
    }));
    assert_eq!(console.input(), "");
}

#[test]
fn test_output_sink_receives_lines_and_clear() {
    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
        clears: usize,
    }

    // Shared handle so the test can inspect what the console forwarded.
    #[derive(Clone, Default)]
    struct SharedRecorder(Arc<std::sync::Mutex<Recorder>>);

    impl OutputSink for SharedRecorder {
        fn on_line(&mut self, line: &OutputLine) {
            self.0.lock().unwrap().lines.push(line.text.clone());
        }
        fn on_clear(&mut self) {
            self.0.lock().unwrap().clears += 1;
        }
    }

    let recorder = SharedRecorder::default();
    let mut console = fixed_clock_console();
    console.set_output_sink(Box::new(recorder.clone()));

    console.start_session();
    console.execute("status");
    console.execute("clear");

    let seen = recorder.0.lock().unwrap();
    assert!(seen.lines.iter().any(|l| l == "> status"));
    assert_eq!(seen.clears, 1);
}

#[test]
fn test_custom_command_set() {
    let mut console = fixed_clock_console();
    console.set_commands(
        CommandSet::new()
            .with_command(CommandSpec::new("ping", "answer pong", Action::respond(&["pong"])))
            .with_command(CommandSpec::new("clear", "wipe output", Action::Clear)),
    );
    console.start_session();

    let produced = console.execute("PING");
    assert_eq!(texts(&produced), vec!["> PING", "pong"]);

    // The built-in table is gone with the swap.
    let produced = console.execute("venue");
    assert!(produced[1].text.contains("command not found"));
}

#[test]
fn test_view_shows_prompt_after_session_start() {
    let mut console = fixed_clock_console();
    assert!(!console.view().contains("> "));
    console.focus();
    console.set_input("ven");
    let view = console.view();
    assert!(view.contains("ven"));
    assert!(view.contains(&console.banner[0]));
}
