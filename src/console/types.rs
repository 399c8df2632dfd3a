//! Shared types for the console component.

use std::time::SystemTime;

/// A single line of console output with the wall-clock time it was
/// produced at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// When the line was produced.
    pub timestamp: SystemTime,
    /// The line's text, unstyled.
    pub text: String,
}

/// The interpreter's session state machine.
///
/// `Idle` until the session starts (banner not yet printed);
/// `AwaitingInput` between submissions; `Executing` only while a
/// submission is being processed. `Executing` doubles as the re-entrancy
/// guard: a nested `execute` call during it is rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Session not started; banner not yet printed.
    Idle,
    /// Ready for the next submission.
    AwaitingInput,
    /// A submission is being processed.
    Executing,
}

/// Receives console output as it is produced. Implemented by hosts that
/// mirror the console elsewhere (a transcript pane, a log file, a test).
/// Wiring a sink is optional; the console is fully functional without one.
pub trait OutputSink {
    /// A line was appended to the output buffer.
    fn on_line(&mut self, line: &OutputLine);

    /// The output buffer was reset in one step (the `clear` command).
    fn on_clear(&mut self);
}
