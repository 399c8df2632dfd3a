//! Core model and interpreter for the console component.

use super::command::{Action, CommandSet, EVENT_COMMANDS};
use super::keymap::{default_key_map, KeyMap};
use super::types::{OutputLine, OutputSink, Phase};
use crate::clock::{system_clock, SharedClock};
use crate::history::BoundedBuffer;
use crate::key::matches_binding;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

/// How many submitted commands the session remembers.
pub const HISTORY_CAPACITY: usize = 20;
/// How many output lines the console keeps on screen.
pub const OUTPUT_CAPACITY: usize = 8;

/// A faux-terminal widget: a bounded output log, a single input line, and
/// a small zero-argument command interpreter.
///
/// The interpreter is a three-state machine (`Idle`, `AwaitingInput`,
/// `Executing`). Submissions are processed one at a time to completion;
/// the `Executing` phase rejects re-entrant calls, which is all the
/// serialization a cooperative single-threaded host needs.
///
/// # Examples
///
/// ```rust
/// use bigday_widgets::console::new;
/// use bigday_widgets::Component;
///
/// let mut console = new();
/// console.focus(); // starts the session, prints the banner once
///
/// let produced = console.execute("help");
/// assert!(produced.len() > 1); // echo plus the listing
///
/// // Unknown keywords are a represented outcome, not an error.
/// let produced = console.execute("xyzzy");
/// assert_eq!(produced.len(), 2); // echo plus one informational line
/// ```
pub struct Model {
    /// Prompt prefix for the input line and echoed submissions.
    pub prompt: String,
    /// Lines printed once when the session starts.
    pub banner: Vec<String>,
    /// Maximum display width in cells; 0 disables truncation.
    pub width: i32,

    /// Style for the prompt prefix.
    pub prompt_style: Style,
    /// Style for the pending input text.
    pub input_style: Style,
    /// Style for output text.
    pub output_style: Style,
    /// Style for line timestamps.
    pub timestamp_style: Style,

    /// Key bindings for the input surface.
    pub key_map: KeyMap,

    commands: CommandSet,
    clock: SharedClock,
    sink: Option<Box<dyn OutputSink + Send>>,

    history: BoundedBuffer<String>,
    output: BoundedBuffer<OutputLine>,
    /// History navigation cursor; `history.len()` means "past the newest".
    cursor: usize,
    input: String,
    phase: Phase,
    focus: bool,
}

/// Creates a console with the built-in event command set and the real
/// wall clock. The session stays `Idle` (no banner) until the console is
/// focused or `start_session` is called.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        banner: vec![
            "amara&theo — guest console".to_string(),
            "type 'help' to look around".to_string(),
        ],
        width: 0,
        prompt_style: Style::new().foreground(Color::from("205")),
        input_style: Style::new(),
        output_style: Style::new(),
        timestamp_style: Style::new().foreground(Color::from("240")),
        key_map: default_key_map(),
        commands: EVENT_COMMANDS.clone(),
        clock: system_clock(),
        sink: None,
        history: BoundedBuffer::new(HISTORY_CAPACITY),
        output: BoundedBuffer::new(OUTPUT_CAPACITY),
        cursor: 0,
        input: String::new(),
        phase: Phase::Idle,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Replaces the command table. Takes effect for subsequent
    /// submissions; history and output are untouched.
    pub fn set_commands(&mut self, commands: CommandSet) {
        self.commands = commands;
    }

    /// Replaces the clock used for output timestamps.
    pub fn set_clock(&mut self, clock: SharedClock) {
        self.clock = clock;
    }

    /// Wires an output sink. Absence of a sink is a silent no-op
    /// everywhere; nothing in the console requires one.
    pub fn set_output_sink(&mut self, sink: Box<dyn OutputSink + Send>) {
        self.sink = Some(sink);
    }

    /// The interpreter's current session phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The pending input line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the pending input line (hosts driving the console without
    /// key events use this together with `execute`).
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Snapshot of the on-screen output, oldest first.
    pub fn output_lines(&self) -> impl Iterator<Item = &OutputLine> {
        self.output.iter()
    }

    /// Snapshot of the command history, oldest first.
    pub fn history_entries(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Starts the session: prints the banner and moves to `AwaitingInput`.
    /// Calling it again is a no-op — the banner prints once per session.
    pub fn start_session(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        let banner = self.banner.clone();
        for line in banner {
            self.append_line(line);
        }
        self.phase = Phase::AwaitingInput;
    }

    /// Interprets one submission and returns the lines it produced.
    ///
    /// The raw input is trimmed; an empty result is a complete no-op (no
    /// output, no history entry, no state change). Otherwise the trimmed
    /// text is echoed prompt-prefixed exactly as typed, the keyword is
    /// dispatched case-insensitively, and the submission is recorded in
    /// history (consecutive duplicates collapse to one entry).
    ///
    /// `clear` is the one command that does not append: it empties the
    /// output buffer in a single step and notifies the sink. An unknown
    /// keyword produces exactly one informational line. Neither path can
    /// fail — there is no error to surface, only output.
    pub fn execute(&mut self, raw: &str) -> Vec<OutputLine> {
        // One submission at a time; a re-entrant call is dropped whole.
        if self.phase == Phase::Executing {
            return Vec::new();
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        // A submission on an idle console implies the session has begun.
        self.start_session();
        self.phase = Phase::Executing;

        let mut produced = Vec::new();
        produced.push(self.append_line(format!("{}{}", self.prompt, trimmed)));

        let keyword = trimmed.to_lowercase();
        match self.commands.lookup(&keyword).map(|spec| spec.action.clone()) {
            Some(Action::Respond(lines)) => {
                for line in lines {
                    produced.push(self.append_line(line));
                }
            }
            Some(Action::Help) => {
                let listing: Vec<String> = self
                    .commands
                    .iter()
                    .map(|spec| format!("{:<12}{}", spec.keyword, spec.description))
                    .collect();
                for line in listing {
                    produced.push(self.append_line(line));
                }
            }
            Some(Action::Clear) => {
                self.output.clear();
                if let Some(sink) = self.sink.as_mut() {
                    sink.on_clear();
                }
                produced.clear();
            }
            None => {
                produced.push(self.append_line(format!(
                    "command not found: {}. type 'help' to list commands.",
                    keyword
                )));
            }
        }

        self.history.push_dedup(trimmed.to_string());
        self.cursor = self.history.len();

        self.phase = Phase::AwaitingInput;
        produced
    }

    /// Replaces the pending input with the previous (older) history
    /// entry, clamping at the oldest. Never wraps, never executes.
    pub fn history_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        if let Some(entry) = self.history.get(self.cursor) {
            self.input = entry.clone();
        }
    }

    /// Replaces the pending input with the next (newer) history entry.
    /// Stepping past the newest clears the pending input instead of
    /// erroring.
    pub fn history_next(&mut self) {
        if self.cursor < self.history.len() {
            self.cursor += 1;
        }
        match self.history.get(self.cursor) {
            Some(entry) => self.input = entry.clone(),
            None => self.input.clear(),
        }
    }

    pub(super) fn append_line(&mut self, text: String) -> OutputLine {
        let line = OutputLine {
            timestamp: self.clock.now(),
            text,
        };
        self.output.push(line.clone());
        if let Some(sink) = self.sink.as_mut() {
            sink.on_line(&line);
        }
        line
    }

    /// Processes key messages when focused: submit, history navigation,
    /// line editing, plain character input.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if matches_binding(key_msg, &self.key_map.submit) {
                let raw = std::mem::take(&mut self.input);
                let _ = self.execute(&raw);
                return None;
            }
            if matches_binding(key_msg, &self.key_map.history_previous) {
                self.history_previous();
                return None;
            }
            if matches_binding(key_msg, &self.key_map.history_next) {
                self.history_next();
                return None;
            }
            if matches_binding(key_msg, &self.key_map.delete_character_backward) {
                self.input.pop();
                return None;
            }
            if matches_binding(key_msg, &self.key_map.delete_line) {
                self.input.clear();
                return None;
            }

            // Plain character input; shift arrives encoded in the char.
            if let KeyCode::Char(ch) = key_msg.key {
                if !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                    && !key_msg.modifiers.contains(KeyModifiers::ALT)
                {
                    self.input.push(ch);
                }
            }
        }

        None
    }
}

impl BubbleTeaModel for Model {
    /// Standalone default: a focused console with the built-in commands.
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new();
        let cmd = model.focus();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Component for Model {
    /// Focusing the console also starts the session, so the banner shows
    /// up the first time the widget becomes interactive.
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        self.start_session();
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
