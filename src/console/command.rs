//! The console's command table.
//!
//! Commands are zero-argument keywords dispatched by exact, case-insensitive
//! match — no arguments, no fuzzy matching. What each keyword prints is
//! plain configuration data; the interpreter itself only knows the three
//! action shapes below.

use once_cell::sync::Lazy;

/// What a command does when dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print these lines verbatim.
    Respond(Vec<String>),
    /// Print the command listing (generated from the active set).
    Help,
    /// Empty the output buffer in one step instead of appending.
    Clear,
}

impl Action {
    /// Convenience constructor for literal response lines.
    pub fn respond(lines: &[&str]) -> Self {
        Action::Respond(lines.iter().map(|s| s.to_string()).collect())
    }
}

/// One keyword in the command table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The dispatch keyword, stored lowercase.
    pub keyword: String,
    /// One-line description shown by `help`.
    pub description: String,
    pub action: Action,
}

impl CommandSpec {
    /// Builds a spec; the keyword is normalized to lowercase.
    pub fn new(keyword: impl Into<String>, description: impl Into<String>, action: Action) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            description: description.into(),
            action,
        }
    }
}

/// An ordered command table. Built once, never mutated afterwards — the
/// console clones the set it is constructed with and dispatches against it
/// for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    specs: Vec<CommandSpec>,
}

impl CommandSet {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command, builder style.
    pub fn with_command(mut self, spec: CommandSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Exact-match, case-insensitive lookup.
    pub fn lookup(&self, keyword: &str) -> Option<&CommandSpec> {
        self.specs
            .iter()
            .find(|spec| spec.keyword.eq_ignore_ascii_case(keyword))
    }

    /// Commands in help/display order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.iter()
    }

    /// Number of commands in the table.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the table has no commands.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// The built-in command set for the event console.
///
/// The keyword surface is a compatibility contract: `help, clear,
/// marriage, engagement, venue, status, journey`. Response text is
/// configuration, not logic — replace the whole set via
/// [`crate::console::Model::set_commands`] to repurpose the console.
pub static EVENT_COMMANDS: Lazy<CommandSet> = Lazy::new(|| {
    CommandSet::new()
        .with_command(CommandSpec::new(
            "help",
            "list every command the console knows",
            Action::Help,
        ))
        .with_command(CommandSpec::new(
            "clear",
            "wipe the console output",
            Action::Clear,
        ))
        .with_command(CommandSpec::new(
            "marriage",
            "the headline event",
            Action::respond(&[
                "Amara & Theo are getting married!",
                "Saturday, September 12, 2026 · 4:30 in the afternoon.",
            ]),
        ))
        .with_command(CommandSpec::new(
            "engagement",
            "how the question was asked",
            Action::respond(&[
                "Engaged on the old lighthouse pier, New Year's Eve 2024.",
                "She asked. He cried. The seagulls applauded.",
            ]),
        ))
        .with_command(CommandSpec::new(
            "venue",
            "where to show up",
            Action::respond(&[
                "Harborview Botanical Hall, 18 Quayside Lane.",
                "Ceremony in the fern garden; dinner and dancing in the glasshouse.",
            ]),
        ))
        .with_command(CommandSpec::new(
            "status",
            "how preparations are going",
            Action::respond(&[
                "All systems go: venue booked, band rehearsing, cake in negotiation.",
            ]),
        ))
        .with_command(CommandSpec::new(
            "journey",
            "the story so far",
            Action::respond(&[
                "2017 · met over a shared table in a crowded cafe",
                "2019 · first apartment, first burnt dinner",
                "2024 · the lighthouse pier question",
                "2026 · the big day",
            ]),
        ))
});
