//! Key bindings for the console component.

use crate::key::Binding;
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings for the console's input surface.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Submit the pending input line.
    pub submit: Binding,
    /// Recall the previous (older) history entry.
    pub history_previous: Binding,
    /// Step to the next (newer) history entry.
    pub history_next: Binding,
    /// Delete one character before the cursor.
    pub delete_character_backward: Binding,
    /// Discard the pending input line.
    pub delete_line: Binding,
}

/// The default console bindings: enter to submit, arrows (or readline's
/// ctrl+p/ctrl+n) for history, backspace and ctrl+u for editing.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        submit: Binding::new(vec![KeyCode::Enter])
            .with_help("enter")
            .with_description("run the command"),
        history_previous: Binding::new(vec![KeyCode::Up])
            .also(KeyCode::Char('p'), KeyModifiers::CONTROL)
            .with_help("↑")
            .with_description("older history entry"),
        history_next: Binding::new(vec![KeyCode::Down])
            .also(KeyCode::Char('n'), KeyModifiers::CONTROL)
            .with_help("↓")
            .with_description("newer history entry"),
        delete_character_backward: Binding::new(vec![KeyCode::Backspace])
            .with_help("backspace")
            .with_description("delete backward"),
        delete_line: Binding::with_chords(vec![(KeyCode::Char('u'), KeyModifiers::CONTROL)])
            .with_help("ctrl+u")
            .with_description("discard the line"),
    }
}
