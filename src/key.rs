//! Key binding types shared by the interactive components.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A named set of key chords bound to one action, with optional help text.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Key chords that trigger this binding.
    pub keys: Vec<(KeyCode, KeyModifiers)>,
    /// Short key hint shown in help (e.g. "ctrl+u").
    pub help: String,
    /// What the binding does (e.g. "clear the input line").
    pub description: String,
}

impl Binding {
    /// Creates a binding for plain (unmodified) keys.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().map(|k| (k, KeyModifiers::NONE)).collect(),
            help: String::new(),
            description: String::new(),
        }
    }

    /// Creates a binding from explicit key+modifier chords.
    pub fn with_chords(keys: Vec<(KeyCode, KeyModifiers)>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
        }
    }

    /// Adds an extra chord to the binding.
    pub fn also(mut self, key: KeyCode, modifiers: KeyModifiers) -> Self {
        self.keys.push((key, modifiers));
        self
    }

    /// Sets the key hint shown in help output.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the action description shown in help output.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reports whether the incoming key message matches any chord of this
    /// binding. Both the key code and the modifier set must match.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.keys
            .iter()
            .any(|(code, mods)| *code == msg.key && *mods == msg.modifiers)
    }
}

/// Convenience wrapper used by components when dispatching key messages.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_plain_key_matches() {
        let binding = Binding::new(vec![KeyCode::Enter]);
        assert!(binding.matches(&key(KeyCode::Enter)));
        assert!(!binding.matches(&key(KeyCode::Esc)));
    }

    #[test]
    fn test_modifier_must_match() {
        let binding = Binding::with_chords(vec![(KeyCode::Char('u'), KeyModifiers::CONTROL)]);
        assert!(!binding.matches(&key(KeyCode::Char('u'))));
        assert!(binding.matches(&KeyMsg {
            key: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    #[test]
    fn test_additional_chord() {
        let binding =
            Binding::new(vec![KeyCode::Up]).also(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert!(binding.matches(&key(KeyCode::Up)));
        assert!(binding.matches(&KeyMsg {
            key: KeyCode::Char('p'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }
}
