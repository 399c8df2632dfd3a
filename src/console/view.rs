//! View rendering for the console component.

use super::model::Model;
use super::types::Phase;
use crate::Component;
use std::time::SystemTime;
use unicode_width::UnicodeWidthStr;

impl Model {
    /// Renders the output log (timestamped, width-truncated) followed by
    /// the prompt and the pending input line. An idle console renders only
    /// whatever output exists, with no prompt.
    pub fn view(&self) -> String {
        let mut lines = Vec::new();

        for line in self.output_lines() {
            let stamp = format!("[{}]", clock_face(line.timestamp));
            // Truncate the raw text before styling so escape sequences
            // never count against the width budget.
            let budget = if self.width > 0 {
                (self.width as usize).saturating_sub(stamp.width() + 1)
            } else {
                usize::MAX
            };
            let text = truncate_cells(&line.text, budget);
            lines.push(format!(
                "{} {}",
                self.timestamp_style.render(&stamp),
                self.output_style.render(&text)
            ));
        }

        if self.phase() != Phase::Idle {
            let caret = if self.focused() { "█" } else { " " };
            lines.push(format!(
                "{}{}{}",
                self.prompt_style.render(&self.prompt),
                self.input_style.render(self.input()),
                caret
            ));
        }

        lines.join("\n")
    }
}

/// `HH:MM:SS` (UTC) for an output timestamp.
fn clock_face(at: SystemTime) -> String {
    let secs = at
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3_600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

/// Cuts `text` down to at most `budget` display cells on char boundaries.
fn truncate_cells(text: &str, budget: usize) -> String {
    if text.width() <= budget {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_face_wraps_by_day() {
        let at = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(86_400 + 3_661);
        assert_eq!(clock_face(at), "01:01:01");
    }

    #[test]
    fn test_truncate_cells_respects_wide_chars() {
        assert_eq!(truncate_cells("hello", 10), "hello");
        assert_eq!(truncate_cells("hello", 3), "hel");
        // A fullwidth char is two cells; it must not be split in half.
        assert_eq!(truncate_cells("a💍b", 2), "a");
    }
}
