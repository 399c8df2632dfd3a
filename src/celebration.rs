//! Celebration burst triggers.
//!
//! Cosmetic confetti is the host's job; this module only decides *when* a
//! burst should fire. The scheduler remembers which page sections have
//! already celebrated in an explicit identifier set, so a section fires at
//! most once until `replay` clears the slate.

use std::collections::HashSet;

/// Describes one cosmetic burst. Pure configuration for the host's
/// particle layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    /// How many particles the host should spawn.
    pub particles: usize,
}

impl Burst {
    /// The restrained variant.
    pub fn standard() -> Self {
        Self { particles: 80 }
    }

    /// The full-send variant used on the live page.
    pub fn grand() -> Self {
        Self { particles: 240 }
    }
}

impl Default for Burst {
    fn default() -> Self {
        Self::grand()
    }
}

/// Fires a burst the first time each section becomes visible.
///
/// Section identifiers are opaque strings owned by the host. The
/// already-celebrated set is explicit state: `replay` clears it (safe to
/// call repeatedly), after which every section may fire once more.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    fired: HashSet<String>,
    burst: Burst,
}

impl Scheduler {
    /// A scheduler with the default burst.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler firing a specific burst shape.
    pub fn with_burst(burst: Burst) -> Self {
        Self {
            fired: HashSet::new(),
            burst,
        }
    }

    /// Reports a section becoming visible. Returns the burst to fire on
    /// its first appearance; `None` if it already celebrated.
    pub fn observe_visible(&mut self, section: &str) -> Option<Burst> {
        if self.fired.contains(section) {
            return None;
        }
        self.fired.insert(section.to_string());
        Some(self.burst.clone())
    }

    /// Whether the section has celebrated since the last replay.
    pub fn has_fired(&self, section: &str) -> bool {
        self.fired.contains(section)
    }

    /// Forgets every celebrated section so bursts can fire again.
    pub fn replay(&mut self) {
        self.fired.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_section_fires_once() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.observe_visible("hero").is_some());
        assert!(scheduler.observe_visible("hero").is_none());
        assert!(scheduler.observe_visible("story").is_some());
        assert!(scheduler.has_fired("hero"));
        assert!(!scheduler.has_fired("rsvp"));
    }

    #[test]
    fn test_replay_rearms_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.observe_visible("hero");
        scheduler.replay();
        // Clearing twice is a safe no-op.
        scheduler.replay();
        assert!(scheduler.observe_visible("hero").is_some());
    }

    #[test]
    fn test_burst_intensities() {
        assert!(Burst::grand().particles > Burst::standard().particles);
        let mut scheduler = Scheduler::with_burst(Burst::standard());
        assert_eq!(
            scheduler.observe_visible("hero"),
            Some(Burst::standard())
        );
    }
}
