//! Injectable wall-clock source.
//!
//! Components never call `SystemTime::now()` directly; they read time
//! through a [`Clock`] so that countdown math and output timestamps can be
//! driven deterministically in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Supplies the current wall-clock time.
///
/// `Debug` is a supertrait so models holding a clock can stay `Debug`
/// themselves.
pub trait Clock: std::fmt::Debug {
    /// The current time according to this clock.
    fn now(&self) -> SystemTime;
}

/// Shared handle to a clock; models hold this so they stay cheap to clone.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Returns a shared handle to the real wall clock.
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// A clock that only moves when told to. For tests and demos.
///
/// Stores nanoseconds since the Unix epoch in an atomic so shared handles
/// can move time without locking.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    /// Creates a manual clock frozen at `now`.
    pub fn new(now: SystemTime) -> Self {
        let nanos = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos() as u64;
        Self {
            nanos: AtomicU64::new(nanos),
        }
    }

    /// Creates a manual clock at `secs` seconds past the Unix epoch.
    pub fn at_unix_secs(secs: u64) -> Self {
        Self::new(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    /// Jumps the clock to `now`, in either direction.
    pub fn set(&self, now: SystemTime) {
        let nanos = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos() as u64;
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Moves the clock backwards, saturating at the epoch. Regression is a
    /// supported input for the countdown engine, so tests need to express it.
    pub fn rewind(&self, by: Duration) {
        let by = by.as_nanos() as u64;
        let mut current = self.nanos.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_sub(by);
            match self.nanos.compare_exchange(
                current,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance_and_rewind() {
        let clock = ManualClock::at_unix_secs(1_000);
        assert_eq!(
            clock.now(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_000)
        );

        clock.advance(Duration::from_secs(5));
        assert_eq!(
            clock.now(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_005)
        );

        clock.rewind(Duration::from_secs(10));
        assert_eq!(
            clock.now(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(995)
        );
    }

    #[test]
    fn test_rewind_saturates_at_epoch() {
        let clock = ManualClock::at_unix_secs(3);
        clock.rewind(Duration::from_secs(60));
        assert_eq!(clock.now(), SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn test_shared_clock_is_shareable() {
        let clock: SharedClock = Arc::new(ManualClock::at_unix_secs(42));
        let other = Arc::clone(&clock);
        assert_eq!(clock.now(), other.now());
    }
}
