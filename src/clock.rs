use std::time::{Duration, Instant};

/// One-shot tick timer, re-armed after every tick.
///
/// Re-arming reads the interval again, so a difficulty change applies from
/// the next firing on. Cancelling is idempotent.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickClock {
    next_due: Option<Instant>,
}

impl TickClock {
    /// Arms the clock to fire `interval` after `now`.
    pub fn schedule(&mut self, now: Instant, interval: Duration) {
        self.next_due = Some(now + interval);
    }

    /// Stops the clock; no firing happens until it is scheduled again.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when the clock is armed and its deadline has passed.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Time left before the next firing, if armed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
