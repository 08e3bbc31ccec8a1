//! Debounced scheduling
//!
//! A small two-state machine: `Idle` until an event arms it, `Pending` until
//! the window elapses with no re-arm. Re-arming while pending replaces the
//! schedule (last event in a burst wins), which is what collapses an editor's
//! save burst into one regeneration.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Pending { armed_at: Instant },
}

/// Reusable debouncer for bursty triggers.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    state: State,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: State::Idle,
        }
    }

    /// Arm, or re-arm while pending.
    pub fn record_event(&mut self) {
        self.state = State::Pending {
            armed_at: Instant::now(),
        };
    }

    /// True when armed and the window has fully elapsed.
    pub fn ready(&self) -> bool {
        match self.state {
            State::Idle => false,
            State::Pending { armed_at } => armed_at.elapsed() >= self.window,
        }
    }

    /// Consume a ready schedule, returning whether the action should fire.
    pub fn take(&mut self) -> bool {
        if self.ready() {
            self.state = State::Idle;
            true
        } else {
            false
        }
    }

    /// Drop any pending schedule without firing.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const WINDOW: Duration = Duration::from_millis(30);

    #[test]
    fn test_idle_until_armed() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(!debouncer.is_pending());
        assert!(!debouncer.take());
    }

    #[test]
    fn test_fires_after_window() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.record_event();

        assert!(debouncer.is_pending());
        assert!(!debouncer.ready());

        thread::sleep(WINDOW + Duration::from_millis(10));

        assert!(debouncer.ready());
        assert!(debouncer.take());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rearm_replaces_schedule() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.record_event();
        thread::sleep(Duration::from_millis(20));

        // Re-arm resets the clock; the original schedule is gone.
        debouncer.record_event();
        thread::sleep(Duration::from_millis(15));
        assert!(!debouncer.ready());

        thread::sleep(WINDOW);
        assert!(debouncer.take());
    }

    #[test]
    fn test_burst_collapses_to_one_fire() {
        let mut debouncer = Debouncer::new(WINDOW);
        for _ in 0..5 {
            debouncer.record_event();
        }
        thread::sleep(WINDOW + Duration::from_millis(10));

        assert!(debouncer.take());
        assert!(!debouncer.take());
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.record_event();
        debouncer.cancel();

        thread::sleep(WINDOW + Duration::from_millis(10));
        assert!(!debouncer.take());
    }
}
