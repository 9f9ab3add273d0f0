//! Minimum-interval filter for key repeat.
use std::time::{Duration, Instant};

/// Drops commands that arrive before `delay` has elapsed since the last
/// accepted command. Rejected commands do not restart the interval.
#[derive(Clone, Debug)]
pub struct InputDebouncer {
    delay: Duration,
    last_accepted: Option<Instant>,
}

impl InputDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_accepted: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns whether a command arriving at `now` should be processed.
    pub fn accept(&mut self, now: Instant) -> bool {
        let ready = match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.delay,
        };
        if ready {
            self.last_accepted = Some(now);
        }
        ready
    }

    /// Forgets the last accepted command, so the next one always passes.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(70);

    #[test]
    fn first_command_is_always_accepted() {
        let mut debouncer = InputDebouncer::new(DELAY);
        assert!(debouncer.accept(Instant::now()));
    }

    #[test]
    fn commands_inside_the_window_are_dropped() {
        let start = Instant::now();
        let mut debouncer = InputDebouncer::new(DELAY);

        assert!(debouncer.accept(start));
        assert!(!debouncer.accept(start + Duration::from_millis(10)));
        assert!(!debouncer.accept(start + Duration::from_millis(69)));
        assert!(debouncer.accept(start + DELAY));
    }

    #[test]
    fn rejections_do_not_extend_the_window() {
        let start = Instant::now();
        let mut debouncer = InputDebouncer::new(DELAY);

        debouncer.accept(start);
        debouncer.accept(start + Duration::from_millis(60));
        assert!(debouncer.accept(start + Duration::from_millis(75)));
    }

    #[test]
    fn zero_delay_accepts_everything() {
        let now = Instant::now();
        let mut debouncer = InputDebouncer::new(Duration::ZERO);
        assert!(debouncer.accept(now));
        assert!(debouncer.accept(now));
    }

    #[test]
    fn reset_clears_the_window() {
        let now = Instant::now();
        let mut debouncer = InputDebouncer::new(DELAY);
        debouncer.accept(now);
        debouncer.reset();
        assert!(debouncer.accept(now));
    }
}
