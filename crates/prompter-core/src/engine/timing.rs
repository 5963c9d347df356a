//! Tick timing
//!
//! Turns wall-clock instants into the per-tick deltas the scroll engine consumes.

use std::time::{Duration, Instant};

/// Measures the time between consecutive ticks
#[derive(Debug, Clone)]
pub struct TickClock {
    last: Instant,
    /// Upper bound for a single delta
    max_delta: Duration,
}

impl TickClock {
    pub fn new(max_delta: Duration) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    pub fn starting_at(start: Instant, max_delta: Duration) -> Self {
        Self {
            last: start,
            max_delta,
        }
    }

    /// Time since the previous tick, capped at `max_delta`, and mark `now` as the new tick
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        if self.max_delta.is_zero() {
            delta
        } else {
            delta.min(self.max_delta)
        }
    }

    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Time left until the next tick is due
    pub fn until_next(&self, now: Instant, interval: Duration) -> Duration {
        interval.saturating_sub(now.saturating_duration_since(self.last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_between_ticks() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(start, Duration::from_millis(250));
        assert_eq!(
            clock.tick_at(start + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
        assert_eq!(
            clock.tick_at(start + Duration::from_millis(40)),
            Duration::from_millis(24)
        );
    }

    #[test]
    fn test_delta_is_capped() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(start, Duration::from_millis(250));
        assert_eq!(
            clock.tick_at(start + Duration::from_secs(5)),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_zero_cap_means_uncapped() {
        let start = Instant::now();
        let mut clock = TickClock::starting_at(start, Duration::ZERO);
        assert_eq!(
            clock.tick_at(start + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_clock_going_backwards_yields_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = TickClock::starting_at(start, Duration::from_millis(250));
        assert_eq!(clock.tick_at(start - Duration::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn test_until_next() {
        let start = Instant::now();
        let clock = TickClock::starting_at(start, Duration::ZERO);
        let interval = Duration::from_millis(16);
        assert_eq!(
            clock.until_next(start + Duration::from_millis(10), interval),
            Duration::from_millis(6)
        );
        assert_eq!(
            clock.until_next(start + Duration::from_millis(30), interval),
            Duration::ZERO
        );
    }
}
