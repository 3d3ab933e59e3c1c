//! Frame pacing for the runtime loop.

use std::time::{Duration, Instant};

/// Tracks the previous iteration's timestamp and computes how long the loop
/// should sleep to stay on its fixed cadence.
///
/// Pacing is deliberately memoryless: each tick only looks at the time since
/// the previous baseline, so a long frame never causes oversleeping later.
/// Long sessions may drift from true 60 Hz; that is accepted.
pub struct FrameClock {
    last: Instant,
    period: Duration,
}

impl FrameClock {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { last: now, period }
    }

    /// Ends the current iteration at `now` and returns the remaining budget
    /// to sleep for, or `None` if the iteration already used up its period.
    ///
    /// When there is time left, the baseline moves to the scheduled wake-up
    /// (`now + remaining`), so the sleep is charged to this iteration and
    /// not to the next one's elapsed time. An over-budget iteration
    /// re-baselines at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.period {
            let remaining = self.period - elapsed;
            self.last = now + remaining;
            Some(remaining)
        } else {
            self.last = now;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(16);

    #[test]
    fn test_fast_iteration_sleeps_for_remainder() {
        let base = Instant::now();
        let mut clock = FrameClock::new(PERIOD, base);
        let sleep = clock.tick(base + Duration::from_millis(5));
        assert_eq!(sleep, Some(Duration::from_millis(11)));
    }

    #[test]
    fn test_slow_iteration_requests_no_sleep() {
        let base = Instant::now();
        let mut clock = FrameClock::new(PERIOD, base);
        assert_eq!(clock.tick(base + Duration::from_millis(16)), None);
        assert_eq!(clock.tick(base + Duration::from_millis(100)), None);
    }

    #[test]
    fn test_baseline_advances_even_when_over_budget() {
        let base = Instant::now();
        let mut clock = FrameClock::new(PERIOD, base);
        // A 40 ms frame, then a 10 ms frame: the second one is measured
        // against the 40 ms mark, not against the original baseline.
        assert_eq!(clock.tick(base + Duration::from_millis(40)), None);
        let sleep = clock.tick(base + Duration::from_millis(50));
        assert_eq!(sleep, Some(Duration::from_millis(6)));
    }

    #[test]
    fn test_consecutive_fast_frames_keep_a_steady_cadence() {
        // 5 ms of work per iteration, sleeping the returned remainder, as
        // the runtime loop does. Sleep time must be charged to the frame
        // that slept, so every iteration paces to the same 16 ms period
        // instead of alternating paced/unpaced.
        let base = Instant::now();
        let mut clock = FrameClock::new(PERIOD, base);
        let mut now = base;
        let mut presents = Vec::new();
        for _ in 0..10 {
            now += Duration::from_millis(5);
            presents.push(now);
            if let Some(remaining) = clock.tick(now) {
                now += remaining;
            }
        }
        for pair in presents.windows(2) {
            assert_eq!(pair[1] - pair[0], PERIOD);
        }
    }
}
