//! Per-feed refresh gate.
//!
//! Enforces a minimum interval between fetch *attempts* (a failure
//! still advances the clock, so outages cannot cause hot retry loops)
//! and doubles as a single-flight guard: while one attempt is
//! outstanding no second one starts.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FeedGate {
    min_interval: Duration,
    last_attempt: Option<Instant>,
    in_flight: bool,
}

impl FeedGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_attempt: None,
            in_flight: false,
        }
    }

    /// Claim the next attempt. Returns false while a prior attempt is
    /// still outstanding or the minimum interval has not elapsed.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        if let Some(last) = self.last_attempt {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_attempt = Some(now);
        self.in_flight = true;
        true
    }

    /// Mark the outstanding attempt as completed (success or failure).
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Clear the attempt clock so the next `try_begin` is due
    /// immediately. An outstanding attempt still blocks until it
    /// finishes.
    pub fn force(&mut self) {
        self.last_attempt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_is_due_immediately() {
        let mut gate = FeedGate::new(Duration::from_secs(15));
        assert!(gate.try_begin(Instant::now()));
    }

    #[test]
    fn at_most_one_attempt_per_interval_under_subinterval_ticks() {
        let mut gate = FeedGate::new(Duration::from_secs(300));
        let t0 = Instant::now();

        let mut attempts = 0;
        for tick in 0..6000u64 {
            let now = t0 + Duration::from_millis(tick * 100);
            if gate.try_begin(now) {
                attempts += 1;
                gate.finish();
            }
        }
        // 600 seconds of 100ms ticks: the attempt at t=0 and one at t=300s.
        assert_eq!(attempts, 2);
    }

    #[test]
    fn failed_attempts_are_still_spaced_by_the_interval() {
        let mut gate = FeedGate::new(Duration::from_secs(15));
        let t0 = Instant::now();

        assert!(gate.try_begin(t0));
        gate.finish(); // attempt failed upstream; clock advanced anyway

        assert!(!gate.try_begin(t0 + Duration::from_secs(14)));
        assert!(gate.try_begin(t0 + Duration::from_secs(15)));
    }

    #[test]
    fn outstanding_attempt_blocks_the_next_one() {
        let mut gate = FeedGate::new(Duration::from_secs(1));
        let t0 = Instant::now();

        assert!(gate.try_begin(t0));
        // Interval elapsed but the first fetch has not completed.
        assert!(!gate.try_begin(t0 + Duration::from_secs(5)));

        gate.finish();
        assert!(gate.try_begin(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn force_makes_the_next_attempt_due_regardless_of_ttl() {
        let mut gate = FeedGate::new(Duration::from_secs(300));
        let t0 = Instant::now();

        assert!(gate.try_begin(t0));
        gate.finish();
        assert!(!gate.try_begin(t0 + Duration::from_secs(1)));

        gate.force();
        assert!(gate.try_begin(t0 + Duration::from_secs(1)));
    }
}
