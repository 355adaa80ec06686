use std::time::Duration;

/// A repeating timer driven by explicitly fed elapsed time.
///
/// Dropping (or replacing with `None`) is how an interval gets cancelled; any
/// partial period accumulated so far is discarded with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero());
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Feeds `dt` and returns how many times the interval fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// A one-shot timer. Fires exactly once, on the `advance` call that crosses its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delay {
    remaining: Duration,
}

impl Delay {
    pub fn new(after: Duration) -> Self {
        Self { remaining: after }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.remaining.is_zero() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }
}
