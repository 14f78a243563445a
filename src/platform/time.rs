//! Tick pacing
//!
//! Converts elapsed wall time into a whole number of fixed ticks, the same
//! way a browser interval timer fires. Elapsed time never scales the step
//! itself; it only decides how many ticks are due.

use crate::consts::MAX_CATCHUP_TICKS;

#[derive(Debug, Clone)]
pub struct FixedStep {
    interval_ms: f64,
    accumulator: f64,
    max_catchup: u32,
}

impl FixedStep {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            accumulator: 0.0,
            max_catchup: MAX_CATCHUP_TICKS,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Feed elapsed time, get the number of ticks to run now
    ///
    /// After a stall only `MAX_CATCHUP_TICKS` run and the backlog is dropped.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator += elapsed_ms;
        }

        let due = (self.accumulator / self.interval_ms).floor();
        if due > self.max_catchup as f64 {
            log::warn!("Tick timer fell behind by {} ticks, skipping", due as u64);
            self.accumulator = 0.0;
            return self.max_catchup;
        }

        self.accumulator -= due * self.interval_ms;
        due as u32
    }

    /// Time left until the next tick is due
    pub fn until_next_ms(&self) -> f64 {
        (self.interval_ms - self.accumulator).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_intervals() {
        let mut step = FixedStep::new(16);
        assert_eq!(step.advance(10.0), 0);
        assert_eq!(step.until_next_ms(), 6.0);
        assert_eq!(step.advance(10.0), 1);
        assert_eq!(step.advance(28.0), 2);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut step = FixedStep::new(16);
        assert_eq!(step.advance(10_000.0), MAX_CATCHUP_TICKS);
        assert_eq!(step.advance(0.0), 0);
    }

    #[test]
    fn test_bogus_elapsed_ignored() {
        let mut step = FixedStep::new(16);
        assert_eq!(step.advance(-50.0), 0);
        assert_eq!(step.advance(f64::NAN), 0);
        assert_eq!(step.advance(16.0), 1);
    }
}
