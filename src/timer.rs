// Cooperative time budget for search
//
// There is no background timer. Every recursive search frame polls the
// caller's "milliseconds remaining" probe and unwinds with `SearchTimeout`
// once the remaining time drops below the safety threshold.

use std::error::Error;
use std::fmt;

/// Abort signal raised when the deadline is near. Only the driver that
/// started a search (fixed-depth call or one deepening iteration) absorbs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTimeout;

impl fmt::Display for SearchTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("search time budget exhausted")
    }
}

impl Error for SearchTimeout {}

/// Wraps a time-remaining probe plus a safety margin in milliseconds
pub struct TimeBudget<'a> {
    time_left: &'a dyn Fn() -> f64,
    threshold_ms: f64,
}

impl<'a> TimeBudget<'a> {
    pub fn new(time_left: &'a dyn Fn() -> f64, threshold_ms: f64) -> Self {
        TimeBudget {
            time_left,
            threshold_ms,
        }
    }

    /// Milliseconds left according to the caller's probe
    pub fn remaining_ms(&self) -> f64 {
        (self.time_left)()
    }

    /// Fails once remaining time is below the threshold
    #[inline]
    pub fn check(&self) -> Result<(), SearchTimeout> {
        if self.remaining_ms() < self.threshold_ms {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_check_passes_above_threshold() {
        let probe = || 100.0;
        let budget = TimeBudget::new(&probe, 15.0);
        assert_eq!(budget.check(), Ok(()));
    }

    #[test]
    fn test_check_fails_below_threshold() {
        let probe = || 14.9;
        let budget = TimeBudget::new(&probe, 15.0);
        assert_eq!(budget.check(), Err(SearchTimeout));
    }

    #[test]
    fn test_threshold_itself_is_not_expired() {
        let probe = || 15.0;
        let budget = TimeBudget::new(&probe, 15.0);
        assert!(budget.check().is_ok());
    }

    #[test]
    fn test_probe_is_polled_on_every_check() {
        let calls = Cell::new(0u32);
        let probe = || {
            calls.set(calls.get() + 1);
            50.0 - calls.get() as f64 * 10.0
        };
        let budget = TimeBudget::new(&probe, 15.0);

        assert!(budget.check().is_ok()); // 40
        assert!(budget.check().is_ok()); // 30
        assert!(budget.check().is_ok()); // 20
        assert!(budget.check().is_err()); // 10
        assert_eq!(calls.get(), 4);
    }
}
