/*!
 * Iteration Governor
 * Single terminating cycle counter plus an optional wall-clock pacing gate
 */

use crate::core::types::Cycle;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Bounds the total number of simulation cycles
///
/// Only the scheduler loop advances the counter; anyone may read it.
#[derive(Debug)]
pub struct IterationGovernor {
    target: Cycle,
    completed: AtomicU64,
}

impl IterationGovernor {
    pub fn new(target: Cycle) -> Self {
        Self {
            target,
            completed: AtomicU64::new(0),
        }
    }

    /// Record one finished cycle, returning the new count
    #[inline]
    pub fn advance(&self) -> Cycle {
        self.completed.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[inline]
    pub fn completed(&self) -> Cycle {
        self.completed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn target(&self) -> Cycle {
        self.target
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed() >= self.target
    }

    pub fn remaining(&self) -> Cycle {
        self.target.saturating_sub(self.completed())
    }
}

/// Rate limiter enforcing a minimum interval between cycle starts
///
/// Holds no cycle count; termination stays with [`IterationGovernor`].
#[derive(Debug)]
pub struct PacingGate {
    interval: Duration,
    last: Option<Instant>,
}

impl PacingGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Block until at least `interval` has passed since the previous call
    ///
    /// Returns how long it waited.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        let waited = match self.last {
            Some(last) => {
                let due = last + self.interval;
                if due > now {
                    let delay = due - now;
                    std::thread::sleep(delay);
                    delay
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        };
        self.last = Some(Instant::now());
        waited
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governor_counts_to_target() {
        let gov = IterationGovernor::new(3);
        assert!(!gov.is_complete());
        assert_eq!(gov.remaining(), 3);

        assert_eq!(gov.advance(), 1);
        assert_eq!(gov.advance(), 2);
        assert!(!gov.is_complete());
        assert_eq!(gov.advance(), 3);
        assert!(gov.is_complete());
        assert_eq!(gov.remaining(), 0);
    }

    #[test]
    fn test_zero_target_is_complete() {
        let gov = IterationGovernor::new(0);
        assert!(gov.is_complete());
    }

    #[test]
    fn test_pacing_gate_first_call_free() {
        let mut gate = PacingGate::new(Duration::from_millis(50));
        assert_eq!(gate.wait(), Duration::ZERO);
    }

    #[test]
    fn test_pacing_gate_enforces_interval() {
        let mut gate = PacingGate::new(Duration::from_millis(20));
        let start = Instant::now();
        gate.wait();
        gate.wait();
        gate.wait();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
