/*!
 * Lock-Free Scheduler Statistics
 * Atomic counters updated by the scheduling loop, readable from any thread
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub cycles: u64,
    pub generated: u64,
    pub admitted: u64,
    pub rejected: u64,
    pub dispatched: u64,
    pub burst_units: u64,
}

/// Atomic scheduler statistics
///
/// All operations use relaxed ordering; counters may be momentarily
/// inconsistent with each other, which is fine for monitoring.
#[derive(Debug, Default)]
pub struct SchedulerStats {
    cycles: AtomicU64,
    generated: AtomicU64,
    admitted: AtomicU64,
    rejected: AtomicU64,
    dispatched: AtomicU64,
    burst_units: AtomicU64,
}

impl SchedulerStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_cycles(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a dispatch and the burst units it consumed
    #[inline(always)]
    pub fn record_dispatch(&self, burst: u8) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        self.burst_units.fetch_add(burst as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            generated: self.generated.load(Ordering::Relaxed),
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            burst_units: self.burst_units.load(Ordering::Relaxed),
        }
    }
}
