/*!
 * Core Types
 * Common types and attribute bounds used across the simulator
 */

use std::ops::RangeInclusive;

/// Process ID type
pub type Pid = u32;

/// Priority level (1-5, higher is more urgent)
pub type Priority = u8;

/// Simulated execution duration in time units
pub type BurstTime = u8;

/// Informational memory footprint
pub type MemoryUnits = u8;

/// Scheduler cycle counter
pub type Cycle = u64;

/// Burst time bounds (inclusive)
pub const BURST_RANGE: RangeInclusive<BurstTime> = 1..=10;

/// Memory footprint bounds (inclusive)
pub const MEMORY_RANGE: RangeInclusive<MemoryUnits> = 1..=100;

/// Priority bounds (inclusive)
pub const PRIORITY_RANGE: RangeInclusive<Priority> = 1..=5;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;
