/*!
 * Scheduler Module
 * Admission, single-CPU execution, iteration control and the cycle loop
 */

pub mod cpu;
pub mod governor;
pub mod queue;
pub mod runner;
pub mod snapshot;
pub mod stats;

// Re-export public API
pub use cpu::{CpuState, ExecutionUnit};
pub use governor::{IterationGovernor, PacingGate};
pub use queue::AdmissionQueue;
pub use runner::{CycleState, RunSummary, SchedulerLoop};
pub use snapshot::Snapshot;
pub use stats::{SchedulerStats, StatsSnapshot};
