/*!
 * Priority Scheduling Simulator
 * Bounded admission, single-CPU dispatch and async snapshot delivery
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod presenter;
pub mod process;
pub mod scheduler;

// Re-exports
pub use config::SimConfig;
pub use crate::core::errors::{AdmissionError, ConfigError, ExecutionError, ProcessError, SimError};
pub use crate::core::types::SimResult;
pub use monitoring::init_tracing;
pub use presenter::{snapshot_channel, ConsolePresenter, JsonPresenter, Presenter, PresenterTask};
pub use process::{Process, ProcessFactory, RandomAttributes, ScriptedAttributes};
pub use scheduler::{
    AdmissionQueue, CycleState, ExecutionUnit, IterationGovernor, RunSummary, SchedulerLoop,
    Snapshot,
};
