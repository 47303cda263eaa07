/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Cycle, Pid};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process construction errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid {field}: {value} is outside {min}..={max}")]
    #[diagnostic(
        code(process::invalid_attribute),
        help("Burst time must be 1-10, memory 1-100 and priority 1-5.")
    )]
    InvalidAttribute {
        field: String,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Attribute script is empty")]
    #[diagnostic(
        code(process::empty_script),
        help("A scripted attribute source needs at least one entry to replay.")
    )]
    EmptyScript,

    #[error("Process id space exhausted after {last}")]
    #[diagnostic(
        code(process::ids_exhausted),
        help("Every 32-bit process id has been handed out. Start a new run.")
    )]
    IdsExhausted { last: Pid },
}

/// Admission errors
///
/// A full queue is an expected outcome; this variant exists for logging and
/// for callers that prefer a `Result` over the plain `bool` admission path.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AdmissionError {
    #[error("No room for process {pid} (capacity {capacity})")]
    #[diagnostic(
        code(admission::rejected),
        help("The admission queue is full. The process is dropped for this cycle.")
    )]
    Rejected { pid: Pid, capacity: usize },

    #[error("Process {pid} is already waiting")]
    #[diagnostic(
        code(admission::duplicate),
        help("Each waiting process must have a distinct id.")
    )]
    Duplicate { pid: Pid },
}

/// Execution unit contract violations
///
/// These can only occur if the scheduler loop breaks its own state machine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ExecutionError {
    #[error("CPU already occupied by process {occupant}, cannot assign process {incoming}")]
    #[diagnostic(
        code(execution::already_occupied),
        help("Release the current process before assigning another one.")
    )]
    AlreadyOccupied { occupant: Pid, incoming: Pid },

    #[error("No process assigned to the CPU")]
    #[diagnostic(
        code(execution::nothing_assigned),
        help("release() must follow a successful assign() in the same cycle.")
    )]
    NothingAssigned,
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Memory capacity must be positive")]
    #[diagnostic(
        code(config::invalid_capacity),
        help("Set SIM_MEMORY_CAPACITY to a value of at least 1.")
    )]
    InvalidCapacity,

    #[error("Maximum cycles must be positive")]
    #[diagnostic(
        code(config::invalid_max_cycles),
        help("Set SIM_MAX_CYCLES to a value of at least 1.")
    )]
    InvalidMaxCycles,

    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Expected a non-negative integer.")
    )]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file {path}: {reason}")]
    #[diagnostic(code(config::io))]
    Io { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    #[diagnostic(
        code(config::parse),
        help("Expected a JSON object with memory_capacity, max_cycles, time_unit_ms, pacing_ms or seed.")
    )]
    Parse { path: String, reason: String },
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Admission error: {0}")]
    #[diagnostic(transparent)]
    Admission(#[from] AdmissionError),

    #[error("Execution error: {0}")]
    #[diagnostic(transparent)]
    Execution(#[from] ExecutionError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Scheduler thread failed at cycle {cycle}: {reason}")]
    #[diagnostic(code(sim::thread_failed))]
    ThreadFailed { cycle: Cycle, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_serialization() {
        let err = ExecutionError::AlreadyOccupied {
            occupant: 1,
            incoming: 2,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("already_occupied"));

        let back: ExecutionError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_sim_error_conversion() {
        let err: SimError = ExecutionError::NothingAssigned.into();
        assert!(matches!(
            err,
            SimError::Execution(ExecutionError::NothingAssigned)
        ));
        assert_eq!(
            err.to_string(),
            "Execution error: No process assigned to the CPU"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = ConfigError::InvalidCapacity;
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("config::invalid_capacity"));
    }
}
