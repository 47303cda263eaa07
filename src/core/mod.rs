/*!
 * Core Module
 * Shared types, id generation and error taxonomy
 */

pub mod errors;
pub mod id;
pub mod types;

pub use errors::{AdmissionError, ConfigError, ExecutionError, ProcessError, SimError};
pub use id::{AtomicGenerator, IdGenerator};
pub use types::*;
