/*!
 * Execution Unit
 * The single simulated CPU; holds at most one process
 */

use crate::core::errors::ExecutionError;
use crate::process::Process;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info};

/// CPU occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "process", rename_all = "snake_case")]
pub enum CpuState {
    #[default]
    Idle,
    Busy(Process),
}

impl CpuState {
    pub fn occupant(&self) -> Option<Process> {
        match self {
            CpuState::Idle => None,
            CpuState::Busy(p) => Some(*p),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, CpuState::Busy(_))
    }
}

/// Single-occupant execution unit guarded by the cpu lock
#[derive(Debug, Default)]
pub struct ExecutionUnit {
    state: Mutex<CpuState>,
}

impl ExecutionUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupy the CPU with `process`
    ///
    /// Never overwrites: an occupied CPU is a contract violation.
    pub fn assign(&self, process: Process) -> Result<(), ExecutionError> {
        let mut state = self.state.lock();

        if let CpuState::Busy(current) = *state {
            error!(
                occupant = current.id(),
                incoming = process.id(),
                "CPU already occupied"
            );
            return Err(ExecutionError::AlreadyOccupied {
                occupant: current.id(),
                incoming: process.id(),
            });
        }

        *state = CpuState::Busy(process);
        info!(
            pid = process.id(),
            priority = process.priority(),
            burst = process.burst_time(),
            "Process assigned to the CPU"
        );
        Ok(())
    }

    /// Vacate the CPU, returning the process that was running
    pub fn release(&self) -> Result<Process, ExecutionError> {
        let mut state = self.state.lock();

        match std::mem::take(&mut *state) {
            CpuState::Busy(process) => {
                info!(pid = process.id(), "Process released");
                Ok(process)
            }
            CpuState::Idle => {
                error!("Release requested with no process assigned");
                Err(ExecutionError::NothingAssigned)
            }
        }
    }

    pub fn current_occupant(&self) -> Option<Process> {
        self.state.lock().occupant()
    }

    pub fn state(&self) -> CpuState {
        *self.state.lock()
    }
}
