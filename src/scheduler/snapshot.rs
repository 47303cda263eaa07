/*!
 * Snapshots
 * Immutable post-cycle view of CPU and queue state for observers
 */

use crate::core::types::Cycle;
use crate::process::Process;
use serde::Serialize;

/// State published after each scheduler cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// 1-based cycle number
    pub cycle: Cycle,
    /// CPU occupant at publish time (empty once the cycle's process was released)
    pub cpu_occupant: Option<Process>,
    /// Process that ran during this cycle, if any
    pub dispatched: Option<Process>,
    /// Waiting processes in arrival order
    pub queue: Vec<Process>,
    /// Whether the cycle's new process was admitted
    pub admitted: bool,
    /// Human-readable account of the cycle
    pub log: String,
}

impl Snapshot {
    /// Ids of the waiting processes, in order
    pub fn queue_ids(&self) -> Vec<u32> {
        self.queue.iter().map(|p| p.id()).collect()
    }
}
