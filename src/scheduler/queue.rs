/*!
 * Admission Queue
 * Bounded holding area for processes waiting on the CPU
 */

use crate::core::errors::AdmissionError;
use crate::process::Process;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::{info, warn};

/// Bounded, priority-scannable admission queue
///
/// Every operation runs under the queue lock, so an admission never
/// interleaves with a selection scan.
#[derive(Debug)]
pub struct AdmissionQueue {
    capacity: usize,
    waiting: Mutex<VecDeque<Process>>,
}

impl AdmissionQueue {
    /// Create a queue holding at most `capacity` processes
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            waiting: Mutex::new(VecDeque::new()),
        }
    }

    /// Admit a process if there is room; a full queue is left untouched
    pub fn try_admit(&self, process: Process) -> bool {
        self.try_admit_checked(process).is_ok()
    }

    /// Same as [`try_admit`](Self::try_admit) but reports the rejection
    pub fn try_admit_checked(&self, process: Process) -> Result<(), AdmissionError> {
        let mut waiting = self.waiting.lock();

        if waiting.len() >= self.capacity {
            warn!(
                pid = process.id(),
                capacity = self.capacity,
                "No room for process"
            );
            return Err(AdmissionError::Rejected {
                pid: process.id(),
                capacity: self.capacity,
            });
        }

        if waiting.iter().any(|p| p.id() == process.id()) {
            warn!(pid = process.id(), "Process already waiting");
            return Err(AdmissionError::Duplicate { pid: process.id() });
        }

        waiting.push_back(process);
        info!(
            pid = process.id(),
            priority = process.priority(),
            waiting = waiting.len(),
            "Process arrived in memory"
        );
        Ok(())
    }

    /// Remove and return the waiting process with the highest priority
    ///
    /// Ties go to the earliest arrival: the scan only replaces its candidate on
    /// a strictly greater priority.
    pub fn select_highest_priority(&self) -> Option<Process> {
        let mut waiting = self.waiting.lock();

        let mut best: Option<(usize, u8)> = None;
        for (idx, process) in waiting.iter().enumerate() {
            match best {
                Some((_, prio)) if process.priority() <= prio => {}
                _ => best = Some((idx, process.priority())),
            }
        }

        best.and_then(|(idx, _)| waiting.remove(idx))
    }

    /// Read-only copy of the waiting processes in arrival order
    pub fn snapshot(&self) -> Vec<Process> {
        self.waiting.lock().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.waiting.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.waiting.lock().len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
