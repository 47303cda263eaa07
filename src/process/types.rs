/*!
 * Process Types
 * Immutable process descriptor
 */

use crate::core::errors::ProcessError;
use crate::core::types::{
    BurstTime, MemoryUnits, Pid, Priority, BURST_RANGE, MEMORY_RANGE, PRIORITY_RANGE,
};
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Validated process attributes
///
/// Outside this crate only [`Attributes::new`] builds one, so holding one means
/// every field is inside its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Attributes {
    burst_time: BurstTime,
    memory_footprint: MemoryUnits,
    priority: Priority,
}

impl Attributes {
    pub fn new(
        burst_time: BurstTime,
        memory_footprint: MemoryUnits,
        priority: Priority,
    ) -> Result<Self, ProcessError> {
        check("burst_time", burst_time, &BURST_RANGE)?;
        check("memory_footprint", memory_footprint, &MEMORY_RANGE)?;
        check("priority", priority, &PRIORITY_RANGE)?;

        Ok(Self::in_range(burst_time, memory_footprint, priority))
    }

    /// Caller guarantees every value is inside its range
    pub(crate) fn in_range(
        burst_time: BurstTime,
        memory_footprint: MemoryUnits,
        priority: Priority,
    ) -> Self {
        debug_assert!(BURST_RANGE.contains(&burst_time));
        debug_assert!(MEMORY_RANGE.contains(&memory_footprint));
        debug_assert!(PRIORITY_RANGE.contains(&priority));
        Self {
            burst_time,
            memory_footprint,
            priority,
        }
    }

    #[inline]
    pub fn burst_time(&self) -> BurstTime {
        self.burst_time
    }

    #[inline]
    pub fn memory_footprint(&self) -> MemoryUnits {
        self.memory_footprint
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// A unit of simulated work
///
/// Fields are private so a descriptor cannot change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Process {
    id: Pid,
    burst_time: BurstTime,
    memory_footprint: MemoryUnits,
    priority: Priority,
}

impl Process {
    /// Build a process, validating every attribute against its range
    pub fn new(
        id: Pid,
        burst_time: BurstTime,
        memory_footprint: MemoryUnits,
        priority: Priority,
    ) -> Result<Self, ProcessError> {
        let attrs = Attributes::new(burst_time, memory_footprint, priority)?;
        Ok(Self::with_attributes(id, attrs))
    }

    /// Build a process from already validated attributes
    pub fn with_attributes(id: Pid, attrs: Attributes) -> Self {
        Self {
            id,
            burst_time: attrs.burst_time,
            memory_footprint: attrs.memory_footprint,
            priority: attrs.priority,
        }
    }

    #[inline]
    pub fn id(&self) -> Pid {
        self.id
    }

    #[inline]
    pub fn burst_time(&self) -> BurstTime {
        self.burst_time
    }

    /// Informational only; admission is bounded by process count
    #[inline]
    pub fn memory_footprint(&self) -> MemoryUnits {
        self.memory_footprint
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{} (prio {}, burst {}, mem {})",
            self.id, self.priority, self.burst_time, self.memory_footprint
        )
    }
}

fn check(field: &str, value: u8, range: &RangeInclusive<u8>) -> Result<(), ProcessError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ProcessError::InvalidAttribute {
            field: field.to_string(),
            value: value as u32,
            min: *range.start() as u32,
            max: *range.end() as u32,
        })
    }
}
