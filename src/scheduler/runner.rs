/*!
 * Scheduler Loop
 * Generate, admit, select, execute, release and publish, once per cycle
 *
 * The loop runs on a single dedicated thread. The queue and CPU are shared
 * behind their own locks so other threads (presenters, external arrivals)
 * can observe or feed them while a process is executing.
 */

use super::cpu::ExecutionUnit;
use super::governor::{IterationGovernor, PacingGate};
use super::queue::AdmissionQueue;
use super::snapshot::Snapshot;
use super::stats::{SchedulerStats, StatsSnapshot};
use crate::config::SimConfig;
use crate::core::errors::AdmissionError;
use crate::core::types::{Cycle, SimResult};
use crate::process::{Process, ProcessFactory};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, info_span, trace, warn};

/// Scheduler loop states, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    Generating,
    Admitting,
    Selecting,
    Dispatching,
    Executing,
    Releasing,
    Publishing,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub cycles: Cycle,
    pub stats: StatsSnapshot,
    pub elapsed: Duration,
}

/// Priority scheduling loop
pub struct SchedulerLoop {
    factory: Arc<ProcessFactory>,
    queue: Arc<AdmissionQueue>,
    cpu: Arc<ExecutionUnit>,
    governor: Arc<IterationGovernor>,
    stats: Arc<SchedulerStats>,
    time_unit: Duration,
    pacing: Option<PacingGate>,
    publisher: Option<flume::Sender<Snapshot>>,
    state: CycleState,
}

impl SchedulerLoop {
    /// Build a loop from configuration
    pub fn new(config: &SimConfig) -> Self {
        let factory = match config.seed {
            Some(seed) => ProcessFactory::seeded(seed),
            None => ProcessFactory::new(),
        };

        info!(
            capacity = config.memory_capacity,
            max_cycles = config.max_cycles,
            time_unit_ms = config.time_unit.as_millis() as u64,
            "Scheduler loop initialized"
        );

        Self {
            factory: Arc::new(factory),
            queue: Arc::new(AdmissionQueue::new(config.memory_capacity)),
            cpu: Arc::new(ExecutionUnit::new()),
            governor: Arc::new(IterationGovernor::new(config.max_cycles)),
            stats: Arc::new(SchedulerStats::new()),
            time_unit: config.time_unit,
            pacing: config.pacing.map(PacingGate::new),
            publisher: None,
            state: CycleState::Generating,
        }
    }

    /// Replace the process factory
    pub fn with_factory(mut self, factory: ProcessFactory) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    /// Deliver a snapshot to `tx` after every cycle
    pub fn with_publisher(mut self, tx: flume::Sender<Snapshot>) -> Self {
        self.publisher = Some(tx);
        self
    }

    pub fn factory(&self) -> &Arc<ProcessFactory> {
        &self.factory
    }

    /// Shared admission queue; other threads may admit into it
    pub fn queue(&self) -> &Arc<AdmissionQueue> {
        &self.queue
    }

    pub fn cpu(&self) -> &Arc<ExecutionUnit> {
        &self.cpu
    }

    pub fn governor(&self) -> &Arc<IterationGovernor> {
        &self.governor
    }

    pub fn stats(&self) -> &Arc<SchedulerStats> {
        &self.stats
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Run cycles until the governor's target is reached
    pub fn run(&mut self) -> SimResult<RunSummary> {
        let start = Instant::now();

        while !self.governor.is_complete() {
            self.step()?;
        }

        let summary = RunSummary {
            cycles: self.governor.completed(),
            stats: self.stats.snapshot(),
            elapsed: start.elapsed(),
        };
        info!(
            cycles = summary.cycles,
            admitted = summary.stats.admitted,
            rejected = summary.stats.rejected,
            dispatched = summary.stats.dispatched,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Simulation complete"
        );
        Ok(summary)
    }

    /// Run exactly one cycle and return its snapshot
    ///
    /// A rejected admission skips straight to publishing. Execution unit
    /// contract violations abort with an error.
    pub fn step(&mut self) -> SimResult<Snapshot> {
        if let Some(gate) = self.pacing.as_mut() {
            let waited = gate.wait();
            if !waited.is_zero() {
                trace!(waited_us = waited.as_micros() as u64, "Paced");
            }
        }

        let cycle = self.governor.completed() + 1;
        let span = info_span!("cycle", cycle);
        let _enter = span.enter();
        let mut log = Vec::new();

        self.enter(CycleState::Generating);
        let process = self.factory.create()?;
        self.stats.inc_generated();

        self.enter(CycleState::Admitting);
        let admitted = match self.queue.try_admit_checked(process) {
            Ok(()) => {
                self.stats.inc_admitted();
                log.push(format!("Process {} arrived in memory.", process.id()));
                true
            }
            Err(e) => {
                self.stats.inc_rejected();
                debug!(error = %e, "Admission rejected, skipping dispatch");
                log.push(match e {
                    AdmissionError::Rejected { pid, .. } => {
                        format!("No room for process {}.", pid)
                    }
                    AdmissionError::Duplicate { pid } => {
                        format!("Process {} is already waiting.", pid)
                    }
                });
                false
            }
        };

        let dispatched = if admitted {
            self.dispatch(&mut log)?
        } else {
            None
        };

        self.enter(CycleState::Publishing);
        let snapshot = Snapshot {
            cycle,
            cpu_occupant: self.cpu.current_occupant(),
            dispatched,
            queue: self.queue.snapshot(),
            admitted,
            log: log.join("\n"),
        };
        self.publish(&snapshot);

        self.governor.advance();
        self.stats.inc_cycles();
        debug!(
            waiting = snapshot.queue.len(),
            admitted,
            dispatched = ?snapshot.dispatched.map(|p| p.id()),
            "Cycle complete"
        );

        Ok(snapshot)
    }

    /// Select, assign, execute and release the top-priority waiting process
    fn dispatch(&mut self, log: &mut Vec<String>) -> SimResult<Option<Process>> {
        self.enter(CycleState::Selecting);
        let selected = match self.queue.select_highest_priority() {
            Some(p) => p,
            None => {
                warn!("Queue drained before selection");
                return Ok(None);
            }
        };

        self.enter(CycleState::Dispatching);
        if let Err(e) = self.cpu.assign(selected) {
            // Hand the selected process back so it is not lost with the cycle
            let restored = self.queue.try_admit(selected);
            error!(pid = selected.id(), restored, error = %e, "Dispatch failed");
            return Err(e.into());
        }
        log.push(format!("Process {} assigned to the CPU.", selected.id()));

        self.enter(CycleState::Executing);
        let busy = self.time_unit * selected.burst_time() as u32;
        if !busy.is_zero() {
            std::thread::sleep(busy);
        }
        self.stats.record_dispatch(selected.burst_time());

        self.enter(CycleState::Releasing);
        let released = self.cpu.release()?;
        log.push(format!("Process {} released.", released.id()));

        Ok(Some(released))
    }

    /// Hand the snapshot to the presenter channel without waiting on it
    fn publish(&mut self, snapshot: &Snapshot) {
        if let Some(tx) = &self.publisher {
            if tx.send(snapshot.clone()).is_err() {
                warn!("Presenter disconnected, no further snapshots will be published");
                self.publisher = None;
            }
        }
    }

    #[inline]
    fn enter(&mut self, state: CycleState) {
        trace!(from = ?self.state, to = ?state, "State transition");
        self.state = state;
    }
}
