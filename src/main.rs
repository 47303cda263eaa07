/*!
 * Priority Scheduling Simulator - Main Entry Point
 *
 * Thin driver: reads configuration from the environment, runs the
 * scheduler loop on a blocking thread and renders snapshots on an
 * async presenter task.
 *
 * Output is selected with SIM_OUTPUT=console|json (default: console).
 */

use std::sync::Arc;
use tracing::{error, info};

use sim_kernel::{
    init_tracing, snapshot_channel, ConsolePresenter, JsonPresenter, Presenter, PresenterTask,
    SchedulerLoop, SimConfig, SimError, Snapshot,
};

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    info!("Priority scheduling simulator starting...");

    let config = SimConfig::from_env()?;
    info!(
        capacity = config.memory_capacity,
        max_cycles = config.max_cycles,
        time_unit_ms = config.time_unit.as_millis() as u64,
        pacing_ms = ?config.pacing.map(|p| p.as_millis() as u64),
        seed = ?config.seed,
        "Configuration loaded"
    );

    let (tx, rx) = snapshot_channel();
    let scheduler = SchedulerLoop::new(&config).with_publisher(tx);

    let json = std::env::var("SIM_OUTPUT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        drive(scheduler, JsonPresenter::stdout(), rx).await
    } else {
        let presenter = ConsolePresenter::stdout().with_capacity(config.memory_capacity);
        drive(scheduler, presenter, rx).await
    }
}

/// Run the loop to completion, then drain the presenter
async fn drive<P: Presenter>(
    mut scheduler: SchedulerLoop,
    presenter: P,
    rx: flume::Receiver<Snapshot>,
) -> miette::Result<()> {
    let task = PresenterTask::spawn(presenter, rx);
    let governor = Arc::clone(scheduler.governor());

    // The loop (and its sender) is dropped when the blocking closure returns,
    // which lets the presenter task drain and finish.
    let outcome = tokio::task::spawn_blocking(move || scheduler.run()).await;

    task.finish().await;

    let summary = match outcome {
        Ok(Ok(summary)) => summary,
        Ok(Err(e)) => {
            error!(error = %e, "Simulation aborted");
            return Err(e.into());
        }
        Err(e) => {
            let err = SimError::ThreadFailed {
                cycle: governor.completed() + 1,
                reason: e.to_string(),
            };
            error!(error = %err, "Scheduler thread failed");
            return Err(err.into());
        }
    };

    info!(
        cycles = summary.cycles,
        generated = summary.stats.generated,
        admitted = summary.stats.admitted,
        rejected = summary.stats.rejected,
        dispatched = summary.stats.dispatched,
        burst_units = summary.stats.burst_units,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Simulator shut down cleanly"
    );

    Ok(())
}
