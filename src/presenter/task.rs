/*!
 * Presenter Task
 * Async consumer that drains snapshots into a presenter
 */

use super::Presenter;
use crate::scheduler::Snapshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Unbounded snapshot channel; sending never blocks the scheduler
pub fn snapshot_channel() -> (flume::Sender<Snapshot>, flume::Receiver<Snapshot>) {
    flume::unbounded()
}

/// Handle to the background presenter task
///
/// The task ends once every sender is dropped and the channel is drained.
pub struct PresenterTask<P: Presenter> {
    handle: JoinHandle<(P, usize)>,
}

impl<P: Presenter> PresenterTask<P> {
    /// Spawn on the current tokio runtime
    pub fn spawn(mut presenter: P, rx: flume::Receiver<Snapshot>) -> Self {
        let handle = tokio::spawn(async move {
            let mut delivered = 0usize;
            while let Ok(snapshot) = rx.recv_async().await {
                presenter.present(&snapshot);
                delivered += 1;
            }
            (presenter, delivered)
        });

        info!("Presenter task spawned");
        Self { handle }
    }

    /// Wait for the channel to close and hand back the presenter
    pub async fn finish(self) -> Option<(P, usize)> {
        match self.handle.await {
            Ok((presenter, delivered)) => {
                info!(delivered, "Presenter task finished");
                Some((presenter, delivered))
            }
            Err(e) => {
                warn!(error = %e, "Presenter task failed");
                None
            }
        }
    }
}
