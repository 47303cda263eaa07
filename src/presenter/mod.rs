/*!
 * Presenter Module
 * One-way snapshot delivery to display collaborators
 *
 * The scheduler never touches a presenter directly. Snapshots travel over an
 * unbounded channel and are drained on an async task, so rendering latency
 * never holds up the next cycle.
 */

pub mod console;
pub mod json;
pub mod task;

pub use console::ConsolePresenter;
pub use json::JsonPresenter;
pub use task::{snapshot_channel, PresenterTask};

use crate::process::Process;
use crate::scheduler::Snapshot;

/// Display boundary for scheduler state
///
/// Each method is called at most once per cycle, in cycle order.
pub trait Presenter: Send + 'static {
    fn on_cpu_state_changed(&mut self, occupant: Option<&Process>);

    fn on_queue_state_changed(&mut self, contents: &[Process]);

    fn on_log(&mut self, message: &str);

    /// Fan a snapshot out to the individual callbacks
    fn present(&mut self, snapshot: &Snapshot) {
        self.on_cpu_state_changed(snapshot.cpu_occupant.as_ref());
        self.on_queue_state_changed(&snapshot.queue);
        if !snapshot.log.is_empty() {
            self.on_log(&snapshot.log);
        }
    }
}
