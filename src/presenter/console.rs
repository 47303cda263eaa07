/*!
 * Console Presenter
 * Plain-text rendering of CPU, memory and log state
 */

use super::Presenter;
use crate::process::Process;
use crate::scheduler::Snapshot;
use std::io::{self, Write};
use tracing::warn;

/// Writes one block of text per cycle
pub struct ConsolePresenter<W: Write + Send + 'static = io::Stdout> {
    out: W,
    capacity: Option<usize>,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            capacity: None,
        }
    }

    /// Show queue fill as `n/capacity`
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!(error = %e, "Console presenter write failed");
        }
    }
}

impl<W: Write + Send + 'static> Presenter for ConsolePresenter<W> {
    fn on_cpu_state_changed(&mut self, occupant: Option<&Process>) {
        let line = match occupant {
            Some(p) => format!("  CPU    : busy with {}", p),
            None => "  CPU    : idle".to_string(),
        };
        self.write_line(&line);
    }

    fn on_queue_state_changed(&mut self, contents: &[Process]) {
        let fill = match self.capacity {
            Some(cap) => format!("{}/{}", contents.len(), cap),
            None => contents.len().to_string(),
        };
        let ids: Vec<String> = contents
            .iter()
            .map(|p| format!("P{}(p{})", p.id(), p.priority()))
            .collect();
        self.write_line(&format!("  Memory : [{}] {}", fill, ids.join(" ")));
    }

    fn on_log(&mut self, message: &str) {
        for line in message.lines() {
            self.write_line(&format!("  > {}", line));
        }
    }

    fn present(&mut self, snapshot: &Snapshot) {
        let header = match &snapshot.dispatched {
            Some(p) => format!("Cycle {:>3} | ran {}", snapshot.cycle, p),
            None => format!("Cycle {:>3} | no dispatch", snapshot.cycle),
        };
        self.write_line(&header);

        self.on_cpu_state_changed(snapshot.cpu_occupant.as_ref());
        self.on_queue_state_changed(&snapshot.queue);
        if !snapshot.log.is_empty() {
            self.on_log(&snapshot.log);
        }

        if let Err(e) = self.out.flush() {
            warn!(error = %e, "Console presenter flush failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_cycle_block() {
        let p = Process::new(4, 3, 20, 5).unwrap();
        let waiting = Process::new(5, 1, 1, 2).unwrap();
        let snapshot = Snapshot {
            cycle: 2,
            cpu_occupant: None,
            dispatched: Some(p),
            queue: vec![waiting],
            admitted: true,
            log: "Process 4 assigned to the CPU.\nProcess 4 released.".to_string(),
        };

        let mut presenter = ConsolePresenter::new(Vec::new()).with_capacity(3);
        presenter.present(&snapshot);
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert_eq!(
            text,
            "Cycle   2 | ran P4 (prio 5, burst 3, mem 20)\n\
             \x20 CPU    : idle\n\
             \x20 Memory : [1/3] P5(p2)\n\
             \x20 > Process 4 assigned to the CPU.\n\
             \x20 > Process 4 released.\n"
        );
    }
}
