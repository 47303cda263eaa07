/*!
 * JSON Presenter
 * One JSON document per snapshot, newline-delimited
 */

use super::Presenter;
use crate::process::Process;
use crate::scheduler::Snapshot;
use std::io::{self, Write};
use tracing::warn;

pub struct JsonPresenter<W: Write + Send + 'static = io::Stdout> {
    out: W,
}

impl JsonPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Individual callbacks are folded into the single document written by `present`.
impl<W: Write + Send + 'static> Presenter for JsonPresenter<W> {
    fn on_cpu_state_changed(&mut self, _occupant: Option<&Process>) {}

    fn on_queue_state_changed(&mut self, _contents: &[Process]) {}

    fn on_log(&mut self, _message: &str) {}

    fn present(&mut self, snapshot: &Snapshot) {
        if let Err(e) = write_document(&mut self.out, snapshot) {
            warn!(error = %e, cycle = snapshot.cycle, "JSON presenter write failed");
        }
    }
}

fn write_document<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_json_lines() {
        let mut presenter = JsonPresenter::new(Vec::new());
        for cycle in 1..=2 {
            presenter.present(&Snapshot {
                cycle,
                cpu_occupant: None,
                dispatched: Some(Process::new(cycle as u32, 1, 1, 1).unwrap()),
                queue: Vec::new(),
                admitted: true,
                log: String::new(),
            });
        }

        let text = String::from_utf8(presenter.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["cycle"], 2);
        assert_eq!(lines[1]["dispatched"]["id"], 2);
        assert!(lines[0]["cpu_occupant"].is_null());
    }
}
