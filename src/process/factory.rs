/*!
 * Process Factory
 * Creates process descriptors with unique ids and sourced attributes
 */

use super::attributes::{AttributeSource, RandomAttributes};
use super::types::Process;
use crate::core::errors::ProcessError;
use crate::core::id::{AtomicGenerator, IdGenerator};
use crate::core::types::Pid;
use parking_lot::Mutex;
use tracing::debug;

/// Process factory
///
/// Safe to share between threads: the id counter is atomic and the attribute
/// source sits behind its own lock.
pub struct ProcessFactory {
    ids: AtomicGenerator,
    source: Mutex<Box<dyn AttributeSource>>,
}

impl ProcessFactory {
    /// Factory with entropy-seeded random attributes
    pub fn new() -> Self {
        Self::with_source(RandomAttributes::new())
    }

    /// Factory with reproducible random attributes
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(RandomAttributes::seeded(seed))
    }

    /// Factory with a custom attribute source
    pub fn with_source<S: AttributeSource + 'static>(source: S) -> Self {
        Self {
            ids: AtomicGenerator::new(),
            source: Mutex::new(Box::new(source)),
        }
    }

    /// Share an existing id counter (e.g. with a second factory)
    pub fn with_ids(mut self, ids: AtomicGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Create a new process
    ///
    /// Fails only once every process id has been handed out.
    pub fn create(&self) -> Result<Process, ProcessError> {
        let id = self.ids.next().ok_or(ProcessError::IdsExhausted {
            last: self.ids.current(),
        })?;
        let attrs = self.source.lock().next_attributes();
        let process = Process::with_attributes(id, attrs);
        debug!(
            pid = process.id(),
            priority = process.priority(),
            burst = process.burst_time(),
            memory = process.memory_footprint(),
            "Process created"
        );
        Ok(process)
    }

    /// Last id handed out
    pub fn last_id(&self) -> Pid {
        self.ids.current()
    }

    /// Handle to the id counter
    pub fn ids(&self) -> &AtomicGenerator {
        &self.ids
    }
}

impl Default for ProcessFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::attributes::ScriptedAttributes;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_strictly_increasing() {
        let factory = ProcessFactory::seeded(1);
        let ids: Vec<_> = (0..20).map(|_| factory.create().unwrap().id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids[0], 1);
        assert_eq!(factory.last_id(), 20);
    }

    #[test]
    fn test_scripted_source() {
        let factory =
            ProcessFactory::with_source(ScriptedAttributes::from_priorities(&[4, 2], 3).unwrap());
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();
        assert_eq!((a.priority(), a.burst_time()), (4, 3));
        assert_eq!((b.priority(), b.burst_time()), (2, 3));
    }

    #[test]
    fn test_shared_id_counter() {
        let ids = AtomicGenerator::new();
        let a = ProcessFactory::seeded(1).with_ids(ids.clone());
        let b = ProcessFactory::seeded(2).with_ids(ids);
        assert_eq!(a.create().unwrap().id(), 1);
        assert_eq!(b.create().unwrap().id(), 2);
        assert_eq!(a.create().unwrap().id(), 3);
    }

    #[test]
    fn test_create_fails_when_ids_exhausted() {
        let factory =
            ProcessFactory::seeded(1).with_ids(AtomicGenerator::starting_after(Pid::MAX - 1));
        assert_eq!(factory.create().unwrap().id(), Pid::MAX);
        assert_eq!(
            factory.create(),
            Err(ProcessError::IdsExhausted { last: Pid::MAX })
        );
        assert_eq!(factory.last_id(), Pid::MAX);
    }

    #[test]
    fn test_concurrent_create() {
        let factory = Arc::new(ProcessFactory::seeded(9));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let factory = Arc::clone(&factory);
                thread::spawn(move || (0..100).map(|_| factory.create().unwrap().id()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
