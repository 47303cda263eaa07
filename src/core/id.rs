/*!
 * ID Generation
 * Explicit, shareable process id counter owned by the process factory
 */

use super::types::Pid;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID, or `None` once the id space is used up
    fn next(&self) -> Option<T>;

    /// Last ID handed out (0 if none yet)
    fn current(&self) -> T;
}

/// Atomic counter for process IDs
///
/// Clones share the same counter, so ids stay unique and strictly increasing
/// no matter how many threads create processes. The counter never wraps: after
/// `Pid::MAX` every call to `next` returns `None`.
#[derive(Debug, Clone, Default)]
pub struct AtomicGenerator {
    counter: Arc<AtomicU32>,
}

impl AtomicGenerator {
    /// Create a generator whose first id is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose first id is `last + 1`
    pub fn starting_after(last: Pid) -> Self {
        Self {
            counter: Arc::new(AtomicU32::new(last)),
        }
    }
}

impl IdGenerator<Pid> for AtomicGenerator {
    #[inline]
    fn next(&self) -> Option<Pid> {
        self.counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .ok()
            .map(|last| last + 1)
    }

    #[inline]
    fn current(&self) -> Pid {
        self.counter.load(Ordering::SeqCst)
    }
}
