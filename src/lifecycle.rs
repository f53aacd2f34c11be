use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Liveness of a mounted component, shared with the async work it starts.
///
/// The component releases the flag from its cleanup; work that resolves later
/// checks `is_alive` before touching component state.
#[derive(Debug, Clone)]
pub struct MountFlag(Arc<AtomicBool>);

impl MountFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Runs `f` only while still mounted.
    pub fn run_if_alive<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        if self.is_alive() {
            Some(f())
        } else {
            None
        }
    }
}

impl Default for MountFlag {
    fn default() -> Self {
        Self::new()
    }
}
