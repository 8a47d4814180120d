use std::sync::{Arc, Mutex, PoisonError};

use varstash_core::ScopeRegistry;

/// Clone-able handle to the process-wide scope registry
///
/// The host's call dispatcher is single-threaded by contract, but adapters
/// that end up dispatching from more than one thread get their mutual
/// exclusion here. Call volumes are low, so one lock over the whole registry
/// is the boundary; set/get/delete/enumerate on any scope are atomic with
/// respect to each other.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ScopeRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScopeRegistry::new())),
        }
    }

    /// Run a closure against the locked registry
    ///
    /// Nothing in the registry panics mid-update, so a poisoned lock still
    /// holds consistent state and is recovered rather than propagated.
    pub fn with<R>(&self, f: impl FnOnce(&mut ScopeRegistry) -> R) -> R {
        let mut reg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut reg)
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
