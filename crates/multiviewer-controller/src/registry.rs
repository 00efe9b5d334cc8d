//! Per-deployment-unit handler registry
//!
//! Every managed flow in a deployment unit shares one backing handler. The
//! registry hands out that handler, building it on first request and
//! returning the cached instance afterwards. The registry is owned by the
//! plan object; separate plans never share handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Keyed registry with create-if-absent semantics
pub struct HandlerRegistry<H> {
    inner: Arc<Mutex<HashMap<String, Arc<H>>>>,
}

// Clones share the same map; `H` itself need not be `Clone`.
impl<H> Clone for HandlerRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<H> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handler for `key`, building it with `factory` if absent.
    ///
    /// `factory` runs at most once per key.
    pub fn get_or_create<F>(&self, key: &str, factory: F) -> Arc<H>
    where
        F: FnOnce() -> H,
    {
        let mut handlers = self.lock();
        if let Some(existing) = handlers.get(key) {
            return Arc::clone(existing);
        }

        let handler = Arc::new(factory());
        handlers.insert(key.to_string(), Arc::clone(&handler));
        handler
    }

    /// Look up a handler without creating one
    pub fn get(&self, key: &str) -> Option<Arc<H>> {
        self.lock().get(key).cloned()
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The map is only ever mutated by a single insert, so a poisoned lock
    // still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<H>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
