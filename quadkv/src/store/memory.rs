use crate::errors::{QuadError, QuadResult};
use crate::store::KeyValueStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory key-value store.
///
/// Holds all records in process memory; nothing survives the process.
/// Useful for tests and for ephemeral indexes that do not need
/// persistence. Thread-safe and cheaply cloneable.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// Checks if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    fn check_opened(&self) -> QuadResult<()> {
        if self.inner.closed.load(Ordering::Relaxed) {
            return Err(QuadError::Closed);
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> QuadResult<Option<Vec<u8>>> {
        self.check_opened()?;
        Ok(self.inner.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> QuadResult<()> {
        self.check_opened()?;
        self.inner.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn contains_key(&self, key: &str) -> QuadResult<bool> {
        self.check_opened()?;
        Ok(self.inner.entries.read().contains_key(key))
    }

    fn commit(&self) -> QuadResult<()> {
        // Nothing to flush; memory is the medium.
        self.check_opened()
    }

    fn close(&self) -> QuadResult<()> {
        self.inner.closed.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn is_closed(&self) -> QuadResult<bool> {
        Ok(self.inner.closed.load(Ordering::Relaxed))
    }
}
