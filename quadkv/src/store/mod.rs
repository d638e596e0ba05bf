//! Storage abstraction for node records.
//!
//! The storage layer is pluggable: the tree talks to a durable key-value
//! collaborator through the `KeyValueStore` trait and never assumes a
//! particular backend. This crate ships `MemoryStore` for tests and
//! ephemeral indexes; the `quadkv-fjall-adapter` crate provides a
//! persistent LSM-backed implementation.

mod memory;

pub use memory::MemoryStore;

use crate::errors::QuadResult;

/// Contract between the quadtree and its durable key-value collaborator.
///
/// Implementations map string keys to opaque byte values. A write is
/// durable once `put` returns, to whatever degree the backend itself
/// guarantees durability for a single-key write; `commit` forces pending
/// writes onto the durable medium. The tree never retries a failed store
/// operation.
pub trait KeyValueStore: Send + Sync {
    /// Retrieves a value by key. Absent keys yield `Ok(None)`.
    fn get(&self, key: &str) -> QuadResult<Option<Vec<u8>>>;

    /// Inserts or replaces a key-value pair.
    fn put(&self, key: &str, value: Vec<u8>) -> QuadResult<()>;

    /// Checks if a key exists.
    fn contains_key(&self, key: &str) -> QuadResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Flushes pending writes to the backend's durable medium.
    fn commit(&self) -> QuadResult<()>;

    /// Closes the store, preventing further operations.
    fn close(&self) -> QuadResult<()>;

    /// Checks if this store is closed.
    fn is_closed(&self) -> QuadResult<bool>;
}
