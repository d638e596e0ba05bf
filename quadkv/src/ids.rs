//! Identifier generation for node records.

use uuid::Uuid;

/// Source of globally-unique node identifiers.
///
/// The tree asks for a fresh id once per node creation (the root at
/// bootstrap, then four per subdivision). Ids are opaque strings and are
/// never reused across a store's lifetime.
pub trait IdSource: Send + Sync {
    /// Produces a fresh identifier.
    fn next_id(&self) -> String;
}

/// Default id source backed by v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
