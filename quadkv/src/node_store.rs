//! Node record persistence through the key-value collaborator.
//!
//! Records are read ONE AT A TIME on demand. There is no preloading and
//! no cache: the store is the single source of truth, re-read on every
//! operation. Each node record lives under its own id; a single
//! bootstrap key holds the id of the root node.

use std::sync::Arc;

use crate::constants::ROOT_ID_KEY;
use crate::errors::{QuadError, QuadResult};
use crate::geometry::Rect;
use crate::ids::IdSource;
use crate::node::Node;
use crate::store::KeyValueStore;

/// Translates node ids to and from persisted records.
pub struct NodeStore {
    store: Arc<dyn KeyValueStore>,
    ids: Arc<dyn IdSource>,
}

impl NodeStore {
    /// Creates a node store over the given collaborators.
    pub fn new(store: Arc<dyn KeyValueStore>, ids: Arc<dyn IdSource>) -> NodeStore {
        NodeStore { store, ids }
    }

    /// Produces a fresh node id.
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }

    /// Reads a SINGLE node record from the store.
    ///
    /// A missing record is an error here: by the time a descent asks for
    /// an id, that id is referenced by the tree structure.
    pub fn read_node(&self, id: &str) -> QuadResult<Node> {
        let bytes = self
            .store
            .get(id)?
            .ok_or_else(|| QuadError::NotFound(format!("node record {}", id)))?;
        serde_json::from_slice(&bytes).map_err(|e| QuadError::Serialization(e.to_string()))
    }

    /// Writes a SINGLE node record to the store.
    ///
    /// Records are stored as JSON documents; the opaque payload travels
    /// inside the record untouched.
    pub fn write_node(&self, node: &Node) -> QuadResult<()> {
        let bytes =
            serde_json::to_vec(node).map_err(|e| QuadError::Serialization(e.to_string()))?;
        self.store.put(&node.id, bytes)
    }

    /// Reads the bootstrap record, if the tree has been initialized.
    pub fn root_id(&self) -> QuadResult<Option<String>> {
        match self.store.get(ROOT_ID_KEY)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| QuadError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Bootstraps the tree, creating the root on first use.
    ///
    /// Idempotent against a given store: a second initialization observes
    /// the existing bootstrap record and reuses its root, ignoring the
    /// supplied boundary and capacity. The root record is persisted
    /// before the bootstrap pointer, so a crash in between leaves no
    /// dangling root id.
    pub fn initialize(&self, boundary: Rect, capacity: usize) -> QuadResult<String> {
        if let Some(existing) = self.root_id()? {
            log::debug!("Reusing existing quadtree root {}", existing);
            return Ok(existing);
        }

        let id = self.ids.next_id();
        let root = Node::new_leaf(id.clone(), boundary, capacity);
        self.write_node(&root)?;
        self.store.put(ROOT_ID_KEY, id.as_bytes().to_vec())?;
        log::debug!("Initialized quadtree root {}", id);
        Ok(id)
    }
}
