//! # quadkv - Persistent Quadtree over a Key-Value Store
//!
//! This crate provides a persistent two-dimensional point index: a
//! quadtree whose nodes are individually stored records in a durable
//! key-value store rather than an in-memory pointer structure.
//!
//! ## Features
//!
//! - **Store-As-Truth**: No whole-tree structure in memory; every
//!   operation re-reads node records on demand, one per descent step
//! - **Persistent**: The tree survives process restarts; reopening a
//!   store reuses the existing root
//! - **Pluggable Storage**: Backends implement the `KeyValueStore`
//!   trait; `MemoryStore` ships here, a durable LSM-backed store lives
//!   in `quadkv-fjall-adapter`
//! - **Point Payloads**: Each point carries an opaque JSON payload,
//!   replaceable in place by exact coordinate match
//! - **Range Queries**: Closed axis-aligned bounding-box queries with
//!   deterministic pre-order results
//! - **Bounded Nearest**: Approximate nearest-point lookup within a
//!   fixed radius square
//!
//! ## Quick Start
//!
//! ```rust
//! use quadkv::{MemoryStore, PointIndex, QuadTree, Rect};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Universe [0,100] x [0,100], up to 4 points per leaf
//! let store = Arc::new(MemoryStore::new());
//! let tree = QuadTree::open(store, Rect::new(50.0, 50.0, 50.0, 50.0), 4)?;
//!
//! tree.insert(10.0, 10.0, serde_json::json!({"name": "depot"}))?;
//! tree.insert(80.0, 20.0, serde_json::json!({"name": "mast"}))?;
//!
//! let hits = tree.range(0.0, 0.0, 25.0, 25.0)?;
//! assert_eq!(hits.len(), 1);
//!
//! let nearest = tree.nearest(12.0, 12.0)?;
//! assert!(nearest.is_some());
//! # Ok(())
//! # }
//! ```

// Core tree modules
pub mod constants;
pub mod errors;
pub mod geometry;
pub mod node;
pub mod node_store;
pub mod point_index;
pub mod tree;

// Collaborator abstractions
pub mod ids;
pub mod store;

// Re-export core types
pub use errors::{QuadError, QuadResult};
pub use geometry::{Point, Quadrant, Rect};
pub use node::{Children, Node};
pub use point_index::PointIndex;
pub use tree::QuadTree;

// Re-export collaborator surfaces
pub use ids::{IdSource, UuidSource};
pub use store::{KeyValueStore, MemoryStore};

// Re-export tuning constants
pub use constants::{DEFAULT_CAPACITY, DEFAULT_NEAREST_RADIUS};
