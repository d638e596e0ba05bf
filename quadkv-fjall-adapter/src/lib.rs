//! # quadkv-fjall-adapter - Durable storage for quadkv
//!
//! This crate backs the `quadkv` persistent quadtree with the Fjall LSM
//! engine, giving the index a durable home on the filesystem. Node
//! records live in a single keyspace partition; the tree survives
//! process restarts and reopening reuses the existing root.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quadkv::{PointIndex, QuadTree, Rect};
//! use quadkv_fjall_adapter::FjallStore;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FjallStore::builder().db_path("/path/to/index").open()?;
//! let tree = QuadTree::open(Arc::new(store), Rect::new(50.0, 50.0, 50.0, 50.0), 4)?;
//!
//! tree.insert(10.0, 10.0, serde_json::json!({"name": "depot"}))?;
//! let hits = tree.range(0.0, 0.0, 25.0, 25.0)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Durability
//!
//! Writes land in Fjall's journal as they happen; `commit` on the store
//! syncs the journal to disk, and closing the store performs a final
//! sync. Alternatively, configure a periodic fsync with
//! `FjallStore::builder().fsync_ms(..)`.

mod config;
mod store;

pub use config::FjallConfig;
pub use store::{FjallStore, FjallStoreBuilder};
