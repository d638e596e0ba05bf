//! Persistent quadtree engine.
//!
//! The tree keeps no in-memory structure. Every public operation starts
//! at the persisted root id and descends recursively, fetching exactly
//! one node record per step and writing back only the node(s) it
//! mutates. Subdivision does not redistribute: points resident at the
//! moment a leaf divides stay attached to that node, so a divided node
//! can still hold up to `capacity` points that every query touching it
//! must check.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::constants::MAX_TREE_DEPTH;
use crate::errors::{QuadError, QuadResult};
use crate::geometry::{Point, Quadrant, Rect};
use crate::ids::{IdSource, UuidSource};
use crate::node::{Children, Node};
use crate::node_store::NodeStore;
use crate::point_index::PointIndex;
use crate::store::KeyValueStore;

/// A persistent quadtree point index over a key-value store.
///
/// # Examples
///
/// ```rust
/// use quadkv::{MemoryStore, PointIndex, QuadTree, Rect};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Universe [0,100] x [0,100], four points per leaf
/// let store = Arc::new(MemoryStore::new());
/// let tree = QuadTree::open(store, Rect::new(50.0, 50.0, 50.0, 50.0), 4)?;
///
/// tree.insert(10.0, 10.0, serde_json::json!({"name": "depot"}))?;
/// let hits = tree.range(0.0, 0.0, 25.0, 25.0)?;
/// assert_eq!(hits.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct QuadTree {
    nodes: NodeStore,
    root_id: String,
    /// Single-writer token for load-modify-store sequences. The descent
    /// algorithms themselves are synchronization-free.
    write_lock: Mutex<()>,
}

impl QuadTree {
    /// Opens a tree against the given store, creating the root on first
    /// use.
    ///
    /// Bootstrap is idempotent: if the store already holds a tree, its
    /// root is reused and `boundary`/`capacity` only describe the tree
    /// that would have been created. Node ids come from v4 UUIDs; use
    /// [`QuadTree::open_with_ids`] to supply a different source.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        boundary: Rect,
        capacity: usize,
    ) -> QuadResult<QuadTree> {
        Self::open_with_ids(store, Arc::new(UuidSource), boundary, capacity)
    }

    /// Opens a tree with a custom identifier source.
    pub fn open_with_ids(
        store: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdSource>,
        boundary: Rect,
        capacity: usize,
    ) -> QuadResult<QuadTree> {
        if capacity == 0 {
            return Err(QuadError::InvalidOperation(
                "capacity must be at least 1".into(),
            ));
        }
        if !boundary.is_valid() {
            return Err(QuadError::InvalidOperation(format!(
                "invalid universe boundary {}",
                boundary
            )));
        }

        let nodes = NodeStore::new(store, ids);
        let root_id = nodes.initialize(boundary, capacity)?;
        Ok(QuadTree {
            nodes,
            root_id,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the id of the persisted root node.
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// Descends from `node_id` looking for a node that accepts the
    /// point. Returns `Ok(false)` when the point lies outside this
    /// branch's boundary; the caller tries the next sibling.
    fn insert_into(&self, node_id: &str, point: &Point, depth: usize) -> QuadResult<bool> {
        if depth > MAX_TREE_DEPTH {
            return Err(QuadError::InvalidOperation(format!(
                "maximum tree depth {} exceeded at node {}",
                MAX_TREE_DEPTH, node_id
            )));
        }

        let mut node = self.nodes.read_node(node_id)?;
        if !node.boundary.contains(point) {
            return Ok(false);
        }

        if node.is_leaf() && !node.is_full() {
            node.points.push(point.clone());
            self.nodes.write_node(&node)?;
            log::trace!("Stored {} in node {}", point, node.id);
            return Ok(true);
        }

        if node.is_leaf() {
            self.subdivide(&mut node)?;
        }

        let children = Self::children_of(&node)?;
        for quadrant in Quadrant::ORDER {
            if self.insert_into(children.id(quadrant), point, depth + 1)? {
                return Ok(true);
            }
        }

        // The quadrants partition the boundary exactly; a contained
        // point with no accepting child means the structure is corrupt.
        Err(QuadError::InvalidOperation(format!(
            "node {} contains {} but no child accepted it",
            node.id, point
        )))
    }

    /// Splits a leaf into four empty children.
    ///
    /// Each child is persisted before the parent record flips to
    /// divided; a crash in between leaves unreferenced child records and
    /// an intact leaf. The parent keeps its resident points.
    fn subdivide(&self, node: &mut Node) -> QuadResult<()> {
        log::debug!("Subdividing node {}", node.id);
        let ne = self.create_child(node, Quadrant::Ne)?;
        let nw = self.create_child(node, Quadrant::Nw)?;
        let se = self.create_child(node, Quadrant::Se)?;
        let sw = self.create_child(node, Quadrant::Sw)?;

        node.children = Some(Children { ne, nw, se, sw });
        node.divided = true;
        self.nodes.write_node(node)
    }

    fn create_child(&self, parent: &Node, quadrant: Quadrant) -> QuadResult<String> {
        let child = parent.child(quadrant, self.nodes.next_id());
        self.nodes.write_node(&child)?;
        Ok(child.id)
    }

    /// Pre-order range collection: this node's matches first, then the
    /// children in fixed order. Branches whose boundary misses the query
    /// rectangle are skipped without recursing.
    fn query_into(&self, node_id: &str, range: &Rect, found: &mut Vec<Point>) -> QuadResult<()> {
        let node = self.nodes.read_node(node_id)?;
        if !node.boundary.intersects(range) {
            return Ok(());
        }

        for point in &node.points {
            if range.contains(point) {
                found.push(point.clone());
            }
        }

        if let Some(children) = &node.children {
            for quadrant in Quadrant::ORDER {
                self.query_into(children.id(quadrant), range, found)?;
            }
        }
        Ok(())
    }

    /// Depth-first search for the node owning the point stored at
    /// exactly `(x, y)`. First match wins when duplicates share a
    /// location.
    fn find_point(&self, node_id: &str, x: f64, y: f64) -> QuadResult<Option<(Node, usize)>> {
        let node = self.nodes.read_node(node_id)?;

        if let Some(index) = node.points.iter().position(|p| p.is_at(x, y)) {
            return Ok(Some((node, index)));
        }

        if let Some(children) = &node.children {
            for quadrant in Quadrant::ORDER {
                if let Some(found) = self.find_point(children.id(quadrant), x, y)? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    fn children_of(node: &Node) -> QuadResult<&Children> {
        node.children.as_ref().ok_or_else(|| {
            QuadError::InvalidOperation(format!("divided node {} has no children", node.id))
        })
    }
}

impl PointIndex for QuadTree {
    fn insert(&self, x: f64, y: f64, payload: Value) -> QuadResult<()> {
        let _guard = self.write_lock.lock();
        let point = Point::new(x, y, payload);
        if self.insert_into(&self.root_id, &point, 0)? {
            Ok(())
        } else {
            Err(QuadError::BoundaryViolation { x, y })
        }
    }

    fn range(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> QuadResult<Vec<Point>> {
        let range = Rect::from_corners(min_x, min_y, max_x, max_y);
        let mut found = Vec::new();
        self.query_into(&self.root_id, &range, &mut found)?;
        Ok(found)
    }

    fn nearest_within(&self, x: f64, y: f64, radius: f64) -> QuadResult<Option<Point>> {
        let mut candidates = self.range(x - radius, y - radius, x + radius, y + radius)?;
        // Stable sort keeps traversal order between equidistant candidates
        candidates.sort_by(|a, b| {
            a.distance_squared(x, y)
                .partial_cmp(&b.distance_squared(x, y))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(candidates.into_iter().next())
    }

    fn update(&self, x: f64, y: f64, payload: Value) -> QuadResult<()> {
        let _guard = self.write_lock.lock();
        match self.find_point(&self.root_id, x, y)? {
            Some((mut node, index)) => {
                node.points[index].payload = payload;
                self.nodes.write_node(&node)
            }
            None => Err(QuadError::PointNotFound { x, y }),
        }
    }
}
