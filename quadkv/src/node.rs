//! Persisted node records.
//!
//! A node is the unit of persistence: one record per quadrant, stored
//! under the node's id in the key-value collaborator. A node starts as a
//! leaf and transitions to divided exactly once; points resident at the
//! moment of the transition stay attached to the node permanently.

use crate::geometry::{Point, Quadrant, Rect};
use serde::{Deserialize, Serialize};

/// Child node ids of a divided node, one per quadrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Children {
    pub ne: String,
    pub nw: String,
    pub se: String,
    pub sw: String,
}

impl Children {
    /// Returns the child id for the given quadrant.
    pub fn id(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::Ne => &self.ne,
            Quadrant::Nw => &self.nw,
            Quadrant::Se => &self.se,
            Quadrant::Sw => &self.sw,
        }
    }

    /// Returns the child ids in the fixed traversal order.
    pub fn ids(&self) -> [&str; 4] {
        [&self.ne, &self.nw, &self.se, &self.sw]
    }
}

/// A quadrant record: boundary, resident points, subdivision state and
/// child references.
///
/// Invariants:
/// - `children` is present iff `divided` is true
/// - `divided` transitions false to true at most once and never reverts
/// - while a leaf, `points` holds at most `capacity` entries; a divided
///   node keeps whatever points it held at the moment of subdivision
/// - `id` and `boundary` are fixed for the node's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub boundary: Rect,
    pub capacity: usize,
    pub points: Vec<Point>,
    pub divided: bool,
    pub children: Option<Children>,
}

impl Node {
    /// Creates an empty, undivided node.
    pub fn new_leaf(id: String, boundary: Rect, capacity: usize) -> Node {
        Node {
            id,
            boundary,
            capacity,
            points: Vec::new(),
            divided: false,
            children: None,
        }
    }

    /// Creates an empty child covering one quadrant of this node's
    /// boundary, inheriting its capacity.
    pub fn child(&self, quadrant: Quadrant, id: String) -> Node {
        Node::new_leaf(id, self.boundary.quadrant(quadrant), self.capacity)
    }

    /// Checks if this node is still an undivided leaf.
    pub fn is_leaf(&self) -> bool {
        !self.divided
    }

    /// Checks if the resident point list has reached capacity.
    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_leaf() {
        let node = Node::new_leaf("root".into(), Rect::new(0.0, 0.0, 10.0, 10.0), 4);
        assert_eq!(node.id, "root");
        assert!(node.is_leaf());
        assert!(!node.is_full());
        assert!(node.points.is_empty());
        assert!(node.children.is_none());
    }

    #[test]
    fn test_child_boundary() {
        let parent = Node::new_leaf("p".into(), Rect::new(50.0, 50.0, 50.0, 50.0), 4);
        let child = parent.child(Quadrant::Sw, "c".into());

        assert_eq!(child.boundary, Rect::new(25.0, 75.0, 25.0, 25.0));
        assert_eq!(child.capacity, 4);
        assert!(child.is_leaf());
        assert!(child.points.is_empty());
    }

    #[test]
    fn test_is_full() {
        let mut node = Node::new_leaf("n".into(), Rect::new(0.0, 0.0, 10.0, 10.0), 2);
        node.points.push(Point::new(1.0, 1.0, json!(1)));
        assert!(!node.is_full());
        node.points.push(Point::new(2.0, 2.0, json!(2)));
        assert!(node.is_full());
    }

    #[test]
    fn test_children_order() {
        let children = Children {
            ne: "a".into(),
            nw: "b".into(),
            se: "c".into(),
            sw: "d".into(),
        };
        assert_eq!(children.ids(), ["a", "b", "c", "d"]);
        assert_eq!(children.id(Quadrant::Se), "c");
    }
}
