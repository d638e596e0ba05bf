//! PointIndex trait definition for persistent point indexes.

use crate::constants::DEFAULT_NEAREST_RADIUS;
use crate::errors::QuadResult;
use crate::geometry::Point;
use serde_json::Value;

/// Public operations of a persistent two-dimensional point index.
pub trait PointIndex: Send + Sync {
    /// Inserts a point with an attached payload.
    ///
    /// Fails with a boundary violation if the point lies outside the
    /// index's universe boundary.
    fn insert(&self, x: f64, y: f64, payload: Value) -> QuadResult<()>;

    /// Returns every stored point inside the closed query rectangle.
    ///
    /// Results come back in deterministic pre-order traversal order for
    /// a fixed tree state; no sorting is applied.
    fn range(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> QuadResult<Vec<Point>>;

    /// Finds the closest stored point within `radius` of `(x, y)`.
    ///
    /// Bounded search over the square `[x-radius, x+radius] x
    /// [y-radius, y+radius]`: a closer point outside that square is
    /// never found, and an empty candidate set is not widened.
    fn nearest_within(&self, x: f64, y: f64, radius: f64) -> QuadResult<Option<Point>>;

    /// Finds the closest stored point within the default radius.
    fn nearest(&self, x: f64, y: f64) -> QuadResult<Option<Point>> {
        self.nearest_within(x, y, DEFAULT_NEAREST_RADIUS)
    }

    /// Replaces the payload of the point stored at exactly `(x, y)`.
    ///
    /// Coordinates are matched by exact float equality. Fails with a
    /// point-not-found error if no stored point has that coordinate
    /// pair.
    fn update(&self, x: f64, y: f64, payload: Value) -> QuadResult<()>;
}
