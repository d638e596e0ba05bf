use serde::{Deserialize, Serialize};

/// One of the four quadrants of a node boundary, named relative to the
/// parent center.
///
/// The tree uses screen-style coordinates: east is +x, west is -x,
/// south is +y, north is -y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    Ne,
    Nw,
    Se,
    Sw,
}

impl Quadrant {
    /// Fixed traversal order. Every descent visits quadrants in this
    /// order, which makes duplicate-coordinate tie-breaks deterministic.
    pub const ORDER: [Quadrant; 4] = [Quadrant::Ne, Quadrant::Nw, Quadrant::Se, Quadrant::Sw];

    /// Returns the lowercase tag for this quadrant.
    pub fn tag(&self) -> &'static str {
        match self {
            Quadrant::Ne => "ne",
            Quadrant::Nw => "nw",
            Quadrant::Se => "se",
            Quadrant::Sw => "sw",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A 2D axis-aligned rectangle in center/half-extent form.
///
/// `Rect` describes a rectangular area by its center point and half
/// extents on each axis. Both containment and intersection treat the
/// boundary as closed: a point exactly on an edge is contained, and two
/// rectangles sharing only an edge intersect.
///
/// # Examples
///
/// ```rust
/// use quadkv::Rect;
///
/// // The region [0,100] x [0,100]
/// let rect = Rect::new(50.0, 50.0, 50.0, 50.0);
/// assert!(rect.contains_xy(100.0, 0.0));
/// assert!(!rect.contains_xy(100.1, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Center X coordinate
    pub center_x: f64,
    /// Center Y coordinate
    pub center_y: f64,
    /// Half extent on the X axis
    pub half_width: f64,
    /// Half extent on the Y axis
    pub half_height: f64,
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}, {})",
            self.center_x, self.center_y, self.half_width, self.half_height
        )
    }
}

impl Rect {
    /// Creates a new rectangle from a center point and half extents.
    pub fn new(center_x: f64, center_y: f64, half_width: f64, half_height: f64) -> Rect {
        Rect {
            center_x,
            center_y,
            half_width,
            half_height,
        }
    }

    /// Creates a rectangle from its minimum and maximum corners.
    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect {
        Rect {
            center_x: (min_x + max_x) / 2.0,
            center_y: (min_y + max_y) / 2.0,
            half_width: (max_x - min_x) / 2.0,
            half_height: (max_y - min_y) / 2.0,
        }
    }

    /// Returns the minimum X coordinate.
    pub fn min_x(&self) -> f64 {
        self.center_x - self.half_width
    }

    /// Returns the maximum X coordinate.
    pub fn max_x(&self) -> f64 {
        self.center_x + self.half_width
    }

    /// Returns the minimum Y coordinate.
    pub fn min_y(&self) -> f64 {
        self.center_y - self.half_height
    }

    /// Returns the maximum Y coordinate.
    pub fn max_y(&self) -> f64 {
        self.center_y + self.half_height
    }

    /// Checks if this rectangle contains a point, edges included.
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        (x - self.center_x).abs() <= self.half_width && (y - self.center_y).abs() <= self.half_height
    }

    /// Checks if this rectangle contains a stored point.
    pub fn contains(&self, point: &Point) -> bool {
        self.contains_xy(point.x, point.y)
    }

    /// Checks if this rectangle intersects another, shared edges included.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() <= other.max_y()
            && self.max_y() >= other.min_y()
    }

    /// Returns the boundary of one quadrant of this rectangle.
    ///
    /// Each quadrant has half the half-extents, centered at this
    /// rectangle's center offset by a quarter of its size per axis. The
    /// four quadrants partition this rectangle exactly.
    pub fn quadrant(&self, quadrant: Quadrant) -> Rect {
        let hw = self.half_width / 2.0;
        let hh = self.half_height / 2.0;
        match quadrant {
            Quadrant::Ne => Rect::new(self.center_x + hw, self.center_y - hh, hw, hh),
            Quadrant::Nw => Rect::new(self.center_x - hw, self.center_y - hh, hw, hh),
            Quadrant::Se => Rect::new(self.center_x + hw, self.center_y + hh, hw, hh),
            Quadrant::Sw => Rect::new(self.center_x - hw, self.center_y + hh, hw, hh),
        }
    }

    /// Checks if this rectangle is usable as a boundary (finite, with
    /// non-negative extents).
    pub fn is_valid(&self) -> bool {
        self.center_x.is_finite()
            && self.center_y.is_finite()
            && self.half_width.is_finite()
            && self.half_height.is_finite()
            && self.half_width >= 0.0
            && self.half_height >= 0.0
    }
}

/// A stored point: a coordinate pair plus an opaque JSON payload.
///
/// Coordinates are immutable once stored; only the payload can be
/// replaced, via the index's update operation. Two points occupy the
/// same location iff both coordinates compare exactly equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Caller-supplied payload, carried through storage untouched
    pub payload: serde_json::Value,
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl Point {
    /// Creates a new point with the given payload.
    pub fn new(x: f64, y: f64, payload: serde_json::Value) -> Point {
        Point { x, y, payload }
    }

    /// Checks if this point sits at exactly the given coordinates.
    ///
    /// Exact float equality, no tolerance. Callers must supply the
    /// coordinates as they were stored.
    pub fn is_at(&self, x: f64, y: f64) -> bool {
        self.x == x && self.y == y
    }

    /// Returns the squared Euclidean distance from this point to `(x, y)`.
    pub fn distance_squared(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new() {
        let rect = Rect::new(50.0, 50.0, 25.0, 10.0);
        assert_eq!(rect.center_x, 50.0);
        assert_eq!(rect.center_y, 50.0);
        assert_eq!(rect.half_width, 25.0);
        assert_eq!(rect.half_height, 10.0);
    }

    #[test]
    fn test_from_corners() {
        let rect = Rect::from_corners(0.0, 0.0, 100.0, 50.0);
        assert_eq!(rect.center_x, 50.0);
        assert_eq!(rect.center_y, 25.0);
        assert_eq!(rect.half_width, 50.0);
        assert_eq!(rect.half_height, 25.0);
        assert_eq!(rect.min_x(), 0.0);
        assert_eq!(rect.max_x(), 100.0);
        assert_eq!(rect.min_y(), 0.0);
        assert_eq!(rect.max_y(), 50.0);
    }

    #[test]
    fn test_contains_xy() {
        let rect = Rect::new(50.0, 50.0, 50.0, 50.0);

        assert!(rect.contains_xy(50.0, 50.0)); // Center
        assert!(rect.contains_xy(0.0, 0.0)); // Corner
        assert!(rect.contains_xy(100.0, 100.0)); // Corner
        assert!(rect.contains_xy(50.0, 0.0)); // Edge
        assert!(!rect.contains_xy(-0.1, 50.0)); // Outside
        assert!(!rect.contains_xy(50.0, 100.1)); // Outside
    }

    #[test]
    fn test_intersects() {
        let a = Rect::from_corners(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_corners(5.0, 5.0, 15.0, 15.0);
        let c = Rect::from_corners(20.0, 20.0, 30.0, 30.0);
        let d = Rect::from_corners(10.0, 10.0, 20.0, 20.0); // Touches corner

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&d)); // Touching counts as intersection
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_quadrants_partition_parent() {
        let parent = Rect::new(50.0, 50.0, 50.0, 50.0);

        let ne = parent.quadrant(Quadrant::Ne);
        assert_eq!(ne.center_x, 75.0);
        assert_eq!(ne.center_y, 25.0);
        assert_eq!(ne.half_width, 25.0);
        assert_eq!(ne.half_height, 25.0);

        let nw = parent.quadrant(Quadrant::Nw);
        assert_eq!((nw.center_x, nw.center_y), (25.0, 25.0));

        let se = parent.quadrant(Quadrant::Se);
        assert_eq!((se.center_x, se.center_y), (75.0, 75.0));

        let sw = parent.quadrant(Quadrant::Sw);
        assert_eq!((sw.center_x, sw.center_y), (25.0, 75.0));

        // Every point of the parent falls in at least one quadrant
        for &(x, y) in &[
            (0.0, 0.0),
            (50.0, 50.0),
            (100.0, 100.0),
            (50.0, 0.0),
            (0.0, 100.0),
            (12.5, 87.5),
        ] {
            assert!(
                Quadrant::ORDER
                    .iter()
                    .any(|q| parent.quadrant(*q).contains_xy(x, y)),
                "({}, {}) not covered by any quadrant",
                x,
                y
            );
        }
    }

    #[test]
    fn test_quadrant_order() {
        let tags: Vec<&str> = Quadrant::ORDER.iter().map(|q| q.tag()).collect();
        assert_eq!(tags, vec!["ne", "nw", "se", "sw"]);
    }

    #[test]
    fn test_is_valid() {
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).is_valid());
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Rect::new(f64::NAN, 0.0, 10.0, 10.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, f64::INFINITY, 10.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, -1.0, 10.0).is_valid());
    }

    #[test]
    fn test_point_is_at() {
        let point = Point::new(10.5, -3.25, json!({"name": "depot"}));

        assert!(point.is_at(10.5, -3.25));
        assert!(!point.is_at(10.5, -3.250001)); // No tolerance
        assert!(!point.is_at(10.499999, -3.25));
    }

    #[test]
    fn test_distance_squared() {
        let point = Point::new(3.0, 4.0, json!(null));
        assert_eq!(point.distance_squared(0.0, 0.0), 25.0);
        assert_eq!(point.distance_squared(3.0, 4.0), 0.0);
    }

    #[test]
    fn test_serialization() {
        let rect = Rect::new(1.5, 2.5, 3.5, 4.5);
        let json = serde_json::to_string(&rect).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(rect, deserialized);

        let point = Point::new(1.0, 2.0, json!({"tag": 7}));
        let json = serde_json::to_string(&point).unwrap();
        let deserialized: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(point, deserialized);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Rect::new(1.0, 2.0, 3.0, 4.0)),
            "Rect(1, 2, 3, 4)"
        );
        assert_eq!(format!("{}", Quadrant::Ne), "ne");
    }
}
