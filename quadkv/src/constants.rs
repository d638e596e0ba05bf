//! Constants for the persistent quadtree implementation.

/// Default number of points a leaf holds before an insertion subdivides it
pub const DEFAULT_CAPACITY: usize = 4;

/// Default search radius for nearest-point lookups
pub const DEFAULT_NEAREST_RADIUS: f64 = 100.0;

/// Maximum descent depth before an insertion is rejected.
///
/// Depth normally stays near log4 of the extent ratio, but pathological
/// clustering (duplicate coordinates past capacity) grows the tree one
/// level per insert without bound.
pub const MAX_TREE_DEPTH: usize = 64;

/// Bootstrap key holding the id of the root node record
pub const ROOT_ID_KEY: &str = "$quadkv_root";
