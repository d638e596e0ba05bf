//! Error types for quadtree operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while operating on a persistent quadtree
#[derive(Debug, Error)]
pub enum QuadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("No point stored at ({x}, {y})")]
    PointNotFound { x: f64, y: f64 },

    #[error("Point ({x}, {y}) lies outside the tree boundary")]
    BoundaryViolation { x: f64, y: f64 },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Store is closed")]
    Closed,
}

/// Result type for quadtree operations
pub type QuadResult<T> = Result<T, QuadError>;
