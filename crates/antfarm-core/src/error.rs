//! Error handling for AntFarm geometry
//!
//! Malformed rings and non-finite coordinates are rejected when a value is
//! built. The error type uses `thiserror`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a contour or geometry cannot be built from the supplied
/// vertices. Degenerate *results* of geometric operations are not errors;
/// they are reported as `None` by the operation itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A ring does not have enough vertices to enclose an area
    #[error("Contour needs at least {required} vertices, got {actual}")]
    TooFewVertices {
        /// Minimum vertex count for the ring.
        required: usize,
        /// Vertex count that was supplied.
        actual: usize,
    },

    /// A coordinate or bulge value is NaN or infinite
    #[error("Non-finite value at vertex {index}: ({x}, {y}, bulge {bulge})")]
    NonFiniteVertex {
        /// Index of the offending vertex within its ring.
        index: usize,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Arc bulge.
        bulge: f64,
    },

    /// The ring encloses no area
    #[error("Contour encloses zero area")]
    ZeroArea,

    /// A rectangle or similar primitive was given non-positive dimensions
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}
