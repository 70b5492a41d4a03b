//! # AntFarm Core
//!
//! Planar geometry value types and errors shared by the AntFarm crates.
//! Provides the immutable shapes the path planner consumes and produces:
//! contours with arc segments, holed geometries, and multi-polygon regions.

pub mod error;
pub mod geometry;
pub mod region;

pub use error::GeometryError;
pub use geometry::{
    BoundingBox, Contour, Geometry, Vertex, DEFAULT_ARC_TOLERANCE, POSITION_EPSILON,
};
pub use region::Region;
