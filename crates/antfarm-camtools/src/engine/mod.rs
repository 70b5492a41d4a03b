//! Geometry engine contract used by the path planner.
//!
//! The planner only sequences operations; the engine does the math. Any
//! implementation must be callable through `&self` from several threads.

mod contour_engine;

pub use contour_engine::ContourEngine;

use antfarm_core::{Geometry, Region};

/// Planar polygon operations consumed by the planner.
pub trait GeometryEngine: Send + Sync {
    /// Signed offset: positive dilates, negative erodes.
    ///
    /// With `fill_holes` the geometry is made solid before offsetting.
    /// Returns `None` when the result is empty or undefined, for example
    /// when eroding past the point where the shape collapses.
    fn offset(&self, geometry: &Geometry, distance: f64, fill_holes: bool) -> Option<Region>;

    /// Signed offset that keeps interior holes as holes of the result
    /// instead of treating them as separate shapes.
    fn offset_with_holes(&self, geometry: &Geometry, distance: f64) -> Option<Region> {
        self.offset(geometry, distance, false)
    }

    /// Planar union into non-overlapping polygons.
    fn merge(&self, polygons: &[Geometry]) -> Vec<Geometry>;

    /// The geometry with every interior hole removed.
    fn fill_holes(&self, geometry: &Geometry) -> Geometry {
        geometry.without_holes()
    }

    /// Axis-aligned bounding-box area.
    fn bbox_area(&self, geometry: &Geometry) -> f64 {
        geometry.bbox_area()
    }
}
