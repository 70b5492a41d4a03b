//! Offset results that may split into several disjoint polygons.

use crate::geometry::{BoundingBox, Geometry};
use serde::{Deserialize, Serialize};

/// One polygon or a set of disjoint polygons produced by a geometric operation.
///
/// Consumers flatten regions with [`Region::flatten`] before appending them
/// to a result list, so output lists never contain nested collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Region {
    Single(Geometry),
    Multiple(Vec<Geometry>),
}

impl Region {
    /// Wraps a polygon list; an empty list has no region.
    pub fn from_polygons(mut polygons: Vec<Geometry>) -> Option<Region> {
        match polygons.len() {
            0 => None,
            1 => polygons.pop().map(Region::Single),
            _ => Some(Region::Multiple(polygons)),
        }
    }

    /// Number of polygons in the region.
    pub fn len(&self) -> usize {
        match self {
            Region::Single(_) => 1,
            Region::Multiple(polygons) => polygons.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Region::Multiple(_))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        match self {
            Region::Single(polygon) => std::slice::from_ref(polygon).iter(),
            Region::Multiple(polygons) => polygons.iter(),
        }
    }

    /// Individual polygons, in order.
    pub fn flatten(self) -> Vec<Geometry> {
        match self {
            Region::Single(polygon) => vec![polygon],
            Region::Multiple(polygons) => polygons,
        }
    }

    /// Bounding box over every polygon; `None` for an empty multiple.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.iter()
            .map(Geometry::bounding_box)
            .reduce(|a, b| a.union(&b))
    }
}

impl IntoIterator for Region {
    type Item = Geometry;
    type IntoIter = std::vec::IntoIter<Geometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.flatten().into_iter()
    }
}

impl From<Geometry> for Region {
    fn from(polygon: Geometry) -> Self {
        Region::Single(polygon)
    }
}
