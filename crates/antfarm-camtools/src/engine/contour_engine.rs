use super::GeometryEngine;
use antfarm_core::{Contour, Geometry, Region, DEFAULT_ARC_TOLERANCE, POSITION_EPSILON};
use cavalier_contours::polyline::{PlineSource, Polyline};
use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use std::borrow::Cow;
use std::panic;
use tracing::{debug, warn};

/// Geometry engine backed by `cavalier_contours` offsetting and `csgrs` unions.
///
/// Offsets run ring by ring on arc-preserving polylines, so rounded corners
/// produced by one pass stay exact when the next pass offsets them again.
/// Unions and hole cuts are computed on linearised rings; polygons that
/// touch nothing else are passed through untouched and keep their arcs.
/// Kernel panics are caught and logged.
#[derive(Debug, Clone)]
pub struct ContourEngine {
    arc_tolerance: f64,
}

impl Default for ContourEngine {
    fn default() -> Self {
        Self {
            arc_tolerance: DEFAULT_ARC_TOLERANCE,
        }
    }
}

impl ContourEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum chord deviation used when arcs are linearised for unions.
    pub fn with_arc_tolerance(mut self, arc_tolerance: f64) -> Self {
        if arc_tolerance > 0.0 && arc_tolerance.is_finite() {
            self.arc_tolerance = arc_tolerance;
        } else {
            warn!(
                "Ignoring invalid arc tolerance {}, keeping {}",
                arc_tolerance, self.arc_tolerance
            );
        }
        self
    }

    pub fn arc_tolerance(&self) -> f64 {
        self.arc_tolerance
    }

    /// Offsets every ring on its own, then cuts the offset holes out of the
    /// offset exteriors.
    ///
    /// Exteriors come back with their arcs when no hole survives the offset.
    fn offset_shape(&self, geometry: &Geometry, distance: f64) -> Option<Region> {
        if !distance.is_finite() {
            return None;
        }
        if distance.abs() < POSITION_EPSILON {
            return Some(Region::Single(geometry.clone()));
        }

        let mut exteriors = Vec::new();
        let mut holes = Vec::new();
        for ring in geometry.to_polylines() {
            let ring = clean_ring(ring);
            // Positive polyline offsets shrink counter-clockwise rings and grow clockwise ones
            let offsets = guarded("parallel offset", || ring.parallel_offset(-distance))?;
            for pline in &offsets {
                let Some(contour) = Contour::from_polyline(pline) else {
                    continue;
                };
                if pline.area() > 0.0 {
                    exteriors.push(contour);
                } else {
                    holes.push(contour);
                }
            }
        }

        if exteriors.is_empty() {
            return None;
        }
        if holes.is_empty() {
            return Region::from_polygons(
                exteriors
                    .into_iter()
                    .map(|exterior| Geometry::new(exterior, Vec::new()))
                    .collect(),
            );
        }
        Region::from_polygons(self.subtract_holes(exteriors, holes))
    }

    /// Removes the offset holes from the offset exteriors.
    ///
    /// A grown hole may cross its exterior, so the cut goes through `csgrs`.
    /// Falls back to pairing holes by containment when the boolean fails.
    fn subtract_holes(&self, exteriors: Vec<Contour>, holes: Vec<Contour>) -> Vec<Geometry> {
        let cut = guarded("hole subtraction", || {
            let positive = self.union_sketches(exteriors.iter().map(|c| self.ring_sketch(c)));
            let negative = self.union_sketches(holes.iter().map(|c| self.ring_sketch(c)));
            match (positive, negative) {
                (Some(positive), Some(negative)) => {
                    Self::sketch_to_polygons(&positive.difference(&negative))
                }
                (Some(positive), None) => Self::sketch_to_polygons(&positive),
                (None, _) => Vec::new(),
            }
        });
        match cut {
            Some(polygons) => polygons,
            None => assemble_polygons(exteriors, holes),
        }
    }

    fn ring_sketch(&self, contour: &Contour) -> Sketch<()> {
        let points: Vec<[f64; 2]> = contour
            .to_points(self.arc_tolerance)
            .into_iter()
            .map(|(x, y)| [x, y])
            .collect();
        Sketch::polygon(&points, None)
    }

    fn union_sketches(&self, sketches: impl Iterator<Item = Sketch<()>>) -> Option<Sketch<()>> {
        sketches.reduce(|acc, s| acc.union(&s))
    }

    fn to_sketch(&self, polygon: &Geometry) -> Sketch<()> {
        let mut sketch = self.ring_sketch(polygon.exterior());
        for hole in polygon.holes() {
            sketch = sketch.difference(&self.ring_sketch(hole));
        }
        sketch
    }

    fn sketch_to_polygons(sketch: &Sketch<()>) -> Vec<Geometry> {
        let mut polygons = Vec::new();
        for poly in sketch.to_multipolygon().0 {
            let exterior_points: Vec<(f64, f64)> =
                poly.exterior().0.iter().map(|c| (c.x, c.y)).collect();
            let Ok(exterior) = Contour::from_points(&exterior_points) else {
                continue;
            };

            let holes = poly
                .interiors()
                .iter()
                .filter_map(|ring| {
                    let hole_points: Vec<(f64, f64)> =
                        ring.0.iter().map(|c| (c.x, c.y)).collect();
                    Contour::from_points(&hole_points).ok()
                })
                .collect();
            polygons.push(Geometry::new(exterior, holes));
        }
        polygons
    }

    /// Unions one overlap cluster; a failed union passes the members through.
    fn union_cluster(&self, cluster: &[&Geometry]) -> Vec<Geometry> {
        let merged = guarded("union", || {
            self.union_sketches(cluster.iter().map(|p| self.to_sketch(p)))
                .map(|sketch| Self::sketch_to_polygons(&sketch))
                .unwrap_or_default()
        });
        match merged {
            Some(polygons) => polygons,
            None => cluster.iter().map(|p| (*p).clone()).collect(),
        }
    }
}

impl GeometryEngine for ContourEngine {
    fn offset(&self, geometry: &Geometry, distance: f64, fill_holes: bool) -> Option<Region> {
        let source = if fill_holes && geometry.has_holes() {
            Cow::Owned(self.fill_holes(geometry))
        } else {
            Cow::Borrowed(geometry)
        };
        self.offset_shape(&source, distance)
    }

    fn merge(&self, polygons: &[Geometry]) -> Vec<Geometry> {
        let mut merged = Vec::with_capacity(polygons.len());
        for cluster in overlap_clusters(polygons) {
            if let [single] = cluster.as_slice() {
                merged.push((*single).clone());
            } else {
                debug!("Merging cluster of {} polygons", cluster.len());
                merged.extend(self.union_cluster(&cluster));
            }
        }
        merged
    }
}

/// Runs a geometry kernel call, turning a panic into `None`.
fn guarded<T>(operation: &str, f: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(panic::AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Panic during {}", operation);
            None
        }
    }
}

/// Drops repeated positions and collinear vertices left behind by unions.
fn clean_ring(ring: Polyline<f64>) -> Polyline<f64> {
    match ring.remove_redundant(POSITION_EPSILON) {
        Some(cleaned) if cleaned.vertex_count() >= 2 => cleaned,
        _ => ring,
    }
}

/// Pairs every hole with the smallest exterior that contains it.
///
/// Holes that fit no exterior are dropped.
fn assemble_polygons(exteriors: Vec<Contour>, holes: Vec<Contour>) -> Vec<Geometry> {
    let areas: Vec<f64> = exteriors.iter().map(Contour::area).collect();
    let mut owned_holes: Vec<Vec<Contour>> = vec![Vec::new(); exteriors.len()];

    for hole in holes {
        let Some(anchor) = hole.vertices().first().copied() else {
            continue;
        };
        let parent = exteriors
            .iter()
            .enumerate()
            .filter(|(_, ext)| ext.contains_point(anchor.x, anchor.y))
            .min_by(|(a, _), (b, _)| areas[*a].total_cmp(&areas[*b]))
            .map(|(i, _)| i);

        match parent {
            Some(i) => owned_holes[i].push(hole),
            None => debug!("Dropping offset hole with no enclosing exterior"),
        }
    }

    exteriors
        .into_iter()
        .zip(owned_holes)
        .map(|(exterior, holes)| Geometry::new(exterior, holes))
        .collect()
}

/// Groups polygons whose bounding boxes touch, transitively.
///
/// Clusters keep the order of their first member; members keep input order.
fn overlap_clusters(polygons: &[Geometry]) -> Vec<Vec<&Geometry>> {
    let boxes: Vec<_> = polygons.iter().map(Geometry::bounding_box).collect();
    let mut parent: Vec<usize> = (0..polygons.len()).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let (a, b) = (&boxes[i], &boxes[j]);
            let touching = a.min_x <= b.max_x + POSITION_EPSILON
                && b.min_x <= a.max_x + POSITION_EPSILON
                && a.min_y <= b.max_y + POSITION_EPSILON
                && b.min_y <= a.max_y + POSITION_EPSILON;
            if touching {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                if ri != rj {
                    parent[ri.max(rj)] = ri.min(rj);
                }
            }
        }
    }

    let mut clusters: Vec<Vec<&Geometry>> = Vec::new();
    let mut cluster_of_root: Vec<Option<usize>> = vec![None; polygons.len()];
    for (i, polygon) in polygons.iter().enumerate() {
        let root = find(&mut parent, i);
        match cluster_of_root[root] {
            Some(c) => clusters[c].push(polygon),
            None => {
                cluster_of_root[root] = Some(clusters.len());
                clusters.push(vec![polygon]);
            }
        }
    }
    clusters
}
