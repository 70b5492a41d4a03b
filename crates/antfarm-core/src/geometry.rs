//! Planar geometry value types.
//!
//! Shapes are stored as closed rings of [`Vertex`] values. A vertex may carry a
//! `bulge` describing an arc segment to the next vertex, so offset results
//! keep their rounded corners exactly instead of being linearised early.
//!
//! Every type here is an immutable value: operations return new values and
//! never mutate their receiver, so one input geometry can safely feed any
//! number of derived offsets.

use crate::error::GeometryError;
use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{
    PlineOrientation, PlineSource, PlineSourceMut, PlineVertex, Polyline,
};
use serde::{Deserialize, Serialize};

/// Positions closer than this are treated as the same point.
pub const POSITION_EPSILON: f64 = 1e-5;

/// Default maximum chord deviation used when arcs are linearised.
pub const DEFAULT_ARC_TOLERANCE: f64 = 0.001;

const BULGE_EPSILON: f64 = 1e-9;

fn is_zero(value: &f64) -> bool {
    value.abs() < BULGE_EPSILON
}

/// A polyline vertex: a position plus the bulge of the segment that starts here.
///
/// `bulge` is `tan(sweep / 4)` of the arc to the next vertex; positive bulges
/// turn counter-clockwise, zero means a straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub bulge: f64,
}

impl Vertex {
    /// Creates a vertex starting a straight segment.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    /// Creates a vertex starting an arc segment.
    pub fn with_bulge(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    pub fn is_arc(&self) -> bool {
        !is_zero(&self.bulge)
    }

    fn distance_to(&self, other: &Vertex) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if `other` lies inside this box, allowing `tolerance` slack.
    pub fn contains_box(&self, other: &BoundingBox, tolerance: f64) -> bool {
        other.min_x >= self.min_x - tolerance
            && other.min_y >= self.min_y - tolerance
            && other.max_x <= self.max_x + tolerance
            && other.max_y <= self.max_y + tolerance
    }

    fn from_vertices(vertices: &[Vertex]) -> BoundingBox {
        vertices.iter().fold(
            BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |b, v| BoundingBox::new(b.min_x.min(v.x), b.min_y.min(v.y), b.max_x.max(v.x), b.max_y.max(v.y)),
        )
    }
}

/// A closed ring of vertices.
///
/// The closing segment runs from the last vertex back to the first; the first
/// vertex is never repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vertex>", into = "Vec<Vertex>")]
pub struct Contour {
    vertices: Vec<Vertex>,
}

impl Contour {
    /// Builds a contour, dropping repeated positions and an explicit closing vertex.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self, GeometryError> {
        for (index, v) in vertices.iter().enumerate() {
            if !(v.x.is_finite() && v.y.is_finite() && v.bulge.is_finite()) {
                return Err(GeometryError::NonFiniteVertex {
                    index,
                    x: v.x,
                    y: v.y,
                    bulge: v.bulge,
                });
            }
        }

        let mut clean: Vec<Vertex> = Vec::with_capacity(vertices.len());
        for v in vertices {
            match clean.last_mut() {
                // Keep the later bulge: the segment to the next vertex starts there
                Some(last) if last.distance_to(&v) < POSITION_EPSILON => last.bulge = v.bulge,
                _ => clean.push(v),
            }
        }
        if clean.len() > 1 {
            let first = clean[0];
            if let Some(last) = clean.last() {
                if last.distance_to(&first) < POSITION_EPSILON {
                    clean.pop();
                }
            }
        }

        let has_arc = clean.iter().any(Vertex::is_arc);
        let required = if has_arc { 2 } else { 3 };
        if clean.len() < required {
            return Err(GeometryError::TooFewVertices {
                required,
                actual: clean.len(),
            });
        }

        let contour = Self { vertices: clean };
        if contour.signed_area().abs() < POSITION_EPSILON * POSITION_EPSILON {
            return Err(GeometryError::ZeroArea);
        }
        Ok(contour)
    }

    /// Builds a straight-edged contour from `(x, y)` pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, GeometryError> {
        Self::new(points.iter().map(|&(x, y)| Vertex::new(x, y)).collect())
    }

    /// Converts a closed `cavalier_contours` polyline; degenerate input yields `None`.
    pub fn from_polyline(pline: &Polyline<f64>) -> Option<Self> {
        let vertices = (0..pline.vertex_count())
            .map(|i| {
                let v = pline.at(i);
                Vertex::with_bulge(v.x, v.y, v.bulge)
            })
            .collect();
        Self::new(vertices).ok()
    }

    /// Returns the contour as a closed `cavalier_contours` polyline.
    pub fn to_polyline(&self) -> Polyline<f64> {
        let mut pline = Polyline::new();
        for v in &self.vertices {
            pline.add_vertex(PlineVertex::new(v.x, v.y, v.bulge));
        }
        pline.set_is_closed(true);
        pline
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn has_arcs(&self) -> bool {
        self.vertices.iter().any(Vertex::is_arc)
    }

    /// Signed enclosed area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.to_polyline().area()
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.to_polyline().orientation() == PlineOrientation::CounterClockwise
    }

    /// Returns this ring traversed in the requested direction.
    pub fn oriented(&self, counter_clockwise: bool) -> Contour {
        if self.is_counter_clockwise() == counter_clockwise {
            return self.clone();
        }
        let mut pline = self.to_polyline();
        pline.invert_direction_mut();
        let vertices = (0..pline.vertex_count())
            .map(|i| {
                let v = pline.at(i);
                Vertex::with_bulge(v.x, v.y, v.bulge)
            })
            .collect();
        Contour { vertices }
    }

    /// Arc-aware bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        match self.to_polyline().extents() {
            Some(aabb) => BoundingBox::new(aabb.min_x, aabb.min_y, aabb.max_x, aabb.max_y),
            None => BoundingBox::from_vertices(&self.vertices),
        }
    }

    /// Winding-number containment test. Points exactly on the boundary are unspecified.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.to_polyline().winding_number(Vector2::new(x, y)) != 0
    }

    /// Returns a translated copy.
    pub fn translated(&self, dx: f64, dy: f64) -> Contour {
        Contour {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::with_bulge(v.x + dx, v.y + dy, v.bulge))
                .collect(),
        }
    }

    /// Linearises arc segments so no chord deviates from its arc by more than `tolerance`.
    pub fn to_points(&self, tolerance: f64) -> Vec<(f64, f64)> {
        let tolerance = if tolerance > 0.0 {
            tolerance
        } else {
            DEFAULT_ARC_TOLERANCE
        };
        let count = self.vertices.len();
        let mut points = Vec::with_capacity(count);

        for i in 0..count {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % count];
            points.push((v1.x, v1.y));

            if !v1.is_arc() {
                continue;
            }
            let chord_len = v1.distance_to(&v2);
            if chord_len < POSITION_EPSILON {
                continue;
            }

            let theta = 4.0 * v1.bulge.atan();
            let radius = (chord_len / (2.0 * (theta / 2.0).sin())).abs();
            let dist_to_center = radius * (theta.abs() / 2.0).cos();
            let (mx, my) = ((v1.x + v2.x) / 2.0, (v1.y + v2.y) / 2.0);
            // Left normal of the chord
            let nx = -(v2.y - v1.y) / chord_len;
            let ny = (v2.x - v1.x) / chord_len;
            let sign = if v1.bulge > 0.0 { 1.0 } else { -1.0 };
            let cx = mx + nx * dist_to_center * sign;
            let cy = my + ny * dist_to_center * sign;

            let start_angle = (v1.y - cy).atan2(v1.x - cx);
            let mut end_angle = (v2.y - cy).atan2(v2.x - cx);
            if v1.bulge > 0.0 {
                if end_angle <= start_angle {
                    end_angle += 2.0 * std::f64::consts::PI;
                }
            } else if end_angle >= start_angle {
                end_angle -= 2.0 * std::f64::consts::PI;
            }

            let step = if tolerance < radius {
                2.0 * (1.0 - tolerance / radius).acos()
            } else {
                std::f64::consts::FRAC_PI_2
            };
            let segments = ((end_angle - start_angle).abs() / step).ceil().max(1.0) as usize;
            for j in 1..segments {
                let t = j as f64 / segments as f64;
                let angle = start_angle + (end_angle - start_angle) * t;
                points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
            }
        }

        points
    }
}

impl TryFrom<Vec<Vertex>> for Contour {
    type Error = GeometryError;

    fn try_from(vertices: Vec<Vertex>) -> Result<Self, Self::Error> {
        Contour::new(vertices)
    }
}

impl From<Contour> for Vec<Vertex> {
    fn from(contour: Contour) -> Self {
        contour.vertices
    }
}

#[derive(Deserialize)]
struct RawGeometry {
    exterior: Contour,
    #[serde(default)]
    holes: Vec<Contour>,
}

impl From<RawGeometry> for Geometry {
    fn from(raw: RawGeometry) -> Self {
        Geometry::new(raw.exterior, raw.holes)
    }
}

/// A planar shape: one exterior ring plus any number of hole rings.
///
/// The exterior is stored counter-clockwise and holes clockwise regardless
/// of the orientation they were supplied in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGeometry")]
pub struct Geometry {
    exterior: Contour,
    holes: Vec<Contour>,
}

impl Geometry {
    pub fn new(exterior: Contour, holes: Vec<Contour>) -> Self {
        Self {
            exterior: exterior.oriented(true),
            holes: holes.into_iter().map(|h| h.oriented(false)).collect(),
        }
    }

    /// A solid shape with a straight-edged exterior.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, GeometryError> {
        Ok(Self::new(Contour::from_points(points)?, Vec::new()))
    }

    /// An axis-aligned rectangle with its lower-left corner at `(x, y)`.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidDimensions(format!(
                "rectangle {}x{} must have positive width and height",
                width, height
            )));
        }
        Self::from_points(&[
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ])
    }

    /// Returns a copy with `hole` added.
    pub fn with_hole(mut self, hole: Contour) -> Self {
        self.holes.push(hole.oriented(false));
        self
    }

    pub fn exterior(&self) -> &Contour {
        &self.exterior
    }

    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// The solid exterior with every hole removed.
    pub fn without_holes(&self) -> Geometry {
        Geometry {
            exterior: self.exterior.clone(),
            holes: Vec::new(),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.exterior.bounding_box()
    }

    pub fn bbox_area(&self) -> f64 {
        self.bounding_box().area()
    }

    /// Enclosed area: exterior minus holes.
    pub fn area(&self) -> f64 {
        self.exterior.area() - self.holes.iter().map(Contour::area).sum::<f64>()
    }

    /// True if the point is inside the exterior and outside every hole.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.exterior.contains_point(x, y) && !self.holes.iter().any(|h| h.contains_point(x, y))
    }

    /// True if every exterior vertex of `other` lies inside this exterior.
    ///
    /// Holes are ignored: a cutout sitting inside a board hole is still
    /// enclosed by the board outline.
    pub fn encloses(&self, other: &Geometry) -> bool {
        let pline = self.exterior.to_polyline();
        other
            .exterior
            .vertices()
            .iter()
            .all(|v| pline.winding_number(Vector2::new(v.x, v.y)) != 0)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Geometry {
        Geometry {
            exterior: self.exterior.translated(dx, dy),
            holes: self.holes.iter().map(|h| h.translated(dx, dy)).collect(),
        }
    }

    /// Every ring as a `cavalier_contours` polyline, exterior first.
    pub fn to_polylines(&self) -> Vec<Polyline<f64>> {
        std::iter::once(&self.exterior)
            .chain(self.holes.iter())
            .map(Contour::to_polyline)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_hole() -> Geometry {
        let hole = Contour::from_points(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)])
            .expect("hole");
        Geometry::rectangle(0.0, 0.0, 10.0, 10.0)
            .expect("square")
            .with_hole(hole)
    }

    #[test]
    fn test_contour_drops_closing_and_repeated_vertices() {
        let contour = Contour::from_points(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ])
        .expect("contour");
        assert_eq!(contour.len(), 4);
    }

    #[test]
    fn test_contour_rejects_degenerate_rings() {
        assert_eq!(
            Contour::from_points(&[(0.0, 0.0), (1.0, 0.0)]),
            Err(GeometryError::TooFewVertices {
                required: 3,
                actual: 2
            })
        );
        assert_eq!(
            Contour::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
            Err(GeometryError::ZeroArea)
        );
        assert!(matches!(
            Contour::from_points(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]),
            Err(GeometryError::NonFiniteVertex { index: 1, .. })
        ));
    }

    #[test]
    fn test_geometry_normalizes_orientation() {
        let clockwise =
            Contour::from_points(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)]).expect("cw");
        assert!(!clockwise.is_counter_clockwise());

        let g = Geometry::new(clockwise.clone(), vec![]);
        assert!(g.exterior().is_counter_clockwise());
        assert!((g.exterior().signed_area() - 4.0).abs() < 1e-9);

        let g = square_with_hole();
        assert!(!g.holes()[0].is_counter_clockwise());
    }

    #[test]
    fn test_area_and_bbox() {
        let g = square_with_hole();
        assert!((g.area() - 84.0).abs() < 1e-9);
        assert!((g.bbox_area() - 100.0).abs() < 1e-9);
        assert!((g.without_holes().area() - 100.0).abs() < 1e-9);
        assert!(!g.without_holes().has_holes());
    }

    #[test]
    fn test_arc_bounding_box_includes_bulge() {
        // Half disc of radius 1 above the x axis: straight edge (1,0) -> (-1,0) closing by a CCW arc
        let contour = Contour::new(vec![
            Vertex::with_bulge(1.0, 0.0, 1.0),
            Vertex::new(-1.0, 0.0),
        ])
        .expect("half disc");
        let bbox = contour.bounding_box();
        assert!((bbox.max_y - 1.0).abs() < 1e-9);
        assert!((bbox.min_y - 0.0).abs() < 1e-9);
        assert!((contour.area() - std::f64::consts::PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_linearised_arc_stays_on_circle() {
        let contour = Contour::new(vec![
            Vertex::with_bulge(1.0, 0.0, 1.0),
            Vertex::new(-1.0, 0.0),
        ])
        .expect("half disc");
        let points = contour.to_points(0.001);
        assert!(points.len() > 10);
        for (x, y) in points {
            let r = (x * x + y * y).sqrt();
            assert!((r - 1.0).abs() < 1e-9, "point ({x}, {y}) off the arc");
            assert!(y >= -1e-9);
        }
    }

    #[test]
    fn test_contains_point_respects_holes() {
        let g = square_with_hole();
        assert!(g.contains_point(1.0, 1.0));
        assert!(!g.contains_point(5.0, 5.0));
        assert!(!g.contains_point(11.0, 5.0));
    }

    #[test]
    fn test_encloses_ignores_holes() {
        let board = square_with_hole();
        let cutout = Geometry::rectangle(4.0, 4.0, 1.0, 1.0).expect("cutout");
        let outside = Geometry::rectangle(12.0, 0.0, 1.0, 1.0).expect("outside");
        assert!(board.encloses(&cutout));
        assert!(!board.encloses(&outside));
    }

    #[test]
    fn test_rectangle_rejects_non_positive_dimensions() {
        assert!(matches!(
            Geometry::rectangle(0.0, 0.0, 0.0, 1.0),
            Err(GeometryError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_geometry_json_round_trip_keeps_holes() {
        let g = square_with_hole();
        let json = serde_json::to_string(&g).expect("serialize");
        let back: Geometry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, g);
    }

    #[test]
    fn test_geometry_deserialize_without_holes_field() {
        let json = r#"{"exterior":[{"x":0,"y":0},{"x":0,"y":1},{"x":1,"y":1},{"x":1,"y":0}]}"#;
        let g: Geometry = serde_json::from_str(json).expect("deserialize");
        assert!(!g.has_holes());
        assert!(g.exterior().is_counter_clockwise());
    }

    #[test]
    fn test_deserialize_rejects_degenerate_contour() {
        let json = r#"{"exterior":[{"x":0,"y":0},{"x":1,"y":0}]}"#;
        assert!(serde_json::from_str::<Geometry>(json).is_err());
    }
}
