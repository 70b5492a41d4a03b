//! Choosing the board outline among several profile geometries.

use crate::diagnostic::Diagnostic;
use crate::engine::GeometryEngine;
use antfarm_core::Geometry;
use std::fmt;

/// Relative tolerance under which two bounding-box areas count as tied.
const AREA_TIE_TOLERANCE: f64 = 1e-9;

/// Which geometry is the external contour, plus anything worth reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub external: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Picks the external contour of a multi-geometry profile.
pub trait ExternalContourClassifier: Send + Sync + fmt::Debug {
    /// Returns `None` only for an empty input.
    fn classify(
        &self,
        engine: &dyn GeometryEngine,
        geometries: &[Geometry],
    ) -> Option<Classification>;
}

/// Strictly largest bounding-box area wins; the first one wins ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestBoundingBox;

impl LargestBoundingBox {
    fn pick(engine: &dyn GeometryEngine, geometries: &[Geometry]) -> Option<(usize, f64)> {
        let mut iter = geometries.iter().enumerate();
        let (_, first) = iter.next()?;
        let mut best = (0, engine.bbox_area(first));
        for (i, geometry) in iter {
            let area = engine.bbox_area(geometry);
            if area > best.1 {
                best = (i, area);
            }
        }
        Some(best)
    }
}

impl ExternalContourClassifier for LargestBoundingBox {
    fn classify(
        &self,
        engine: &dyn GeometryEngine,
        geometries: &[Geometry],
    ) -> Option<Classification> {
        let (external, _) = Self::pick(engine, geometries)?;
        Some(Classification {
            external,
            diagnostics: Vec::new(),
        })
    }
}

/// Same choice as [`LargestBoundingBox`], then checks that the chosen
/// geometry encloses every other one.
///
/// A tie on the largest area or a geometry outside the chosen outline is
/// reported as [`Diagnostic::AmbiguousExternalContour`]; the choice stands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentChecked;

impl ExternalContourClassifier for ContainmentChecked {
    fn classify(
        &self,
        engine: &dyn GeometryEngine,
        geometries: &[Geometry],
    ) -> Option<Classification> {
        let (external, best_area) = LargestBoundingBox::pick(engine, geometries)?;
        let mut diagnostics = Vec::new();

        let tolerance = AREA_TIE_TOLERANCE * best_area.abs().max(1.0);
        let tied: Vec<usize> = geometries
            .iter()
            .enumerate()
            .filter(|(i, g)| {
                *i != external && (engine.bbox_area(g) - best_area).abs() <= tolerance
            })
            .map(|(i, _)| i)
            .collect();
        if !tied.is_empty() {
            diagnostics.push(Diagnostic::AmbiguousExternalContour {
                chosen: external,
                reason: format!("bounding-box area tied with {}", join_indices(&tied)),
            });
        }

        let outline = &geometries[external];
        let outside: Vec<usize> = geometries
            .iter()
            .enumerate()
            .filter(|(i, g)| *i != external && !outline.encloses(g))
            .map(|(i, _)| i)
            .collect();
        if !outside.is_empty() {
            diagnostics.push(Diagnostic::AmbiguousExternalContour {
                chosen: external,
                reason: format!("does not enclose {}", join_indices(&outside)),
            });
        }

        Some(Classification {
            external,
            diagnostics,
        })
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("#{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ContourEngine;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Geometry {
        Geometry::rectangle(x, y, w, h).expect("rect")
    }

    #[test]
    fn test_largest_bbox_wins() {
        let engine = ContourEngine::new();
        let geometries = vec![
            rect(1.0, 1.0, 2.0, 2.0),
            rect(0.0, 0.0, 10.0, 10.0),
            rect(4.0, 4.0, 1.0, 1.0),
        ];
        let c = LargestBoundingBox
            .classify(&engine, &geometries)
            .expect("classified");
        assert_eq!(c.external, 1);
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn test_first_wins_ties() {
        let engine = ContourEngine::new();
        let geometries = vec![rect(0.0, 0.0, 2.0, 2.0), rect(5.0, 5.0, 2.0, 2.0)];
        let c = LargestBoundingBox
            .classify(&engine, &geometries)
            .expect("classified");
        assert_eq!(c.external, 0);
    }

    #[test]
    fn test_empty_input() {
        let engine = ContourEngine::new();
        assert!(LargestBoundingBox.classify(&engine, &[]).is_none());
        assert!(ContainmentChecked.classify(&engine, &[]).is_none());
    }

    #[test]
    fn test_containment_checked_clean_board() {
        let engine = ContourEngine::new();
        let geometries = vec![rect(2.0, 2.0, 1.0, 1.0), rect(0.0, 0.0, 10.0, 10.0)];
        let c = ContainmentChecked
            .classify(&engine, &geometries)
            .expect("classified");
        assert_eq!(c.external, 1);
        assert!(c.diagnostics.is_empty());
    }

    #[test]
    fn test_containment_checked_reports_tie_and_outside() {
        let engine = ContourEngine::new();
        let geometries = vec![rect(0.0, 0.0, 2.0, 2.0), rect(5.0, 5.0, 2.0, 2.0)];
        let c = ContainmentChecked
            .classify(&engine, &geometries)
            .expect("classified");
        assert_eq!(c.external, 0);
        assert_eq!(c.diagnostics.len(), 2);
        assert!(c.diagnostics.iter().all(|d| matches!(
            d,
            Diagnostic::AmbiguousExternalContour { chosen: 0, .. }
        )));
        assert!(c.diagnostics[1].to_string().contains("does not enclose #1"));
    }
}
