use crate::config::MachiningStrategy;
use crate::diagnostic::Diagnostic;
use antfarm_core::Geometry;
use serde::{Deserialize, Serialize};

/// A tool-center path. Always a single polygon, never a nested collection.
pub type PathPolygon = Geometry;

/// The paths produced by one pass of the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPass {
    /// Pass number; 0 is the pass closest to the target shape.
    pub index: usize,
    pub paths: Vec<PathPolygon>,
}

impl PathPass {
    pub fn new(index: usize, paths: Vec<PathPolygon>) -> Self {
        Self { index, paths }
    }
}

/// Output of a single planning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResult {
    pub strategy: MachiningStrategy,
    pub passes: Vec<PathPass>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanningResult {
    pub fn new(strategy: MachiningStrategy) -> Self {
        Self {
            strategy,
            passes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Every path of every pass, in the order they were produced.
    pub fn paths(&self) -> impl Iterator<Item = &PathPolygon> {
        self.passes.iter().flat_map(|pass| pass.paths.iter())
    }

    pub fn path_count(&self) -> usize {
        self.passes.iter().map(|pass| pass.paths.len()).sum()
    }

    pub fn pass(&self, index: usize) -> Option<&PathPass> {
        self.passes.iter().find(|pass| pass.index == index)
    }

    /// True when no pass contains a path.
    pub fn is_empty(&self) -> bool {
        self.path_count() == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64) -> Geometry {
        Geometry::rectangle(x, 0.0, 1.0, 1.0).expect("square")
    }

    #[test]
    fn test_paths_flatten_in_pass_order() {
        let mut result = PlanningResult::new(MachiningStrategy::Gerber);
        result.passes.push(PathPass::new(0, vec![square(0.0), square(2.0)]));
        result.passes.push(PathPass::new(1, vec![square(4.0)]));

        let xs: Vec<f64> = result.paths().map(|p| p.bounding_box().min_x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
        assert_eq!(result.path_count(), 3);
        assert_eq!(result.pass(1).map(|p| p.paths.len()), Some(1));
        assert!(result.pass(2).is_none());
    }

    #[test]
    fn test_empty_passes_are_empty_result() {
        let mut result = PlanningResult::new(MachiningStrategy::Pocketing);
        assert!(result.is_empty());
        result.passes.push(PathPass::new(0, Vec::new()));
        assert!(result.is_empty());
        assert!(!result.has_warnings());

        result.diagnostics.push(Diagnostic::PassesBelowMinimum {
            requested: 0,
            used: 1,
        });
        assert!(result.has_warnings());
    }
}
