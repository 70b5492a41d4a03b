use super::classify::ExternalContourClassifier;
use super::result::PathPass;
use crate::config::ProfileConfig;
use crate::diagnostic::Diagnostic;
use crate::engine::GeometryEngine;
use antfarm_core::{Geometry, Region};
use tracing::debug;

/// Board outline and internal cutouts.
///
/// The outline is cut outside the filled board, cutouts inside their own
/// edges. With several geometries the classifier decides which one is the
/// outline; its path comes first, the cutouts follow in input order.
pub(super) fn plan<E>(
    engine: &E,
    config: &ProfileConfig,
    classifier: &dyn ExternalContourClassifier,
    geometries: &[Geometry],
) -> (Vec<PathPass>, Vec<Diagnostic>)
where
    E: GeometryEngine,
{
    let outer = config.tool_diameter / 2.0 + config.margin;
    let inner = -(config.tool_diameter / 2.0) + config.margin;
    let mut paths = Vec::new();
    let mut diagnostics = Vec::new();

    match geometries {
        [] => {}
        [board] => {
            push_region(&mut paths, engine.offset(board, outer, true), 0);
            push_region(&mut paths, engine.offset_with_holes(board, inner), 0);
        }
        _ => {
            let Some(classification) = classifier.classify(engine, geometries) else {
                return (vec![PathPass::new(0, paths)], diagnostics);
            };
            let external = classification.external;
            diagnostics = classification.diagnostics;
            debug!("Profile outline is geometry #{}", external);

            push_region(
                &mut paths,
                engine.offset(&geometries[external], outer, true),
                external,
            );
            for (i, cutout) in geometries.iter().enumerate().filter(|(i, _)| *i != external) {
                push_region(&mut paths, engine.offset_with_holes(cutout, inner), i);
            }
        }
    }

    (vec![PathPass::new(0, paths)], diagnostics)
}

fn push_region(paths: &mut Vec<Geometry>, region: Option<Region>, source: usize) {
    match region {
        Some(region) => paths.extend(region),
        None => debug!("Dropping empty profile offset of geometry #{}", source),
    }
}
