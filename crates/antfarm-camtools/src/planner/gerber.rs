use super::multipass::next_pass;
use super::offset_all;
use super::result::PathPass;
use crate::config::GerberConfig;
use crate::engine::GeometryEngine;
use antfarm_core::Geometry;
use tracing::debug;

/// Isolation passes around copper.
///
/// Pass 0 follows every copper region at half a tool diameter. Each further
/// pass is derived from everything planned so far, not only the latest pass.
pub(super) fn plan<E>(engine: &E, config: &GerberConfig, copper: &[Geometry]) -> Vec<PathPass>
where
    E: GeometryEngine + ?Sized,
{
    let first = offset_all(engine, copper, config.tool_diameter / 2.0);
    let mut accumulated = first.clone();
    let mut passes = vec![PathPass::new(0, first)];

    for index in 1..config.passages as usize {
        let next = next_pass(engine, &accumulated, config.tool_diameter, config.overlap);
        if next.is_empty() {
            debug!("Pass {} produced no paths, stopping", index);
            break;
        }
        accumulated.extend(next.iter().cloned());
        passes.push(PathPass::new(index, next));
    }

    passes
}
