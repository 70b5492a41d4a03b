use super::offset_all;
use super::result::PathPass;
use crate::config::PocketingConfig;
use crate::engine::GeometryEngine;
use antfarm_core::Geometry;

/// One clearing contour inside each boundary.
///
/// Boundaries narrower than the tool vanish from the result. Additional
/// inward passes would be produced here by repeating the erosion.
pub(super) fn plan<E>(engine: &E, config: &PocketingConfig, boundaries: &[Geometry]) -> Vec<PathPass>
where
    E: GeometryEngine + ?Sized,
{
    let paths = offset_all(engine, boundaries, -config.tool_diameter / 2.0);
    vec![PathPass::new(0, paths)]
}
