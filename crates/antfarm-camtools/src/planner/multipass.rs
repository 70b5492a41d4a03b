use super::offset_all;
use crate::engine::GeometryEngine;
use antfarm_core::Geometry;
use tracing::debug;

/// Computes the next concentric isolation pass around `previous`.
///
/// Dilating and merging by the tool radius fuses paths closer than one tool
/// diameter, eroding by the same radius restores their size, and the final
/// dilation steps one cut width outward. The step is the full tool diameter
/// when `overlap` is 0; larger overlaps shrink it proportionally.
pub fn next_pass<E>(engine: &E, previous: &[Geometry], tool_diameter: f64, overlap: f64) -> Vec<Geometry>
where
    E: GeometryEngine + ?Sized,
{
    let radius = tool_diameter / 2.0;
    let step = tool_diameter * (1.0 - overlap);

    let dilated = offset_all(engine, previous, radius);
    let merged = engine.merge(&dilated);
    let restored = offset_all(engine, &merged, -radius);
    let stepped = offset_all(engine, &restored, step);
    let next = engine.merge(&stepped);

    debug!(
        "Multi-pass step: {} -> {} merged -> {} polygons",
        previous.len(),
        merged.len(),
        next.len()
    );
    next
}
