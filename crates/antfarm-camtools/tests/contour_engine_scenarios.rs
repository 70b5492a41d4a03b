use antfarm_camtools::{
    GeometryEngine, GerberConfig, MachiningConfig, MachiningStrategy, PathPlanner,
    PlanningResult, PocketingConfig, ProfileConfig,
};
use antfarm_camtools::ContourEngine;
use antfarm_core::{BoundingBox, Contour, Geometry};

const TOL: f64 = 1e-3;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Geometry {
    Geometry::rectangle(x, y, w, h).unwrap()
}

fn assert_bbox(actual: BoundingBox, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
    let ok = (actual.min_x - min_x).abs() < TOL
        && (actual.min_y - min_y).abs() < TOL
        && (actual.max_x - max_x).abs() < TOL
        && (actual.max_y - max_y).abs() < TOL;
    assert!(
        ok,
        "bbox {:?} != [{}, {}, {}, {}]",
        actual, min_x, min_y, max_x, max_y
    );
}

fn gerber(passages: u32) -> PathPlanner {
    PathPlanner::new(MachiningStrategy::Gerber)
        .with_config(MachiningConfig::Gerber(GerberConfig {
            tool_diameter: 0.2,
            passages,
            overlap: 0.0,
        }))
        .unwrap()
}

#[test]
fn test_single_pass_matches_engine_offset() {
    let copper = vec![rect(0.0, 0.0, 1.0, 1.0), rect(3.0, 0.0, 1.0, 2.0)];
    let result = gerber(1).plan(&copper);

    let engine = ContourEngine::new();
    let expected: Vec<Geometry> = copper
        .iter()
        .flat_map(|g| engine.offset(g, 0.1, false).unwrap())
        .collect();

    assert_eq!(result.passes.len(), 1);
    assert_eq!(result.passes[0].paths, expected);
}

#[test]
fn test_pads_far_apart_stay_separate() {
    let pads = vec![rect(0.0, 0.0, 1.0, 1.0), rect(10.0, 0.0, 1.0, 1.0)];
    let result = gerber(2).plan(&pads);

    assert_eq!(result.passes.len(), 2);
    assert_eq!(result.passes[0].paths.len(), 2);
    assert_eq!(result.passes[1].paths.len(), 2);

    // Second pass is one diameter outside the first
    let mut boxes: Vec<BoundingBox> = result.passes[1]
        .paths
        .iter()
        .map(Geometry::bounding_box)
        .collect();
    boxes.sort_by(|a, b| a.min_x.total_cmp(&b.min_x));
    assert_bbox(boxes[0], -0.3, -0.3, 1.3, 1.3);
    assert_bbox(boxes[1], 9.7, -0.3, 11.3, 1.3);
}

#[test]
fn test_pads_close_together_merge() {
    let pads = vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.1, 0.0, 1.0, 1.0)];
    let result = gerber(2).plan(&pads);

    assert_eq!(result.passes.len(), 2);
    assert_eq!(result.passes[0].paths.len(), 2);
    assert_eq!(result.passes[1].paths.len(), 1);
    assert_bbox(
        result.passes[1].paths[0].bounding_box(),
        -0.3,
        -0.3,
        2.4,
        1.3,
    );
}

/// Every vertex of each pass lies inside the material of the pass after it.
fn assert_passes_nest(result: &PlanningResult) {
    for pair in result.passes.windows(2) {
        let (inner, outer) = (&pair[0], &pair[1]);
        for path in &inner.paths {
            for v in path.exterior().vertices() {
                assert!(
                    outer.paths.iter().any(|g| g.contains_point(v.x, v.y)),
                    "pass {} vertex ({}, {}) outside pass {}",
                    inner.index,
                    v.x,
                    v.y,
                    outer.index
                );
            }
        }
    }
}

#[test]
fn test_touching_pads_keep_every_pass() {
    let pads = vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 1.0, 1.0)];
    let result = gerber(3).plan(&pads);

    assert_eq!(result.passes.len(), 3);
    assert_eq!(result.passes[1].paths.len(), 1);
    assert_eq!(result.passes[2].paths.len(), 1);
    assert_bbox(
        result.passes[2].paths[0].bounding_box(),
        -0.5,
        -0.5,
        2.5,
        1.5,
    );
    assert_passes_nest(&result);
}

#[test]
fn test_overlapping_pads_keep_every_pass() {
    let pads = vec![
        rect(0.0, 0.0, 1.0, 1.0),
        rect(0.5, 0.5, 1.0, 1.0),
        rect(3.0, 0.0, 0.5, 0.5),
    ];
    let result = gerber(3).plan(&pads);

    assert_eq!(result.passes.len(), 3);
    assert_eq!(result.passes[0].paths.len(), 3);
    assert_eq!(result.passes[2].paths.len(), 2);
    assert_passes_nest(&result);
}

#[test]
fn test_profile_square_with_centered_hole() {
    let hole = Contour::from_points(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]).unwrap();
    let board = rect(0.0, 0.0, 10.0, 10.0).with_hole(hole);
    let planner = PathPlanner::new(MachiningStrategy::Profile)
        .with_config(MachiningConfig::Profile(ProfileConfig {
            tool_diameter: 1.0,
            margin: 0.1,
            ..Default::default()
        }))
        .unwrap();

    let result = planner.plan(&[board]);

    let paths = &result.passes[0].paths;
    assert_eq!(paths.len(), 2);

    assert!(!paths[0].has_holes());
    assert_bbox(paths[0].bounding_box(), -0.6, -0.6, 10.6, 10.6);

    assert_bbox(paths[1].bounding_box(), 0.4, 0.4, 9.6, 9.6);
    assert_eq!(paths[1].holes().len(), 1);
    assert_bbox(paths[1].holes()[0].bounding_box(), 2.6, 2.6, 7.4, 7.4);
}

#[test]
fn test_profile_three_geometries_largest_first() {
    let geometries = vec![
        rect(2.0, 2.0, 3.0, 3.0),
        rect(0.0, 0.0, 30.0, 20.0),
        rect(20.0, 5.0, 4.0, 4.0),
    ];
    let result = PathPlanner::new(MachiningStrategy::Profile).plan(&geometries);

    let paths = &result.passes[0].paths;
    assert_eq!(paths.len(), 3);
    assert_bbox(paths[0].bounding_box(), -0.6, -0.6, 30.6, 20.6);
    assert_bbox(paths[1].bounding_box(), 2.4, 2.4, 4.6, 4.6);
    assert_bbox(paths[2].bounding_box(), 20.4, 5.4, 23.6, 8.6);
}

#[test]
fn test_pocketing_tool_too_wide_is_empty() {
    let planner = PathPlanner::new(MachiningStrategy::Pocketing)
        .with_config(MachiningConfig::Pocketing(PocketingConfig { tool_diameter: 2.0 }))
        .unwrap();

    let result = planner.plan(&[rect(0.0, 0.0, 1.0, 1.0)]);

    assert!(result.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_pocketing_clears_inside_boundary() {
    let result = PathPlanner::new(MachiningStrategy::Pocketing)
        .plan(&[rect(0.0, 0.0, 10.0, 6.0), rect(20.0, 0.0, 0.5, 0.5)]);

    assert_eq!(result.path_count(), 1);
    assert_bbox(result.passes[0].paths[0].bounding_box(), 0.5, 0.5, 9.5, 5.5);
}
