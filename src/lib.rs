//! # AntFarm
//!
//! Tool-center path planning for CNC and PCB fabrication:
//! - Gerber isolation routing with concentric passes
//! - Board profile cutting with internal cutouts
//! - Pocket clearing
//!
//! ## Architecture
//!
//! AntFarm is organized as a workspace with multiple crates:
//!
//! 1. **antfarm-core** - Geometry value types and core errors
//! 2. **antfarm-camtools** - Geometry engine, machining configuration, planners, sinks, job files
//! 3. **antfarm** - Command-line host that plans job files

use anyhow::Context;
use clap::ValueEnum;
use std::path::Path;

pub use antfarm_camtools::{
    CamToolError, ContainmentChecked, ContourEngine, Diagnostic, GeometryEngine, JsonSink,
    LargestBoundingBox, MachiningConfig, MachiningStrategy, MemorySink, PathPass, PathPlanner,
    PathSink, PlanJob, PlannedJob, PlanningResult,
};
pub use antfarm_core::{BoundingBox, Contour, Geometry, GeometryError, Region, Vertex};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("ANTFARM_BUILD_DATE");

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Initialize logging to stderr.
///
/// - RUST_LOG environment variable support, `warn` otherwise
/// - stdout stays free for planned paths
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer().with_writer(std::io::stderr).json();
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// How the external contour of a multi-geometry profile is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ClassifierChoice {
    /// Largest bounding-box area
    #[default]
    Largest,
    /// Largest bounding-box area, checked to enclose every other geometry
    Containment,
}

/// Command-line adjustments applied on top of a job file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanOverrides {
    pub passes: Option<u32>,
    pub tool_diameter: Option<f64>,
    pub classifier: ClassifierChoice,
}

impl PlanOverrides {
    /// Applies the overrides to `config`.
    ///
    /// A pass count only applies to isolation routing.
    pub fn apply(&self, config: &mut MachiningConfig) -> anyhow::Result<()> {
        if let Some(tool_diameter) = self.tool_diameter {
            config.set_tool_diameter(tool_diameter);
        }
        if let Some(passes) = self.passes {
            match config {
                MachiningConfig::Gerber(c) => c.passages = passes,
                other => anyhow::bail!("--passes only applies to gerber jobs, not {}", other.strategy()),
            }
        }
        Ok(())
    }
}

/// Builds a planner for `job` with `overrides` applied.
pub fn planner_for(job: &PlanJob, overrides: &PlanOverrides) -> anyhow::Result<PathPlanner> {
    let mut config = job.config.clone();
    overrides.apply(&mut config)?;

    let planner = PathPlanner::default()
        .with_config(config)
        .context("Invalid machining configuration")?;
    Ok(match overrides.classifier {
        ClassifierChoice::Largest => planner.with_classifier(LargestBoundingBox),
        ClassifierChoice::Containment => planner.with_classifier(ContainmentChecked),
    })
}

/// Loads a job file, plans it and writes the result as JSON to `sink`.
pub fn plan_file(
    path: &Path,
    overrides: &PlanOverrides,
    sink: &mut dyn PathSink,
) -> anyhow::Result<PlanningResult> {
    let job = PlanJob::load_from_file(path)
        .with_context(|| format!("Failed to load job file: {:?}", path))?;
    let planner = planner_for(&job, overrides)?;
    let result = planner
        .plan_into(&job.geometries, sink)
        .context("Failed to write planned paths")?;
    Ok(result)
}
