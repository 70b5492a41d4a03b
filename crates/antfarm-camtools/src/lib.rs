//! # AntFarm CAM Tools
//!
//! Tool-center path planning for PCB and CNC fabrication. Given copper
//! regions, board outlines or pocket boundaries and a tool diameter, the
//! planner derives the offset polygons the tool center has to follow.
//!
//! ## Strategies
//!
//! - **Gerber**: multi-pass isolation routing around copper
//! - **Profile**: board outline plus internal cutouts
//! - **Pocketing**: a clearing contour inside each boundary
//!
//! ## Supporting Infrastructure
//!
//! - **Engine**: the [`GeometryEngine`] contract and its [`ContourEngine`]
//!   implementation (arc-preserving offsets, polygon unions)
//! - **Config**: strategy-specific [`MachiningConfig`] with validation
//! - **Sinks**: [`MemorySink`] and [`JsonSink`] destinations for results
//! - **Jobs**: [`PlanJob`] files in JSON or TOML

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod job;
pub mod planner;
pub mod sink;

// Re-export commonly used items
pub use config::{GerberConfig, MachiningConfig, MachiningStrategy, PocketingConfig, ProfileConfig};
pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use engine::{ContourEngine, GeometryEngine};
pub use error::{CamToolError, CamToolResult, ConfigurationError, ConfigurationResult};
pub use job::PlanJob;
pub use planner::{
    next_pass, Classification, ContainmentChecked, ExternalContourClassifier, LargestBoundingBox,
    PathPass, PathPlanner, PathPolygon, PlanningResult,
};
pub use sink::{JsonSink, MemorySink, PathSink, PlannedJob};
