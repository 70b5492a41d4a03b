//! Strategy dispatch for tool-center path planning.
//!
//! A [`PathPlanner`] owns a validated [`MachiningConfig`], a geometry engine
//! and an external-contour classifier. Each call to [`PathPlanner::plan`]
//! builds a fresh [`PlanningResult`]; nothing but the configuration outlives
//! a call.

mod classify;
mod gerber;
mod multipass;
mod pocketing;
mod profile;
mod result;

pub use classify::{
    Classification, ContainmentChecked, ExternalContourClassifier, LargestBoundingBox,
};
pub use multipass::next_pass;
pub use result::{PathPass, PathPolygon, PlanningResult};

use crate::config::{MachiningConfig, MachiningStrategy};
use crate::diagnostic::Diagnostic;
use crate::engine::{ContourEngine, GeometryEngine};
use crate::error::{CamToolResult, ConfigurationResult};
use crate::sink::PathSink;
use antfarm_core::Geometry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Plans tool-center paths for one machining strategy.
#[derive(Debug, Clone)]
pub struct PathPlanner<E = ContourEngine> {
    config: MachiningConfig,
    config_diagnostics: Vec<Diagnostic>,
    engine: E,
    classifier: Arc<dyn ExternalContourClassifier>,
}

impl PathPlanner<ContourEngine> {
    /// Planner with the documented defaults for `strategy`.
    pub fn new(strategy: MachiningStrategy) -> Self {
        Self {
            config: MachiningConfig::default_for(strategy),
            config_diagnostics: Vec::new(),
            engine: ContourEngine::default(),
            classifier: Arc::new(LargestBoundingBox),
        }
    }

    /// Planner for a strategy named by its tag, e.g. `"gerber"`.
    pub fn for_strategy(tag: &str) -> ConfigurationResult<Self> {
        Ok(Self::new(tag.parse()?))
    }
}

impl Default for PathPlanner<ContourEngine> {
    fn default() -> Self {
        Self::new(MachiningStrategy::Gerber)
    }
}

impl<E: GeometryEngine> PathPlanner<E> {
    pub fn with_config(mut self, config: MachiningConfig) -> ConfigurationResult<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Validates and installs `config`, which may change the strategy.
    ///
    /// On error the previous configuration is kept.
    pub fn set_config(&mut self, mut config: MachiningConfig) -> ConfigurationResult<()> {
        let diagnostics = config.validate()?;
        self.config = config;
        self.config_diagnostics = diagnostics;
        Ok(())
    }

    pub fn with_engine<F: GeometryEngine>(self, engine: F) -> PathPlanner<F> {
        PathPlanner {
            config: self.config,
            config_diagnostics: self.config_diagnostics,
            engine,
            classifier: self.classifier,
        }
    }

    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: ExternalContourClassifier + 'static,
    {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn config(&self) -> &MachiningConfig {
        &self.config
    }

    pub fn strategy(&self) -> MachiningStrategy {
        self.config.strategy()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Corrections applied when the current configuration was installed.
    pub fn config_diagnostics(&self) -> &[Diagnostic] {
        &self.config_diagnostics
    }

    /// Plans paths for `geometries` with the current configuration.
    ///
    /// Degenerate inputs never fail: shapes whose offset vanishes are left
    /// out of the result.
    pub fn plan(&self, geometries: &[Geometry]) -> PlanningResult {
        let start = Instant::now();
        let mut result = PlanningResult::new(self.strategy());
        result.diagnostics.extend(self.config_diagnostics.iter().cloned());

        match &self.config {
            MachiningConfig::Gerber(config) => {
                result.passes = gerber::plan(&self.engine, config, geometries);
            }
            MachiningConfig::Profile(config) => {
                let (passes, diagnostics) =
                    profile::plan(&self.engine, config, self.classifier.as_ref(), geometries);
                for diagnostic in &diagnostics {
                    diagnostic.emit();
                }
                result.passes = passes;
                result.diagnostics.extend(diagnostics);
            }
            MachiningConfig::Pocketing(config) => {
                result.passes = pocketing::plan(&self.engine, config, geometries);
            }
        }

        info!(
            "Planned {} paths in {} passes for {} {} geometries in {:?}",
            result.path_count(),
            result.passes.len(),
            geometries.len(),
            result.strategy,
            start.elapsed()
        );
        result
    }

    /// Plans and hands the result to `sink`.
    pub fn plan_into(
        &self,
        geometries: &[Geometry],
        sink: &mut dyn PathSink,
    ) -> CamToolResult<PlanningResult> {
        let result = self.plan(geometries);
        sink.consume(geometries, &result)?;
        Ok(result)
    }
}

/// Offsets every polygon and flattens the results, dropping empty ones.
pub(crate) fn offset_all<E>(engine: &E, polygons: &[Geometry], distance: f64) -> Vec<Geometry>
where
    E: GeometryEngine + ?Sized,
{
    let mut out = Vec::with_capacity(polygons.len());
    for (i, polygon) in polygons.iter().enumerate() {
        match engine.offset(polygon, distance, false) {
            Some(region) => out.extend(region),
            None => debug!("Offset of polygon #{} by {} is empty, dropping", i, distance),
        }
    }
    out
}
