//! Planning job files: a machining configuration plus the geometries to plan.

use crate::config::MachiningConfig;
use crate::diagnostic::Diagnostic;
use crate::error::{CamToolError, CamToolResult};
use antfarm_core::Geometry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A machining configuration and its input geometries, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanJob {
    pub config: MachiningConfig,
    #[serde(default)]
    pub geometries: Vec<Geometry>,
}

impl PlanJob {
    pub fn new(config: MachiningConfig, geometries: Vec<Geometry>) -> Self {
        Self { config, geometries }
    }

    pub fn from_json_str(content: &str) -> CamToolResult<Self> {
        let job: Self = serde_json::from_str(content)?;
        job.check()?;
        Ok(job)
    }

    pub fn from_toml_str(content: &str) -> CamToolResult<Self> {
        let job: Self = toml::from_str(content)?;
        job.check()?;
        Ok(job)
    }

    /// Load a job from a `.json` or `.toml` file.
    pub fn load_from_file(path: &Path) -> CamToolResult<Self> {
        let content = std::fs::read_to_string(path)?;

        match extension(path).as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(CamToolError::UnknownExtension(path.display().to_string())),
        }
    }

    /// Save the job to a `.json` or `.toml` file.
    pub fn save_to_file(&self, path: &Path) -> CamToolResult<()> {
        self.check()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => return Err(CamToolError::UnknownExtension(path.display().to_string())),
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Rejects an invalid configuration without applying corrections.
    ///
    /// The stored values stay as written so the planner that receives them
    /// reports its own corrections as diagnostics.
    pub fn check(&self) -> CamToolResult<Vec<Diagnostic>> {
        Ok(self.config.clone().validate()?)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GerberConfig, MachiningStrategy};

    #[test]
    fn test_json_job_with_defaults() {
        let job = PlanJob::from_json_str(
            r#"{
                "config": { "strategy": "gerber", "passages": 2 },
                "geometries": [
                    { "exterior": [ {"x":0,"y":0}, {"x":1,"y":0}, {"x":1,"y":1}, {"x":0,"y":1} ] }
                ]
            }"#,
        )
        .expect("parse");
        assert_eq!(
            job.config,
            MachiningConfig::Gerber(GerberConfig {
                passages: 2,
                ..Default::default()
            })
        );
        assert_eq!(job.geometries.len(), 1);
        assert!(!job.geometries[0].has_holes());
    }

    #[test]
    fn test_toml_job() {
        let job = PlanJob::from_toml_str(
            r#"
[config]
strategy = "pocketing"
tool_diameter = 2.0

[[geometries]]
exterior = [
    { x = 0.0, y = 0.0 },
    { x = 10.0, y = 0.0 },
    { x = 10.0, y = 10.0 },
    { x = 0.0, y = 10.0 },
]
"#,
        )
        .expect("parse");
        assert_eq!(job.config.strategy(), MachiningStrategy::Pocketing);
        assert_eq!(job.config.tool_diameter(), 2.0);
        assert_eq!(job.geometries.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected_on_load() {
        let err = PlanJob::from_json_str(r#"{"config":{"strategy":"pocketing","tool_diameter":0}}"#)
            .expect_err("invalid");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_load_keeps_values_needing_correction() {
        let job = PlanJob::from_json_str(r#"{"config":{"strategy":"gerber","passages":0}}"#)
            .expect("parse");
        assert_eq!(
            job.config,
            MachiningConfig::Gerber(GerberConfig {
                passages: 0,
                ..Default::default()
            })
        );
        assert_eq!(
            job.check().expect("valid"),
            vec![Diagnostic::PassesBelowMinimum {
                requested: 0,
                used: 1
            }]
        );
    }

    #[test]
    fn test_unknown_extension() {
        let job = PlanJob::new(MachiningConfig::default(), Vec::new());
        let err = job
            .save_to_file(Path::new("job.yaml"))
            .expect_err("unsupported");
        assert!(matches!(err, CamToolError::UnknownExtension(_)));
    }
}
