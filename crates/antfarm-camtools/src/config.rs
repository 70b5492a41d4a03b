//! Machining configuration, one payload per strategy.
//!
//! Each strategy carries its own parameter struct, so a profile margin can
//! never be handed to the isolation driver by mistake. Configurations are
//! validated before a planner accepts them: hard errors for values no tool
//! could cut with, silent-but-logged corrections for the pass count.

use crate::diagnostic::Diagnostic;
use crate::error::{ConfigurationError, ConfigurationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machining strategy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachiningStrategy {
    /// Multi-pass isolation routing around copper.
    Gerber,
    /// Board outline and internal cutouts.
    Profile,
    /// Single clearing pass inside a boundary.
    Pocketing,
}

impl MachiningStrategy {
    pub const ALL: [MachiningStrategy; 3] = [
        MachiningStrategy::Gerber,
        MachiningStrategy::Profile,
        MachiningStrategy::Pocketing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MachiningStrategy::Gerber => "gerber",
            MachiningStrategy::Profile => "profile",
            MachiningStrategy::Pocketing => "pocketing",
        }
    }
}

impl fmt::Display for MachiningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MachiningStrategy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        MachiningStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == tag)
            .ok_or_else(|| ConfigurationError::UnknownStrategy(s.to_string()))
    }
}

/// Isolation routing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GerberConfig {
    pub tool_diameter: f64,
    /// Number of concentric passes; values below 1 are raised to 1.
    pub passages: u32,
    /// Fraction of the tool diameter shared by consecutive passes, in `[0, 1)`.
    pub overlap: f64,
}

impl Default for GerberConfig {
    fn default() -> Self {
        Self {
            tool_diameter: 0.2,
            passages: 3,
            overlap: 0.0,
        }
    }
}

/// Board profile parameters.
///
/// `taps_number` and `taps_length` describe holding tabs. They are stored and
/// round-tripped but no path generation reads them yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub tool_diameter: f64,
    /// Extra clearance added to the tool radius.
    pub margin: f64,
    pub taps_number: u32,
    pub taps_length: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            tool_diameter: 1.0,
            margin: 0.1,
            taps_number: 4,
            taps_length: 1.0,
        }
    }
}

/// Pocket clearing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PocketingConfig {
    pub tool_diameter: f64,
}

impl Default for PocketingConfig {
    fn default() -> Self {
        Self { tool_diameter: 1.0 }
    }
}

/// Strategy-specific machining configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum MachiningConfig {
    Gerber(GerberConfig),
    Profile(ProfileConfig),
    Pocketing(PocketingConfig),
}

impl MachiningConfig {
    /// Documented defaults for a strategy.
    pub fn default_for(strategy: MachiningStrategy) -> Self {
        match strategy {
            MachiningStrategy::Gerber => MachiningConfig::Gerber(GerberConfig::default()),
            MachiningStrategy::Profile => MachiningConfig::Profile(ProfileConfig::default()),
            MachiningStrategy::Pocketing => MachiningConfig::Pocketing(PocketingConfig::default()),
        }
    }

    pub fn strategy(&self) -> MachiningStrategy {
        match self {
            MachiningConfig::Gerber(_) => MachiningStrategy::Gerber,
            MachiningConfig::Profile(_) => MachiningStrategy::Profile,
            MachiningConfig::Pocketing(_) => MachiningStrategy::Pocketing,
        }
    }

    pub fn tool_diameter(&self) -> f64 {
        match self {
            MachiningConfig::Gerber(c) => c.tool_diameter,
            MachiningConfig::Profile(c) => c.tool_diameter,
            MachiningConfig::Pocketing(c) => c.tool_diameter,
        }
    }

    pub fn set_tool_diameter(&mut self, tool_diameter: f64) {
        match self {
            MachiningConfig::Gerber(c) => c.tool_diameter = tool_diameter,
            MachiningConfig::Profile(c) => c.tool_diameter = tool_diameter,
            MachiningConfig::Pocketing(c) => c.tool_diameter = tool_diameter,
        }
    }

    pub fn tool_radius(&self) -> f64 {
        self.tool_diameter() / 2.0
    }

    /// Validates the configuration in place.
    ///
    /// Returns the corrections that were applied; an invalid value that
    /// cannot be corrected is an error.
    pub fn validate(&mut self) -> ConfigurationResult<Vec<Diagnostic>> {
        let tool_diameter = self.tool_diameter();
        if !(tool_diameter.is_finite() && tool_diameter > 0.0) {
            return Err(ConfigurationError::NonPositiveToolDiameter(tool_diameter));
        }

        let mut diagnostics = Vec::new();
        match self {
            MachiningConfig::Gerber(c) => {
                if c.passages < 1 {
                    diagnostics.push(Diagnostic::PassesBelowMinimum {
                        requested: c.passages,
                        used: 1,
                    });
                    c.passages = 1;
                }
                if !(c.overlap.is_finite() && (0.0..1.0).contains(&c.overlap)) {
                    return Err(ConfigurationError::OutOfRange {
                        name: "overlap".to_string(),
                        value: c.overlap,
                        min: 0.0,
                        max: 1.0,
                    });
                }
            }
            MachiningConfig::Profile(c) => {
                if !(c.margin.is_finite() && c.margin >= 0.0) {
                    return Err(ConfigurationError::InvalidValue {
                        name: "margin".to_string(),
                        reason: format!("must be a non-negative distance, got {}", c.margin),
                    });
                }
                if !(c.taps_length.is_finite() && c.taps_length >= 0.0) {
                    return Err(ConfigurationError::InvalidValue {
                        name: "taps_length".to_string(),
                        reason: format!("must be a non-negative length, got {}", c.taps_length),
                    });
                }
            }
            MachiningConfig::Pocketing(_) => {}
        }

        for diagnostic in &diagnostics {
            diagnostic.emit();
        }
        Ok(diagnostics)
    }
}

impl Default for MachiningConfig {
    fn default() -> Self {
        MachiningConfig::default_for(MachiningStrategy::Gerber)
    }
}
