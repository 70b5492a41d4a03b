//! Non-fatal findings reported alongside planning results.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// A condition the planner corrected or could not verify, without failing the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Fewer than one pass was requested; one pass is used instead.
    PassesBelowMinimum { requested: u32, used: u32 },

    /// The external profile contour was picked by bounding-box area but could
    /// not be confirmed as the outline enclosing every other contour.
    AmbiguousExternalContour { chosen: usize, reason: String },
}

impl Diagnostic {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Diagnostic::PassesBelowMinimum { .. } => DiagnosticLevel::Warning,
            Diagnostic::AmbiguousExternalContour { .. } => DiagnosticLevel::Warning,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level() == DiagnosticLevel::Warning
    }

    /// Writes the diagnostic to the log at its own level.
    pub fn emit(&self) {
        match self.level() {
            DiagnosticLevel::Warning => warn!("{}", self),
            DiagnosticLevel::Info => info!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PassesBelowMinimum { requested, used } => write!(
                f,
                "At least one pass is required: requested {}, using {}",
                requested, used
            ),
            Diagnostic::AmbiguousExternalContour { chosen, reason } => write!(
                f,
                "External contour #{} is not verified as the board outline: {}",
                chosen, reason
            ),
        }
    }
}
