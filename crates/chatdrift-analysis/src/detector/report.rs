//! Result types handed to the boundary layer.

use chatdrift_core::types::mismatch::has_errors;
use chatdrift_core::{Mismatch, Severity};
use serde::Serialize;

/// Outcome of one training-vs-inference validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub training_template: Option<&'static str>,
    pub inference_template: Option<&'static str>,
    pub mismatches: Vec<Mismatch>,
}

impl ValidationReport {
    /// True if any finding is an `error`; the boundary exits non-zero on this.
    pub fn has_errors(&self) -> bool {
        has_errors(&self.mismatches)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.mismatches.iter().filter(|m| m.severity == severity).count()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "training={} inference={} mismatches={} ({} errors, {} warnings, {} info)",
            self.training_template.unwrap_or("unknown"),
            self.inference_template.unwrap_or("unknown"),
            self.mismatches.len(),
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Info),
        )
    }
}

/// Outcome of checking one formatted file against a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCheck {
    /// The template checked against: given by the caller or auto-detected.
    pub template: &'static str,
    pub auto_detected: bool,
    pub mismatches: Vec<Mismatch>,
}

impl FileCheck {
    pub fn has_errors(&self) -> bool {
        has_errors(&self.mismatches)
    }
}
