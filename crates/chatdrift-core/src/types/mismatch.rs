//! Severity-tagged findings produced by the comparator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a finding is. Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inconsistency between two templates, or between a template and text.
///
/// `expected` is the training-side (or template-side) value, `actual` the
/// inference-side (or observed) value. Either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub severity: Severity,
    pub field: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub message: String,
}

impl Mismatch {
    pub fn new(
        severity: Severity,
        field: impl Into<String>,
        expected: Option<&str>,
        actual: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: field.into(),
            expected: expected.map(str::to_string),
            actual: actual.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn error(
        field: impl Into<String>,
        expected: Option<&str>,
        actual: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, field, expected, actual, message)
    }

    pub fn warning(
        field: impl Into<String>,
        expected: Option<&str>,
        actual: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, field, expected, actual, message)
    }

    pub fn info(
        field: impl Into<String>,
        expected: Option<&str>,
        actual: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Info, field, expected, actual, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `<severity>: <field> expected=<expected> actual=<actual> — <message>`
///
/// Marker values are printed with `{:?}` so newlines stay visible; absent
/// values print as `None`.
impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} expected={} actual={} — {}",
            self.severity,
            self.field,
            DisplayValue(self.expected.as_deref()),
            DisplayValue(self.actual.as_deref()),
            self.message
        )
    }
}

struct DisplayValue<'a>(Option<&'a str>);

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:?}"),
            None => f.write_str("None"),
        }
    }
}

/// True if any finding is an `error`. The boundary maps this to a non-zero exit.
pub fn has_errors(mismatches: &[Mismatch]) -> bool {
    mismatches.iter().any(Mismatch::is_error)
}
