//! Mismatch comparator: produces ordered, severity-tagged findings.
//!
//! - `templates.rs`: field-by-field diff of two registry templates
//! - `formatted.rs`: validation of already-formatted text against one template
//!
//! Findings come out in check order, never re-sorted by severity.

pub mod formatted;
pub mod templates;

pub use formatted::{analyze_formatted_text, analyze_with_template};
pub use templates::compare_templates;
