//! # chatdrift-analysis
//!
//! Chat template detection and comparison engine.
//!
//! ## Modules
//! - `registry`: built-in catalog of templates and their marker strings
//! - `matcher`: infer a template from text, a model name, or a config mapping
//! - `comparator`: template-vs-template and template-vs-text mismatch reports
//! - `detector`: facade over training files, inference configs, and single files

pub mod comparator;
pub mod detector;
pub mod matcher;
pub mod registry;

pub use comparator::{analyze_formatted_text, compare_templates};
pub use detector::{FileCheck, InferenceSource, TemplateDetector, ValidationReport};
pub use matcher::{
    detect_template_from_config, detect_template_from_model_name, detect_template_from_text,
};
pub use registry::{Template, TemplateField, TemplateRegistry};
