//! Detector facade: runs the matcher and comparator over training files,
//! inference configs, model names, and single formatted files.
//!
//! - `training.rs`: JSONL sampling and text extraction
//! - `config_file.rs`: YAML/JSON inference config loading
//! - `report.rs`: `ValidationReport`, `FileCheck`

pub mod config_file;
pub mod report;
pub mod training;

use std::path::Path;

use chatdrift_core::{DetectorConfig, DetectorError, Mismatch};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::comparator;
use crate::matcher;
use crate::registry::TemplateRegistry;

pub use config_file::load_inference_config;
pub use report::{FileCheck, ValidationReport};
pub use training::{extract_text, TrainingSample};

/// Where the inference-side template comes from.
#[derive(Debug, Clone, Copy)]
pub enum InferenceSource<'a> {
    /// A parsed inference config mapping.
    Config(&'a Value),
    /// A model name or hub id.
    ModelName(&'a str),
    /// Nothing given; the inference side stays unresolved.
    Unspecified,
}

/// Entry point used by the CLI boundary.
#[derive(Debug, Clone, Default)]
pub struct TemplateDetector {
    config: DetectorConfig,
    registry: TemplateRegistry,
}

impl TemplateDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            registry: TemplateRegistry::builtin(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn registry(&self) -> TemplateRegistry {
        self.registry
    }

    /// Detect the template used across a JSONL training file.
    ///
    /// Runs text detection over a bounded sample of records and returns the
    /// most frequent confident detection; equal counts go to the template seen
    /// first. `None` for an empty file or when no record is conclusive.
    pub fn validate_training_file(&self, path: &Path) -> Result<Option<&'static str>, DetectorError> {
        let (samples, stats) = training::sample_training_file(path, &self.config)?;

        // template -> (count, index of first detection)
        let mut tally: FxHashMap<&'static str, (usize, usize)> = FxHashMap::default();
        for (index, sample) in samples.iter().enumerate() {
            let detected = matcher::detect_template_from_text(&sample.text);
            tracing::debug!(line = sample.line, template = ?detected, "training record detection");
            if let Some(name) = detected {
                tally.entry(name).or_insert((0, index)).0 += 1;
            }
        }

        let winner = tally
            .iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(&name, _)| name);

        tracing::info!(
            path = %path.display(),
            records = stats.records_parsed,
            skipped = stats.lines_skipped,
            sampled = samples.len(),
            distinct = tally.len(),
            template = ?winner,
            "training file scanned"
        );
        Ok(winner)
    }

    /// Detect the inference template from a config mapping.
    pub fn validate_inference_config(&self, config: &Value) -> Result<Option<&'static str>, DetectorError> {
        let mapping = config.as_object().ok_or_else(|| {
            DetectorError::invalid_input(format!(
                "inference config must be a mapping, got {}",
                value_kind(config)
            ))
        })?;
        if mapping.is_empty() {
            return Err(DetectorError::invalid_input("inference config is empty"));
        }
        Ok(matcher::detect_template_from_config(mapping))
    }

    pub fn detect_template_from_model_name(&self, name: &str) -> Option<&'static str> {
        matcher::detect_template_from_model_name(name)
    }

    pub fn compare_templates(&self, training: Option<&str>, inference: Option<&str>) -> Vec<Mismatch> {
        comparator::compare_templates(training, inference)
    }

    pub fn analyze_formatted_text(&self, text: &str, template_name: &str) -> Result<Vec<Mismatch>, DetectorError> {
        comparator::analyze_formatted_text(text, template_name)
    }

    /// Load an inference config file (YAML or JSON).
    pub fn load_inference_config(&self, path: &Path) -> Result<Value, DetectorError> {
        load_inference_config(path)
    }

    /// Detect both sides and compare them.
    pub fn validate(
        &self,
        training_path: &Path,
        inference: InferenceSource<'_>,
    ) -> Result<ValidationReport, DetectorError> {
        let training_template = self.validate_training_file(training_path)?;
        let inference_template = match inference {
            InferenceSource::Config(config) => self.validate_inference_config(config)?,
            InferenceSource::ModelName(name) => self.detect_template_from_model_name(name),
            InferenceSource::Unspecified => None,
        };

        let report = ValidationReport {
            training_template,
            inference_template,
            mismatches: self.compare_templates(training_template, inference_template),
        };
        tracing::info!(summary = %report.summary(), "validation complete");
        Ok(report)
    }

    /// Check one formatted file against `template`, or against the template
    /// auto-detected from its content. `None` when auto-detection fails.
    pub fn check_file(&self, path: &Path, template: Option<&str>) -> Result<Option<FileCheck>, DetectorError> {
        let content = std::fs::read_to_string(path).map_err(|e| DetectorError::from_io(path, e))?;

        let (template, auto_detected) = match template {
            Some(name) => {
                let resolved = self
                    .registry
                    .resolve(name)
                    .ok_or_else(|| DetectorError::invalid_input(format!("unknown template '{name}'")))?;
                (resolved, false)
            }
            None => match matcher::detect_template_from_text(&content).and_then(|n| self.registry.get(n)) {
                Some(detected) => (detected, true),
                None => {
                    tracing::info!(path = %path.display(), "could not auto-detect template");
                    return Ok(None);
                }
            },
        };

        Ok(Some(FileCheck {
            template: template.name,
            auto_detected,
            mismatches: comparator::analyze_with_template(&content, template),
        }))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
