//! Detector configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::DetectorError;

/// Default number of training records sampled per file.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Default cap on a single JSONL line: 8 MiB.
pub const DEFAULT_MAX_LINE_BYTES: usize = 8 * 1024 * 1024;

/// Configuration for the training-file scan and config detection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Records sampled per training file. 0 = scan every record. Default: 100.
    pub sample_size: Option<usize>,
    /// Fail the scan on a malformed JSONL line instead of skipping it. Default: false.
    pub strict_jsonl: Option<bool>,
    /// Lines longer than this many bytes are skipped. Default: 8 MiB.
    pub max_line_bytes: Option<usize>,
}

impl DetectorConfig {
    /// Parse a config from TOML text. Unknown keys are ignored.
    pub fn from_toml_str(content: &str) -> Result<Self, DetectorError> {
        toml::from_str(content).map_err(|e| DetectorError::Config {
            message: e.to_string(),
        })
    }

    /// Load a config file. A missing file is an error; use `Default` when absent.
    pub fn load(path: &Path) -> Result<Self, DetectorError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DetectorError::from_io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Returns the effective sample size, `None` meaning unbounded.
    pub fn effective_sample_size(&self) -> Option<usize> {
        match self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE) {
            0 => None,
            n => Some(n),
        }
    }

    /// Returns whether malformed lines abort the scan, defaulting to false.
    pub fn effective_strict_jsonl(&self) -> bool {
        self.strict_jsonl.unwrap_or(false)
    }

    /// Returns the effective line cap, defaulting to 8 MiB.
    pub fn effective_max_line_bytes(&self) -> usize {
        self.max_line_bytes.unwrap_or(DEFAULT_MAX_LINE_BYTES)
    }
}
