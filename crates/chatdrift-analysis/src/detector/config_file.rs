//! Inference config loading from YAML or JSON files.

use std::path::Path;

use chatdrift_core::DetectorError;
use serde_json::Value;

/// Load an inference config. `.yaml`/`.yml` files parse as YAML, anything
/// else as JSON. Empty documents are rejected.
pub fn load_inference_config(path: &Path) -> Result<Value, DetectorError> {
    let content = std::fs::read_to_string(path).map_err(|e| DetectorError::from_io(path, e))?;
    let source_name = path.display().to_string();

    if content.trim().is_empty() {
        return Err(DetectorError::invalid_input(format!("config file is empty: {source_name}")));
    }

    let value: Value = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| DetectorError::InvalidFormat {
            source_name: source_name.clone(),
            message: format!("invalid YAML: {e}"),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| DetectorError::InvalidFormat {
            source_name: source_name.clone(),
            message: format!("invalid JSON: {e}"),
        })?
    };

    if value.is_null() {
        return Err(DetectorError::invalid_input(format!("config file is empty: {source_name}")));
    }
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
