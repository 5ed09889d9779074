//! Config matcher: looks at recognized keys of an inference config mapping.
//!
//! Key groups are tried in order: explicit template name, literal chat
//! template, model identifier. The first group that yields a confident
//! detection wins.

use serde_json::{Map, Value};

use crate::registry::TemplateRegistry;

use super::model_name::detect_template_from_model_name;
use super::text::detect_template_from_text;

/// Keys holding a registry template name.
pub const TEMPLATE_NAME_KEYS: &[&str] = &[
    "template",
    "template_name",
    "chat_template_name",
    "prompt_template",
];

/// Keys holding a chat template: a literal/Jinja source, or a registry name.
pub const CHAT_TEMPLATE_KEYS: &[&str] = &["chat_template"];

/// Keys holding a model name or hub id.
pub const MODEL_KEYS: &[&str] = &["model", "model_name", "model_id", "base_model", "_name_or_path"];

/// Sentinels that identify a template inside Jinja source, where role names
/// are spliced in at render time and full markers never appear literally.
/// Ordered: `<|end|>` must be tried before `<|user|>`, `<<SYS>>` before `[INST]`.
const JINJA_SENTINELS: &[(&str, &str)] = &[
    ("<|im_start|>", "chatml"),
    ("<|start_header_id|>", "llama3"),
    ("<start_of_turn>", "gemma"),
    ("<|end|>", "phi3"),
    ("<|user|>", "zephyr"),
    ("<<SYS>>", "llama2"),
    ("[INST]", "mistral"),
    ("### Instruction:", "alpaca"),
    ("ASSISTANT:", "vicuna"),
];

/// Detect the inference template from a config mapping.
pub fn detect_template_from_config(config: &Map<String, Value>) -> Option<&'static str> {
    let registry = TemplateRegistry::builtin();

    for key in TEMPLATE_NAME_KEYS {
        let Some(value) = string_field(config, key) else {
            continue;
        };
        if let Some(template) = registry.resolve(value) {
            return Some(template.name);
        }
        tracing::warn!(key = *key, value, "unknown template name in inference config");
    }

    for key in CHAT_TEMPLATE_KEYS {
        let Some(field) = config.get(*key) else {
            continue;
        };
        if let Some(name) = detect_from_chat_template_field(field, registry) {
            return Some(name);
        }
    }

    for key in MODEL_KEYS {
        if let Some(name) = string_field(config, key).and_then(detect_template_from_model_name) {
            return Some(name);
        }
    }

    None
}

/// `chat_template` is either one source string or, in HF tokenizer configs,
/// a list of `{name, template}` objects.
fn detect_from_chat_template_field(field: &Value, registry: TemplateRegistry) -> Option<&'static str> {
    match field {
        Value::String(source) => detect_from_chat_template(source, registry),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| entry.get("template").and_then(Value::as_str))
            .find_map(|source| detect_from_chat_template(source, registry)),
        _ => None,
    }
}

fn detect_from_chat_template(source: &str, registry: TemplateRegistry) -> Option<&'static str> {
    if let Some(template) = registry.resolve(source) {
        return Some(template.name);
    }
    detect_template_from_text(source).or_else(|| detect_from_jinja_source(source))
}

fn detect_from_jinja_source(source: &str) -> Option<&'static str> {
    JINJA_SENTINELS
        .iter()
        .find(|(sentinel, _)| source.contains(sentinel))
        .map(|&(_, template)| template)
}

fn string_field<'a>(config: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
