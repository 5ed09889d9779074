//! Integration tests for the detector facade: training files, inference
//! configs, full validation, and single-file checks.

use std::io::Write;
use std::path::Path;

use chatdrift_analysis::detector::training::{extract_text, sample_training_file};
use chatdrift_analysis::{InferenceSource, TemplateDetector};
use chatdrift_core::{ChatDriftErrorCode, DetectorConfig, Severity};
use serde_json::json;
use tempfile::NamedTempFile;

// ─── Fixtures ──────────────────────────────────────────────────────────────

const CHATML: &str = "<|im_start|>user\nHi<|im_end|>\n<|im_start|>assistant\nHello<|im_end|>\n";
const LLAMA2: &str = "<s>[INST] Hi [/INST] Hello </s>";

fn text_record(text: &str) -> String {
    json!({ "text": text }).to_string()
}

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn write_with_suffix(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn jsonl(lines: &[String]) -> NamedTempFile {
    write_file(&(lines.join("\n") + "\n"))
}

fn detector_with(config: DetectorConfig) -> TemplateDetector {
    TemplateDetector::new(config)
}

// ─── Training files ────────────────────────────────────────────────────────

#[test]
fn test_empty_training_file_is_undetected() {
    let file = write_file("");
    let detector = TemplateDetector::default();
    assert_eq!(detector.validate_training_file(file.path()).unwrap(), None);
}

#[test]
fn test_malformed_line_is_skipped() {
    let file = jsonl(&["{not json".to_string(), text_record(CHATML)]);
    let detector = TemplateDetector::default();
    assert_eq!(detector.validate_training_file(file.path()).unwrap(), Some("chatml"));

    let (samples, stats) = sample_training_file(file.path(), detector.config()).unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].line, 2);
    assert_eq!(stats.lines_skipped, 1);
    assert_eq!(stats.records_parsed, 1);
}

#[test]
fn test_strict_mode_rejects_malformed_line() {
    let file = jsonl(&[text_record(CHATML), "{not json".to_string()]);
    let detector = detector_with(DetectorConfig {
        strict_jsonl: Some(true),
        ..Default::default()
    });
    let err = detector.validate_training_file(file.path()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_FORMAT");
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn test_missing_training_file() {
    let err = TemplateDetector::default()
        .validate_training_file(Path::new("/nonexistent/train.jsonl"))
        .unwrap_err();
    assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
}

#[test]
fn test_plain_conversations_are_undetected() {
    let record = json!({
        "messages": [
            {"role": "user", "content": "What is 2+2?"},
            {"role": "assistant", "content": "4"}
        ]
    })
    .to_string();
    let file = jsonl(&[record.clone(), record]);
    assert_eq!(TemplateDetector::default().validate_training_file(file.path()).unwrap(), None);
}

#[test]
fn test_majority_template_wins() {
    let file = jsonl(&[text_record(LLAMA2), text_record(CHATML), text_record(CHATML)]);
    assert_eq!(
        TemplateDetector::default().validate_training_file(file.path()).unwrap(),
        Some("chatml")
    );
}

#[test]
fn test_frequency_tie_goes_to_first_seen() {
    let file = jsonl(&[
        text_record(LLAMA2),
        text_record(CHATML),
        text_record(CHATML),
        text_record(LLAMA2),
    ]);
    assert_eq!(
        TemplateDetector::default().validate_training_file(file.path()).unwrap(),
        Some("llama2")
    );
}

#[test]
fn test_sample_size_bounds_the_scan() {
    let file = jsonl(&[
        text_record(LLAMA2),
        text_record(CHATML),
        text_record(CHATML),
        text_record(CHATML),
    ]);

    // Only the first two records are read: a 1-1 tie, first seen wins.
    let bounded = detector_with(DetectorConfig {
        sample_size: Some(2),
        ..Default::default()
    });
    assert_eq!(bounded.validate_training_file(file.path()).unwrap(), Some("llama2"));

    let unbounded = detector_with(DetectorConfig {
        sample_size: Some(0),
        ..Default::default()
    });
    assert_eq!(unbounded.validate_training_file(file.path()).unwrap(), Some("chatml"));
}

#[test]
fn test_oversized_lines_are_skipped() {
    let long = format!("<s>[INST] {} [/INST] Hello </s>", "x".repeat(400));
    let file = jsonl(&[text_record(&long), text_record(CHATML)]);
    let config = DetectorConfig {
        max_line_bytes: Some(150),
        ..Default::default()
    };

    let (samples, stats) = sample_training_file(file.path(), &config).unwrap();
    assert_eq!(stats.lines_skipped, 1);
    assert_eq!(samples.len(), 1);
    assert_eq!(detector_with(config.clone()).validate_training_file(file.path()).unwrap(), Some("chatml"));

    let strict = DetectorConfig {
        strict_jsonl: Some(true),
        ..config
    };
    let err = detector_with(strict).validate_training_file(file.path()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_FORMAT");
}

#[test]
fn test_blank_lines_and_crlf_are_tolerated() {
    let content = format!("\n   \n{}\r\n\r\n", text_record(CHATML));
    let file = write_file(&content);
    let detector = TemplateDetector::default();
    assert_eq!(detector.validate_training_file(file.path()).unwrap(), Some("chatml"));

    let (_, stats) = sample_training_file(file.path(), detector.config()).unwrap();
    assert_eq!(stats.lines_skipped, 0);
}

#[test]
fn test_messages_with_formatted_content() {
    let record = json!({
        "messages": [
            {"role": "user", "content": "<|im_start|>user\nHi<|im_end|>"},
            {"role": "assistant", "content": "<|im_start|>assistant\nHello<|im_end|>"}
        ]
    })
    .to_string();
    let file = jsonl(&[record]);
    assert_eq!(
        TemplateDetector::default().validate_training_file(file.path()).unwrap(),
        Some("chatml")
    );
}

#[test]
fn test_sharegpt_conversations_are_read() {
    let record = json!({
        "conversations": [
            {"from": "human", "value": "<s>USER: Hi\n"},
            {"from": "gpt", "value": "ASSISTANT: Hello</s>"}
        ]
    })
    .to_string();
    let file = jsonl(&[record]);
    assert_eq!(
        TemplateDetector::default().validate_training_file(file.path()).unwrap(),
        Some("vicuna")
    );
}

#[test]
fn test_prompt_completion_records() {
    let record = json!({
        "prompt": "### Instruction:\nAdd 2 and 2.\n\n### Response:\n",
        "completion": "4"
    })
    .to_string();
    let file = jsonl(&[record]);
    assert_eq!(
        TemplateDetector::default().validate_training_file(file.path()).unwrap(),
        Some("alpaca")
    );
}

#[test]
fn test_extract_text_priority() {
    let record = json!({"text": "raw", "prompt": "p", "completion": "c"});
    assert_eq!(extract_text(&record).as_deref(), Some("raw"));

    let record = json!({"prompt": "p", "completion": "c"});
    assert_eq!(extract_text(&record).as_deref(), Some("pc"));

    let record = json!({"messages": [{"content": "a"}, {"content": "b"}]});
    assert_eq!(extract_text(&record).as_deref(), Some("a\nb"));

    assert_eq!(extract_text(&json!({"label": 1})), None);
    assert_eq!(extract_text(&json!("just a string")), None);
}

// ─── Inference configs ─────────────────────────────────────────────────────

#[test]
fn test_inference_config_must_be_a_non_empty_mapping() {
    let detector = TemplateDetector::default();

    let err = detector.validate_inference_config(&json!(["a", "b"])).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert!(err.to_string().contains("sequence"), "{err}");

    let err = detector.validate_inference_config(&json!({})).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    let detected = detector
        .validate_inference_config(&json!({"model": "Qwen/Qwen2-7B-Instruct"}))
        .unwrap();
    assert_eq!(detected, Some("chatml"));
}

#[test]
fn test_load_yaml_and_json_configs() {
    let detector = TemplateDetector::default();

    let yaml = write_with_suffix(".yaml", "model_name: Qwen/Qwen2-7B\ntemperature: 0.7\n");
    let value = detector.load_inference_config(yaml.path()).unwrap();
    assert_eq!(value["model_name"], "Qwen/Qwen2-7B");
    assert_eq!(detector.validate_inference_config(&value).unwrap(), Some("chatml"));

    let yml = write_with_suffix(".YML", "template: gemma\n");
    let value = detector.load_inference_config(yml.path()).unwrap();
    assert_eq!(detector.validate_inference_config(&value).unwrap(), Some("gemma"));

    let json_file = write_with_suffix(".json", r#"{"template": "zephyr"}"#);
    let value = detector.load_inference_config(json_file.path()).unwrap();
    assert_eq!(detector.validate_inference_config(&value).unwrap(), Some("zephyr"));
}

#[test]
fn test_load_config_errors() {
    let detector = TemplateDetector::default();

    let bad_json = write_with_suffix(".json", "{\"template\": ");
    let err = detector.load_inference_config(bad_json.path()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_FORMAT");
    assert!(err.to_string().contains("invalid JSON"), "{err}");

    let bad_yaml = write_with_suffix(".yaml", "template: [unclosed\n");
    let err = detector.load_inference_config(bad_yaml.path()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_FORMAT");
    assert!(err.to_string().contains("invalid YAML"), "{err}");

    let empty = write_with_suffix(".yaml", "  \n");
    assert_eq!(detector.load_inference_config(empty.path()).unwrap_err().error_code(), "INVALID_INPUT");

    let null_doc = write_with_suffix(".yaml", "~\n");
    assert_eq!(detector.load_inference_config(null_doc.path()).unwrap_err().error_code(), "INVALID_INPUT");

    let missing = detector.load_inference_config(Path::new("/nonexistent/infer.yaml")).unwrap_err();
    assert_eq!(missing.error_code(), "INPUT_NOT_FOUND");
}

// ─── Full validation ───────────────────────────────────────────────────────

#[test]
fn test_validate_against_model_name() {
    let training = jsonl(&[text_record(CHATML)]);
    let report = TemplateDetector::default()
        .validate(training.path(), InferenceSource::ModelName("mistralai/Mistral-7B-Instruct-v0.2"))
        .unwrap();

    assert_eq!(report.training_template, Some("chatml"));
    assert_eq!(report.inference_template, Some("mistral"));
    assert!(report.has_errors());
    assert!(report.count(Severity::Warning) >= 1);
    assert!(report.summary().starts_with("training=chatml inference=mistral"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["training_template"], "chatml");
    assert_eq!(json["inference_template"], "mistral");
    assert!(json["mismatches"].as_array().is_some_and(|m| !m.is_empty()));
}

#[test]
fn test_validate_against_matching_config() {
    let training = jsonl(&[text_record(LLAMA2)]);
    let config = json!({"chat_template": "llama2"});
    let report = TemplateDetector::default()
        .validate(training.path(), InferenceSource::Config(&config))
        .unwrap();
    assert_eq!(report.inference_template, Some("llama2"));
    assert!(report.mismatches.is_empty());
    assert!(!report.has_errors());
}

#[test]
fn test_validate_without_inference_side() {
    let training = jsonl(&[text_record(CHATML)]);
    let report = TemplateDetector::default()
        .validate(training.path(), InferenceSource::Unspecified)
        .unwrap();
    assert_eq!(report.inference_template, None);
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].severity, Severity::Warning);
    assert!(!report.has_errors());
    assert!(report.summary().contains("inference=unknown"));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["inference_template"].is_null());
}

#[test]
fn test_validate_propagates_config_errors() {
    let training = jsonl(&[text_record(CHATML)]);
    let config = json!("chatml");
    let err = TemplateDetector::default()
        .validate(training.path(), InferenceSource::Config(&config))
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

// ─── Single-file checks ────────────────────────────────────────────────────

#[test]
fn test_check_file_auto_detects() {
    let file = write_file(CHATML);
    let check = TemplateDetector::default().check_file(file.path(), None).unwrap().unwrap();
    assert_eq!(check.template, "chatml");
    assert!(check.auto_detected);
    assert!(check.mismatches.is_empty());
    assert!(!check.has_errors());
}

#[test]
fn test_check_file_against_other_template() {
    let file = write_file(CHATML);
    let check = TemplateDetector::default()
        .check_file(file.path(), Some("Alpaca"))
        .unwrap()
        .unwrap();
    assert_eq!(check.template, "alpaca");
    assert!(!check.auto_detected);
    assert!(check.has_errors());
}

#[test]
fn test_check_file_without_detectable_template() {
    let file = write_file("Just some prose without any chat markers.\n");
    assert!(TemplateDetector::default().check_file(file.path(), None).unwrap().is_none());
}

#[test]
fn test_check_file_errors() {
    let file = write_file(CHATML);
    let detector = TemplateDetector::default();
    let err = detector.check_file(file.path(), Some("gpt4")).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");

    let err = detector.check_file(Path::new("/nonexistent/sample.txt"), None).unwrap_err();
    assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
}
