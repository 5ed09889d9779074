//! Training-file sampling: JSONL records → formatted text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chatdrift_core::{DetectorConfig, DetectorError};
use serde_json::Value;

/// One parsed training record. Lives only for the duration of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSample {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Formatted text extracted from the record.
    pub text: String,
}

/// Counters from one pass over a training file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines_read: usize,
    pub records_parsed: usize,
    pub lines_skipped: usize,
    pub records_without_text: usize,
}

/// Read up to `sample_size` records from a JSONL file.
///
/// Blank lines are ignored. Malformed or oversized lines are skipped with a
/// warning unless `strict_jsonl` is set. The file handle is released on every
/// return path.
pub fn sample_training_file(
    path: &Path,
    config: &DetectorConfig,
) -> Result<(Vec<TrainingSample>, ScanStats), DetectorError> {
    let file = File::open(path).map_err(|e| DetectorError::from_io(path, e))?;
    let reader = BufReader::new(file);
    let limit = config.effective_sample_size();
    let max_line_bytes = config.effective_max_line_bytes();
    let strict = config.effective_strict_jsonl();

    let mut samples = Vec::new();
    let mut stats = ScanStats::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        if limit.is_some_and(|n| stats.records_parsed >= n) {
            break;
        }
        let line_no = index + 1;
        let mut line = line.map_err(|e| DetectorError::from_io(path, e))?;
        stats.lines_read += 1;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        if line.len() > max_line_bytes {
            let message = format!("line {line_no}: {} bytes exceeds limit of {max_line_bytes}", line.len());
            skip_or_fail(path, strict, message, &mut stats)?;
            continue;
        }

        let record: Value = match serde_json::from_slice(&line) {
            Ok(record) => record,
            Err(e) => {
                skip_or_fail(path, strict, format!("line {line_no}: {e}"), &mut stats)?;
                continue;
            }
        };
        stats.records_parsed += 1;

        match extract_text(&record) {
            Some(text) => samples.push(TrainingSample { line: line_no, text }),
            None => {
                stats.records_without_text += 1;
                tracing::debug!(line = line_no, "record has no formatted text");
            }
        }
    }

    Ok((samples, stats))
}

fn skip_or_fail(
    path: &Path,
    strict: bool,
    message: String,
    stats: &mut ScanStats,
) -> Result<(), DetectorError> {
    if strict {
        return Err(DetectorError::InvalidFormat {
            source_name: path.display().to_string(),
            message,
        });
    }
    tracing::warn!(path = %path.display(), reason = %message, "skipping malformed JSONL line");
    stats.lines_skipped += 1;
    Ok(())
}

/// Extract formatted text from one record.
///
/// Priority: a raw `text` field, then `prompt` + `completion`, then the turn
/// contents of a `messages` (`role`/`content`) or `conversations`
/// (`from`/`value`) array joined by newlines.
pub fn extract_text(record: &Value) -> Option<String> {
    let object = record.as_object()?;

    if let Some(text) = object.get("text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    if let (Some(prompt), Some(completion)) = (
        object.get("prompt").and_then(Value::as_str),
        object.get("completion").and_then(Value::as_str),
    ) {
        return Some(format!("{prompt}{completion}"));
    }

    ["messages", "conversations"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_array))
        .map(|turns| reconstruct_turns(turns))
        .find(|text| !text.is_empty())
}

fn reconstruct_turns(turns: &[Value]) -> String {
    turns
        .iter()
        .filter_map(|turn| {
            turn.get("content")
                .or_else(|| turn.get("value"))
                .and_then(Value::as_str)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
