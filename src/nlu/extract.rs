use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

// Brace-delimited candidates, one nesting level deep. This matches what
// small local models actually emit: a JSON object wrapped in prose.
static JSON_CANDIDATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{(?:[^{}]|\{[^{}]*\})*\}").ok());

/// Pulls the first parseable JSON object out of free-form model output.
///
/// Candidates that fail to parse are skipped; returns `None` when nothing
/// in the text parses. Never panics, whatever the model produced.
pub fn extract_json(text: &str) -> Option<Value> {
    let pattern = JSON_CANDIDATE.as_ref()?;
    for candidate in pattern.find_iter(text) {
        match serde_json::from_str::<Value>(candidate.as_str()) {
            Ok(value @ Value::Object(_)) => return Some(value),
            Ok(_) => continue,
            Err(_) => {
                warn!(len = candidate.as_str().len(), "skipping invalid JSON candidate");
            }
        }
    }
    None
}
