use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{PredguardError, PredguardResult};
use crate::structs::file_analysis::FileAnalysis;

// The model is told to return bare JSON but routinely wraps it in prose or
// code fences; grab the outermost object.
static JSON_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

pub fn extract_json_block(raw: &str) -> Option<&str> {
    JSON_BLOCK.find(raw).map(|m| m.as_str())
}

/// Turns one completion into a `FileAnalysis`. Empty responses, responses
/// without a JSON object, and JSON that does not fit the schema are all
/// parse errors for the caller to record against the candidate.
pub fn parse_analysis(raw: &str) -> PredguardResult<FileAnalysis> {
    if raw.trim().is_empty() {
        return Err(PredguardError::parse_error(
            "completion",
            "empty response from the model",
        ));
    }

    let block = extract_json_block(raw).ok_or_else(|| {
        PredguardError::parse_error("completion", "no JSON object found in the response")
    })?;

    serde_json::from_str::<FileAnalysis>(block).map_err(|e| {
        PredguardError::parse_error("completion", &format!("invalid analysis JSON: {}", e))
    })
}
