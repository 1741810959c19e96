//! Best-effort JSON recovery from free-form model responses
//!
//! Providers wrap JSON in markdown fences or prose often enough that a
//! direct parse is not reliable. Recovery is staged: strip code fences,
//! try a direct parse, then try the substring between the first `{` and
//! the last `}`. A response that nests unbalanced braces in surrounding
//! prose can still defeat the scan; that limitation is accepted rather
//! than papered over.

use crate::error::{LexSearchError, Result};
use serde_json::Value;

/// Remove common markdown code-fence markers from a raw response
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Recover one JSON object from a raw model response.
///
/// Fails with [`LexSearchError::UnparsableResponse`] (carrying a truncated
/// excerpt of the raw text) when no parseable object can be found.
pub fn extract_json(raw: &str) -> Result<Value> {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str(&cleaned) {
        Ok(value) => return Ok(value),
        Err(e) => {
            tracing::debug!("Direct JSON parse failed, falling back to brace scan: {e}");
        }
    }

    let start = cleaned
        .find('{')
        .ok_or_else(|| LexSearchError::unparsable("No JSON object in response", raw))?;
    let end = cleaned
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| LexSearchError::unparsable("No JSON object in response", raw))?;

    serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| LexSearchError::unparsable(format!("Invalid JSON after brace scan: {e}"), raw))
}
