//! Gateway response parser
//!
//! Extracts the JSON payload from a model response (which may wrap it in
//! prose or a code fence) and parses it into an `AnalysisOutcome`.

use crate::error::{Error, Result};
use crate::types::AnalysisOutcome;

/// Extract the JSON portion of a model response.
///
/// Extraction priority:
/// 1. ```json ... ``` fenced block
/// 2. raw `{...}` object
/// 3. raw `[...]` array
/// 4. error
///
/// # Examples
/// ```
/// use fridgechef_common::extract_json;
///
/// let response = "Here you go: {\"recipes\": []}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` fenced block
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // length of "```json"
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // raw {...} object
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    // raw [...] array
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON found in response".into()))
}

/// Parse a full analysis response into recipes + detected ingredients.
pub fn parse_analysis_response(response: &str) -> Result<AnalysisOutcome> {
    let json_str = extract_json(response)?;
    let outcome: AnalysisOutcome = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("analysis JSON parse error: {}", e)))?;
    Ok(outcome)
}
