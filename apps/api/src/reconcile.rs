//! Response Reconciler — turns untrusted free-form model text into a
//! validated JSON object.
//!
//! Two-stage extraction: strip code fences, then slice between the first `{`
//! and the last `}` before parsing. Structural failures (no delimiters,
//! unparsable JSON) are classified and abort the caller's pipeline; scalar
//! defects (out-of-range or non-numeric fields, missing strings) are repaired
//! locally with defaults and never abort. The original model text is carried
//! on every failure for audit.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no JSON object delimiters found in model output")]
    Extraction { raw: String },

    #[error("model output is not valid JSON: {source}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReconcileError {
    /// The unmodified model text that failed reconciliation.
    pub fn raw(&self) -> &str {
        match self {
            ReconcileError::Extraction { raw } => raw,
            ReconcileError::Parse { raw, .. } => raw,
        }
    }
}

/// Extracts the JSON object embedded in raw model output.
///
/// Models wrap JSON in fences, preambles, and trailing commentary; everything
/// outside the outermost `{`…`}` pair is discarded.
pub fn reconcile_object(raw: &str) -> Result<Value, ReconcileError> {
    let stripped = strip_code_fences(raw);

    let Some(start) = stripped.find('{') else {
        return Err(ReconcileError::Extraction {
            raw: raw.to_string(),
        });
    };

    // Truncated output (no closing brace after the start) is handed to the
    // parser as-is so the failure classifies as a parse error, not extraction.
    let slice = match stripped.rfind('}') {
        Some(end) if end >= start => &stripped[start..=end],
        _ => &stripped[start..],
    };

    serde_json::from_str(slice).map_err(|source| ReconcileError::Parse {
        raw: raw.to_string(),
        source,
    })
}

/// Normalizes a plain-text (non-JSON) model response: fence markers stripped,
/// surrounding whitespace trimmed.
pub fn plain_text(raw: &str) -> String {
    strip_code_fences(raw).trim().to_string()
}

/// Removes ```json / ``` fence markers anywhere in the text. Replace-all
/// rather than prefix/suffix stripping: models sometimes fence mid-response.
fn strip_code_fences(raw: &str) -> String {
    raw.trim().replace("```json", "").replace("```", "")
}

/// Reads a numeric field, coercing and clamping into `[min, max]`.
/// Accepts integers, floats (truncated), and numeric strings. Anything else,
/// including a missing field, yields 0 — a scalar defect repaired in place,
/// never a reconciliation failure.
pub fn int_field_clamped(obj: &Value, field: &str, min: i64, max: i64) -> i64 {
    obj.get(field)
        .and_then(coerce_int)
        .map(|n| n.clamp(min, max))
        .unwrap_or(0)
}

/// Reads a string field, defaulting to empty when absent or non-string.
pub fn string_field(obj: &Value, field: &str) -> String {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clamp_score(obj: &Value) -> i64 {
        int_field_clamped(obj, "score", 0, 10)
    }

    #[test]
    fn test_clamp_in_range_passes_through() {
        assert_eq!(clamp_score(&json!({"score": 7})), 7);
    }

    #[test]
    fn test_clamp_below_range() {
        assert_eq!(clamp_score(&json!({"score": -5})), 0);
    }

    #[test]
    fn test_clamp_above_range() {
        assert_eq!(clamp_score(&json!({"score": 15})), 10);
    }

    #[test]
    fn test_clamp_non_numeric_defaults_to_zero() {
        assert_eq!(clamp_score(&json!({"score": "abc"})), 0);
    }

    #[test]
    fn test_clamp_numeric_string_coerces() {
        assert_eq!(clamp_score(&json!({"score": "8"})), 8);
    }

    #[test]
    fn test_clamp_float_truncates() {
        assert_eq!(clamp_score(&json!({"score": 7.9})), 7);
    }

    #[test]
    fn test_clamp_missing_field_defaults_to_zero() {
        assert_eq!(clamp_score(&json!({})), 0);
    }

    #[test]
    fn test_string_field_missing_defaults_empty() {
        assert_eq!(string_field(&json!({}), "strengths"), "");
    }

    #[test]
    fn test_reconcile_plain_object() {
        let obj = reconcile_object(r#"{"score": 5, "strengths": "ok"}"#).unwrap();
        assert_eq!(obj["score"], 5);
    }

    #[test]
    fn test_reconcile_fenced_and_padded() {
        let raw = "\n  Sure! Here is the evaluation:\n```json\n{\"score\": 9}\n```\n";
        let obj = reconcile_object(raw).unwrap();
        assert_eq!(obj["score"], 9);
    }

    #[test]
    fn test_reconcile_bare_fence() {
        let raw = "```\n{\"score\": 3}\n```";
        let obj = reconcile_object(raw).unwrap();
        assert_eq!(obj["score"], 3);
    }

    #[test]
    fn test_reconcile_trailing_commentary() {
        let raw = "{\"score\": 2}\nLet me know if you need anything else!";
        let obj = reconcile_object(raw).unwrap();
        assert_eq!(obj["score"], 2);
    }

    #[test]
    fn test_no_delimiters_is_extraction_error() {
        let err = reconcile_object("I cannot evaluate this answer.").unwrap_err();
        assert!(matches!(err, ReconcileError::Extraction { .. }));
        assert_eq!(err.raw(), "I cannot evaluate this answer.");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = reconcile_object("{invalid}").unwrap_err();
        assert!(matches!(err, ReconcileError::Parse { .. }));
        assert_eq!(err.raw(), "{invalid}");
    }

    #[test]
    fn test_unclosed_object_is_parse_error() {
        // '{' present but never closed — classifies as parse, not extraction.
        let err = reconcile_object("{invalid").unwrap_err();
        assert!(matches!(err, ReconcileError::Parse { .. }));
    }
}
