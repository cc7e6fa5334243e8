//! Tolerant JSON recovery for extraction-stage replies.
//!
//! Completion backends wrap JSON in prose or markdown fences more often
//! than not. Rather than demand a clean payload, we scan the reply for
//! the first balanced `{...}` span and decode that.

use tellerchain_types::chain::ExtractionReport;

/// Return the first balanced `{...}` span in `text`.
///
/// The scan honors JSON string syntax: braces inside quoted strings and
/// escaped quotes do not affect nesting depth. Candidate opening braces
/// are tried left to right; a candidate that never balances (truncated
/// output) is skipped in favor of a later complete object.
pub fn first_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    for start in (0..bytes.len()).filter(|&i| bytes[i] == b'{') {
        if let Some(end) = scan_balanced(bytes, start) {
            // Brace positions are ASCII, so these are char boundaries.
            return Some(&text[start..=end]);
        }
    }
    None
}

/// Scan forward from `start` (which must index a `{`) and return the
/// index of the matching closing brace, if the object ever balances.
fn scan_balanced(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decode the first JSON object in `text` as an [`ExtractionReport`].
///
/// Returns `None` when no balanced object exists or the span is not
/// valid JSON. Missing fields and an unrecognized `status` fall back to
/// the report's serde defaults, so a sparse-but-valid object still
/// decodes.
pub fn decode_extraction(text: &str) -> Option<ExtractionReport> {
    let span = first_json_object(text)?;
    serde_json::from_str(span).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellerchain_types::chain::ExtractionStatus;

    #[test]
    fn test_bare_object() {
        assert_eq!(first_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let text = "Here is what I found:\n{\"status\": \"needs_info\"}\nLet me know!";
        assert_eq!(first_json_object(text), Some("{\"status\": \"needs_info\"}"));
    }

    #[test]
    fn test_object_inside_markdown_fence() {
        let text = "```json\n{\"a\": {\"b\": 2}}\n```";
        assert_eq!(first_json_object(text), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"{"note": "use {curly} braces", "n": 1}"#;
        assert_eq!(first_json_object(text), Some(text));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{"note": "she said \"hi\" {twice}"}"#;
        assert_eq!(first_json_object(text), Some(text));
    }

    #[test]
    fn test_unbalanced_candidate_skipped_for_later_object() {
        let text = r#"broken { start ... {"ok": true}"#;
        assert_eq!(first_json_object(text), Some(r#"{"ok": true}"#));
    }

    #[test]
    fn test_first_of_two_objects_wins() {
        let text = r#"{"first": 1} and then {"second": 2}"#;
        assert_eq!(first_json_object(text), Some(r#"{"first": 1}"#));
    }

    #[test]
    fn test_no_object_returns_none() {
        assert_eq!(first_json_object("no json here"), None);
        assert_eq!(first_json_object("only an open { brace"), None);
        assert_eq!(first_json_object(""), None);
    }

    #[test]
    fn test_multibyte_text_around_object() {
        let text = "réponse: {\"clé\": \"café\"} voilà";
        assert_eq!(first_json_object(text), Some("{\"clé\": \"café\"}"));
    }

    #[test]
    fn test_decode_full_report() {
        let text = r#"Sure!
{
    "status": "ready_to_resolve",
    "extracted_data": {"full_name": "Jane Doe"},
    "follow_up_question": null,
    "response_to_user": "Thanks, Jane."
}"#;
        let report = decode_extraction(text).unwrap();
        assert_eq!(report.status, ExtractionStatus::ReadyToResolve);
        assert_eq!(report.extracted_data["full_name"], "Jane Doe");
        assert_eq!(report.follow_up_question, None);
        assert_eq!(report.response_to_user.as_deref(), Some("Thanks, Jane."));
    }

    #[test]
    fn test_decode_sparse_object_uses_defaults() {
        let report = decode_extraction(r#"{"status": "needs_info"}"#).unwrap();
        assert_eq!(report.status, ExtractionStatus::NeedsInfo);
        assert!(report.extracted_data.is_empty());
        assert_eq!(report.response_to_user, None);
    }

    #[test]
    fn test_decode_invalid_json_in_braces() {
        // Balanced braces but not JSON.
        assert!(decode_extraction("{not valid json}").is_none());
    }

    #[test]
    fn test_decode_without_object() {
        assert!(decode_extraction("I could not produce JSON, sorry.").is_none());
    }
}
