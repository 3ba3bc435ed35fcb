//! Tolerant record parsing
//!
//! Source files are hand-written JSON arrays of location records and often
//! carry trailing commas. One normalization pass removes any comma that is
//! followed (after optional whitespace) by a closing `]` or `}` before the
//! structural parse.

use crate::Record;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A source file's content was not valid JSON after normalization
#[derive(Debug, Error)]
#[error("Failed to parse {}: {}", path.display(), source)]
pub struct ParseError {
    /// Path of the offending source file
    pub path: PathBuf,
    /// Underlying decode failure
    #[source]
    pub source: serde_json::Error,
}

/// Remove commas that sit directly before a closing `]` or `}`.
///
/// Applied globally, without tracking string context, matching the original
/// data format's tolerance for hand-written trailing commas.
pub fn normalize_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == ']' || chars[j] == '}') {
                // Drop the comma, keep the whitespace
                i += 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Decode one source file's contents into its ordered record sequence.
///
/// A top-level array yields its elements in order. A document that parses
/// but is not an array contributes zero records (warning, not an error).
/// Content that is not valid JSON after normalization is a `ParseError`;
/// callers treat that as "this file contributed nothing" and continue.
pub fn parse_records(path: &Path, contents: &str) -> Result<Vec<Record>, ParseError> {
    let normalized = normalize_trailing_commas(contents.trim());
    let value: Value = serde_json::from_str(&normalized).map_err(|source| ParseError {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        _ => {
            tracing::warn!(
                path = %path.display(),
                "Source file is not a JSON array, contributing no records"
            );
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trailing_comma_before_bracket_is_removed() {
        assert_eq!(normalize_trailing_commas(r#"[{"a":1},]"#), r#"[{"a":1}]"#);
    }

    #[test]
    fn test_trailing_comma_before_brace_is_removed() {
        assert_eq!(
            normalize_trailing_commas(r#"[{"a":1,}]"#),
            r#"[{"a":1}]"#
        );
    }

    #[test]
    fn test_whitespace_between_comma_and_bracket() {
        assert_eq!(
            normalize_trailing_commas("[1, 2,  \n ]"),
            "[1, 2  \n ]"
        );
    }

    #[test]
    fn test_valid_json_passes_through() {
        let input = r#"[{"a": 1}, {"b": 2}]"#;
        assert_eq!(normalize_trailing_commas(input), input);
    }

    #[test]
    fn test_trailing_comma_array_parses_to_one_record() {
        let records = parse_records(Path::new("x.json"), r#"[{"a":1},]"#).unwrap();
        assert_eq!(records, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_nested_trailing_commas_parse() {
        let records = parse_records(
            Path::new("x.json"),
            "[\n  {\"name\": \"pier\", \"tags\": [\"sea\", \"wood\",], },\n]",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "pier");
    }

    #[test]
    fn test_order_is_preserved() {
        let records =
            parse_records(Path::new("x.json"), r#"[{"i":0},{"i":1},{"i":2}]"#).unwrap();
        let indices: Vec<i64> = records.iter().map(|r| r["i"].as_i64().unwrap()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_other_malformations_are_parse_errors() {
        let err = parse_records(Path::new("bad.json"), r#"[{"a": 1"#).unwrap_err();
        assert!(err.path.ends_with("bad.json"));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_empty_array_yields_zero_records() {
        let records = parse_records(Path::new("x.json"), "[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_non_array_document_yields_zero_records() {
        let records = parse_records(Path::new("x.json"), r#"{"a": 1}"#).unwrap();
        assert!(records.is_empty());
    }
}
