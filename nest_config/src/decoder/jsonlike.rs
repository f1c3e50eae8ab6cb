//! JSON-superset document parsing.
//!
//! Accepts standard JSON plus bare boolean literals in any case: `true`,
//! `false`, `t` and `f`. Literals inside string values are left alone.

use serde_json::Value;

/// Parse `raw` as a JSON-superset document into an untyped value tree.
///
/// ```
/// use serde_json::json;
///
/// let value = nest_config::parse_document(r#"{"a": [T, false, "t"]}"#)?;
/// assert_eq!(value, json!({"a": [true, false, "t"]}));
/// # Ok::<(), serde_json::Error>(())
/// ```
///
/// # Errors
///
/// Returns the `serde_json` error when the normalized document is not valid
/// JSON.
pub fn parse_document(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&normalize_literals(raw))
}

/// Rewrite bare boolean literals outside strings into canonical JSON.
fn normalize_literals(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in raw.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' || ch == '+' || ch == '-' {
            word.push(ch);
            continue;
        }
        flush_word(&mut word, &mut out);
        if ch == '"' {
            in_string = true;
        }
        out.push(ch);
    }
    flush_word(&mut word, &mut out);
    out
}

fn flush_word(word: &mut String, out: &mut String) {
    match word.to_ascii_lowercase().as_str() {
        "true" | "t" => out.push_str("true"),
        "false" | "f" => out.push_str("false"),
        _ => out.push_str(word),
    }
    word.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("[1, \"b\"]", json!([1, "b"]))]
    #[case("{\"a\":1, \"b\": 2,\"3\":\"c\"}", json!({"a": 1, "b": 2, "3": "c"}))]
    #[case("[[1, 3, 5],[2, 4]]", json!([[1, 3, 5], [2, 4]]))]
    #[case("[TRUE, False, t, F]", json!([true, false, true, false]))]
    #[case("{\"t\": \"f\"}", json!({"t": "f"}))]
    #[case("[\"say \\\"t\\\"\", t]", json!(["say \"t\"", true]))]
    #[case("[1e3, -2.5, null]", json!([1000.0, -2.5, null]))]
    #[case("T", json!(true))]
    fn parses_superset(#[case] raw: &str, #[case] expected: Value) -> Result<()> {
        let parsed = parse_document(raw)?;
        ensure!(parsed == expected, "expected {expected}, got {parsed}");
        Ok(())
    }

    #[rstest]
    #[case("(1,2)")]
    #[case("[yes]")]
    #[case("[1,")]
    #[case("Null")]
    #[case("")]
    fn rejects_invalid_documents(#[case] raw: &str) {
        assert!(parse_document(raw).is_err(), "{raw:?} should not parse");
    }
}
