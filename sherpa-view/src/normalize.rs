//! Recovery of structured-query fragments from LLM tool-call output.
//!
//! The backend forwards whatever its tool chain produced, so a fragment such
//! as a Mongo filter may arrive JSON-encoded inside a string (sometimes more
//! than once) and/or wrapped in `output` / `message` / `content` envelopes.
//! [`normalize_fragment`] peels both until the value stops changing and
//! renders what is left.

use serde_json::Value;
use tracing::debug;

/// Envelope fields descended through, in this order, on every pass.
pub const WRAPPER_KEYS: [&str; 3] = ["output", "message", "content"];

/// Upper bound on unwrap passes. Real payloads settle in one to three.
pub const MAX_UNWRAP_PASSES: usize = 10;

/// Parses `value` as JSON when it is a string; anything else, or a string
/// that is not valid JSON, is returned unchanged.
pub fn try_parse(value: Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Descends through [`WRAPPER_KEYS`] in order. A missing key is skipped and
/// the next key is still tried against the current value.
pub fn unwrap_envelopes(value: Value) -> Value {
    let mut current = value;
    for key in WRAPPER_KEYS {
        current = match current {
            Value::Object(mut map) => match map.remove(key) {
                Some(child) => child,
                None => Value::Object(map),
            },
            other => other,
        };
    }
    current
}

/// Renders a value for display: objects and arrays as 2-space indented JSON,
/// strings as-is, other scalars as their JSON text (`null`, `42`, `true`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => pretty_json(value),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

/// Indented JSON text; `Value` serialization cannot fail, the fallback only
/// keeps this infallible.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Recovers the innermost meaningful value of `raw` and renders it.
///
/// Each pass parses a string as JSON (if it is one) and then unwraps the
/// envelope fields. Passes repeat while they change the value and the value
/// is still a string, capped at [`MAX_UNWRAP_PASSES`]. A last parse attempt
/// follows, then [`display_value`].
///
/// Never fails: malformed input degrades to its plain string form.
pub fn normalize_fragment(raw: &Value) -> String {
    let mut current = raw.clone();

    for pass in 1..=MAX_UNWRAP_PASSES {
        let prev = current.clone();
        current = unwrap_envelopes(try_parse(current));

        if current == prev || !current.is_string() {
            debug!(passes = pass, "fragment settled");
            break;
        }
    }

    display_value(&try_parse(current))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pretty(v: Value) -> String {
        serde_json::to_string_pretty(&v).unwrap()
    }

    #[test]
    fn unwraps_nested_envelope_with_encoded_payload() {
        let raw = json!({"output": {"message": {"content": "{\"a\":1}"}}});
        assert_eq!(normalize_fragment(&raw), pretty(json!({"a": 1})));
        assert_eq!(normalize_fragment(&raw), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize_fragment(&json!("hello")), "hello");
        assert_eq!(normalize_fragment(&json!("")), "");
        assert_eq!(normalize_fragment(&json!("{not json")), "{not json");
    }

    #[test]
    fn bare_content_array_renders_as_json_not_joined() {
        let raw = json!({"content": [{"a": 1}, "raw text"]});
        let out = normalize_fragment(&raw);
        assert_eq!(out, pretty(json!([{"a": 1}, "raw text"])));
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn missing_wrappers_are_skipped() {
        // `output` absent, `message` present, `content` absent inside it.
        let raw = json!({"message": {"$and": [{"lang": "ts"}]}});
        assert_eq!(normalize_fragment(&raw), pretty(json!({"$and": [{"lang": "ts"}]})));

        // Only `content` present, nested under nothing else.
        let raw = json!({"content": "{\"source_file\":{\"$regex\":\"auth\"}}"});
        assert_eq!(
            normalize_fragment(&raw),
            pretty(json!({"source_file": {"$regex": "auth"}}))
        );
    }

    #[test]
    fn double_encoded_strings_are_peeled() {
        let once = json!({"pattern": "src/**/*.ts"}).to_string();
        let twice = Value::String(once.clone()).to_string();
        let thrice = Value::String(twice.clone()).to_string();
        let expected = pretty(json!({"pattern": "src/**/*.ts"}));

        assert_eq!(normalize_fragment(&Value::String(once)), expected);
        assert_eq!(normalize_fragment(&Value::String(twice)), expected);
        assert_eq!(normalize_fragment(&Value::String(thrice)), expected);
    }

    #[test]
    fn string_encoded_envelope_is_unwrapped() {
        let inner = json!({"message": {"content": "{\"kind\":\"Method\"}"}}).to_string();
        let raw = json!({"output": inner});
        assert_eq!(normalize_fragment(&raw), pretty(json!({"kind": "Method"})));
    }

    #[test]
    fn stringified_input_renders_identically() {
        let samples = [
            json!({"output": {"message": {"content": "{\"a\":1}"}}}),
            json!({"content": [{"a": 1}, "raw text"]}),
            json!({"b": [1, 2, {"c": null}], "a": "x"}),
            json!("hello"),
            json!("{\"a\":1}"),
            json!([1, "two"]),
            json!(42),
            json!(true),
            json!(null),
        ];
        for v in samples {
            let encoded = Value::String(v.to_string());
            assert_eq!(normalize_fragment(&v), normalize_fragment(&encoded), "value: {v}");
        }
    }

    #[test]
    fn scalars_render_as_json_text() {
        assert_eq!(normalize_fragment(&json!(true)), "true");
        assert_eq!(normalize_fragment(&json!(false)), "false");
        assert_eq!(normalize_fragment(&json!(42)), "42");
        assert_eq!(normalize_fragment(&json!(null)), "null");
        assert_eq!(normalize_fragment(&json!("true")), "true");
        assert_eq!(normalize_fragment(&json!({"content": 7})), "7");
    }

    #[test]
    fn key_order_is_preserved() {
        let raw = json!({"content": "{\"zeta\":1,\"alpha\":2}"});
        let out = normalize_fragment(&raw);
        assert!(out.find("zeta").unwrap() < out.find("alpha").unwrap());
    }

    #[test]
    fn deep_encoding_stops_at_pass_cap() {
        let mut v = json!({"x": 1});
        for _ in 0..(MAX_UNWRAP_PASSES + 5) {
            v = Value::String(v.to_string());
        }
        // Must terminate; the leftover is still an encoded string.
        let out = normalize_fragment(&v);
        assert!(out.starts_with('"'));
    }
}
