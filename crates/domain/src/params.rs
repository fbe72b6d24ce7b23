//! Parameter strings attached to scenario steps.
//!
//! Content authors write step parameters either as a compact `key:value` list
//! (`"type:battle, enemy:goblin_squad, hp:50"`) or as an inline JSON object.
//! Both forms become the same string-keyed map of JSON values.

use serde_json::{Map, Number, Value};

/// Parsed step parameters.
pub type ParamMap = Map<String, Value>;

/// Parse a parameter string.
///
/// - Absent or blank input yields an empty map.
/// - Input starting with `{` is parsed as a JSON object. Malformed JSON, or
///   JSON that is not an object, is logged and yields an empty map.
/// - Otherwise the input is split on `,` into `key:value` pairs. Only the
///   first `:` separates key from value, so values may contain colons.
///   Segments without a `:` or with an empty key are skipped.
/// - A value that parses fully as a finite number becomes a JSON number
///   (integer when possible); anything else stays as the trimmed string.
pub fn parse_params(input: Option<&str>) -> ParamMap {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return ParamMap::new();
    };

    if raw.starts_with('{') {
        return match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "Parameter JSON is not an object");
                ParamMap::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, input = raw, "Failed to parse parameter JSON");
                ParamMap::new()
            }
        };
    }

    let mut params = ParamMap::new();
    for segment in raw.split(',') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        params.insert(key.to_string(), parse_scalar(value.trim()));
    }
    params
}

fn parse_scalar(value: &str) -> Value {
    if value.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(int) = value.parse::<i64>() {
        return Value::Number(int.into());
    }
    match value.parse::<f64>().ok().and_then(Number::from_f64) {
        // from_f64 rejects NaN and infinities
        Some(number) => Value::Number(number),
        None => Value::String(value.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
