use serde_json::Value;

/// Canonical text for a field value, used in match labels and comparison logs.
///
/// Total: `null` for null, strings verbatim, JSON text for everything else.
pub fn serialize_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

/// [`serialize_value`] for a possibly absent field; absent renders as `null`.
pub fn serialize_field(value: Option<&Value>) -> String {
    value.map(serialize_value).unwrap_or_else(|| "null".to_string())
}

/// Text used for similarity scoring. Absent and null fields are empty.
pub fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => serialize_value(v),
    }
}

/// True for absent, null and empty-string values.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Numeric view of a value. Booleans and numeric-looking strings are not numbers.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}
