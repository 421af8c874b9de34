use serde_json::Value;

use crate::error::{FitcheckError, Result};

/// Check a JSON value against a JSON Schema.
///
/// `null` object members are treated as absent before validation, matching how serde
/// reads an `Option` field. A `null` for a required field is reported as missing.
///
/// All violations are reported together in one `ValidationError`.
pub fn validate_value(schema: &Value, value: &Value) -> Result<()> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| FitcheckError::SchemaError(format!("Invalid JSON Schema: {e}")))?;

    let instance = without_nulls(value);
    let violations: Vec<String> = validator
        .iter_errors(&instance)
        .map(|err| format!("{} at {}", err, location(&err.instance_path.to_string())))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(FitcheckError::ValidationError(violations.join("; ")))
    }
}

fn location(pointer: &str) -> String {
    if pointer.is_empty() { "/".to_string() } else { pointer.to_string() }
}

fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_nulls).collect()),
        other => other.clone(),
    }
}
