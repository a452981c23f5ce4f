//! Argument coercion: the parse-don't-trust boundary between raw
//! model-emitted argument strings and typed handler inputs.
//!
//! Any error returned here is local to one tool call; the orchestrator
//! converts it into a tool result string and keeps going.

use serde_json::{json, Map, Value};

use concierge_llm::tool::{ParamSpec, ParamType, ToolSchema};

use super::{currency, password, weather};

const DEFAULT_PASSWORD_LENGTH: i64 = 12;
const MIN_PASSWORD_LENGTH: i64 = 8;
const MAX_PASSWORD_LENGTH: i64 = 128;

/// Validates and converts a raw argument payload against a tool schema.
///
/// Returns the coerced argument object ready to deserialize into the
/// handler's typed input, or a descriptive error message.
pub fn coerce_arguments(raw: &str, schema: &ToolSchema) -> Result<Map<String, Value>, String> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| format!("arguments are not valid JSON: {e}"))?;
    let Value::Object(mut supplied) = parsed else {
        return Err("arguments must be a JSON object".to_string());
    };

    normalize(&schema.name, &mut supplied)?;

    let mut coerced = Map::new();
    for spec in &schema.params {
        match supplied.remove(&spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(format!("'{}' argument required", spec.name));
                }
            }
            Some(value) => {
                coerced.insert(spec.name.clone(), coerce_value(value, spec)?);
            }
        }
    }
    Ok(coerced)
}

/// Domain-specific normalization, applied before the generic per-type
/// pass so handlers only ever see canonical values.
fn normalize(tool: &str, args: &mut Map<String, Value>) -> Result<(), String> {
    match tool {
        password::NAME => {
            if let Some(value) = args.get("length") {
                let length = match integer_of(value) {
                    Some(n) => n.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH),
                    None => DEFAULT_PASSWORD_LENGTH,
                };
                args.insert("length".to_string(), json!(length));
            }
        }
        weather::NAME => {
            let unit = match args.get("unit").and_then(Value::as_str) {
                Some(value) if value.eq_ignore_ascii_case("imperial") => "imperial",
                _ => "metric",
            };
            args.insert("unit".to_string(), json!(unit));
        }
        currency::NAME => {
            for key in ["from_currency", "to_currency"] {
                let Some(value) = args.get(key) else { continue };
                if value.is_null() {
                    continue;
                }
                let code = match value.as_str() {
                    Some(s) => s.trim().to_uppercase(),
                    None => value.to_string(),
                };
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(format!(
                        "'{key}' must be a valid 3-letter ISO 4217 currency code (e.g., USD, JPY)"
                    ));
                }
                args.insert(key.to_string(), json!(code));
            }
        }
        _ => {}
    }
    Ok(())
}

fn coerce_value(value: Value, spec: &ParamSpec) -> Result<Value, String> {
    match spec.kind {
        ParamType::Integer => integer_of(&value)
            .map(|n| json!(n))
            .ok_or_else(|| format!("'{}' must be an integer", spec.name)),
        ParamType::Number => number_of(&value)
            .map(|n| json!(n))
            .ok_or_else(|| format!("'{}' must be a number", spec.name)),
        ParamType::String => {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return Err(format!("'{}' must be a string", spec.name)),
            };
            if let Some(allowed) = &spec.allowed {
                if !allowed.iter().any(|candidate| candidate == &text) {
                    return Err(format!(
                        "'{}' must be one of: {}",
                        spec.name,
                        allowed.join(", ")
                    ));
                }
            }
            Ok(Value::String(text))
        }
        ParamType::Boolean => match value {
            Value::Bool(b) => Ok(json!(b)),
            _ => Err(format!("'{}' must be a boolean", spec.name)),
        },
    }
}

/// Integer interpretation of a JSON value: integers pass through,
/// floats truncate, numeric strings parse. Everything else is not an
/// integer.
fn integer_of(value: &Value) -> Option<i64> {
    match value {
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

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
