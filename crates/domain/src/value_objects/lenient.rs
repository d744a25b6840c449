//! Lenient numeric coercion for host-provided fields.
//!
//! Sheet inputs arrive as whatever the host stored: numbers, numeric strings,
//! booleans or nothing at all. Every numeric field goes through these helpers
//! so that a bad value reads as 0 instead of failing the whole preparation pass.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to a finite float, falling back to 0.
pub fn coerce_f64(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Coerce a JSON value to an integer. Fractions truncate toward zero.
pub fn coerce_i32(value: &Value) -> i32 {
    // `as` saturates at the i32 bounds
    coerce_f64(value).trunc() as i32
}

/// `deserialize_with` adapter for integer fields.
pub fn int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_i32(&value))
}

/// `deserialize_with` adapter for float fields.
pub fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// `deserialize_with` adapter for optional float fields; `null` stays `None`.
pub fn opt_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(coerce_f64(&other)),
    })
}

/// `deserialize_with` adapter for equip flags: only a literal `true` counts.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value == Value::Bool(true))
}
