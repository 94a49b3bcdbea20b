//! Dot-separated key access over serde-serializable values.
//!
//! `get("storage.namespace")` walks nested objects; `set` parses the new value
//! according to the type of the value currently stored under the key.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn assign(root: &mut Value, key: &str, value: &str) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if key.is_empty() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            current = current.get_mut(part).ok_or_else(unknown)?;
            continue;
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(part).ok_or_else(unknown)?;
        let new_value = match existing {
            Value::Bool(_) => Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            Value::Object(_) | Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => Value::String(value.into()),
        };
        obj.insert(part.to_string(), new_value);
        return Ok(());
    }
    Err(unknown())
}

/// Read the value under `key` as a display string.
pub fn get<T: Serialize>(target: &T, key: &str) -> Option<String> {
    let json = serde_json::to_value(target).ok()?;
    match lookup(&json, key)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Return a copy of `target` with `key` replaced by `value`.
///
/// The result goes back through deserialization, so values the target type
/// rejects (an unknown enum variant, say) fail here.
pub fn set<T: Serialize + DeserializeOwned>(
    target: &T,
    key: &str,
    value: &str,
) -> Result<T, ConfigError> {
    let mut json = serde_json::to_value(target).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    assign(&mut json, key, value)?;
    serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
