//! Form encoding in Stripe's bracket notation.
//!
//! `{"items": [{"price": "p"}], "metadata": {"k": "v"}}` becomes
//! `items[0][price]=p&metadata[k]=v`. Null values are dropped, so optional
//! parameters that are unset never reach the wire.

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::Value;

/// Serialize `params` into an `application/x-www-form-urlencoded` body.
pub fn encode<T: Serialize + ?Sized>(params: &T) -> Result<String> {
    let pairs = to_pairs(params)?;
    Ok(serde_urlencoded::to_string(&pairs)?)
}

/// Flatten `params` into ordered key/value pairs.
pub fn to_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)?;
    let mut pairs = Vec::new();

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                push(&mut pairs, key, &value);
            }
        }
        Value::Null => {}
        other => return Err(anyhow!("form parameters must be an object, got {}", other)),
    }

    Ok(pairs)
}

fn push(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push(pairs, format!("{}[{}]", key, index), item);
            }
        }
        Value::Object(map) => {
            for (field, item) in map {
                push(pairs, format!("{}[{}]", key, field), item);
            }
        }
    }
}
