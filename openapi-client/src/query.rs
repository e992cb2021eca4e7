//! Flattening of request structs into the RPC query map.
//!
//! Objects contribute their (already PascalCase) keys, list elements are
//! numbered from 1 (`Tag.1.Key`), and nulls are dropped.

use crate::error::RpcError;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn flatten<T: Serialize + ?Sized>(request: &T) -> Result<BTreeMap<String, String>, RpcError> {
    let value = serde_json::to_value(request)?;
    let mut out = BTreeMap::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                walk(&key, value, &mut out);
            }
        }
        Value::Null => {}
        other => {
            return Err(RpcError::Config(format!(
                "request must serialize to an object, got {}",
                other
            )))
        }
    }
    Ok(out)
}

fn walk(prefix: &str, value: Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s);
        }
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                walk(&format!("{}.{}", prefix, index + 1), item, out);
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                walk(&format!("{}.{}", prefix, key), value, out);
            }
        }
    }
}
