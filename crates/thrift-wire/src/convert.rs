//! Lossy JSON projection of decoded values, for diagnostics and logging.
//!
//! The projection is human-oriented and one-way: bytes render as hex, maps
//! whose keys are not strings render as arrays of pairs, and struct fields
//! render under their schema names (or their ids, when no schema is at
//! hand). Nothing here participates in the wire contract.

use serde_json::{json, Map, Number, Value as JsonValue};

use crate::schema::StructSchema;
use crate::value::{StructValue, Value};

/// Projects a decoded value to JSON.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I8(n) => json!(*n),
        Value::I16(n) => json!(*n),
        Value::I32(n) => json!(*n),
        Value::I64(n) => json!(*n),
        Value::Double(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::Bytes(b) => JsonValue::String(hex(b)),
        Value::List(items) | Value::Set(items) => {
            JsonValue::Array(items.iter().map(value_to_json).collect())
        }
        Value::Map(pairs) => {
            if pairs.iter().all(|(k, _)| matches!(k, Value::Str(_))) {
                let mut out = Map::new();
                for (k, v) in pairs {
                    if let Value::Str(key) = k {
                        out.insert(key.clone(), value_to_json(v));
                    }
                }
                JsonValue::Object(out)
            } else {
                JsonValue::Array(
                    pairs
                        .iter()
                        .map(|(k, v)| json!([value_to_json(k), value_to_json(v)]))
                        .collect(),
                )
            }
        }
        Value::Struct(sv) => anonymous_struct_to_json(sv),
    }
}

/// Projects a struct instance to JSON with schema field names as keys.
/// Unset fields are absent from the output, matching their wire presence.
pub fn struct_to_json(schema: &StructSchema, value: &StructValue) -> JsonValue {
    let mut out = Map::new();
    for field in schema.fields() {
        if let Some(v) = value.get(field.id) {
            out.insert(field.name.clone(), value_to_json(v));
        }
    }
    JsonValue::Object(out)
}

fn anonymous_struct_to_json(value: &StructValue) -> JsonValue {
    let mut out = Map::new();
    for (id, v) in value.iter() {
        out.insert(id.to_string(), value_to_json(v));
    }
    JsonValue::Object(out)
}

fn hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
