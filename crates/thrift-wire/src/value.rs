//! Decoded wire values and struct instances.

use indexmap::IndexMap;

/// A decoded wire value.
///
/// Containers own their elements; list, set and map iteration order is the
/// order elements were inserted (and the order they appeared on the wire),
/// never a sorted order. `Str` and `Bytes` share the STRING wire tag — the
/// schema decides which one a field materializes as.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Struct(StructValue),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(n) => Some(*n as i64),
            Value::I16(n) => Some(*n as i64),
            Value::I32(n) => Some(*n as i64),
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

/// Builds a `Value::List` of strings; the shape the metastore args use most.
pub fn string_list<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::List(items.into_iter().map(|s| Value::Str(s.into())).collect())
}

/// A struct instance: a field-id-keyed mapping of present values.
///
/// A field that was never assigned is *unset*, which is distinct from a field
/// holding an empty container. Unset fields are omitted entirely on encode
/// and stay unset after decoding a stream that did not carry them — the
/// binary wire has no null representation, presence is the field-id tag
/// stream itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
    fields: IndexMap<i16, Value>,
}

impl StructValue {
    /// Creates an empty instance with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a field. Assigning twice keeps the last value.
    pub fn set(&mut self, id: i16, value: Value) {
        self.fields.insert(id, value);
    }

    /// Returns the field's value, or `None` when unset.
    pub fn get(&self, id: i16) -> Option<&Value> {
        self.fields.get(&id)
    }

    /// Whether the field was ever assigned.
    pub fn is_set(&self, id: i16) -> bool {
        self.fields.contains_key(&id)
    }

    /// Reverts a field to unset.
    pub fn clear(&mut self, id: i16) {
        self.fields.shift_remove(&id);
    }

    /// Number of set fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over set fields in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (i16, &Value)> {
        self.fields.iter().map(|(id, v)| (*id, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vs_empty_list() {
        let mut v = StructValue::new();
        assert!(!v.is_set(3));
        v.set(3, Value::List(vec![]));
        assert!(v.is_set(3));
        assert_eq!(v.get(3), Some(&Value::List(vec![])));
        v.clear(3);
        assert!(!v.is_set(3));
    }

    #[test]
    fn set_twice_keeps_last() {
        let mut v = StructValue::new();
        v.set(1, Value::from("a"));
        v.set(1, Value::from("b"));
        assert_eq!(v.get(1).and_then(Value::as_str), Some("b"));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn string_list_helper() {
        let v = string_list(["p=1", "p=2"]);
        let items = v.as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_str(), Some("p=1"));
    }
}
