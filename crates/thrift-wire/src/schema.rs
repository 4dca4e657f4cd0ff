//! Struct schema descriptors.
//!
//! A [`StructSchema`] is the table-driven replacement for the read/write
//! methods a Thrift compiler would generate per struct: one immutable
//! descriptor built once, shared read-only across every encode and decode.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::WireType;
use crate::error::EncodingError;
use crate::value::{StructValue, Value};

/// Recursive type descriptor for a field or container element.
#[derive(Debug, Clone)]
pub enum TypeSchema {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    Str,
    Bytes,
    List(Box<TypeSchema>),
    Set(Box<TypeSchema>),
    Map(Box<TypeSchema>, Box<TypeSchema>),
    Struct(Arc<StructSchema>),
}

impl TypeSchema {
    /// The wire tag this type encodes under.
    pub fn wire_type(&self) -> WireType {
        match self {
            TypeSchema::Bool => WireType::Bool,
            TypeSchema::I8 => WireType::Byte,
            TypeSchema::I16 => WireType::I16,
            TypeSchema::I32 => WireType::I32,
            TypeSchema::I64 => WireType::I64,
            TypeSchema::Double => WireType::Double,
            TypeSchema::Str | TypeSchema::Bytes => WireType::String,
            TypeSchema::List(_) => WireType::List,
            TypeSchema::Set(_) => WireType::Set,
            TypeSchema::Map(_, _) => WireType::Map,
            TypeSchema::Struct(_) => WireType::Struct,
        }
    }

    /// Shorthand for `List(Box::new(elem))`.
    pub fn list(elem: TypeSchema) -> TypeSchema {
        TypeSchema::List(Box::new(elem))
    }

    /// Shorthand for `Set(Box::new(elem))`.
    pub fn set(elem: TypeSchema) -> TypeSchema {
        TypeSchema::Set(Box::new(elem))
    }

    /// Shorthand for `Map(Box::new(key), Box::new(value))`.
    pub fn map(key: TypeSchema, value: TypeSchema) -> TypeSchema {
        TypeSchema::Map(Box::new(key), Box::new(value))
    }
}

/// One field descriptor of a struct schema.
///
/// The field id uniquely identifies the field on the wire and across protocol
/// versions; the name is for diagnostics and the builder API only and is
/// never consulted while decoding.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub id: i16,
    pub name: String,
    pub ty: TypeSchema,
    pub required: bool,
}

impl FieldSchema {
    /// An optional field (the default in evolved Thrift IDLs).
    pub fn optional(id: i16, name: &str, ty: TypeSchema) -> FieldSchema {
        FieldSchema {
            id,
            name: name.to_string(),
            ty,
            required: false,
        }
    }

    /// A required field; enforcement is governed by [`crate::Strictness`].
    pub fn required(id: i16, name: &str, ty: TypeSchema) -> FieldSchema {
        FieldSchema {
            id,
            name: name.to_string(),
            ty,
            required: true,
        }
    }
}

/// Ordered, immutable field table of one struct shape.
///
/// Field order is declaration order and drives the encode order. The id
/// lookup table is built once at construction; schemas are meant to be
/// wrapped in an [`Arc`] and shared across threads.
#[derive(Debug)]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldSchema>,
    by_id: HashMap<i16, usize>,
}

impl StructSchema {
    /// Builds a schema from declared fields.
    ///
    /// # Panics
    ///
    /// Panics when two fields share an id — duplicate ids cannot be
    /// represented on the wire and indicate a broken schema definition.
    pub fn new(name: &str, fields: Vec<FieldSchema>) -> StructSchema {
        let mut by_id = HashMap::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let prev = by_id.insert(field.id, index);
            assert!(
                prev.is_none(),
                "duplicate field id {} in struct {}",
                field.id,
                name
            );
        }
        StructSchema {
            name: name.to_string(),
            fields,
            by_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks a field up by wire id.
    pub fn field(&self, id: i16) -> Option<&FieldSchema> {
        self.by_id.get(&id).map(|&index| &self.fields[index])
    }

    /// Resolves a field name to its wire id.
    pub fn field_id(&self, name: &str) -> Option<i16> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.id)
    }

    /// Looks a field up by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Starts a name-keyed builder for an instance of this schema.
    pub fn builder(&self) -> StructBuilder<'_> {
        StructBuilder {
            schema: self,
            value: StructValue::new(),
        }
    }
}

/// Name-keyed construction of a [`StructValue`].
///
/// The typed stand-in for dynamic initializer maps: unknown names fail
/// eagerly instead of being dropped on the floor.
#[derive(Debug)]
pub struct StructBuilder<'a> {
    schema: &'a StructSchema,
    value: StructValue,
}

impl StructBuilder<'_> {
    /// Assigns a field by name.
    pub fn set(mut self, name: &str, value: Value) -> Result<Self, EncodingError> {
        let id = self
            .schema
            .field_id(name)
            .ok_or_else(|| EncodingError::UnknownField(name.to_string()))?;
        self.value.set(id, value);
        Ok(self)
    }

    pub fn build(self) -> StructValue {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructSchema {
        StructSchema::new(
            "get_partitions_by_names_args",
            vec![
                FieldSchema::optional(1, "db_name", TypeSchema::Str),
                FieldSchema::optional(2, "tbl_name", TypeSchema::Str),
                FieldSchema::optional(3, "names", TypeSchema::list(TypeSchema::Str)),
            ],
        )
    }

    #[test]
    fn lookup_by_id_and_name() {
        let schema = sample();
        assert_eq!(schema.field(2).unwrap().name, "tbl_name");
        assert_eq!(schema.field_id("names"), Some(3));
        assert!(schema.field(9).is_none());
        assert_eq!(schema.field_id("nope"), None);
    }

    #[test]
    fn builder_rejects_unknown_name() {
        let schema = sample();
        let err = schema.builder().set("nope", Value::Bool(true)).unwrap_err();
        assert_eq!(err, EncodingError::UnknownField("nope".to_string()));
    }

    #[test]
    fn builder_sets_by_name() {
        let schema = sample();
        let v = schema
            .builder()
            .set("db_name", Value::from("d1"))
            .unwrap()
            .build();
        assert_eq!(v.get(1).and_then(Value::as_str), Some("d1"));
        assert!(!v.is_set(2));
    }

    #[test]
    #[should_panic(expected = "duplicate field id")]
    fn duplicate_field_id_panics() {
        StructSchema::new(
            "bad",
            vec![
                FieldSchema::optional(1, "a", TypeSchema::Bool),
                FieldSchema::optional(1, "b", TypeSchema::Bool),
            ],
        );
    }

    #[test]
    fn container_wire_types() {
        assert_eq!(
            TypeSchema::map(TypeSchema::Str, TypeSchema::I64).wire_type(),
            WireType::Map
        );
        assert_eq!(TypeSchema::set(TypeSchema::I32).wire_type(), WireType::Set);
        assert_eq!(TypeSchema::Bytes.wire_type(), WireType::String);
    }
}
