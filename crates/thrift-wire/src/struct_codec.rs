//! Table-driven struct codec: field dispatch loop and struct write.
//!
//! One pair of functions serves every struct shape; the per-struct read/write
//! methods a Thrift compiler would generate reduce to a [`StructSchema`]
//! value fed into [`decode_struct`] / [`encode_struct`].

use crate::binary::{BinaryReader, BinaryWriter, FieldHeader};
use crate::error::{EncodingError, ProtocolError};
use crate::schema::{StructSchema, TypeSchema};
use crate::value::{StructValue, Value};

/// Required-field enforcement policy.
///
/// Lenient by default: required fields are advisory unless the caller opts
/// in, per direction. Unknown-field tolerance on read is not configurable —
/// it is the compatibility contract, not a policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strictness {
    /// Fail `encode_struct` when a required field is unset.
    pub missing_required_on_write: bool,
    /// Fail `decode_struct` when a required field was absent from the wire.
    pub missing_required_on_read: bool,
}

impl Strictness {
    pub const LENIENT: Strictness = Strictness {
        missing_required_on_write: false,
        missing_required_on_read: false,
    };

    pub const STRICT: Strictness = Strictness {
        missing_required_on_write: true,
        missing_required_on_read: true,
    };
}

/// Decodes one struct off the reader.
///
/// Loops over field headers until STOP. A known field id whose observed wire
/// type matches the schema is decoded into its slot; anything else — unknown
/// id, or known id under a foreign type — is skipped byte-exact and
/// discarded. Fields may arrive in any order; fields absent from the wire
/// stay unset. Nothing partially decoded ever escapes: the instance is built
/// locally and returned only on success.
pub fn decode_struct(
    reader: &mut BinaryReader<'_>,
    schema: &StructSchema,
    strictness: Strictness,
) -> Result<StructValue, ProtocolError> {
    reader.read_struct_begin()?;
    let mut out = StructValue::new();
    loop {
        match reader.read_field_begin()? {
            FieldHeader::Stop => break,
            FieldHeader::Field { ty, id } => {
                match schema.field(id) {
                    Some(field) if field.ty.wire_type() == ty => {
                        let value = decode_value(reader, &field.ty, strictness)?;
                        out.set(id, value);
                    }
                    _ => reader.skip(ty)?,
                }
                reader.read_field_end()?;
            }
        }
    }
    reader.read_struct_end()?;
    if strictness.missing_required_on_read {
        for field in schema.fields() {
            if field.required && !out.is_set(field.id) {
                return Err(ProtocolError::MissingField(field.name.clone()));
            }
        }
    }
    Ok(out)
}

/// Decodes one value of the declared type, recursing into containers and
/// nested structs.
fn decode_value(
    reader: &mut BinaryReader<'_>,
    ty: &TypeSchema,
    strictness: Strictness,
) -> Result<Value, ProtocolError> {
    Ok(match ty {
        TypeSchema::Bool => Value::Bool(reader.read_bool()?),
        TypeSchema::I8 => Value::I8(reader.read_byte()?),
        TypeSchema::I16 => Value::I16(reader.read_i16()?),
        TypeSchema::I32 => Value::I32(reader.read_i32()?),
        TypeSchema::I64 => Value::I64(reader.read_i64()?),
        TypeSchema::Double => Value::Double(reader.read_double()?),
        TypeSchema::Str => Value::Str(reader.read_string()?),
        TypeSchema::Bytes => Value::Bytes(reader.read_binary()?),
        TypeSchema::List(elem) => {
            // The observed element tag is ignored in favor of the declared
            // element schema, as generated Thrift readers do.
            let (_, count) = reader.read_list_begin()?;
            let mut items = Vec::with_capacity(count.min(reader.remaining()));
            for _ in 0..count {
                items.push(decode_value(reader, elem, strictness)?);
            }
            reader.read_list_end()?;
            Value::List(items)
        }
        TypeSchema::Set(elem) => {
            let (_, count) = reader.read_set_begin()?;
            let mut items = Vec::with_capacity(count.min(reader.remaining()));
            for _ in 0..count {
                items.push(decode_value(reader, elem, strictness)?);
            }
            reader.read_set_end()?;
            Value::Set(items)
        }
        TypeSchema::Map(key, value) => {
            let (_, _, count) = reader.read_map_begin()?;
            let mut pairs = Vec::with_capacity(count.min(reader.remaining()));
            for _ in 0..count {
                let k = decode_value(reader, key, strictness)?;
                let v = decode_value(reader, value, strictness)?;
                pairs.push((k, v));
            }
            reader.read_map_end()?;
            Value::Map(pairs)
        }
        TypeSchema::Struct(inner) => Value::Struct(decode_struct(reader, inner, strictness)?),
    })
}

/// Encodes one struct onto the writer.
///
/// Emits each *set* field in schema declaration order as field header +
/// typed value; unset fields contribute no bytes at all. Each field is
/// encoded into a scratch buffer first, so a shape mismatch anywhere inside
/// it surfaces as an [`EncodingError`] before a single byte of the field has
/// reached the output.
pub fn encode_struct(
    writer: &mut BinaryWriter,
    schema: &StructSchema,
    value: &StructValue,
    strictness: Strictness,
) -> Result<(), EncodingError> {
    if strictness.missing_required_on_write {
        for field in schema.fields() {
            if field.required && !value.is_set(field.id) {
                return Err(EncodingError::MissingField(field.name.clone()));
            }
        }
    }
    writer.write_struct_begin(schema.name());
    for field in schema.fields() {
        let Some(v) = value.get(field.id) else {
            continue;
        };
        let mut scratch = BinaryWriter::new();
        encode_value(&mut scratch, &field.ty, v, &field.name, strictness)?;
        writer.write_field_begin(&field.name, field.ty.wire_type(), field.id);
        writer.write_raw(&scratch.flush());
        writer.write_field_end();
    }
    writer.write_field_stop();
    writer.write_struct_end();
    Ok(())
}

fn mismatch(field: &str, ty: &TypeSchema) -> EncodingError {
    EncodingError::TypeMismatch {
        field: field.to_string(),
        expected: ty.wire_type(),
    }
}

/// Encodes one value against its declared type, recursing into containers
/// and nested structs. Containers emit their element tags and count first,
/// then each element in iteration order.
fn encode_value(
    writer: &mut BinaryWriter,
    ty: &TypeSchema,
    value: &Value,
    field: &str,
    strictness: Strictness,
) -> Result<(), EncodingError> {
    match (ty, value) {
        (TypeSchema::Bool, Value::Bool(b)) => writer.write_bool(*b),
        (TypeSchema::I8, Value::I8(n)) => writer.write_byte(*n),
        (TypeSchema::I16, Value::I16(n)) => writer.write_i16(*n),
        (TypeSchema::I32, Value::I32(n)) => writer.write_i32(*n),
        (TypeSchema::I64, Value::I64(n)) => writer.write_i64(*n),
        (TypeSchema::Double, Value::Double(f)) => writer.write_double(*f),
        (TypeSchema::Str, Value::Str(s)) => writer.write_string(s),
        (TypeSchema::Bytes, Value::Bytes(b)) => writer.write_binary(b),
        (TypeSchema::List(elem), Value::List(items)) => {
            writer.write_list_begin(elem.wire_type(), items.len());
            for item in items {
                encode_value(writer, elem, item, field, strictness)?;
            }
            writer.write_list_end();
        }
        (TypeSchema::Set(elem), Value::Set(items)) => {
            writer.write_set_begin(elem.wire_type(), items.len());
            for item in items {
                encode_value(writer, elem, item, field, strictness)?;
            }
            writer.write_set_end();
        }
        (TypeSchema::Map(key, value_ty), Value::Map(pairs)) => {
            writer.write_map_begin(key.wire_type(), value_ty.wire_type(), pairs.len());
            for (k, v) in pairs {
                encode_value(writer, key, k, field, strictness)?;
                encode_value(writer, value_ty, v, field, strictness)?;
            }
            writer.write_map_end();
        }
        (TypeSchema::Struct(inner), Value::Struct(sv)) => {
            encode_struct(writer, inner, sv, strictness)?;
        }
        _ => return Err(mismatch(field, ty)),
    }
    Ok(())
}

/// Encodes a struct into a fresh byte vector.
pub fn encode_to_vec(
    schema: &StructSchema,
    value: &StructValue,
    strictness: Strictness,
) -> Result<Vec<u8>, EncodingError> {
    let mut writer = BinaryWriter::new();
    encode_struct(&mut writer, schema, value, strictness)?;
    Ok(writer.flush())
}

/// Decodes a struct from a byte slice, requiring full consumption is *not*
/// part of the contract: trailing bytes belong to the next value on the
/// stream.
pub fn decode_from_slice(
    schema: &StructSchema,
    data: &[u8],
    strictness: Strictness,
) -> Result<StructValue, ProtocolError> {
    let mut reader = BinaryReader::new(data);
    decode_struct(&mut reader, schema, strictness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WireType;
    use crate::schema::FieldSchema;
    use crate::value::string_list;

    fn names_schema() -> StructSchema {
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
    fn roundtrip_all_fields() {
        let schema = names_schema();
        let value = schema
            .builder()
            .set("db_name", Value::from("d1"))
            .unwrap()
            .set("tbl_name", Value::from("t1"))
            .unwrap()
            .set("names", string_list(["p=1", "p=2"]))
            .unwrap()
            .build();
        let bytes = encode_to_vec(&schema, &value, Strictness::LENIENT).unwrap();
        let back = decode_from_slice(&schema, &bytes, Strictness::LENIENT).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn unset_field_is_omitted_and_stays_unset() {
        let schema = names_schema();
        let value = schema
            .builder()
            .set("db_name", Value::from("d1"))
            .unwrap()
            .build();
        let bytes = encode_to_vec(&schema, &value, Strictness::LENIENT).unwrap();
        // One string field (1+2+4+2 bytes) plus STOP.
        assert_eq!(bytes.len(), 10);
        let back = decode_from_slice(&schema, &bytes, Strictness::LENIENT).unwrap();
        assert!(back.is_set(1));
        assert!(!back.is_set(2));
        assert!(!back.is_set(3));
    }

    #[test]
    fn wrong_shape_fails_before_any_field_bytes() {
        let schema = names_schema();
        let mut value = StructValue::new();
        value.set(3, Value::Bool(true)); // declared list<string>
        let mut writer = BinaryWriter::new();
        let err = encode_struct(&mut writer, &schema, &value, Strictness::LENIENT).unwrap_err();
        assert_eq!(
            err,
            EncodingError::TypeMismatch {
                field: "names".to_string(),
                expected: WireType::List,
            }
        );
        // Nothing flushed, not even the field header.
        assert!(writer.is_empty());
    }

    #[test]
    fn wrong_element_shape_fails_mid_list_without_flushing() {
        let schema = names_schema();
        let mut value = StructValue::new();
        value.set(
            3,
            Value::List(vec![Value::Str("ok".into()), Value::I32(9)]),
        );
        let mut writer = BinaryWriter::new();
        assert!(encode_struct(&mut writer, &schema, &value, Strictness::LENIENT).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn required_enforcement_is_opt_in() {
        let schema = StructSchema::new(
            "r",
            vec![FieldSchema::required(1, "must", TypeSchema::I32)],
        );
        let empty = StructValue::new();
        // Lenient: encodes fine, decodes fine.
        let bytes = encode_to_vec(&schema, &empty, Strictness::LENIENT).unwrap();
        assert!(decode_from_slice(&schema, &bytes, Strictness::LENIENT).is_ok());
        // Strict write refuses.
        assert_eq!(
            encode_to_vec(&schema, &empty, Strictness::STRICT).unwrap_err(),
            EncodingError::MissingField("must".to_string())
        );
        // Strict read refuses.
        assert_eq!(
            decode_from_slice(&schema, &bytes, Strictness::STRICT).unwrap_err(),
            ProtocolError::MissingField("must".to_string())
        );
    }

    #[test]
    fn trailing_bytes_left_for_next_value() {
        let schema = names_schema();
        let value = StructValue::new();
        let mut writer = BinaryWriter::new();
        encode_struct(&mut writer, &schema, &value, Strictness::LENIENT).unwrap();
        writer.write_i32(99);
        let data = writer.flush();

        let mut reader = BinaryReader::new(&data);
        decode_struct(&mut reader, &schema, Strictness::LENIENT).unwrap();
        assert_eq!(reader.remaining(), 4);
    }
}
