//! Thrift binary protocol struct codec.
//!
//! The schema-driven core that compiler-generated Thrift argument and result
//! structs encode against: big-endian primitive framing, field-id-tagged
//! struct fields terminated by a STOP sentinel, length-prefixed strings and
//! containers, and a decode loop that skips unknown or type-mismatched
//! fields byte-exact — the forward/backward compatibility contract of the
//! binary wire.
//!
//! # Layers
//!
//! - [`BinaryReader`] / [`BinaryWriter`] — primitive and framing codec over
//!   one octet stream.
//! - [`StructSchema`] / [`TypeSchema`] — immutable field tables, built once
//!   per struct shape and shared read-only across calls and threads.
//! - [`decode_struct`] / [`encode_struct`] — the table-driven dispatch loop
//!   replacing per-struct generated read/write methods.
//!
//! # Example
//!
//! ```
//! use thrift_wire::{
//!     decode_from_slice, encode_to_vec, FieldSchema, Strictness, StructSchema, TypeSchema,
//!     Value,
//! };
//!
//! let schema = StructSchema::new(
//!     "get_partitions_by_names_args",
//!     vec![
//!         FieldSchema::optional(1, "db_name", TypeSchema::Str),
//!         FieldSchema::optional(2, "tbl_name", TypeSchema::Str),
//!         FieldSchema::optional(3, "names", TypeSchema::list(TypeSchema::Str)),
//!     ],
//! );
//!
//! let args = schema
//!     .builder()
//!     .set("db_name", Value::from("d1")).unwrap()
//!     .set("tbl_name", Value::from("t1")).unwrap()
//!     .build();
//!
//! let bytes = encode_to_vec(&schema, &args, Strictness::LENIENT).unwrap();
//! let back = decode_from_slice(&schema, &bytes, Strictness::LENIENT).unwrap();
//! assert_eq!(back, args);
//! ```

pub mod binary;
pub mod convert;

mod constants;
mod error;
mod message;
mod schema;
mod struct_codec;
mod value;

pub use binary::{BinaryReader, BinaryWriter, FieldHeader};
pub use constants::{WireType, MAX_SKIP_DEPTH, STOP, VERSION_1, VERSION_MASK};
pub use error::{EncodingError, ProtocolError};
pub use message::{MessageHeader, MessageType};
pub use schema::{FieldSchema, StructBuilder, StructSchema, TypeSchema};
pub use struct_codec::{
    decode_from_slice, decode_struct, encode_struct, encode_to_vec, Strictness,
};
pub use value::{string_list, StructValue, Value};
