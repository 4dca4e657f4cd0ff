//! Thrift binary protocol reader and writer.
//!
//! The wire format, shared by every struct this codec handles:
//!
//! - struct: `[(field-type:1B, field-id:2B, <value>)]* STOP:1B`
//! - string/binary: signed big-endian `length:4B` + bytes
//! - bool: 1B; i16/i32/i64: fixed-width big-endian; double: 8B IEEE-754
//! - list/set: `element-type:1B + count:4B` + elements
//! - map: `key-type:1B + value-type:1B + count:4B` + pairs
//!
//! Struct-begin/end and field-end are zero-byte no-ops kept for framing
//! symmetry with richer protocols.

mod reader;
mod writer;

pub use reader::{BinaryReader, FieldHeader};
pub use writer::BinaryWriter;
