//! Binary protocol writer.

use thrift_wire_buffers::Writer;

use crate::constants::{WireType, STOP, VERSION_1};
use crate::message::MessageType;

/// Streams primitives and framing markers into a growing byte buffer.
///
/// The writer emits framing then payload and never validates shapes itself;
/// schema validation happens in the struct codec before any byte of a field
/// reaches this layer.
#[derive(Default)]
pub struct BinaryWriter {
    writer: Writer,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Takes the accumulated bytes, leaving the writer reusable.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    // ------------------------------------------------------------- framing

    /// Writes a strict message envelope: `VERSION_1 | type`, name, seqid.
    pub fn write_message_begin(&mut self, name: &str, ty: MessageType, seqid: i32) {
        self.writer.u32(VERSION_1 | ty.tag() as u32);
        self.write_string(name);
        self.writer.i32(seqid);
    }

    pub fn write_message_end(&mut self) {}

    /// The struct name is advisory and never reaches the binary wire.
    pub fn write_struct_begin(&mut self, _name: &str) {}

    pub fn write_struct_end(&mut self) {}

    /// Writes a field header: type tag + field id. The name is advisory.
    pub fn write_field_begin(&mut self, _name: &str, ty: WireType, id: i16) {
        self.writer.u8(ty.tag());
        self.writer.i16(id);
    }

    pub fn write_field_end(&mut self) {}

    /// Writes the sentinel terminating a struct's field list.
    pub fn write_field_stop(&mut self) {
        self.writer.u8(STOP);
    }

    /// Writes a list header: element type tag + element count.
    pub fn write_list_begin(&mut self, elem: WireType, count: usize) {
        self.writer.u8(elem.tag());
        self.writer.i32(count as i32);
    }

    pub fn write_list_end(&mut self) {}

    /// Writes a set header; identical framing to a list header.
    pub fn write_set_begin(&mut self, elem: WireType, count: usize) {
        self.write_list_begin(elem, count);
    }

    pub fn write_set_end(&mut self) {}

    /// Writes a map header: key type tag + value type tag + pair count.
    pub fn write_map_begin(&mut self, key: WireType, value: WireType, count: usize) {
        self.writer.u8(key.tag());
        self.writer.u8(value.tag());
        self.writer.i32(count as i32);
    }

    pub fn write_map_end(&mut self) {}

    // ---------------------------------------------------------- primitives

    pub fn write_bool(&mut self, val: bool) {
        self.writer.u8(if val { 1 } else { 0 });
    }

    pub fn write_byte(&mut self, val: i8) {
        self.writer.i8(val);
    }

    pub fn write_i16(&mut self, val: i16) {
        self.writer.i16(val);
    }

    pub fn write_i32(&mut self, val: i32) {
        self.writer.i32(val);
    }

    pub fn write_i64(&mut self, val: i64) {
        self.writer.i64(val);
    }

    pub fn write_double(&mut self, val: f64) {
        self.writer.f64(val);
    }

    /// Writes a length-prefixed UTF-8 string value.
    pub fn write_string(&mut self, val: &str) {
        self.write_binary(val.as_bytes());
    }

    /// Writes a length-prefixed raw byte value.
    pub fn write_binary(&mut self, val: &[u8]) {
        self.writer.i32(val.len() as i32);
        self.writer.buf(val);
    }

    /// Appends raw bytes with no framing. Test and transport glue only.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.writer.buf(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_header_layout() {
        let mut w = BinaryWriter::new();
        w.write_field_begin("db_name", WireType::String, 1);
        assert_eq!(w.flush(), [11, 0, 1]);
    }

    #[test]
    fn field_stop_is_single_zero_byte() {
        let mut w = BinaryWriter::new();
        w.write_field_stop();
        assert_eq!(w.flush(), [0]);
    }

    #[test]
    fn string_layout() {
        let mut w = BinaryWriter::new();
        w.write_string("hi");
        assert_eq!(w.flush(), [0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn empty_list_layout() {
        let mut w = BinaryWriter::new();
        w.write_list_begin(WireType::String, 0);
        w.write_list_end();
        assert_eq!(w.flush(), [11, 0, 0, 0, 0]);
    }

    #[test]
    fn map_header_layout() {
        let mut w = BinaryWriter::new();
        w.write_map_begin(WireType::String, WireType::I64, 1);
        assert_eq!(w.flush(), [11, 10, 0, 0, 0, 1]);
    }

    #[test]
    fn struct_framing_is_zero_bytes() {
        let mut w = BinaryWriter::new();
        w.write_struct_begin("anything");
        w.write_field_end();
        w.write_struct_end();
        assert!(w.is_empty());
    }
}
