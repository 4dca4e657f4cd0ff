//! Binary protocol reader.

use thrift_wire_buffers::Reader;

use crate::constants::{WireType, MAX_SKIP_DEPTH, STOP, VERSION_1, VERSION_MASK};
use crate::error::ProtocolError;
use crate::message::{MessageHeader, MessageType};

/// Result of [`BinaryReader::read_field_begin`]: the next field's header, or
/// the sentinel closing the struct's field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHeader {
    Stop,
    Field { ty: WireType, id: i16 },
}

/// Streams primitives and framing markers out of one octet stream.
///
/// All reads advance a cursor and fail with a [`ProtocolError`] on truncated
/// input or an invalid type tag. One reader serves one decode operation;
/// nothing is shared between readers.
pub struct BinaryReader<'a> {
    reader: Reader<'a>,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    // ------------------------------------------------------------- framing

    /// Reads a message envelope, accepting both the strict framing
    /// (`VERSION_1 | type`, name, seqid) and the pre-strict framing that
    /// leads with a non-negative name length.
    pub fn read_message_begin(&mut self) -> Result<MessageHeader, ProtocolError> {
        let first = self.reader.i32()?;
        if first < 0 {
            let word = first as u32;
            if word & VERSION_MASK != VERSION_1 {
                return Err(ProtocolError::BadVersion(word));
            }
            let ty = MessageType::from_tag((word & 0xff) as u8)?;
            let name = self.read_string()?;
            let seqid = self.reader.i32()?;
            Ok(MessageHeader { name, ty, seqid })
        } else {
            let name = self.read_utf8(first as usize)?;
            let ty = MessageType::from_tag(self.reader.u8()?)?;
            let seqid = self.reader.i32()?;
            Ok(MessageHeader { name, ty, seqid })
        }
    }

    pub fn read_message_end(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    pub fn read_struct_begin(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    pub fn read_struct_end(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Reads the next field header: a type tag, and unless it is STOP, the
    /// 16-bit field id.
    pub fn read_field_begin(&mut self) -> Result<FieldHeader, ProtocolError> {
        let tag = self.reader.u8()?;
        if tag == STOP {
            return Ok(FieldHeader::Stop);
        }
        let ty = WireType::from_tag(tag).ok_or(ProtocolError::InvalidTypeTag(tag))?;
        let id = self.reader.i16()?;
        Ok(FieldHeader::Field { ty, id })
    }

    pub fn read_field_end(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Reads a list header: element type and count.
    pub fn read_list_begin(&mut self) -> Result<(WireType, usize), ProtocolError> {
        let tag = self.reader.u8()?;
        let ty = WireType::from_tag(tag).ok_or(ProtocolError::InvalidTypeTag(tag))?;
        Ok((ty, self.read_count()?))
    }

    pub fn read_list_end(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Reads a set header: element type and count.
    pub fn read_set_begin(&mut self) -> Result<(WireType, usize), ProtocolError> {
        self.read_list_begin()
    }

    pub fn read_set_end(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    /// Reads a map header: key type, value type, and pair count.
    pub fn read_map_begin(&mut self) -> Result<(WireType, WireType, usize), ProtocolError> {
        let ktag = self.reader.u8()?;
        let kty = WireType::from_tag(ktag).ok_or(ProtocolError::InvalidTypeTag(ktag))?;
        let vtag = self.reader.u8()?;
        let vty = WireType::from_tag(vtag).ok_or(ProtocolError::InvalidTypeTag(vtag))?;
        Ok((kty, vty, self.read_count()?))
    }

    pub fn read_map_end(&mut self) -> Result<(), ProtocolError> {
        Ok(())
    }

    // ---------------------------------------------------------- primitives

    pub fn read_bool(&mut self) -> Result<bool, ProtocolError> {
        Ok(self.reader.u8()? != 0)
    }

    pub fn read_byte(&mut self) -> Result<i8, ProtocolError> {
        Ok(self.reader.i8()?)
    }

    pub fn read_i16(&mut self) -> Result<i16, ProtocolError> {
        Ok(self.reader.i16()?)
    }

    pub fn read_i32(&mut self) -> Result<i32, ProtocolError> {
        Ok(self.reader.i32()?)
    }

    pub fn read_i64(&mut self) -> Result<i64, ProtocolError> {
        Ok(self.reader.i64()?)
    }

    pub fn read_double(&mut self) -> Result<f64, ProtocolError> {
        Ok(self.reader.f64()?)
    }

    /// Reads a length-prefixed raw byte value.
    pub fn read_binary(&mut self) -> Result<Vec<u8>, ProtocolError> {
        let length = self.read_count()?;
        Ok(self.reader.buf(length)?.to_vec())
    }

    /// Reads a length-prefixed UTF-8 string value.
    pub fn read_string(&mut self) -> Result<String, ProtocolError> {
        let length = self.read_count()?;
        self.read_utf8(length)
    }

    fn read_utf8(&mut self, length: usize) -> Result<String, ProtocolError> {
        let bytes = self.reader.buf(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ProtocolError::InvalidUtf8)
    }

    /// Reads a signed 4-byte count or length prefix, rejecting negatives.
    fn read_count(&mut self) -> Result<usize, ProtocolError> {
        let n = self.reader.i32()?;
        if n < 0 {
            return Err(ProtocolError::NegativeLength(n));
        }
        Ok(n as usize)
    }

    // ---------------------------------------------------------------- skip

    /// Consumes and discards one value of the given wire type, recursing
    /// through nested structs and containers. Used for unknown and
    /// type-mismatched fields; failure here is fatal for the stream.
    pub fn skip(&mut self, ty: WireType) -> Result<(), ProtocolError> {
        self.skip_nested(ty, 0)
    }

    fn skip_nested(&mut self, ty: WireType, depth: usize) -> Result<(), ProtocolError> {
        if depth > MAX_SKIP_DEPTH {
            return Err(ProtocolError::DepthLimitExceeded);
        }
        match ty {
            WireType::Bool | WireType::Byte => Ok(self.reader.advance(1)?),
            WireType::I16 => Ok(self.reader.advance(2)?),
            WireType::I32 => Ok(self.reader.advance(4)?),
            WireType::I64 | WireType::Double => Ok(self.reader.advance(8)?),
            WireType::String => {
                let length = self.read_count()?;
                Ok(self.reader.advance(length)?)
            }
            WireType::Struct => {
                self.read_struct_begin()?;
                loop {
                    match self.read_field_begin()? {
                        FieldHeader::Stop => break,
                        FieldHeader::Field { ty, .. } => {
                            self.skip_nested(ty, depth + 1)?;
                            self.read_field_end()?;
                        }
                    }
                }
                self.read_struct_end()
            }
            WireType::Map => {
                let (kty, vty, count) = self.read_map_begin()?;
                for _ in 0..count {
                    self.skip_nested(kty, depth + 1)?;
                    self.skip_nested(vty, depth + 1)?;
                }
                self.read_map_end()
            }
            WireType::Set | WireType::List => {
                let (elem, count) = self.read_list_begin()?;
                for _ in 0..count {
                    self.skip_nested(elem, depth + 1)?;
                }
                self.read_list_end()
            }
        }
    }
}
