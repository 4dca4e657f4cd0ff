//! Thrift binary protocol constants and wire type tags.

/// Strict message framing version word: `VERSION_1 | message-type`.
pub const VERSION_1: u32 = 0x8001_0000;

/// Mask selecting the version bits of a strict message header.
pub const VERSION_MASK: u32 = 0xffff_0000;

/// Field-type tag terminating a struct's field list.
pub const STOP: u8 = 0x00;

/// Maximum nesting depth tolerated while skipping unknown values.
///
/// A malicious stream can declare arbitrarily deep nested containers; the
/// recursive skip bails out past this depth instead of exhausting the stack.
pub const MAX_SKIP_DEPTH: usize = 64;

/// On-the-wire type tag of a field or container element.
///
/// These are the Thrift `TType` constants minus STOP (which is a framing
/// sentinel, see [`crate::FieldHeader::Stop`]) and VOID (which never appears
/// in field position on the binary wire). STRING doubles as the tag for raw
/// binary values; the schema decides which of the two a field decodes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

impl WireType {
    /// Maps a raw tag byte to a wire type, or `None` for invalid tags.
    pub fn from_tag(tag: u8) -> Option<WireType> {
        Some(match tag {
            2 => WireType::Bool,
            3 => WireType::Byte,
            4 => WireType::Double,
            6 => WireType::I16,
            8 => WireType::I32,
            10 => WireType::I64,
            11 => WireType::String,
            12 => WireType::Struct,
            13 => WireType::Map,
            14 => WireType::Set,
            15 => WireType::List,
            _ => return None,
        })
    }

    /// The raw tag byte emitted on the wire.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        for tag in 0u8..=255 {
            if let Some(ty) = WireType::from_tag(tag) {
                assert_eq!(ty.tag(), tag);
            }
        }
    }

    #[test]
    fn stop_and_void_are_not_wire_types() {
        assert_eq!(WireType::from_tag(0), None);
        assert_eq!(WireType::from_tag(1), None);
    }
}
