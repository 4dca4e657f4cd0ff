//! Error types for decoding and encoding.

use crate::constants::WireType;
use thiserror::Error;

/// Error raised while decoding a malformed or truncated stream.
///
/// Unknown fields are never a `ProtocolError` — they are skipped as part of
/// the forward-compatibility contract. These errors are fatal for the
/// in-flight call; the codec has no recovery path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid wire type tag 0x{0:02x}")]
    InvalidTypeTag(u8),
    #[error("invalid message type tag 0x{0:02x}")]
    InvalidMessageType(u8),
    #[error("negative length prefix {0}")]
    NegativeLength(i32),
    #[error("string value is not valid UTF-8")]
    InvalidUtf8,
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
    #[error("bad protocol version 0x{0:08x}")]
    BadVersion(u32),
    #[error("required field {0} missing from input")]
    MissingField(String),
}

impl From<thrift_wire_buffers::ReadError> for ProtocolError {
    fn from(_: thrift_wire_buffers::ReadError) -> Self {
        ProtocolError::UnexpectedEof
    }
}

/// Error raised when a value handed to the encoder contradicts the schema.
///
/// Reported before any byte of the offending field reaches the output, so a
/// failed write never leaves a half-encoded struct on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("field {field} does not match declared wire type {expected:?}")]
    TypeMismatch { field: String, expected: WireType },
    #[error("unknown field {0}")]
    UnknownField(String),
    #[error("required field {0} is unset")]
    MissingField(String),
}
