//! Binary buffer utilities for thrift-wire.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! All multi-byte accessors are big-endian, matching the Thrift binary
//! protocol. Every read is bounds-checked and reports truncation through
//! [`ReadError`] instead of panicking, so the protocol layer built on top can
//! surface malformed input as an ordinary error.
//!
//! # Example
//!
//! ```
//! use thrift_wire_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.buf(b"hello");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! assert_eq!(reader.buf(5).unwrap(), b"hello");
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEnd,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::UnexpectedEnd => write!(f, "unexpected end of buffer"),
        }
    }
}

impl std::error::Error for ReadError {}
