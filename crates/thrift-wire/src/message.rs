//! RPC message framing types.
//!
//! A message header precedes the args or result struct of one call on the
//! wire. The dispatcher that maps a method name to its struct schemas lives
//! above this crate; only the framing itself is encoded here.

use crate::error::ProtocolError;

/// Kind of RPC message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

impl MessageType {
    pub fn from_tag(tag: u8) -> Result<MessageType, ProtocolError> {
        Ok(match tag {
            1 => MessageType::Call,
            2 => MessageType::Reply,
            3 => MessageType::Exception,
            4 => MessageType::Oneway,
            other => return Err(ProtocolError::InvalidMessageType(other)),
        })
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Decoded message envelope: method name, kind, and sequence id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub name: String,
    pub ty: MessageType,
    pub seqid: i32,
}
