//! Decoder error type.

use modlink_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MsgPackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid MessagePack byte at offset {0}")]
    InvalidByte(usize),
    #[error("integer out of range for declared width")]
    OutOfRange,
}

impl From<BufferError> for MsgPackError {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::EndOfBuffer => MsgPackError::UnexpectedEof,
            BufferError::InvalidUtf8 => MsgPackError::InvalidUtf8,
        }
    }
}
