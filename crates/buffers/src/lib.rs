//! Byte-level primitives for modlink.
//!
//! This crate provides the raw building blocks the format codec is built
//! on:
//!
//! - [`Reader`] - bounds-checked cursor reads from a byte slice
//! - [`Writer`] - raw big-endian byte sink trait with two implementations
//! - [`Sizer`] - measuring writer, accumulates an exact byte count
//! - [`FixedWriter`] - materializing writer over a preallocated buffer
//!
//! Encoding a value runs twice over the same code path: once against a
//! [`Sizer`] to learn the exact output length, then against a
//! [`FixedWriter`] wrapping a buffer of that length. The two writers are
//! distinct types behind one trait so the measure/write contract stays an
//! explicit two-call discipline.
//!
//! # Example
//!
//! ```
//! use modlink_buffers::{FixedWriter, Reader, Sizer, Writer};
//!
//! let mut sizer = Sizer::new();
//! sizer.u8(0x01);
//! sizer.u16(0x0203);
//!
//! let mut buf = vec![0u8; sizer.length()];
//! let mut writer = FixedWriter::new(&mut buf);
//! writer.u8(0x01);
//! writer.u16(0x0203);
//!
//! let mut reader = Reader::new(&buf);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::{FixedWriter, Sizer, Writer};

/// Error type for buffer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer")]
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
}
