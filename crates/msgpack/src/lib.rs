//! MessagePack-subset primitive codec for modlink.
//!
//! Records cross the guest/host boundary as self-describing binary maps
//! from field-name strings to values. This crate provides the format
//! layer that the schema-generated record codecs are built on:
//!
//! - [`MsgPackWrite`] - format-level writes, blanket-implemented for both
//!   writer modes so the sizing pass and the materializing pass share one
//!   control flow
//! - [`Decoder`] - typed reads, the consuming nil predicate, and
//!   arbitrary-depth [`Decoder::skip`] for unknown-field tolerance
//! - [`write_map`]/[`read_map`], [`write_array`]/[`read_array`],
//!   [`write_nullable`]/[`read_nullable`] - generic collection codecs
//!   parameterized by per-type functions
//! - [`Message`] - the record codec contract, with the two-pass
//!   [`Message::to_vec`] materialization via [`encode_to_vec`]
//! - [`buffer_to_json`] - schema-free diagnostic rendering of encoded
//!   buffers

pub mod constants;

mod collections;
mod decode;
mod error;
mod json;
mod message;
mod write;

pub use collections::{read_array, read_map, read_nullable, write_array, write_map, write_nullable};
pub use decode::Decoder;
pub use error::MsgPackError;
pub use json::{buffer_to_json, value_to_json};
pub use message::{encode_to_vec, Message};
pub use write::MsgPackWrite;

pub use modlink_buffers::{FixedWriter, Sizer, Writer};
