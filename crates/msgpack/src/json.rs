//! Diagnostic conversion of encoded buffers to JSON.
//!
//! Useful for logging and debugging cross-boundary payloads without
//! knowing their schema: any well-formed buffer renders as a
//! `serde_json::Value`, with byte arrays shown as base64 strings and
//! non-string map keys stringified.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Number, Value};

use crate::constants::*;
use crate::decode::Decoder;
use crate::error::MsgPackError;

/// Decodes one value from the buffer into JSON.
pub fn buffer_to_json(bytes: &[u8]) -> Result<Value, MsgPackError> {
    let mut d = Decoder::new(bytes);
    value_to_json(&mut d)
}

/// Decodes the next value from the decoder into JSON.
pub fn value_to_json(d: &mut Decoder<'_>) -> Result<Value, MsgPackError> {
    let offset = d.position();
    let tag = d.peek()?;
    match tag {
        NIL => {
            d.skip()?;
            Ok(Value::Null)
        }
        TRUE | FALSE => Ok(Value::Bool(d.read_bool()?)),
        0x00..=0x7f | UINT8 | UINT16 | UINT32 | UINT64 => {
            Ok(Value::Number(Number::from(d.read_u64()?)))
        }
        0xe0..=0xff | INT8 | INT16 | INT32 | INT64 => {
            Ok(Value::Number(Number::from(d.read_i64()?)))
        }
        FLOAT32 | FLOAT64 => {
            let value = d.read_f64()?;
            Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
        }
        0xa0..=0xbf | STR8 | STR16 | STR32 => Ok(Value::String(d.read_str()?.to_owned())),
        BIN8 | BIN16 | BIN32 => Ok(Value::String(STANDARD.encode(d.read_bin()?))),
        0x90..=0x9f | ARRAY16 | ARRAY32 => {
            let items = d.read_array_len()?;
            let mut out = Vec::new();
            for _ in 0..items {
                out.push(value_to_json(d)?);
            }
            Ok(Value::Array(out))
        }
        0x80..=0x8f | MAP16 | MAP32 => {
            let entries = d.read_map_len()?;
            let mut out = Map::new();
            for _ in 0..entries {
                let key = match value_to_json(d)? {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                let value = value_to_json(d)?;
                out.insert(key, value);
            }
            Ok(Value::Object(out))
        }
        _ => Err(MsgPackError::InvalidByte(offset)),
    }
}
