//! The record codec seam: [`Message`] and the two-pass buffer producer.

use modlink_buffers::{FixedWriter, Sizer, Writer};

use crate::decode::Decoder;
use crate::error::MsgPackError;

/// Runs `encode` twice: once against a [`Sizer`] to learn the exact byte
/// length, then against a [`FixedWriter`] over a buffer of that length.
///
/// Both passes execute the same closure, so any branch the sizing pass
/// takes, the write pass takes too. A divergence between the measured and
/// written lengths means the encode body is non-deterministic, which is a
/// codec defect, and panics.
pub fn encode_to_vec(encode: impl Fn(&mut dyn Writer)) -> Vec<u8> {
    let mut sizer = Sizer::new();
    encode(&mut sizer);
    let mut buf = vec![0u8; sizer.length()];
    let mut writer = FixedWriter::new(&mut buf);
    encode(&mut writer);
    assert_eq!(
        writer.written(),
        buf.len(),
        "sizing pass and write pass diverged"
    );
    buf
}

/// A record that encodes as a map from field-name strings to values.
///
/// `decode` reads a map-size header and matches each field name against
/// the declared schema, skipping unknown names and leaving missing fields
/// at their defaults. `encode` writes the declared field count and every
/// (name, value) pair in declared order.
pub trait Message: Sized {
    fn encode(&self, w: &mut dyn Writer);

    fn decode(d: &mut Decoder<'_>) -> Result<Self, MsgPackError>;

    /// Produces the final byte buffer via the two-pass discipline.
    fn to_vec(&self) -> Vec<u8> {
        encode_to_vec(|w| self.encode(w))
    }

    /// Decodes a record from the start of a buffer.
    fn from_slice(bytes: &[u8]) -> Result<Self, MsgPackError> {
        Self::decode(&mut Decoder::new(bytes))
    }

    /// Nil-aware decode for optional nested records.
    fn decode_nullable(d: &mut Decoder<'_>) -> Result<Option<Self>, MsgPackError> {
        if d.is_next_nil()? {
            Ok(None)
        } else {
            Self::decode(d).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::MsgPackWrite;

    #[test]
    fn encode_to_vec_produces_exact_length() {
        let bytes = encode_to_vec(|w| {
            w.write_map_len(1);
            w.write_str("k");
            w.write_u64(u64::MAX);
        });
        let mut sizer = Sizer::new();
        {
            let w: &mut dyn Writer = &mut sizer;
            w.write_map_len(1);
            w.write_str("k");
            w.write_u64(u64::MAX);
        }
        assert_eq!(bytes.len(), sizer.length());
    }

    #[test]
    #[should_panic(expected = "diverged")]
    fn divergent_encode_panics() {
        use std::cell::Cell;
        let calls = Cell::new(0u32);
        // Writes one byte fewer on the second pass.
        encode_to_vec(|w| {
            let n = calls.get();
            calls.set(n + 1);
            w.write_bool(true);
            if n == 0 {
                w.write_bool(false);
            }
        });
    }
}
