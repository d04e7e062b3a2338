//! Format-level MessagePack decoder.

use modlink_buffers::Reader;

use crate::constants::*;
use crate::error::MsgPackError;

/// Decodes MessagePack values from a byte slice.
///
/// Typed reads return [`MsgPackError::InvalidByte`] when the next format
/// tag is inconsistent with the expected kind, and
/// [`MsgPackError::OutOfRange`] when an integer does not fit the declared
/// width. Integer reads accept any integer family representation whose
/// value fits, so a compactly encoded value decodes into every width that
/// can hold it.
pub struct Decoder<'a> {
    reader: Reader<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(bytes),
        }
    }

    /// Current cursor position from the start of the buffer.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Peeks at the next format tag without consuming it.
    pub fn peek(&self) -> Result<u8, MsgPackError> {
        Ok(self.reader.peek()?)
    }

    /// Checks whether the next value is nil, consuming it if so.
    ///
    /// This is the optionality predicate: a `true` answer has already
    /// consumed the nil marker and the caller assigns absence; a `false`
    /// answer leaves the cursor untouched for the payload decode.
    pub fn is_next_nil(&mut self) -> Result<bool, MsgPackError> {
        if self.reader.peek()? == NIL {
            self.reader.skip(1)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, MsgPackError> {
        let offset = self.reader.position();
        match self.reader.u8()? {
            TRUE => Ok(true),
            FALSE => Ok(false),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    fn read_uint(&mut self) -> Result<u64, MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        match tag {
            0x00..=0x7f => Ok(tag as u64),
            UINT8 => Ok(self.reader.u8()? as u64),
            UINT16 => Ok(self.reader.u16()? as u64),
            UINT32 => Ok(self.reader.u32()? as u64),
            UINT64 => Ok(self.reader.u64()?),
            INT8 => u64::try_from(self.reader.i8()?).map_err(|_| MsgPackError::OutOfRange),
            INT16 => u64::try_from(self.reader.i16()?).map_err(|_| MsgPackError::OutOfRange),
            INT32 => u64::try_from(self.reader.i32()?).map_err(|_| MsgPackError::OutOfRange),
            INT64 => u64::try_from(self.reader.i64()?).map_err(|_| MsgPackError::OutOfRange),
            0xe0..=0xff => Err(MsgPackError::OutOfRange),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    fn read_int(&mut self) -> Result<i64, MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        match tag {
            0x00..=0x7f => Ok(tag as i64),
            0xe0..=0xff => Ok(tag as i8 as i64),
            INT8 => Ok(self.reader.i8()? as i64),
            INT16 => Ok(self.reader.i16()? as i64),
            INT32 => Ok(self.reader.i32()? as i64),
            INT64 => Ok(self.reader.i64()?),
            UINT8 => Ok(self.reader.u8()? as i64),
            UINT16 => Ok(self.reader.u16()? as i64),
            UINT32 => Ok(self.reader.u32()? as i64),
            UINT64 => i64::try_from(self.reader.u64()?).map_err(|_| MsgPackError::OutOfRange),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, MsgPackError> {
        u8::try_from(self.read_uint()?).map_err(|_| MsgPackError::OutOfRange)
    }

    pub fn read_u16(&mut self) -> Result<u16, MsgPackError> {
        u16::try_from(self.read_uint()?).map_err(|_| MsgPackError::OutOfRange)
    }

    pub fn read_u32(&mut self) -> Result<u32, MsgPackError> {
        u32::try_from(self.read_uint()?).map_err(|_| MsgPackError::OutOfRange)
    }

    pub fn read_u64(&mut self) -> Result<u64, MsgPackError> {
        self.read_uint()
    }

    pub fn read_i8(&mut self) -> Result<i8, MsgPackError> {
        i8::try_from(self.read_int()?).map_err(|_| MsgPackError::OutOfRange)
    }

    pub fn read_i16(&mut self) -> Result<i16, MsgPackError> {
        i16::try_from(self.read_int()?).map_err(|_| MsgPackError::OutOfRange)
    }

    pub fn read_i32(&mut self) -> Result<i32, MsgPackError> {
        i32::try_from(self.read_int()?).map_err(|_| MsgPackError::OutOfRange)
    }

    pub fn read_i64(&mut self) -> Result<i64, MsgPackError> {
        self.read_int()
    }

    pub fn read_f32(&mut self) -> Result<f32, MsgPackError> {
        let offset = self.reader.position();
        match self.reader.u8()? {
            FLOAT32 => Ok(self.reader.f32()?),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    /// Reads a 64-bit float; a 32-bit encoding widens losslessly.
    pub fn read_f64(&mut self) -> Result<f64, MsgPackError> {
        let offset = self.reader.position();
        match self.reader.u8()? {
            FLOAT64 => Ok(self.reader.f64()?),
            FLOAT32 => Ok(self.reader.f32()? as f64),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    pub fn read_str(&mut self) -> Result<&'a str, MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        let length = match tag {
            0xa0..=0xbf => (tag & 0x1f) as usize,
            STR8 => self.reader.u8()? as usize,
            STR16 => self.reader.u16()? as usize,
            STR32 => self.reader.u32()? as usize,
            _ => return Err(MsgPackError::InvalidByte(offset)),
        };
        Ok(self.reader.utf8(length)?)
    }

    pub fn read_bin(&mut self) -> Result<&'a [u8], MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        let length = match tag {
            BIN8 => self.reader.u8()? as usize,
            BIN16 => self.reader.u16()? as usize,
            BIN32 => self.reader.u32()? as usize,
            _ => return Err(MsgPackError::InvalidByte(offset)),
        };
        Ok(self.reader.buf(length)?)
    }

    /// Reads a map entry-count header.
    pub fn read_map_len(&mut self) -> Result<usize, MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        match tag {
            0x80..=0x8f => Ok((tag & 0x0f) as usize),
            MAP16 => Ok(self.reader.u16()? as usize),
            MAP32 => Ok(self.reader.u32()? as usize),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    /// Reads an array element-count header.
    pub fn read_array_len(&mut self) -> Result<usize, MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        match tag {
            0x90..=0x9f => Ok((tag & 0x0f) as usize),
            ARRAY16 => Ok(self.reader.u16()? as usize),
            ARRAY32 => Ok(self.reader.u32()? as usize),
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    /// Skips exactly one encoded value without interpreting it.
    ///
    /// Consumes nested maps and arrays to arbitrary depth. This is what
    /// makes unknown-field tolerance possible: a field name the schema
    /// does not know is followed by one `skip` call.
    pub fn skip(&mut self) -> Result<(), MsgPackError> {
        let offset = self.reader.position();
        let tag = self.reader.u8()?;
        match tag {
            0x00..=0x7f | 0xe0..=0xff | NIL | TRUE | FALSE => Ok(()),
            0x80..=0x8f => self.skip_map_entries((tag & 0x0f) as usize),
            0x90..=0x9f => self.skip_values((tag & 0x0f) as usize),
            0xa0..=0xbf => Ok(self.reader.skip((tag & 0x1f) as usize)?),
            UINT8 | INT8 => Ok(self.reader.skip(1)?),
            UINT16 | INT16 => Ok(self.reader.skip(2)?),
            UINT32 | INT32 | FLOAT32 => Ok(self.reader.skip(4)?),
            UINT64 | INT64 | FLOAT64 => Ok(self.reader.skip(8)?),
            STR8 | BIN8 => {
                let length = self.reader.u8()? as usize;
                Ok(self.reader.skip(length)?)
            }
            STR16 | BIN16 => {
                let length = self.reader.u16()? as usize;
                Ok(self.reader.skip(length)?)
            }
            STR32 | BIN32 => {
                let length = self.reader.u32()? as usize;
                Ok(self.reader.skip(length)?)
            }
            MAP16 => {
                let entries = self.reader.u16()? as usize;
                self.skip_map_entries(entries)
            }
            MAP32 => {
                let entries = self.reader.u32()? as usize;
                self.skip_map_entries(entries)
            }
            ARRAY16 => {
                let items = self.reader.u16()? as usize;
                self.skip_values(items)
            }
            ARRAY32 => {
                let items = self.reader.u32()? as usize;
                self.skip_values(items)
            }
            FIXEXT1 => Ok(self.reader.skip(2)?),
            FIXEXT2 => Ok(self.reader.skip(3)?),
            FIXEXT4 => Ok(self.reader.skip(5)?),
            FIXEXT8 => Ok(self.reader.skip(9)?),
            FIXEXT16 => Ok(self.reader.skip(17)?),
            EXT8 => {
                let length = self.reader.u8()? as usize;
                Ok(self.reader.skip(1 + length)?)
            }
            EXT16 => {
                let length = self.reader.u16()? as usize;
                Ok(self.reader.skip(1 + length)?)
            }
            EXT32 => {
                let length = self.reader.u32()? as usize;
                Ok(self.reader.skip(1 + length)?)
            }
            _ => Err(MsgPackError::InvalidByte(offset)),
        }
    }

    fn skip_values(&mut self, count: usize) -> Result<(), MsgPackError> {
        for _ in 0..count {
            self.skip()?;
        }
        Ok(())
    }

    fn skip_map_entries(&mut self, count: usize) -> Result<(), MsgPackError> {
        for _ in 0..count {
            self.skip()?;
            self.skip()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::MsgPackWrite;
    use modlink_buffers::{FixedWriter, Sizer, Writer};

    fn encode(f: impl Fn(&mut dyn Writer)) -> Vec<u8> {
        let mut sizer = Sizer::new();
        f(&mut sizer);
        let mut buf = vec![0u8; sizer.length()];
        let mut writer = FixedWriter::new(&mut buf);
        f(&mut writer);
        buf
    }

    #[test]
    fn uint_widths_roundtrip() {
        let bytes = encode(|w| {
            w.write_u8(200);
            w.write_u16(60_000);
            w.write_u32(4_000_000_000);
            w.write_u64(u64::MAX);
        });
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_u8().unwrap(), 200);
        assert_eq!(d.read_u16().unwrap(), 60_000);
        assert_eq!(d.read_u32().unwrap(), 4_000_000_000);
        assert_eq!(d.read_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn int_widths_roundtrip() {
        let bytes = encode(|w| {
            w.write_i8(-100);
            w.write_i16(-30_000);
            w.write_i32(-2_000_000_000);
            w.write_i64(i64::MIN);
        });
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_i8().unwrap(), -100);
        assert_eq!(d.read_i16().unwrap(), -30_000);
        assert_eq!(d.read_i32().unwrap(), -2_000_000_000);
        assert_eq!(d.read_i64().unwrap(), i64::MIN);
    }

    #[test]
    fn narrow_read_of_wide_value_is_out_of_range() {
        let bytes = encode(|w| w.write_u64(0x1_0000));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_u16(), Err(MsgPackError::OutOfRange));

        let bytes = encode(|w| w.write_i64(-200));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_i8(), Err(MsgPackError::OutOfRange));
    }

    #[test]
    fn negative_into_unsigned_is_out_of_range() {
        let bytes = encode(|w| w.write_i8(-1));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_u8(), Err(MsgPackError::OutOfRange));
    }

    #[test]
    fn compact_encoding_decodes_into_wider_target() {
        // 7 fits in a positive fixint regardless of the declared width.
        let bytes = encode(|w| w.write_u64(7));
        assert_eq!(bytes, [0x07]);
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_u64().unwrap(), 7);
    }

    #[test]
    fn wrong_kind_is_invalid_byte() {
        let bytes = encode(|w| w.write_str("hi"));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_u32(), Err(MsgPackError::InvalidByte(0)));

        let bytes = encode(|w| w.write_u32(5));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_str(), Err(MsgPackError::InvalidByte(0)));

        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_map_len(), Err(MsgPackError::InvalidByte(0)));
    }

    #[test]
    fn nil_predicate_consumes_only_nil() {
        let bytes = encode(|w| {
            w.write_nil();
            w.write_bool(true);
        });
        let mut d = Decoder::new(&bytes);
        assert!(d.is_next_nil().unwrap());
        assert!(!d.is_next_nil().unwrap());
        assert!(d.read_bool().unwrap());
    }

    #[test]
    fn nil_predicate_on_empty_input_is_eof() {
        let mut d = Decoder::new(&[]);
        assert_eq!(d.is_next_nil(), Err(MsgPackError::UnexpectedEof));
    }

    #[test]
    fn float_widening() {
        let bytes = encode(|w| w.write_f32(1.5));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_f64().unwrap(), 1.5);

        let bytes = encode(|w| w.write_f64(2.5));
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_f32(), Err(MsgPackError::InvalidByte(0)));
    }

    #[test]
    fn str_and_bin_roundtrip() {
        let bytes = encode(|w| {
            w.write_str("héllo");
            w.write_bin(&[0xde, 0xad]);
        });
        let mut d = Decoder::new(&bytes);
        assert_eq!(d.read_str().unwrap(), "héllo");
        assert_eq!(d.read_bin().unwrap(), &[0xde, 0xad]);
    }

    #[test]
    fn truncated_str_is_eof() {
        // str 8, declared length 5, two bytes of payload
        let mut d = Decoder::new(&[STR8, 0x05, b'h', b'i']);
        assert_eq!(d.read_str(), Err(MsgPackError::UnexpectedEof));
    }

    #[test]
    fn truncated_bin_is_eof() {
        let mut d = Decoder::new(&[BIN8, 0x03, 0xde]);
        assert_eq!(d.read_bin(), Err(MsgPackError::UnexpectedEof));
    }

    #[test]
    fn skip_scalars() {
        let bytes = encode(|w| {
            w.write_nil();
            w.write_bool(true);
            w.write_u64(u64::MAX);
            w.write_str("skipped");
            w.write_bin(&[1, 2, 3]);
            w.write_f64(3.5);
            w.write_u8(42);
        });
        let mut d = Decoder::new(&bytes);
        for _ in 0..6 {
            d.skip().unwrap();
        }
        assert_eq!(d.read_u8().unwrap(), 42);
    }

    #[test]
    fn skip_nested_containers() {
        let bytes = encode(|w| {
            // {"a": [1, {"b": nil}], "c": "x"} followed by a sentinel
            w.write_map_len(2);
            w.write_str("a");
            w.write_array_len(2);
            w.write_u8(1);
            w.write_map_len(1);
            w.write_str("b");
            w.write_nil();
            w.write_str("c");
            w.write_str("x");
            w.write_u8(99);
        });
        let mut d = Decoder::new(&bytes);
        d.skip().unwrap();
        assert_eq!(d.read_u8().unwrap(), 99);
    }

    #[test]
    fn skip_ext_values() {
        // fixext4: tag, type byte, 4 data bytes
        let mut d = Decoder::new(&[FIXEXT4, 0x01, 1, 2, 3, 4, 0x2a]);
        d.skip().unwrap();
        assert_eq!(d.read_u8().unwrap(), 0x2a);

        // ext8: tag, length, type byte, data
        let mut d = Decoder::new(&[EXT8, 0x02, 0x01, 9, 9, 0x2a]);
        d.skip().unwrap();
        assert_eq!(d.read_u8().unwrap(), 0x2a);
    }

    #[test]
    fn skip_truncated_container_is_eof() {
        let mut d = Decoder::new(&[FIXMAP | 2, 0xa1, b'a']);
        assert_eq!(d.skip(), Err(MsgPackError::UnexpectedEof));
    }

    #[test]
    fn reserved_byte_is_invalid() {
        let mut d = Decoder::new(&[0xc1]);
        assert_eq!(d.skip(), Err(MsgPackError::InvalidByte(0)));
    }
}
