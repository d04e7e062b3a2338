//! Format-level MessagePack writes.
//!
//! [`MsgPackWrite`] is blanket-implemented for every [`Writer`], so the
//! sizing pass and the materializing pass of the two-pass encoding share
//! one body for every format decision. Integers, strings, and container
//! headers always use the smallest representation that fits.

use modlink_buffers::Writer;

use crate::constants::*;

pub trait MsgPackWrite: Writer {
    fn write_nil(&mut self) {
        self.u8(NIL);
    }

    fn write_bool(&mut self, value: bool) {
        self.u8(if value { TRUE } else { FALSE });
    }

    fn write_uint(&mut self, value: u64) {
        if value < 0x80 {
            self.u8(value as u8);
        } else if value <= 0xff {
            self.u8(UINT8);
            self.u8(value as u8);
        } else if value <= 0xffff {
            self.u8(UINT16);
            self.u16(value as u16);
        } else if value <= 0xffff_ffff {
            self.u8(UINT32);
            self.u32(value as u32);
        } else {
            self.u8(UINT64);
            self.u64(value);
        }
    }

    fn write_int(&mut self, value: i64) {
        if value >= 0 {
            self.write_uint(value as u64);
        } else if value >= -32 {
            self.u8(value as u8);
        } else if value >= i8::MIN as i64 {
            self.u8(INT8);
            self.i8(value as i8);
        } else if value >= i16::MIN as i64 {
            self.u8(INT16);
            self.i16(value as i16);
        } else if value >= i32::MIN as i64 {
            self.u8(INT32);
            self.i32(value as i32);
        } else {
            self.u8(INT64);
            self.i64(value);
        }
    }

    fn write_u8(&mut self, value: u8) {
        self.write_uint(value as u64);
    }

    fn write_u16(&mut self, value: u16) {
        self.write_uint(value as u64);
    }

    fn write_u32(&mut self, value: u32) {
        self.write_uint(value as u64);
    }

    fn write_u64(&mut self, value: u64) {
        self.write_uint(value);
    }

    fn write_i8(&mut self, value: i8) {
        self.write_int(value as i64);
    }

    fn write_i16(&mut self, value: i16) {
        self.write_int(value as i64);
    }

    fn write_i32(&mut self, value: i32) {
        self.write_int(value as i64);
    }

    fn write_i64(&mut self, value: i64) {
        self.write_int(value);
    }

    fn write_f32(&mut self, value: f32) {
        self.u8(FLOAT32);
        self.f32(value);
    }

    fn write_f64(&mut self, value: f64) {
        self.u8(FLOAT64);
        self.f64(value);
    }

    fn write_str(&mut self, value: &str) {
        let bytes = value.as_bytes();
        let length = bytes.len();
        if length < 32 {
            self.u8(FIXSTR | length as u8);
        } else if length <= 0xff {
            self.u8(STR8);
            self.u8(length as u8);
        } else if length <= 0xffff {
            self.u8(STR16);
            self.u16(length as u16);
        } else {
            self.u8(STR32);
            self.u32(length as u32);
        }
        self.buf(bytes);
    }

    fn write_bin(&mut self, value: &[u8]) {
        let length = value.len();
        if length <= 0xff {
            self.u8(BIN8);
            self.u8(length as u8);
        } else if length <= 0xffff {
            self.u8(BIN16);
            self.u16(length as u16);
        } else {
            self.u8(BIN32);
            self.u32(length as u32);
        }
        self.buf(value);
    }

    /// Writes a map entry-count header.
    fn write_map_len(&mut self, length: usize) {
        if length < 16 {
            self.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            self.u8(MAP16);
            self.u16(length as u16);
        } else {
            self.u8(MAP32);
            self.u32(length as u32);
        }
    }

    /// Writes an array element-count header.
    fn write_array_len(&mut self, length: usize) {
        if length < 16 {
            self.u8(FIXARRAY | length as u8);
        } else if length <= 0xffff {
            self.u8(ARRAY16);
            self.u16(length as u16);
        } else {
            self.u8(ARRAY32);
            self.u32(length as u32);
        }
    }
}

impl<W: Writer + ?Sized> MsgPackWrite for W {}
