// FWRT - fwrt-foundation
// Module: Byte Cursor
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Bounded byte cursor.
//!
//! [`ByteCursor`] reads fixed-width integers in either byte order, LEB128
//! varints and borrowed byte or string slices from a bounded buffer. It is
//! the only component that touches raw input bytes; everything above it
//! works with decoded values.
//!
//! Every `parse_*` either succeeds and advances the cursor, or fails and
//! leaves the cursor where it was. Reading past the end of the buffer is
//! reported as [`Error::UNEXPECTED_END`], never performed.

use fwrt_error::{codes, kinds, Error, Result};

/// Read position over a borrowed byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos:  usize,
}

macro_rules! fixed_width {
    ($(($peek:ident, $parse:ident, $ty:ty, $conv:ident)),* $(,)?) => {
        $(
            #[doc = concat!("Peek a `", stringify!($ty), "` (`", stringify!($conv), "`) without advancing.")]
            #[inline]
            #[must_use]
            pub fn $peek(&self) -> Option<$ty> {
                self.peek_array().map(<$ty>::$conv)
            }

            #[doc = concat!("Parse a `", stringify!($ty), "` (`", stringify!($conv), "`).")]
            #[inline]
            pub fn $parse(&mut self) -> Result<$ty> {
                let value = self.$peek().ok_or(Error::UNEXPECTED_END)?;
                self.pos += core::mem::size_of::<$ty>();
                Ok(value)
            }
        )*
    };
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn peek_array<const W: usize>(&self) -> Option<[u8; W]> {
        let end = self.pos.checked_add(W)?;
        let bytes = self.data.get(self.pos..end)?;
        <[u8; W]>::try_from(bytes).ok()
    }

    /// Peek the next byte without advancing.
    #[inline]
    #[must_use]
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Parse one byte.
    #[inline]
    pub fn parse_u8(&mut self) -> Result<u8> {
        let byte = self.peek_u8().ok_or(Error::UNEXPECTED_END)?;
        self.pos += 1;
        Ok(byte)
    }

    fixed_width! {
        (peek_u16_le, parse_u16_le, u16, from_le_bytes),
        (peek_u16_be, parse_u16_be, u16, from_be_bytes),
        (peek_u32_le, parse_u32_le, u32, from_le_bytes),
        (peek_u32_be, parse_u32_be, u32, from_be_bytes),
        (peek_u64_le, parse_u64_le, u64, from_le_bytes),
        (peek_u64_be, parse_u64_be, u64, from_be_bytes),
    }

    /// Parse a little-endian IEEE 754 single, preserving NaN payloads.
    #[inline]
    pub fn parse_f32(&mut self) -> Result<f32> {
        self.parse_u32_le().map(f32::from_bits)
    }

    /// Parse a little-endian IEEE 754 double, preserving NaN payloads.
    #[inline]
    pub fn parse_f64(&mut self) -> Result<f64> {
        self.parse_u64_le().map(f64::from_bits)
    }

    /// Parse an unsigned LEB128 integer of at most 32 bits.
    pub fn parse_uleb32(&mut self) -> Result<u32> {
        self.parse_uleb(32).map(|value| value as u32)
    }

    /// Parse an unsigned LEB128 integer of at most 64 bits.
    pub fn parse_uleb64(&mut self) -> Result<u64> {
        self.parse_uleb(64)
    }

    /// Parse a signed LEB128 integer of at most 32 bits.
    pub fn parse_sleb32(&mut self) -> Result<i32> {
        self.parse_sleb(32).map(|value| value as i32)
    }

    /// Parse a signed LEB128 integer of at most 33 bits (block type indices).
    pub fn parse_sleb33(&mut self) -> Result<i64> {
        self.parse_sleb(33)
    }

    /// Parse a signed LEB128 integer of at most 64 bits.
    pub fn parse_sleb64(&mut self) -> Result<i64> {
        self.parse_sleb(64)
    }

    fn parse_uleb(&mut self, bits: u32) -> Result<u64> {
        let max_bytes = bits.div_ceil(7) as usize;
        let mut result = 0u64;
        let mut shift = 0u32;

        for i in 0..max_bytes {
            let byte = *self.data.get(self.pos + i).ok_or(Error::UNEXPECTED_END)?;
            let payload = u64::from(byte & 0x7F);

            if i == max_bytes - 1 {
                let used = bits - shift;
                if byte & 0x80 != 0 {
                    return Err(kinds::invalid_leb128("LEB128 integer too long"));
                }
                if used < 7 && payload >> used != 0 {
                    return Err(kinds::invalid_leb128("LEB128 integer too large"));
                }
            }

            result |= payload << shift;
            if byte & 0x80 == 0 {
                self.pos += i + 1;
                return Ok(result);
            }
            shift += 7;
        }

        Err(kinds::invalid_leb128("LEB128 integer too long"))
    }

    fn parse_sleb(&mut self, bits: u32) -> Result<i64> {
        let max_bytes = bits.div_ceil(7) as usize;
        let mut result = 0i64;
        let mut shift = 0u32;

        for i in 0..max_bytes {
            let byte = *self.data.get(self.pos + i).ok_or(Error::UNEXPECTED_END)?;
            let payload = byte & 0x7F;

            if i == max_bytes - 1 {
                if byte & 0x80 != 0 {
                    return Err(kinds::invalid_leb128("LEB128 integer too long"));
                }
                // Bits above the value's width must repeat its sign bit.
                let used = bits - shift;
                let high = payload >> (used - 1);
                if high != 0 && high != (0x7F >> (used - 1)) {
                    return Err(kinds::invalid_leb128("LEB128 integer too large"));
                }
            }

            result |= i64::from(payload) << shift;
            shift += 7;
            if byte & 0x80 == 0 {
                if shift < 64 && byte & 0x40 != 0 {
                    result |= -1i64 << shift;
                }
                self.pos += i + 1;
                return Ok(result);
            }
        }

        Err(kinds::invalid_leb128("LEB128 integer too long"))
    }

    /// Borrow the next `len` bytes.
    pub fn parse_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(Error::UNEXPECTED_END)?;
        let bytes = self.data.get(self.pos..end).ok_or(Error::UNEXPECTED_END)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Borrow the next `len` bytes as UTF-8 text.
    pub fn parse_str(&mut self, len: usize) -> Result<&'a str> {
        let start = self.pos;
        let bytes = self.parse_bytes(len)?;
        match core::str::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(_) => {
                self.pos = start;
                Err(Error::parse_error(codes::INVALID_UTF8, "Name is not valid UTF-8"))
            }
        }
    }

    /// Parse a name: a uleb32 byte length followed by that many UTF-8 bytes.
    ///
    /// Names longer than `max_len` bytes fail with `NAME_TOO_LONG`.
    pub fn parse_name(&mut self, max_len: usize) -> Result<&'a str> {
        let start = self.pos;
        let len = self.parse_uleb32()? as usize;
        if len > max_len {
            self.pos = start;
            return Err(Error::validation_error(codes::NAME_TOO_LONG, "Name exceeds maximum length"));
        }
        self.parse_str(len).inspect_err(|_| self.pos = start)
    }

    /// Advance `len` bytes without reading them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.parse_bytes(len).map(|_| ())
    }

    /// Split off a cursor over the next `len` bytes and advance past them.
    pub fn sub_cursor(&mut self, len: usize) -> Result<ByteCursor<'a>> {
        self.parse_bytes(len).map(ByteCursor::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_both_endiannesses() -> Result<()> {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.peek_u16_be(), Some(0x0102));
        assert_eq!(cursor.parse_u16_le()?, 0x0201);
        assert_eq!(cursor.parse_u16_be()?, 0x0304);
        assert_eq!(cursor.parse_u32_le()?, 0x0807_0605);
        assert!(cursor.is_empty());

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.parse_u64_be()?, 0x0102_0304_0506_0708);
        Ok(())
    }

    #[test]
    fn parse_past_end_fails_without_advancing() {
        let bytes = [0xAA, 0xBB, 0xCC];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.parse_u32_le(), Err(Error::UNEXPECTED_END));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.peek_u64_le(), None);
        assert!(cursor.parse_bytes(4).is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn uleb_known_encodings() -> Result<()> {
        let mut cursor = ByteCursor::new(&[0xE5, 0x8E, 0x26, 0x7F, 0x80, 0x01]);
        assert_eq!(cursor.parse_uleb32()?, 624_485);
        assert_eq!(cursor.parse_uleb32()?, 127);
        assert_eq!(cursor.parse_uleb32()?, 128);
        assert!(cursor.is_empty());
        Ok(())
    }

    #[test]
    fn uleb32_rejects_overlong_and_oversized() {
        // six bytes
        let mut cursor = ByteCursor::new(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00]);
        assert_eq!(cursor.parse_uleb32().unwrap_err().code, codes::INVALID_LEB128);
        // fifth byte sets bits above 32
        let mut cursor = ByteCursor::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F]);
        assert_eq!(cursor.parse_uleb32().unwrap_err().code, codes::INVALID_LEB128);
        // u32::MAX is fine
        let mut cursor = ByteCursor::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert_eq!(cursor.parse_uleb32(), Ok(u32::MAX));
    }

    #[test]
    fn uleb_truncated() {
        let mut cursor = ByteCursor::new(&[0x80, 0x80]);
        assert_eq!(cursor.parse_uleb32(), Err(Error::UNEXPECTED_END));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn sleb_known_encodings() -> Result<()> {
        let mut cursor = ByteCursor::new(&[0xC0, 0xBB, 0x78, 0x7F, 0x2A, 0x40]);
        assert_eq!(cursor.parse_sleb32()?, -123_456);
        assert_eq!(cursor.parse_sleb32()?, -1);
        assert_eq!(cursor.parse_sleb32()?, 42);
        assert_eq!(cursor.parse_sleb64()?, -64);
        Ok(())
    }

    #[test]
    fn sleb32_bounds() {
        let mut cursor = ByteCursor::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
        assert_eq!(cursor.parse_sleb32(), Ok(i32::MAX));
        let mut cursor = ByteCursor::new(&[0x80, 0x80, 0x80, 0x80, 0x78]);
        assert_eq!(cursor.parse_sleb32(), Ok(i32::MIN));
        let mut cursor = ByteCursor::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert!(cursor.parse_sleb32().is_err());
    }

    #[test]
    fn sleb64_extremes() {
        let mut max = [0xFFu8; 10];
        max[9] = 0x00;
        assert_eq!(ByteCursor::new(&max).parse_sleb64(), Ok(i64::MAX));
        let mut min = [0x80u8; 10];
        min[9] = 0x7F;
        assert_eq!(ByteCursor::new(&min).parse_sleb64(), Ok(i64::MIN));
    }

    #[test]
    fn strings_are_validated() {
        let mut cursor = ByteCursor::new(b"env\xFF");
        assert_eq!(cursor.parse_str(3), Ok("env"));
        let err = cursor.parse_str(1).unwrap_err();
        assert_eq!(err.code, codes::INVALID_UTF8);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn names_are_length_prefixed_and_bounded() {
        let mut cursor = ByteCursor::new(b"\x03envfoo");
        assert_eq!(cursor.parse_name(8), Ok("env"));
        assert_eq!(cursor.position(), 4);

        let mut cursor = ByteCursor::new(b"\x03env");
        assert_eq!(cursor.parse_name(2).unwrap_err().code, codes::NAME_TOO_LONG);
        assert_eq!(cursor.position(), 0);

        let mut cursor = ByteCursor::new(b"\x05env");
        assert_eq!(cursor.parse_name(8), Err(Error::UNEXPECTED_END));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn sub_cursor_is_bounded() -> Result<()> {
        let bytes = [1, 2, 3, 4];
        let mut cursor = ByteCursor::new(&bytes);
        let mut inner = cursor.sub_cursor(2)?;
        assert_eq!(inner.parse_u16_le()?, 0x0201);
        assert!(inner.parse_u8().is_err());
        assert_eq!(cursor.parse_u8()?, 3);
        cursor.skip(1)?;
        assert!(cursor.skip(1).is_err());
        Ok(())
    }
}
