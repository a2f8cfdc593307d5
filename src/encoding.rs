/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Byte-level transcoding: turning a raw byte buffer into a
//! sequence of `(char, width_in_bytes)` pairs under one of
//! the five encodings YAML streams may use.
//!
//! This module has no notion of [`Mark`](crate::mark::Mark)
//! or YAML grammar; it is purely "decode one code unit",
//! mirroring the way `libyaml`'s reader separates raw
//! transcoding from position bookkeeping.

use crate::reader::error::ReadError;

/// The byte-level encoding of a YAML stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding
{
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding
{
    /// Inspect the first four bytes of `buf`, returning the
    /// detected [`Encoding`] and the number of leading BOM
    /// bytes to skip.
    ///
    /// Follows the byte table from the spec: explicit BOMs
    /// take priority; absent a BOM, a zero byte in the
    /// position a UTF-16/32 code unit would leave one is
    /// taken as a hint; otherwise the stream is assumed
    /// UTF-8.
    pub fn detect(buf: &[u8]) -> (Self, usize)
    {
        match buf
        {
            [0x00, 0x00, 0xFE, 0xFF, ..] => (Encoding::Utf32Be, 4),
            [0xFF, 0xFE, 0x00, 0x00, ..] => (Encoding::Utf32Le, 4),
            [0xFE, 0xFF, ..] => (Encoding::Utf16Be, 2),
            [0xFF, 0xFE, ..] => (Encoding::Utf16Le, 2),
            [0xEF, 0xBB, 0xBF, ..] => (Encoding::Utf8, 3),

            // No BOM: sniff for a zero byte in the position a
            // UTF-16/32 code unit would leave one, assuming
            // the stream starts with an ASCII byte (true for
            // every legal YAML stream start).
            [0x00, 0x00, 0x00, _, ..] => (Encoding::Utf32Be, 0),
            [_, 0x00, 0x00, 0x00, ..] => (Encoding::Utf32Le, 0),
            [0x00, _, ..] => (Encoding::Utf16Be, 0),
            [_, 0x00, ..] => (Encoding::Utf16Le, 0),

            _ => (Encoding::Utf8, 0),
        }
    }

    /// Decode a single code unit (which may be a surrogate
    /// pair, for UTF-16) starting at `buf[0]`.
    ///
    /// Returns `Ok(None)` at a clean end of buffer,
    /// `Ok(Some((char, width)))` on success, and
    /// `Err(ReadError::InvalidCodeUnit)` for any malformed
    /// sequence, including a truncated sequence at the end of
    /// a buffer that will never be extended.
    pub(crate) fn decode_one(self, buf: &[u8]) -> Result<Option<(char, usize)>, ReadError>
    {
        if buf.is_empty()
        {
            return Ok(None);
        }

        match self
        {
            Encoding::Utf8 => decode_utf8(buf),
            Encoding::Utf16Le => decode_utf16::<true>(buf),
            Encoding::Utf16Be => decode_utf16::<false>(buf),
            Encoding::Utf32Le => decode_utf32::<true>(buf),
            Encoding::Utf32Be => decode_utf32::<false>(buf),
        }
    }
}

fn decode_utf8(buf: &[u8]) -> Result<Option<(char, usize)>, ReadError>
{
    let first = buf[0];

    let width = if first & 0x80 == 0x00
    {
        1
    }
    else if first & 0xE0 == 0xC0
    {
        2
    }
    else if first & 0xF0 == 0xE0
    {
        3
    }
    else if first & 0xF8 == 0xF0
    {
        4
    }
    else
    {
        return Err(ReadError::InvalidCodeUnit);
    };

    if buf.len() < width
    {
        return Err(ReadError::InvalidCodeUnit);
    }

    for &byte in &buf[1..width]
    {
        if byte & 0xC0 != 0x80
        {
            return Err(ReadError::InvalidCodeUnit);
        }
    }

    let s = std::str::from_utf8(&buf[..width]).map_err(|_| ReadError::InvalidCodeUnit)?;
    let ch = s.chars().next().ok_or(ReadError::InvalidCodeUnit)?;

    Ok(Some((ch, width)))
}

fn decode_utf16<const LE: bool>(buf: &[u8]) -> Result<Option<(char, usize)>, ReadError>
{
    let unit = |b: &[u8]| -> u16 {
        if LE
        {
            u16::from_le_bytes([b[0], b[1]])
        }
        else
        {
            u16::from_be_bytes([b[0], b[1]])
        }
    };

    if buf.len() < 2
    {
        return Err(ReadError::InvalidCodeUnit);
    }

    let high = unit(buf);

    if (0xDC00..=0xDFFF).contains(&high)
    {
        // Unpaired low surrogate
        return Err(ReadError::InvalidCodeUnit);
    }

    if (0xD800..=0xDBFF).contains(&high)
    {
        if buf.len() < 4
        {
            return Err(ReadError::InvalidCodeUnit);
        }

        let low = unit(&buf[2..]);

        if !(0xDC00..=0xDFFF).contains(&low)
        {
            return Err(ReadError::InvalidCodeUnit);
        }

        let c = 0x10000u32
            + ((high as u32 - 0xD800) << 10)
            + (low as u32 - 0xDC00);

        let ch = char::from_u32(c).ok_or(ReadError::InvalidCodeUnit)?;

        Ok(Some((ch, 4)))
    }
    else
    {
        let ch = char::from_u32(high as u32).ok_or(ReadError::InvalidCodeUnit)?;

        Ok(Some((ch, 2)))
    }
}

fn decode_utf32<const LE: bool>(buf: &[u8]) -> Result<Option<(char, usize)>, ReadError>
{
    if buf.len() < 4
    {
        return Err(ReadError::InvalidCodeUnit);
    }

    let bytes = [buf[0], buf[1], buf[2], buf[3]];
    let value = if LE
    {
        u32::from_le_bytes(bytes)
    }
    else
    {
        u32::from_be_bytes(bytes)
    };

    let ch = char::from_u32(value).ok_or(ReadError::InvalidCodeUnit)?;

    Ok(Some((ch, 4)))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn detect_utf8_bom()
    {
        let (enc, skip) = Encoding::detect(b"\xEF\xBB\xBFfoo");
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(skip, 3);
    }

    #[test]
    fn detect_utf16_le_bom()
    {
        let (enc, skip) = Encoding::detect(b"\xFF\xFEf\x00");
        assert_eq!(enc, Encoding::Utf16Le);
        assert_eq!(skip, 2);
    }

    #[test]
    fn detect_utf32_be_bom()
    {
        let (enc, skip) = Encoding::detect(b"\x00\x00\xFE\xFF");
        assert_eq!(enc, Encoding::Utf32Be);
        assert_eq!(skip, 4);
    }

    #[test]
    fn detect_bare_utf8()
    {
        let (enc, skip) = Encoding::detect(b"key: value");
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(skip, 0);
    }

    #[test]
    fn detect_bare_utf16_le()
    {
        let (enc, skip) = Encoding::detect(b"k\x00e\x00");
        assert_eq!(enc, Encoding::Utf16Le);
        assert_eq!(skip, 0);
    }

    #[test]
    fn decode_utf8_ascii()
    {
        let (ch, width) = Encoding::Utf8.decode_one(b"hello").unwrap().unwrap();
        assert_eq!(ch, 'h');
        assert_eq!(width, 1);
    }

    #[test]
    fn decode_utf8_multibyte()
    {
        let buf = "é".as_bytes();
        let (ch, width) = Encoding::Utf8.decode_one(buf).unwrap().unwrap();
        assert_eq!(ch, 'é');
        assert_eq!(width, 2);
    }

    #[test]
    fn decode_utf8_invalid_leading_byte()
    {
        let err = Encoding::Utf8.decode_one(&[0xFF]).unwrap_err();
        assert_eq!(err, ReadError::InvalidCodeUnit);
    }

    #[test]
    fn decode_utf16_surrogate_pair()
    {
        // U+1F600 GRINNING FACE
        let mut buf = Vec::new();
        buf.extend_from_slice(&0xD83Du16.to_le_bytes());
        buf.extend_from_slice(&0xDE00u16.to_le_bytes());

        let (ch, width) = Encoding::Utf16Le.decode_one(&buf).unwrap().unwrap();
        assert_eq!(ch, '\u{1F600}');
        assert_eq!(width, 4);
    }

    #[test]
    fn decode_utf32_be_roundtrip()
    {
        let buf = 0x41u32.to_be_bytes();
        let (ch, width) = Encoding::Utf32Be.decode_one(&buf).unwrap().unwrap();
        assert_eq!(ch, 'A');
        assert_eq!(width, 4);
    }
}
