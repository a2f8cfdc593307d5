/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The Reader is the lowest stage of the pipeline: it owns
//! the raw byte buffer and exposes a `head`/`advance`
//! interface over the decoded Unicode scalar stream, the way
//! `libyaml`'s reader separates transcoding from lexing.
//!
//! Unlike the Scanner and Parser above it, the Reader never
//! raises a recoverable condition to "extend" the buffer --
//! the entire input is available up front.

pub mod error;

use crate::{
    encoding::Encoding,
    mark::Mark,
    reader::error::ReadResult,
};

/// Characters counted as a line break by every stage of the
/// pipeline.
pub(crate) const NEWLINES: [char; 5] = ['\n', '\r', '\u{0085}', '\u{2028}', '\u{2029}'];

pub(crate) fn is_newline(c: char) -> bool
{
    NEWLINES.contains(&c)
}

pub(crate) fn is_blank(c: char) -> bool
{
    c == ' ' || c == '\t'
}

/// Decodes a byte buffer into a stream of Unicode scalars,
/// tracking a [`Mark`] (offset/line/column) for every
/// position advanced through.
///
/// `head` is `None` before the first scalar is consumed, and
/// again once the stream is exhausted.
#[derive(Debug, Clone)]
pub struct Reader<'b>
{
    buf:      &'b [u8],
    encoding: Encoding,

    /// Byte offset of `head` within `buf`.
    pos: usize,

    head:       Option<char>,
    head_width: usize,

    mark: Mark,
}

impl<'b> Reader<'b>
{
    /// Construct a new Reader, auto-detecting the encoding
    /// from a leading BOM or zero-byte pattern.
    pub fn new(buf: &'b [u8]) -> ReadResult<Self>
    {
        let (encoding, skip) = Encoding::detect(buf);

        Self::with_encoding(buf, encoding, skip)
    }

    /// Construct a new Reader with an explicit encoding. No
    /// BOM is skipped; if the buffer carries one for this
    /// encoding, strip it before calling.
    pub fn with_explicit_encoding(buf: &'b [u8], encoding: Encoding) -> ReadResult<Self>
    {
        Self::with_encoding(buf, encoding, 0)
    }

    fn with_encoding(buf: &'b [u8], encoding: Encoding, skip: usize) -> ReadResult<Self>
    {
        let mut this = Self {
            buf: &buf[skip.min(buf.len())..],
            encoding,
            pos: 0,
            head: None,
            head_width: 0,
            mark: Mark::START,
        };

        this.advance()?;

        Ok(this)
    }

    /// The encoding this Reader was constructed (or detected)
    /// with.
    pub fn encoding(&self) -> Encoding
    {
        self.encoding
    }

    /// The current scalar, or `None` at end of stream.
    pub fn head(&self) -> Option<char>
    {
        self.head
    }

    /// The [`Mark`] of the current `head` scalar.
    pub fn mark(&self) -> Mark
    {
        self.mark
    }

    /// Decode and move to the next scalar in the stream.
    pub fn advance(&mut self) -> ReadResult<()>
    {
        if let Some(c) = self.head
        {
            // A "\r\n" pair is folded into a single advance by
            // scan_line_break/skip_line_break before either
            // byte reaches here as a lone head; a bare '\r' or
            // '\n' head still only ever advances the line
            // once.
            self.mark = if is_newline(c)
            {
                self.mark.advance_line(self.head_width)
            }
            else
            {
                self.mark.advance_column(self.head_width)
            };
        }

        self.pos += self.head_width;

        match self.encoding.decode_one(&self.buf[self.pos..])?
        {
            Some((ch, width)) =>
            {
                self.head = Some(ch);
                self.head_width = width;
            },
            None =>
            {
                self.head = None;
                self.head_width = 0;
            },
        }

        Ok(())
    }

    /// True if `head == Some(ch)`.
    pub fn matches(&self, ch: char) -> bool
    {
        self.head == Some(ch)
    }

    /// True if `head` is `Some` and satisfies `f`.
    pub fn matches_fn<F>(&self, f: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        self.head.map(f).unwrap_or(false)
    }

    /// Peek `n` scalars ahead without consuming; `n == 0` is
    /// `head` itself. Returns `None` if the stream ends
    /// first.
    pub fn peek_nth(&self, n: usize) -> Option<char>
    {
        let mut pos = self.pos;
        let mut remaining = n;
        let mut current = self.head?;
        let mut width = self.head_width;

        loop
        {
            if remaining == 0
            {
                return Some(current);
            }

            pos += width;

            match self.encoding.decode_one(&self.buf[pos..]).ok().flatten()
            {
                Some((ch, w)) =>
                {
                    current = ch;
                    width = w;
                    remaining -= 1;
                },
                None => return None,
            }
        }
    }

    /// If `head == Some(ch)`, advance past it and return
    /// `true`.
    pub fn skip(&mut self, ch: char) -> ReadResult<bool>
    {
        if self.matches(ch)
        {
            self.advance()?;

            Ok(true)
        }
        else
        {
            Ok(false)
        }
    }

    /// Advance past every scalar satisfying `f`, returning
    /// the count skipped.
    pub fn skip_while<F>(&mut self, mut f: F) -> ReadResult<usize>
    where
        F: FnMut(char) -> bool,
    {
        let mut count = 0;

        while self.matches_fn(&mut f)
        {
            self.advance()?;
            count += 1;
        }

        Ok(count)
    }

    /// If `head` satisfies `f`, advance past it and return it.
    pub fn take_if<F>(&mut self, f: F) -> ReadResult<Option<char>>
    where
        F: FnOnce(char) -> bool,
    {
        match self.head
        {
            Some(c) if f(c) =>
            {
                self.advance()?;

                Ok(Some(c))
            },
            _ => Ok(None),
        }
    }

    /// Consume a maximal run of scalars satisfying `f`,
    /// returning the accumulated `String`.
    pub fn match_while<F>(&mut self, mut f: F) -> ReadResult<String>
    where
        F: FnMut(char) -> bool,
    {
        let mut out = String::new();

        while let Some(c) = self.head
        {
            if !f(c)
            {
                break;
            }

            out.push(c);
            self.advance()?;
        }

        Ok(out)
    }

    /// Consume a single line break (`\n`, `\r`, `\r\n`,
    /// U+0085, U+2028, or U+2029). `\n`/`\r`/`\r\n`/U+0085 are
    /// normalized to `"\n"`; U+2028/U+2029 are returned
    /// verbatim, since YAML treats them as breaks but does not
    /// fold them when preserved inside a flow scalar.
    pub fn scan_line_break(&mut self) -> ReadResult<String>
    {
        match self.head
        {
            Some('\r') =>
            {
                self.advance()?;
                self.skip('\n')?;

                Ok("\n".to_owned())
            },
            Some('\n') | Some('\u{0085}') =>
            {
                self.advance()?;

                Ok("\n".to_owned())
            },
            Some(c @ '\u{2028}') | Some(c @ '\u{2029}') =>
            {
                self.advance()?;

                Ok(c.to_string())
            },
            _ => Ok(String::new()),
        }
    }

    /// [`scan_line_break`](Self::scan_line_break), discarding
    /// its contents; returns whether a break was consumed.
    pub fn skip_line_break(&mut self) -> ReadResult<bool>
    {
        if self.matches_fn(is_newline)
        {
            self.scan_line_break()?;

            Ok(true)
        }
        else
        {
            Ok(false)
        }
    }

    /// Scan a maximal run of ASCII decimal digits into an
    /// `i64`. Returns `None` (consuming nothing) if `head` is
    /// not a digit.
    pub fn scan_integer(&mut self) -> ReadResult<Option<i64>>
    {
        if !self.matches_fn(|c| c.is_ascii_digit())
        {
            return Ok(None);
        }

        let mut value: i64 = 0;

        while let Some(c) = self.head
        {
            match c.to_digit(10)
            {
                Some(d) =>
                {
                    value = value.saturating_mul(10).saturating_add(d as i64);
                    self.advance()?;
                },
                None => break,
            }
        }

        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_buffer_has_no_head() -> ReadResult<()>
    {
        let r = Reader::new(b"")?;

        assert_eq!(r.head(), None);

        Ok(())
    }

    #[test]
    fn advances_scalar_by_scalar() -> ReadResult<()>
    {
        let mut r = Reader::new(b"ab")?;

        assert_eq!(r.head(), Some('a'));
        r.advance()?;
        assert_eq!(r.head(), Some('b'));
        r.advance()?;
        assert_eq!(r.head(), None);

        Ok(())
    }

    #[test]
    fn tracks_line_and_column() -> ReadResult<()>
    {
        let mut r = Reader::new(b"ab\ncd")?;

        assert_eq!((r.mark().line(), r.mark().column()), (1, 1));
        r.advance()?; // b
        assert_eq!((r.mark().line(), r.mark().column()), (1, 2));
        r.advance()?; // \n
        assert_eq!((r.mark().line(), r.mark().column()), (2, 1));
        r.advance()?; // c
        assert_eq!((r.mark().line(), r.mark().column()), (2, 1));
        assert_eq!(r.head(), Some('c'));

        Ok(())
    }

    #[test]
    fn skip_crlf_as_one_break() -> ReadResult<()>
    {
        let mut r = Reader::new(b"a\r\nb")?;
        r.advance()?;

        assert!(r.matches('\r'));
        let normalized = r.scan_line_break()?;
        assert_eq!(normalized, "\n");
        assert_eq!(r.head(), Some('b'));

        Ok(())
    }

    #[test]
    fn scan_integer_reads_digits()
    {
        let mut r = Reader::new(b"123abc").unwrap();

        assert_eq!(r.scan_integer().unwrap(), Some(123));
        assert_eq!(r.head(), Some('a'));
    }

    #[test]
    fn autodetects_utf8_bom() -> ReadResult<()>
    {
        let r = Reader::new(b"\xEF\xBB\xBFhi")?;

        assert_eq!(r.encoding(), Encoding::Utf8);
        assert_eq!(r.head(), Some('h'));

        Ok(())
    }

    #[test]
    fn invalid_byte_is_an_error()
    {
        let err = Reader::new(&[0xFF]).unwrap_err();

        assert_eq!(err, crate::reader::error::ReadError::InvalidCodeUnit);
    }

    #[test]
    fn peek_nth_does_not_consume() -> ReadResult<()>
    {
        let r = Reader::new(b"abc")?;

        assert_eq!(r.peek_nth(0), Some('a'));
        assert_eq!(r.peek_nth(1), Some('b'));
        assert_eq!(r.peek_nth(2), Some('c'));
        assert_eq!(r.peek_nth(3), None);
        assert_eq!(r.head(), Some('a'));

        Ok(())
    }
}
