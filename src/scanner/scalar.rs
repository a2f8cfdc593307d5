/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scalar sub-scanners.
//!
//! Each of plain/single-quoted/double-quoted/block-literal/
//! block-folded follows the same three-phase loop: consume
//! content up to a line break or terminator, consume the
//! break, then consume the next line's leading indentation --
//! folding breaks into the accumulated buffer per the style's
//! rule. [`ScalarKind`] tags which rule set a given call
//! uses; [`fold_break`] is the one piece of control flow all
//! five share.

use crate::{
    error::ErrorKind,
    mark::Mark,
    reader::{is_blank, is_newline, Reader},
    scanner::error::{from_read, ScanError, ScanResult as Result},
    token::ScalarStyle,
};

/// Which scalar reader is driving a given scan. Carries the
/// per-variant data each needs (the block indent the caller
/// is unwinding against, or the chomping mode for block
/// scalars).
#[derive(Debug, Clone, Copy)]
pub(in crate::scanner) enum ScalarKind
{
    Plain { flow_level: usize, block_indent: isize },
    SingleQuoted,
    DoubleQuoted,
    Block { folded: bool, chomp: Chomp, indent: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::scanner) enum Chomp
{
    Strip,
    Clip,
    Keep,
}

pub(in crate::scanner) struct ScannedScalar
{
    pub text:  String,
    pub mark:  Mark,
    pub style: ScalarStyle,
}

pub(in crate::scanner) fn scan_scalar(reader: &mut Reader<'_>, kind: ScalarKind) -> Result<ScannedScalar>
{
    match kind
    {
        ScalarKind::Plain {
            flow_level,
            block_indent,
        } => scan_plain(reader, flow_level, block_indent),
        ScalarKind::SingleQuoted => scan_quoted(reader, false),
        ScalarKind::DoubleQuoted => scan_quoted(reader, true),
        ScalarKind::Block {
            folded,
            chomp,
            indent,
        } => scan_block(reader, folded, chomp, indent),
    }
}

fn is_flow_indicator(c: char) -> bool
{
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// True at the start of a plain-scalar-terminating `---` or
/// `...` document indicator: three identical characters at
/// column 1 followed by whitespace or end of stream.
pub(in crate::scanner) fn looks_like_document_indicator(reader: &Reader<'_>, c: char) -> bool
{
    let three_in_a_row =
        reader.mark().column() == 1 && reader.peek_nth(1) == Some(c) && reader.peek_nth(2) == Some(c);

    let followed_by_boundary = match reader.peek_nth(3)
    {
        None => true,
        Some(next) => is_blank(next) || is_newline(next),
    };

    three_in_a_row && followed_by_boundary
}

fn scan_plain(reader: &mut Reader<'_>, flow_level: usize, block_indent: isize) -> Result<ScannedScalar>
{
    let mark = reader.mark();
    let mut text = String::new();
    let mut trailing_breaks = String::new();
    let mut pending_space = false;

    loop
    {
        match reader.head()
        {
            None => break,
            Some(c) if is_newline(c) => break,
            Some('#') if text.ends_with(' ') || text.is_empty() || pending_space =>
            {
                // A '#' preceded by whitespace ends the scalar.
                break;
            },
            Some(':')
                if matches!(reader.peek_nth(1), None)
                    || reader.peek_nth(1).map(is_blank).unwrap_or(false)
                    || reader.peek_nth(1).map(is_newline).unwrap_or(false) =>
            {
                break;
            },
            Some(':') if flow_level > 0 && reader.peek_nth(1).map(is_flow_indicator).unwrap_or(false) => break,
            Some(c) if flow_level > 0 && is_flow_indicator(c) => break,
            Some(c) if (c == '-') && looks_like_document_indicator(reader, c) => break,
            Some(c) if (c == '.') && looks_like_document_indicator(reader, c) => break,
            Some(c) =>
            {
                if pending_space
                {
                    text.push(' ');
                    pending_space = false;
                }

                if !trailing_breaks.is_empty()
                {
                    text.push_str(&trailing_breaks);
                    trailing_breaks.clear();
                }

                text.push(c);
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
                continue;
            },
        }

        // We broke out of the content loop on a bare line
        // break (not a terminator) -- attempt to continue
        // onto the next more-indented line.
        if !reader.matches_fn(is_newline)
        {
            break;
        }

        let save = reader.mark();
        reader.skip_line_break().map_err(|e| from_read(e, reader.mark()))?;
        reader.skip_while(is_blank).map_err(|e| from_read(e, reader.mark()))?;

        if (reader.mark().column() as isize - 1) <= block_indent
            || reader.matches('#')
            || reader.head().is_none()
        {
            // Not a continuation: rewind is unnecessary since
            // plain scalars never resume after this; the
            // caller treats the break as the scalar's end.
            let _ = save;
            break;
        }

        if trailing_breaks.is_empty()
        {
            pending_space = true;
        }
        else
        {
            trailing_breaks.push('\n');
        }
    }

    while text.ends_with(' ')
    {
        text.pop();
    }

    Ok(ScannedScalar {
        text,
        mark,
        style: ScalarStyle::Plain,
    })
}

fn scan_quoted(reader: &mut Reader<'_>, double: bool) -> Result<ScannedScalar>
{
    let mark = reader.mark();
    let quote = if double { '"' } else { '\'' };

    reader.advance().map_err(|e| from_read(e, mark))?; // opening quote

    let mut text = String::new();
    let mut trailing_breaks = String::new();
    let mut pending_space = false;

    loop
    {
        match reader.head()
        {
            None => return Err(ScanError::new(ErrorKind::EndOfStream, reader.mark())),
            Some(c) if c == quote =>
            {
                if !double && reader.peek_nth(1) == Some('\'')
                {
                    if pending_space
                    {
                        text.push(' ');
                        pending_space = false;
                    }
                    text.push_str(&trailing_breaks);
                    trailing_breaks.clear();

                    text.push('\'');
                    reader.advance().map_err(|e| from_read(e, reader.mark()))?;
                    reader.advance().map_err(|e| from_read(e, reader.mark()))?;
                    continue;
                }

                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
                break;
            },
            Some(c) if is_newline(c) =>
            {
                let line_mark = reader.mark();
                reader.skip_line_break().map_err(|e| from_read(e, reader.mark()))?;
                let blank = reader.skip_while(is_blank).map_err(|e| from_read(e, reader.mark()))?;
                let _ = blank;

                if reader.matches_fn(is_newline)
                {
                    trailing_breaks.push('\n');
                }
                else if trailing_breaks.is_empty()
                {
                    pending_space = true;
                }
                else
                {
                    trailing_breaks.push('\n');
                }

                let _ = line_mark;
            },
            Some('\\') if double =>
            {
                if reader.peek_nth(1).map(is_newline).unwrap_or(false)
                {
                    // Escaped line break: elided, no space produced.
                    reader.advance().map_err(|e| from_read(e, reader.mark()))?;
                    reader.skip_line_break().map_err(|e| from_read(e, reader.mark()))?;
                    reader.skip_while(is_blank).map_err(|e| from_read(e, reader.mark()))?;
                    continue;
                }

                if pending_space
                {
                    text.push(' ');
                    pending_space = false;
                }
                text.push_str(&trailing_breaks);
                trailing_breaks.clear();

                let escaped = scan_escape(reader)?;
                text.push(escaped);
            },
            Some(c) =>
            {
                if pending_space
                {
                    text.push(' ');
                    pending_space = false;
                }
                text.push_str(&trailing_breaks);
                trailing_breaks.clear();

                text.push(c);
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
            },
        }
    }

    Ok(ScannedScalar {
        text,
        mark,
        style: if double
        {
            ScalarStyle::DoubleQuote
        }
        else
        {
            ScalarStyle::SingleQuote
        },
    })
}

/// The double-quoted escape table, per the character-class
/// tables section.
fn scan_escape(reader: &mut Reader<'_>) -> Result<char>
{
    let mark = reader.mark();
    let c = reader.head().ok_or_else(|| ScanError::new(ErrorKind::EndOfStream, mark))?;

    let simple = match c
    {
        '0' => Some('\u{0000}'),
        'a' => Some('\u{0007}'),
        'b' => Some('\u{0008}'),
        't' | '\t' => Some('\u{0009}'),
        'n' => Some('\u{000A}'),
        'v' => Some('\u{000B}'),
        'f' => Some('\u{000C}'),
        'r' => Some('\u{000D}'),
        'e' => Some('\u{001B}'),
        ' ' => Some(' '),
        '"' => Some('"'),
        '/' => Some('/'),
        '\\' => Some('\\'),
        'N' => Some('\u{0085}'),
        '_' => Some('\u{00A0}'),
        'L' => Some('\u{2028}'),
        'P' => Some('\u{2029}'),
        _ => None,
    };

    if let Some(ch) = simple
    {
        reader.advance().map_err(|e| from_read(e, reader.mark()))?;
        return Ok(ch);
    }

    let width = match c
    {
        'x' => 2,
        'u' => 4,
        'U' => 8,
        _ => return Err(ScanError::new(ErrorKind::InvalidEscape, mark)),
    };

    reader.advance().map_err(|e| from_read(e, reader.mark()))?;

    let mut value: u32 = 0;
    for _ in 0..width
    {
        let digit = reader
            .head()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| ScanError::new(ErrorKind::InvalidEscape, mark))?;

        value = value * 16 + digit;
        reader.advance().map_err(|e| from_read(e, reader.mark()))?;
    }

    char::from_u32(value).ok_or_else(|| ScanError::new(ErrorKind::InvalidEscape, mark))
}

fn scan_block(reader: &mut Reader<'_>, folded: bool, mut chomp: Chomp, mut explicit_indent: usize) -> Result<ScannedScalar>
{
    let mark = reader.mark();

    reader.advance().map_err(|e| from_read(e, mark))?; // '|' or '>'

    // Header: chomping indicator and/or indentation digit, in either order.
    let mut chomp_set = false;
    for _ in 0..2
    {
        match reader.head()
        {
            Some('+') if !chomp_set =>
            {
                chomp = Chomp::Keep;
                chomp_set = true;
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
            },
            Some('-') if !chomp_set =>
            {
                chomp = Chomp::Strip;
                chomp_set = true;
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
            },
            Some(c) if c.is_ascii_digit() && explicit_indent == 0 =>
            {
                let digit = c.to_digit(10).unwrap() as usize;

                if digit == 0
                {
                    return Err(ScanError::new(ErrorKind::InvalidIndentation, reader.mark()));
                }

                explicit_indent = digit;
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
            },
            _ => break,
        }
    }

    reader.skip_while(is_blank).map_err(|e| from_read(e, reader.mark()))?;

    match reader.head()
    {
        None => {},
        Some('#') =>
        {
            reader.skip_while(|c| !is_newline(c)).map_err(|e| from_read(e, reader.mark()))?;
        },
        Some(c) if is_newline(c) => {},
        _ => return Err(ScanError::new(ErrorKind::ExpectedWhitespace, reader.mark())),
    }

    reader.skip_line_break().map_err(|e| from_read(e, reader.mark()))?;

    let base_indent = explicit_indent;
    let mut detected_indent: Option<usize> = if base_indent > 0 { Some(base_indent) } else { None };

    let mut lines: Vec<String> = Vec::new();
    let mut trailing_blank_lines = 0usize;

    loop
    {
        let leading = reader.skip_while(|c| c == ' ').map_err(|e| from_read(e, reader.mark()))?;

        if reader.matches_fn(|c| c == '\t')
        {
            return Err(ScanError::new(ErrorKind::InvalidIndentation, reader.mark()));
        }

        if reader.matches_fn(is_newline) || reader.head().is_none()
        {
            // Blank (or eof-terminated) line.
            if reader.head().is_none()
            {
                break;
            }

            lines.push(String::new());
            trailing_blank_lines += 1;
            reader.skip_line_break().map_err(|e| from_read(e, reader.mark()))?;
            continue;
        }

        let indent = detected_indent.get_or_insert(leading);

        if leading < *indent
        {
            break;
        }

        let extra = leading - *indent;
        let mut line = " ".repeat(extra);

        let content = reader
            .match_while(|c| !is_newline(c))
            .map_err(|e| from_read(e, reader.mark()))?;
        line.push_str(&content);

        lines.push(line);
        trailing_blank_lines = 0;

        if reader.matches_fn(is_newline)
        {
            reader.skip_line_break().map_err(|e| from_read(e, reader.mark()))?;
        }
        else
        {
            break;
        }
    }

    if lines.len() >= trailing_blank_lines
    {
        lines.truncate(lines.len() - trailing_blank_lines);
    }

    let mut text = String::new();

    if folded
    {
        let mut prev_was_content = false;
        let mut pending_blanks = 0usize;

        for (i, line) in lines.iter().enumerate()
        {
            let more_indented = line.starts_with(' ') && !line.trim_start().is_empty();

            if line.is_empty()
            {
                pending_blanks += 1;
                continue;
            }

            if i > 0
            {
                if pending_blanks > 0
                {
                    text.push_str(&"\n".repeat(pending_blanks));
                }
                else if prev_was_content
                {
                    text.push(if more_indented { '\n' } else { ' ' });
                }
            }

            text.push_str(line);
            prev_was_content = true;
            pending_blanks = 0;
        }

        for _ in 0..trailing_blank_lines
        {
            text.push('\n');
        }
    }
    else
    {
        for (i, line) in lines.iter().enumerate()
        {
            if i > 0
            {
                text.push('\n');
            }

            text.push_str(line);
        }

        for _ in 0..trailing_blank_lines
        {
            text.push('\n');
        }
    }

    apply_chomp(&mut text, chomp);

    Ok(ScannedScalar {
        text,
        mark,
        style: if folded { ScalarStyle::Folded } else { ScalarStyle::Literal },
    })
}

fn apply_chomp(text: &mut String, chomp: Chomp)
{
    match chomp
    {
        Chomp::Keep =>
        {
            if !text.is_empty() && !text.ends_with('\n')
            {
                text.push('\n');
            }
        },
        Chomp::Clip =>
        {
            while text.ends_with("\n\n")
            {
                text.pop();
            }

            if !text.is_empty() && !text.ends_with('\n')
            {
                text.push('\n');
            }
        },
        Chomp::Strip =>
        {
            while text.ends_with('\n')
            {
                text.pop();
            }
        },
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scans_plain_scalar_up_to_colon_space() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"hr: 65")?;

        let scalar = scan_scalar(
            &mut reader,
            ScalarKind::Plain {
                flow_level:    0,
                block_indent: -1,
            },
        )?;

        assert_eq!(scalar.text, "hr");

        Ok(())
    }

    #[test]
    fn scans_single_quoted_with_doubled_apostrophe() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"'it''s'")?;

        let scalar = scan_scalar(&mut reader, ScalarKind::SingleQuoted)?;

        assert_eq!(scalar.text, "it's");

        Ok(())
    }

    #[test]
    fn scans_double_quoted_with_escape() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"\"a\\tb\"")?;

        let scalar = scan_scalar(&mut reader, ScalarKind::DoubleQuoted)?;

        assert_eq!(scalar.text, "a\tb");

        Ok(())
    }

    #[test]
    fn invalid_escape_errors()
    {
        let mut reader = Reader::new(b"\"a\\qb\"").unwrap();

        let err = scan_scalar(&mut reader, ScalarKind::DoubleQuoted).unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidEscape);
    }

    #[test]
    fn scans_literal_block_scalar_clipped() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"|\n  literal\n  text\n")?;

        let scalar = scan_scalar(
            &mut reader,
            ScalarKind::Block {
                folded: false,
                chomp: Chomp::Clip,
                indent: 0,
            },
        )?;

        assert_eq!(scalar.text, "literal\ntext\n");

        Ok(())
    }

    #[test]
    fn folded_scalar_folds_single_breaks_to_space() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b">\n  folded\n  text\n")?;

        let scalar = scan_scalar(
            &mut reader,
            ScalarKind::Block {
                folded: true,
                chomp: Chomp::Clip,
                indent: 0,
            },
        )?;

        assert_eq!(scalar.text, "folded text\n");

        Ok(())
    }
}
