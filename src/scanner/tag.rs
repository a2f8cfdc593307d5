//! Scans tag handles (`!`, `!!`, `!named!`) and their
//! prefixes/suffixes.
//!
//! A tag is made of a handle and a suffix; a handle expands
//! to a prefix via the current document's tag map, which
//! starts as `{"!": "!", "!!": "tag:yaml.org,2002:"}` and is
//! overridden per-document by `%TAG` directives. Resolving
//! the handle against the map is the Parser's job (§4.4);
//! the Scanner only produces the raw `(handle, suffix)`
//! pair.

use crate::{
    error::ErrorKind,
    reader::Reader,
    scanner::error::{from_read, ScanError, ScanResult as Result},
    token::{Slice, TokenData},
};

fn is_tag_handle_char(c: char) -> bool
{
    c.is_ascii_alphanumeric() || c == '-'
}

/// Characters allowed in a tag URI: the URL-fragment set
/// plus `# % [ ]`.
fn is_uri_char(c: char) -> bool
{
    c.is_ascii_alphanumeric() || matches!(c, '-' | '#' | ';' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ',' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')' | '[' | ']' | '%')
}

/// Scan a `!`, `!!`, or `!named!` handle, including both
/// sigils. Returns the handle text, e.g. `"!"`, `"!!"`, or
/// `"!named!"`.
fn scan_tag_handle(reader: &mut Reader<'_>) -> Result<String>
{
    let mark = reader.mark();

    if !reader.skip('!').map_err(|e| from_read(e, mark))?
    {
        return Err(ScanError::new(ErrorKind::TagFormat, mark));
    }

    let name = reader
        .match_while(is_tag_handle_char)
        .map_err(|e| from_read(e, reader.mark()))?;

    let mut handle = String::with_capacity(name.len() + 2);
    handle.push('!');
    handle.push_str(&name);

    if !name.is_empty()
    {
        if !reader.skip('!').map_err(|e| from_read(e, reader.mark()))?
        {
            return Err(ScanError::new(ErrorKind::TagFormat, mark));
        }

        handle.push('!');
    }

    Ok(handle)
}

/// Scan (and percent-decode) a tag URI, stopping at
/// whitespace, a line break, or (when `in_flow`) a flow
/// indicator.
fn scan_tag_uri(reader: &mut Reader<'_>, in_flow: bool) -> Result<String>
{
    let mark = reader.mark();
    let mut out = String::new();

    loop
    {
        match reader.head()
        {
            Some(',') if in_flow => break,
            Some('%') =>
            {
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
                out.push(scan_percent_escape(reader)?);
            },
            Some(c) if is_uri_char(c) =>
            {
                out.push(c);
                reader.advance().map_err(|e| from_read(e, reader.mark()))?;
            },
            _ => break,
        }
    }

    if out.is_empty()
    {
        return Err(ScanError::new(ErrorKind::TagFormat, mark));
    }

    Ok(out)
}

fn scan_percent_escape(reader: &mut Reader<'_>) -> Result<char>
{
    let mark = reader.mark();
    let mut value: u32 = 0;

    for _ in 0..2
    {
        let c = reader.head().ok_or_else(|| ScanError::new(ErrorKind::TagFormat, mark))?;
        let digit = c.to_digit(16).ok_or_else(|| ScanError::new(ErrorKind::TagFormat, mark))?;

        value = value * 16 + digit;
        reader.advance().map_err(|e| from_read(e, reader.mark()))?;
    }

    char::from_u32(value).ok_or_else(|| ScanError::new(ErrorKind::TagFormat, mark))
}

/// Scan a `%TAG` directive's payload: `<handle> <prefix>`.
pub(in crate::scanner) fn scan_tag_directive<'b>(reader: &mut Reader<'b>) -> Result<TokenData<'b>>
{
    let handle = scan_tag_handle(reader)?;

    if !reader
        .matches_fn(crate::reader::is_blank)
    {
        return Err(ScanError::new(ErrorKind::TagFormat, reader.mark()));
    }

    reader
        .skip_while(crate::reader::is_blank)
        .map_err(|e| from_read(e, reader.mark()))?;

    let prefix = scan_tag_uri(reader, false)?;

    Ok(TokenData::TagDirective(
        Slice::Owned(handle),
        Slice::Owned(prefix),
    ))
}

/// Scan a node's tag (`!handle!suffix`, `!suffix`, or
/// `!<verbatim-uri>`), called with `head() == Some('!')`.
pub(in crate::scanner) fn scan_tag<'b>(reader: &mut Reader<'b>, in_flow: bool) -> Result<TokenData<'b>>
{
    let mark = reader.mark();

    // Verbatim tag: !<uri>
    if reader.peek_nth(1) == Some('<')
    {
        reader.advance().map_err(|e| from_read(e, mark))?; // '!'
        reader.advance().map_err(|e| from_read(e, mark))?; // '<'

        let uri = scan_tag_uri(reader, false)?;

        if !reader.skip('>').map_err(|e| from_read(e, reader.mark()))?
        {
            return Err(ScanError::new(ErrorKind::TagFormat, mark));
        }

        return Ok(TokenData::Tag(Slice::Owned(String::new()), Slice::Owned(uri)));
    }

    let handle = scan_tag_handle(reader)?;

    // Bare '!' with nothing else: the null/non-specific tag.
    if handle == "!" && !reader.matches_fn(is_uri_char)
    {
        return Ok(TokenData::Tag(Slice::Owned("!".to_owned()), Slice::Owned(String::new())));
    }

    let suffix = if reader.matches_fn(is_uri_char)
    {
        scan_tag_uri(reader, in_flow)?
    }
    else
    {
        String::new()
    };

    Ok(TokenData::Tag(Slice::Owned(handle), Slice::Owned(suffix)))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scans_shorthand_tag() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"!!str")?;

        let data = scan_tag(&mut reader, false)?;

        assert_eq!(
            data,
            TokenData::Tag(Slice::Owned("!!".to_owned()), Slice::Owned("str".to_owned()))
        );

        Ok(())
    }

    #[test]
    fn scans_bare_non_specific_tag() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"! ")?;

        let data = scan_tag(&mut reader, false)?;

        assert_eq!(
            data,
            TokenData::Tag(Slice::Owned("!".to_owned()), Slice::Owned(String::new()))
        );

        Ok(())
    }

    #[test]
    fn scans_verbatim_tag() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"!<tag:yaml.org,2002:str>")?;

        let data = scan_tag(&mut reader, false)?;

        assert_eq!(
            data,
            TokenData::Tag(Slice::Owned(String::new()), Slice::Owned("tag:yaml.org,2002:str".to_owned()))
        );

        Ok(())
    }
}
