//! Scans `&anchor` and `*alias` names.

use crate::{
    error::ErrorKind,
    reader::Reader,
    scanner::error::{ScanError, ScanResult as Result},
    token::{Slice, TokenData},
};

/// Which of the two sigil-prefixed name tokens is being
/// scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::scanner) enum AnchorKind
{
    Anchor,
    Alias,
}

impl AnchorKind
{
    pub fn new(c: char) -> Option<Self>
    {
        match c
        {
            '&' => Some(Self::Anchor),
            '*' => Some(Self::Alias),
            _ => None,
        }
    }
}

/// Characters forbidden in an anchor/alias name: the flow
/// indicators, plus anything that isn't printable
/// non-whitespace.
fn is_anchor_char(c: char) -> bool
{
    !c.is_whitespace() && !matches!(c, ',' | '[' | ']' | '{' | '}')
}

pub(in crate::scanner) fn scan_anchor<'b>(
    reader: &mut Reader<'b>,
    kind: AnchorKind,
) -> Result<TokenData<'static>>
{
    let mark = reader.mark();

    reader.advance().map_err(|e| super::error::from_read(e, mark))?;

    let name = reader
        .match_while(is_anchor_char)
        .map_err(|e| super::error::from_read(e, reader.mark()))?;

    if name.is_empty()
    {
        return Err(ScanError::new(ErrorKind::AnchorFormat, mark));
    }

    let data = match kind
    {
        AnchorKind::Anchor => TokenData::Anchor(Slice::Owned(name)),
        AnchorKind::Alias => TokenData::Alias(Slice::Owned(name)),
    };

    Ok(data)
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scans_simple_anchor() -> anyhow::Result<()>
    {
        let mut reader = Reader::new(b"&a rest")?;

        let data = scan_anchor(&mut reader, AnchorKind::Anchor)?;

        assert_eq!(data, TokenData::Anchor(Slice::Owned("a".to_owned())));
        assert_eq!(reader.head(), Some(' '));

        Ok(())
    }

    #[test]
    fn empty_anchor_name_is_an_error()
    {
        let mut reader = Reader::new(b"& ").unwrap();

        let err = scan_anchor(&mut reader, AnchorKind::Anchor).unwrap_err();

        assert_eq!(err.kind, ErrorKind::AnchorFormat);
    }
}
