/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scans `%YAML` and `%TAG` directives.

use crate::{
    error::ErrorKind,
    reader::{is_blank, Reader},
    scanner::{
        error::{from_read, ScanError, ScanResult as Result},
        tag,
    },
    token::TokenData,
};

/// Which directive starts the current line. Dispatched on
/// the directive name following the `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::scanner) enum DirectiveKind
{
    Version,
    Tag,
}

impl DirectiveKind
{
    const KIND_TAG: &'static str = "TAG";
    const KIND_VERSION: &'static str = "YAML";

    pub fn new<'b>(reader: &Reader<'b>) -> Result<Self>
    {
        let mark = reader.mark();

        if matches_ahead(reader, Self::KIND_VERSION)
        {
            Ok(Self::Version)
        }
        else if matches_ahead(reader, Self::KIND_TAG)
        {
            Ok(Self::Tag)
        }
        else
        {
            Err(ScanError::new(ErrorKind::UnexpectedDirective, mark))
        }
    }

    pub fn name_len(&self) -> usize
    {
        match self
        {
            Self::Version => Self::KIND_VERSION.chars().count(),
            Self::Tag => Self::KIND_TAG.chars().count(),
        }
    }
}

fn matches_ahead(reader: &Reader<'_>, word: &str) -> bool
{
    word.chars()
        .enumerate()
        .all(|(i, c)| reader.peek_nth(i) == Some(c))
}

/// Scan a `%YAML` or `%TAG` directive's payload (the `%` and
/// directive name have already been consumed by the caller).
pub(in crate::scanner) fn scan_directive<'b>(
    reader: &mut Reader<'b>,
    kind: DirectiveKind,
) -> Result<TokenData<'b>>
{
    reader.skip_while(is_blank).map_err(|e| from_read(e, reader.mark()))?;

    match kind
    {
        DirectiveKind::Version =>
        {
            let major = scan_version_number(reader)?;

            if !reader.skip('.').map_err(|e| from_read(e, reader.mark()))?
            {
                return Err(ScanError::new(ErrorKind::InvalidVersion, reader.mark()));
            }

            let minor = scan_version_number(reader)?;

            check_directive_end(reader)?;

            Ok(TokenData::VersionDirective(major, minor))
        },
        DirectiveKind::Tag =>
        {
            let data = tag::scan_tag_directive(reader)?;

            check_directive_end(reader)?;

            Ok(data)
        },
    }
}

fn scan_version_number(reader: &mut Reader<'_>) -> Result<u8>
{
    let mark = reader.mark();
    let value = reader
        .scan_integer()
        .map_err(|e| from_read(e, mark))?
        .ok_or_else(|| ScanError::new(ErrorKind::InvalidVersion, mark))?;

    u8::try_from(value).map_err(|_| ScanError::new(ErrorKind::InvalidVersion, mark))
}

/// A directive must be followed by whitespace (then
/// optionally a comment) before the line break.
fn check_directive_end(reader: &mut Reader<'_>) -> Result<()>
{
    reader.skip_while(is_blank).map_err(|e| from_read(e, reader.mark()))?;

    match reader.head()
    {
        None | Some('#') => Ok(()),
        Some(c) if crate::reader::is_newline(c) => Ok(()),
        _ => Err(ScanError::new(ErrorKind::ExpectedWhitespace, reader.mark())),
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scans_yaml_directive() -> anyhow::Result<()>
    {
        let reader = Reader::new(b"YAML 1.2\n")?;
        let kind = DirectiveKind::new(&reader)?;

        assert_eq!(kind, DirectiveKind::Version);

        let mut reader = Reader::new(b" 1.2\n")?;
        let data = scan_directive(&mut reader, DirectiveKind::Version)?;

        assert_eq!(data, TokenData::VersionDirective(1, 2));

        Ok(())
    }
}
