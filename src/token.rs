/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::mark::Mark;

pub type Slice<'a> = std::borrow::Cow<'a, str>;

/// Comments attached to a [`Token`] by the scanner's
/// `gatherComments` pass: contiguous leading comments fold
/// into `before`; a trailing same-line comment (on a
/// single-line token kind) becomes `after`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comments<'a>
{
    pub before: Option<Slice<'a>>,
    pub after:  Option<Slice<'a>>,
}

impl<'a> Comments<'a>
{
    pub fn is_empty(&self) -> bool
    {
        self.before.is_none() && self.after.is_none()
    }

    pub fn into_owned(self) -> Comments<'static>
    {
        Comments {
            before: self.before.map(|s| Slice::Owned(s.into_owned())),
            after:  self.after.map(|s| Slice::Owned(s.into_owned())),
        }
    }
}

/// A lexical token produced by the [`Scanner`](crate::scanner::Scanner),
/// carrying the [`Mark`] it began at and any comments the
/// scanner attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a>
{
    pub data:     TokenData<'a>,
    pub mark:     Mark,
    pub comments: Comments<'a>,
}

impl<'a> Token<'a>
{
    pub fn new(data: TokenData<'a>, mark: Mark) -> Self
    {
        Self {
            data,
            mark,
            comments: Comments::default(),
        }
    }

    pub fn marker(&self) -> Marker
    {
        Marker::from(&self.data)
    }

    pub fn into_owned(self) -> Token<'static>
    {
        Token {
            data:     self.data.into_owned(),
            mark:     self.mark,
            comments: self.comments.into_owned(),
        }
    }
}

impl PartialEq<Marker> for Token<'_>
{
    fn eq(&self, other: &Marker) -> bool
    {
        self.marker() == *other
    }
}

/// The closed set of token kinds a YAML scanner may emit.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenData<'a>
{
    /// The stream's start, with the byte (encoding) {virtual}
    StreamStart(StreamEncoding),
    /// The stream's end {virtual}
    StreamEnd,
    /// The %YAML directive, (major,minor)
    VersionDirective(u8, u8),
    /// The %TAG directive, (handle, prefix)
    TagDirective(Slice<'a>, Slice<'a>),
    /// A ---
    DocumentStart,
    /// A ...
    DocumentEnd,
    /// Indentation increase for a block (sequence)
    BlockSequenceStart,
    /// Indentation increase for a block (map)
    BlockMappingStart,
    /// Indentation decrease for a block
    BlockEnd,
    /// A '['
    FlowSequenceStart,
    /// A ']'
    FlowSequenceEnd,
    /// A '{'
    FlowMappingStart,
    /// A '}'
    FlowMappingEnd,
    /// A '-'
    BlockEntry,
    /// A ','
    FlowEntry,
    /// Either a '?' or nothing
    Key,
    /// A ':'
    Value,
    /// An alias (*anchor)
    Alias(Slice<'a>),
    /// An anchor (&anchor)
    Anchor(Slice<'a>),
    /// A tag (!handle, !suffix)
    Tag(Slice<'a>, Slice<'a>),
    /// A scalar (value, style)
    Scalar(Slice<'a>, ScalarStyle),
    /// A `#`-prefixed comment, text excluding the leading `#`
    /// and any single leading space.
    Comment(Slice<'a>),
}

impl<'a> TokenData<'a>
{
    pub fn into_owned(self) -> TokenData<'static>
    {
        match self
        {
            TokenData::StreamStart(encoding) => TokenData::StreamStart(encoding),
            TokenData::StreamEnd => TokenData::StreamEnd,
            TokenData::VersionDirective(major, minor) =>
            {
                TokenData::VersionDirective(major, minor)
            },
            TokenData::TagDirective(handle, suffix) => TokenData::TagDirective(
                Slice::Owned(handle.into_owned()),
                Slice::Owned(suffix.into_owned()),
            ),
            TokenData::DocumentStart => TokenData::DocumentStart,
            TokenData::DocumentEnd => TokenData::DocumentEnd,
            TokenData::BlockSequenceStart => TokenData::BlockSequenceStart,
            TokenData::BlockMappingStart => TokenData::BlockMappingStart,
            TokenData::BlockEnd => TokenData::BlockEnd,
            TokenData::FlowSequenceStart => TokenData::FlowSequenceStart,
            TokenData::FlowSequenceEnd => TokenData::FlowSequenceEnd,
            TokenData::FlowMappingStart => TokenData::FlowMappingStart,
            TokenData::FlowMappingEnd => TokenData::FlowMappingEnd,
            TokenData::BlockEntry => TokenData::BlockEntry,
            TokenData::FlowEntry => TokenData::FlowEntry,
            TokenData::Key => TokenData::Key,
            TokenData::Value => TokenData::Value,
            TokenData::Alias(alias) => TokenData::Alias(Slice::Owned(alias.into_owned())),
            TokenData::Anchor(anchor) => TokenData::Anchor(Slice::Owned(anchor.into_owned())),
            TokenData::Tag(handle, suffix) => TokenData::Tag(
                Slice::Owned(handle.into_owned()),
                Slice::Owned(suffix.into_owned()),
            ),
            TokenData::Scalar(contents, style) =>
            {
                TokenData::Scalar(Slice::Owned(contents.into_owned()), style)
            },
            TokenData::Comment(text) => TokenData::Comment(Slice::Owned(text.into_owned())),
        }
    }

    /// "Single-line" token kinds are the ones a trailing
    /// same-line comment may attach to as `after`: scalars,
    /// values, and collection/flow end markers.
    pub fn is_single_line(&self) -> bool
    {
        matches!(
            self,
            TokenData::Scalar(..)
                | TokenData::Value
                | TokenData::FlowSequenceEnd
                | TokenData::FlowMappingEnd
                | TokenData::Alias(_)
                | TokenData::Anchor(_)
                | TokenData::DocumentEnd
        )
    }
}

/// A cheap, `Copy` discriminant for a [`Token`]/[`TokenData`],
/// without any of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker
{
    StreamStart,
    StreamEnd,
    VersionDirective,
    TagDirective,
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    Alias,
    Anchor,
    Tag,
    Scalar,
    Comment,
}

impl Marker
{
    fn from_data(t: &TokenData<'_>) -> Self
    {
        use TokenData::*;

        match t
        {
            StreamStart(_) => Self::StreamStart,
            StreamEnd => Self::StreamEnd,
            VersionDirective(_, _) => Self::VersionDirective,
            TagDirective(_, _) => Self::TagDirective,
            DocumentStart => Self::DocumentStart,
            DocumentEnd => Self::DocumentEnd,
            BlockSequenceStart => Self::BlockSequenceStart,
            BlockMappingStart => Self::BlockMappingStart,
            BlockEnd => Self::BlockEnd,
            FlowSequenceStart => Self::FlowSequenceStart,
            FlowSequenceEnd => Self::FlowSequenceEnd,
            FlowMappingStart => Self::FlowMappingStart,
            FlowMappingEnd => Self::FlowMappingEnd,
            BlockEntry => Self::BlockEntry,
            FlowEntry => Self::FlowEntry,
            Key => Self::Key,
            Value => Self::Value,
            Alias(_) => Self::Alias,
            Anchor(_) => Self::Anchor,
            Tag(_, _) => Self::Tag,
            Scalar(_, _) => Self::Scalar,
            Comment(_) => Self::Comment,
        }
    }
}

impl Default for Marker
{
    fn default() -> Self
    {
        Self::StreamStart
    }
}

impl From<&'_ TokenData<'_>> for Marker
{
    fn from(t: &'_ TokenData<'_>) -> Self
    {
        Self::from_data(t)
    }
}

impl PartialEq<TokenData<'_>> for Marker
{
    fn eq(&self, other: &TokenData<'_>) -> bool
    {
        self == &Self::from(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEncoding
{
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl From<crate::encoding::Encoding> for StreamEncoding
{
    fn from(e: crate::encoding::Encoding) -> Self
    {
        use crate::encoding::Encoding::*;

        match e
        {
            Utf8 => StreamEncoding::Utf8,
            Utf16Le => StreamEncoding::Utf16Le,
            Utf16Be => StreamEncoding::Utf16Be,
            Utf32Le => StreamEncoding::Utf32Le,
            Utf32Be => StreamEncoding::Utf32Be,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle
{
    Plain,
    SingleQuote,
    DoubleQuote,
    Literal,
    Folded,
}

/// Whether a collection (sequence or mapping) was written in
/// block or flow style, carried on events so a round-tripping
/// emitter could reproduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStyle
{
    Block,
    Flow,
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn marker_from_data_roundtrips()
    {
        let data = TokenData::Scalar(Slice::Borrowed("hi"), ScalarStyle::Plain);

        assert_eq!(Marker::from(&data), Marker::Scalar);
    }

    #[test]
    fn single_line_classification()
    {
        assert!(TokenData::Value.is_single_line());
        assert!(!TokenData::BlockMappingStart.is_single_line());
    }

    #[test]
    fn token_into_owned_detaches_borrow()
    {
        let src = String::from("payload");
        let token = Token::new(
            TokenData::Scalar(Slice::Borrowed(&src), ScalarStyle::Plain),
            Mark::START,
        );

        let owned = token.into_owned();

        drop(src);

        assert_eq!(
            owned.data,
            TokenData::Scalar(Slice::Owned("payload".to_owned()), ScalarStyle::Plain)
        );
    }
}
