/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt};

use crate::mark::Mark;

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur during library usage.
///
/// Every [`Error`] carries the [`Mark`] it was raised at, so
/// callers can produce line/column diagnostics without the
/// library needing to own any notion of "pretty printing".
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The position in the stream the error occurred at.
    pub fn mark(&self) -> Mark
    {
        self.inner.mark
    }

    /// The specific kind of error that occurred.
    pub fn kind(&self) -> ErrorKind
    {
        self.inner.kind
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Syntax`] The YAML stream was
    ///   syntactically invalid
    /// - [`Category::Eof`] The YAML stream ended
    ///   unexpectedly
    pub fn classify(&self) -> Category
    {
        self.inner.classify()
    }

    pub(crate) fn new(kind: ErrorKind, mark: Mark) -> Self
    {
        Self {
            inner: Box::new(internal::Error { kind, mark }),
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Error")
            .field("kind", &self.inner.kind)
            .field("mark", &self.inner.mark)
            .finish()
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}, at {}", self.inner.kind, self.inner.mark)
    }
}

impl StdError for Error {}

/// Rough category of an [`Error`]. Useful for making
/// decisions upon encountering an error without matching on
/// every [`ErrorKind`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The YAML stream was not syntactically valid
    Syntax,

    /// The YAML stream ended before a token or event could
    /// be completed
    Eof,
}

/// The flat enumeration of errors this library can produce,
/// carried alongside a [`Mark`] inside every [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind
{
    /// The byte stream ended while a token or scalar was
    /// mid-production.
    EndOfStream,

    /// A byte sequence could not be decoded under the
    /// stream's (explicit or detected) encoding.
    InvalidEncoding,

    /// A `%YAML` directive's major or minor version was not
    /// a valid decimal integer.
    InvalidVersion,

    /// A byte could not begin any valid token.
    InvalidToken,

    /// Block scalar or block collection indentation was
    /// inconsistent, used a tab, or was explicitly `0`.
    InvalidIndentation,

    /// A double-quoted scalar contained an unrecognized
    /// escape sequence.
    InvalidEscape,

    /// A required simple-key candidate could not be resolved
    /// before going stale.
    ExpectedKey,

    /// A mapping value was required but not found.
    ExpectedValue,

    /// A directive was not terminated by whitespace before a
    /// comment or line break.
    ExpectedWhitespace,

    /// A `?` explicit key token appeared where a mapping key
    /// is not legal.
    UnexpectedKey,

    /// A `:` value indicator appeared where a mapping value
    /// is not legal.
    UnexpectedValue,

    /// A `%YAML` or `%TAG` directive repeated within a
    /// single document, or a directive appeared outside of
    /// document-start position.
    UnexpectedDirective,

    /// A `%YAML` or `%TAG` directive was malformed.
    DirectiveFormat,

    /// A tag handle or suffix was malformed, or referenced an
    /// undefined handle.
    TagFormat,

    /// An anchor or alias name was empty or contained an
    /// illegal character.
    AnchorFormat,
}

impl ErrorKind
{
    /// Categorize this error kind.
    pub fn classify(&self) -> Category
    {
        match self
        {
            ErrorKind::EndOfStream => Category::Eof,
            _ => Category::Syntax,
        }
    }
}

impl fmt::Display for ErrorKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        use ErrorKind::*;

        let msg = match self
        {
            EndOfStream => "unexpected end of stream",
            InvalidEncoding => "invalid byte sequence for the stream's encoding",
            InvalidVersion => "invalid %YAML version",
            InvalidToken => "byte sequence did not begin a valid token",
            InvalidIndentation => "invalid block indentation",
            InvalidEscape => "invalid escape sequence in a double-quoted scalar",
            ExpectedKey => "expected a mapping key",
            ExpectedValue => "expected a mapping value",
            ExpectedWhitespace => "expected whitespace after a directive",
            UnexpectedKey => "mapping key not allowed in this context",
            UnexpectedValue => "mapping value not allowed in this context",
            UnexpectedDirective => "directive not allowed in this context",
            DirectiveFormat => "malformed %YAML or %TAG directive",
            TagFormat => "malformed tag handle or suffix",
            AnchorFormat => "malformed anchor or alias name",
        };

        f.write_str(msg)
    }
}

mod internal
{
    use super::{Category, ErrorKind};
    use crate::mark::Mark;

    /// Internal error representation, boxed behind the
    /// public [`Error`](super::Error) so the happy path
    /// doesn't pay for a large `Result<T, E>`.
    pub(crate) struct Error
    {
        pub kind: ErrorKind,
        pub mark: Mark,
    }

    impl Error
    {
        pub fn classify(&self) -> Category
        {
            self.kind.classify()
        }
    }
}
