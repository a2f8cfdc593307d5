/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A [`Mark`] is a value-typed stream position, produced by
//! the [`Reader`](crate::reader::Reader) on every advance
//! and carried by every [`Token`](crate::token::Token) and
//! [`Event`](crate::event::types::Event) downstream. It
//! exists purely for diagnostics: error reporting and
//! same-line comment attachment.

use std::fmt;

/// A position in the decoded Unicode scalar stream.
///
/// `column` is measured in Unicode scalars (`char`s), not
/// bytes or grapheme clusters, matching YAML's own
/// indentation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark
{
    offset: usize,
    line:   usize,
    column: usize,
}

impl Mark
{
    /// The mark at the very start of a stream: offset 0,
    /// line 1, column 1.
    pub const START: Mark = Mark {
        offset: 0,
        line:   1,
        column: 1,
    };

    pub(crate) fn new(offset: usize, line: usize, column: usize) -> Self
    {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Byte offset into the original (pre-decode) buffer.
    pub fn offset(&self) -> usize
    {
        self.offset
    }

    /// 1-based line number.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// 1-based column, counted in Unicode scalars.
    pub fn column(&self) -> usize
    {
        self.column
    }

    /// Advance this mark past a single, non-newline scalar
    /// of `width` bytes.
    pub(crate) fn advance_column(&self, width: usize) -> Self
    {
        Self {
            offset: self.offset + width,
            line:   self.line,
            column: self.column + 1,
        }
    }

    /// Advance this mark past a single line break of `width`
    /// bytes.
    pub(crate) fn advance_line(&self, width: usize) -> Self
    {
        Self {
            offset: self.offset + width,
            line:   self.line + 1,
            column: 1,
        }
    }

    /// The (inclusive) byte distance between two marks on
    /// the *same* line, used for the simple-key 1024 byte
    /// horizon. Returns `None` if the marks are on different
    /// lines.
    pub(crate) fn byte_distance(&self, earlier: &Mark) -> Option<usize>
    {
        if self.line == earlier.line
        {
            Some(self.offset.saturating_sub(earlier.offset))
        }
        else
        {
            None
        }
    }
}

impl fmt::Display for Mark
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
