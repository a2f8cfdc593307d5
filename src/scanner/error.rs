/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Error types raised while lexing tokens.

use crate::{
    error::{Error, ErrorKind},
    mark::Mark,
    reader::error::ReadError,
};

pub(crate) type ScanResult<T> = std::result::Result<T, ScanError>;

/// A scanning failure: an [`ErrorKind`] paired with the
/// [`Mark`] it occurred at. Every scanner error is fatal --
/// there is no local recovery, matching the stream's
/// failure semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanError
{
    pub kind: ErrorKind,
    pub mark: Mark,
}

impl ScanError
{
    pub fn new(kind: ErrorKind, mark: Mark) -> Self
    {
        Self { kind, mark }
    }
}

impl From<ScanError> for Error
{
    fn from(e: ScanError) -> Self
    {
        Error::new(e.kind, e.mark)
    }
}

/// A [`ReadError`] is always translated at the Mark the
/// Reader was at when it occurred, becoming
/// [`ErrorKind::InvalidEncoding`].
pub(crate) fn from_read(e: ReadError, mark: Mark) -> ScanError
{
    ScanError::new(ErrorKind::from(e), mark)
}
