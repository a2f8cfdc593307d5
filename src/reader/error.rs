/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Error types returned from the [`reader`](super) module.

use std::fmt;

pub type ReadResult<T> = std::result::Result<T, ReadError>;

/// Errors the Reader stage can raise while transcoding the
/// input buffer. These always carry the current
/// [`Mark`](crate::mark::Mark) when converted into the
/// crate-wide [`Error`](crate::error::Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError
{
    /// A byte sequence could not be decoded under the
    /// stream's encoding.
    InvalidCodeUnit,
}

impl fmt::Display for ReadError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            ReadError::InvalidCodeUnit => f.write_str("invalid code unit for stream encoding"),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<ReadError> for crate::error::ErrorKind
{
    fn from(_: ReadError) -> Self
    {
        crate::error::ErrorKind::InvalidEncoding
    }
}
