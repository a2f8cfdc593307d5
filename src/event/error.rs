/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Errors that may surface while turning a [`Token`] stream
//! into [`Event`]s.
//!
//! The Parser raises the same flat [`ErrorKind`] enumeration
//! the Scanner does -- there is exactly one error type for
//! the whole pipeline, carried alongside the [`Mark`] it was
//! raised at.
//!
//! [`Token`]: crate::token::Token
//! [`Event`]: crate::event::types::Event
//! [`Mark`]: crate::mark::Mark

pub use crate::error::{Category, Error, ErrorKind};

use crate::mark::Mark;

/// Result type returned while parsing YAML events.
pub type ParseResult<T> = crate::error::Result<T>;

pub(in crate::event) fn err<T>(kind: ErrorKind, mark: Mark) -> ParseResult<T>
{
    Err(Error::new(kind, mark))
}
