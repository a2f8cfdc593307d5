/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Configuration flags controlling the Parser's behavior.
//!
//! `Comments` are always forwarded from tokens onto the
//! events built from them (see [`Comments`](crate::token::Comments));
//! there is no flag for that. Raw [`comment`](crate::token::TokenData::Comment)
//! tokens themselves never reach the Parser's event stream --
//! the grammar has no event to carry one -- so, unlike the
//! Scanner, the Parser has no `O_EMIT_COMMENTS` of its own.
//! This `Flags` type is kept, empty, as the place future
//! Parser-level options would go.

use bitflags::bitflags;

/// An empty, zeroed flag set. The default, with all other
/// flags disabled.
pub const O_ZEROED: Flags = Flags::empty();

bitflags! {
    /// Directives controlling various behaviors of the
    /// Parser, see each `O_*` constant for an explanation.
    #[derive(Default)]
    pub struct Flags: u32 {}
}
