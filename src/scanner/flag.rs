/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use bitflags::bitflags;

/// An empty, zeroed flag set. This is the default, with all
/// other flags disabled.
pub const O_ZEROED: Flags = Flags::empty();

/// Also push a [`TokenData::Comment`](crate::token::TokenData::Comment)
/// onto the queue for every `#` comment scanned, so it's
/// visible to direct callers of [`next_token`](super::Scanner::next_token).
/// The before/after attachment onto the surrounding real
/// tokens always happens regardless of this flag; this only
/// controls whether the raw comment token is *also* kept in
/// the stream rather than being fully absorbed by that
/// attachment. Off by default, since most callers only want
/// the attached comments carried on the tokens around them.
pub const O_EMIT_COMMENTS: Flags = Flags::EMIT_COMMENTS;

bitflags! {
    /// Directives controlling various behaviors of the Scanner,
    /// see each O_ variant for an explanation of how each works.
    #[derive(Default)]
    pub struct Flags: u32 {
        const EMIT_COMMENTS = 0b00000001;
    }
}
