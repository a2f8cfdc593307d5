/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::mark::Mark;

/// A byte distance beyond which a simple-key candidate goes
/// stale, per the 1024-byte simple-key horizon.
pub(in crate::scanner) const MAX_SIMPLE_KEY_DISTANCE: usize = 1024;

/// A speculative record tracking a potential implicit
/// mapping key: a single-line scalar that, if followed by a
/// `:`, retroactively becomes a mapping key.
///
/// `token_index` is the absolute FIFO index the key (and, if
/// necessary, a `blockMappingStart`) must be inserted at
/// when the candidate resolves -- it is always `>=`
/// `tokens_taken` at the time of resolution.
#[derive(Debug, Clone, Copy)]
pub(in crate::scanner) struct SimpleKeyCandidate
{
    pub token_index: usize,
    pub mark:        Mark,
    pub required:    bool,
}

impl SimpleKeyCandidate
{
    pub fn new(token_index: usize, mark: Mark, required: bool) -> Self
    {
        Self {
            token_index,
            mark,
            required,
        }
    }

    /// Has this candidate gone stale relative to the current
    /// position: spans more than one line, or more than
    /// [`MAX_SIMPLE_KEY_DISTANCE`] bytes?
    pub fn is_stale(&self, current: Mark) -> bool
    {
        match current.byte_distance(&self.mark)
        {
            Some(distance) => distance > MAX_SIMPLE_KEY_DISTANCE,
            // Different lines
            None => true,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fresh_candidate_is_not_stale()
    {
        let mark = Mark::START;
        let candidate = SimpleKeyCandidate::new(0, mark, false);

        assert!(!candidate.is_stale(mark));
    }

    #[test]
    fn candidate_on_new_line_is_stale()
    {
        let mark = Mark::START;
        let candidate = SimpleKeyCandidate::new(0, mark, false);

        let later = mark.advance_line(1);

        assert!(candidate.is_stale(later));
    }

    #[test]
    fn candidate_past_byte_horizon_is_stale()
    {
        let mark = Mark::START;
        let candidate = SimpleKeyCandidate::new(0, mark, true);

        let mut later = mark;
        for _ in 0..(MAX_SIMPLE_KEY_DISTANCE + 1)
        {
            later = later.advance_column(1);
        }

        assert!(candidate.is_stale(later));
    }
}
