/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The Scanner turns a [`Reader`]'s Unicode scalar stream
//! into [`Token`]s: it tracks block indentation, flow
//! nesting, and the "is this scalar actually a mapping key"
//! question that YAML's indicator-free key syntax forces onto
//! every implementation.
//!
//! Tokens are produced into a [`Queue`] rather than directly
//! into the caller's hand, because a simple key candidate
//! resolves *after* the scalar it labels has already been
//! scanned -- the `blockMappingStart`/`key` pair must be
//! retroactively inserted before it in FIFO order.

pub(crate) mod entry;
pub(crate) mod error;
pub(crate) mod flag;

mod anchor;
mod context;
mod directive;
mod key;
mod scalar;
mod tag;

use crate::{
    error::ErrorKind,
    mark::Mark,
    queue::Queue,
    reader::{is_blank, is_newline, Reader},
    scanner::{
        anchor::{scan_anchor, AnchorKind},
        context::IndentStack,
        directive::{scan_directive, DirectiveKind},
        entry::TokenEntry,
        error::{from_read, ScanError, ScanResult as Result},
        flag::{Flags, O_EMIT_COMMENTS},
        key::SimpleKeyCandidate,
        scalar::{looks_like_document_indicator, scan_scalar, Chomp, ScalarKind},
        tag::scan_tag,
    },
    token::{Slice, Token, TokenData},
};

type Tokens<'de> = Queue<TokenEntry<'de>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase
{
    NotStarted,
    Running,
    Finished,
}

/// Turns a [`Reader`]'s scalar stream into a [`Token`] stream.
///
/// Tokens are pulled one at a time via [`next_token`](Self::next_token);
/// internally each call may drive the reader forward by many
/// scalars and push several tokens into the internal [`Queue`]
/// before the next one in FIFO order is ready to be handed
/// back.
#[derive(Debug)]
pub(crate) struct Scanner<'b>
{
    reader: Reader<'b>,
    queue:  Tokens<'b>,
    phase:  Phase,

    indent:     IndentStack,
    flow_level: usize,

    /// The next absolute FIFO index a pushed token will
    /// receive.
    produced: usize,

    keys_allowed: bool,
    /// One speculative simple-key candidate per nesting level
    /// (block level 0, then one per open flow collection).
    simple_keys: Vec<Option<SimpleKeyCandidate>>,

    pending_comment: Option<String>,

    options: Flags,
}

impl<'b> Scanner<'b>
{
    pub fn new(reader: Reader<'b>, options: Flags) -> Self
    {
        Self {
            reader,
            queue: Queue::new(),
            phase: Phase::NotStarted,
            indent: IndentStack::new(),
            flow_level: 0,
            produced: 0,
            keys_allowed: true,
            simple_keys: vec![None],
            pending_comment: None,
            options,
        }
    }

    /// Pull the next token from the stream, driving the
    /// reader forward as far as needed to produce it.
    pub fn next_token(&mut self) -> Result<Token<'b>>
    {
        loop
        {
            if self.ready_to_pop()
            {
                break;
            }

            if self.phase == Phase::Finished && self.queue.is_empty()
            {
                return Err(ScanError::new(ErrorKind::EndOfStream, self.reader.mark()));
            }

            self.fetch_next_token()?;
        }

        let entry = self.queue.pop().expect("a ready entry was just observed at the head of the queue");
        let token = entry.into_token();

        log::trace!("scanner: dispatching {:?}", token.marker());

        Ok(token)
    }

    /// The queue's minimum-index entry is safe to hand back
    /// only once no outstanding simple-key reservation could
    /// still resolve to a *smaller* index than it -- every
    /// reservation keeps the index it was given, so once the
    /// queue's minimum is below every pending reservation,
    /// nothing can ever displace it.
    fn ready_to_pop(&self) -> bool
    {
        match self.queue.peek()
        {
            None => false,
            Some(entry) => match self.min_pending_reservation()
            {
                Some(pending) => entry.read_at() < pending,
                None => true,
            },
        }
    }

    fn min_pending_reservation(&self) -> Option<usize>
    {
        self.simple_keys.iter().flatten().map(|candidate| candidate.token_index).min()
    }

    /// Scan and enqueue whatever the next token(s) in the
    /// stream are. May enqueue zero, one, or several tokens
    /// (e.g. a `blockEnd` run, or a retroactive
    /// `blockMappingStart`/`key` pair).
    fn fetch_next_token(&mut self) -> Result<()>
    {
        match self.phase
        {
            Phase::NotStarted =>
            {
                self.phase = Phase::Running;
                self.simple_keys = vec![None];
                self.keys_allowed = true;

                let encoding = self.reader.encoding();

                return self.push_token(TokenData::StreamStart(encoding.into()), Mark::START);
            },
            Phase::Finished => return Ok(()),
            Phase::Running => {},
        }

        self.scan_to_next_token()?;
        self.purge_stale_keys()?;

        let mark = self.reader.mark();

        let head = match self.reader.head()
        {
            Some(c) => c,
            None =>
            {
                let mut pops = 0;
                self.indent.unroll(0, || pops += 1);

                for _ in 0..pops
                {
                    self.push_token(TokenData::BlockEnd, mark)?;
                }

                self.discard_simple_keys()?;
                self.push_token(TokenData::StreamEnd, mark)?;
                self.phase = Phase::Finished;

                return Ok(());
            },
        };

        if head == '%' && mark.column() == 1
        {
            return self.dispatch_directive();
        }

        if matches!(head, '-' | '.') && looks_like_document_indicator(&self.reader, head)
        {
            return self.dispatch_document_marker(head == '-');
        }

        if head == '-' && self.next_is_boundary()
        {
            return self.dispatch_block_entry();
        }

        if head == '?' && self.next_is_boundary()
        {
            return self.dispatch_explicit_key();
        }

        if head == ':' && self.next_is_boundary()
        {
            return self.resolve_value();
        }

        match head
        {
            '[' => self.dispatch_flow_start(false),
            '{' => self.dispatch_flow_start(true),
            ']' => self.dispatch_flow_end(false),
            '}' => self.dispatch_flow_end(true),
            ',' => self.dispatch_flow_entry(),
            '&' => self.dispatch_anchor(AnchorKind::Anchor),
            '*' => self.dispatch_anchor(AnchorKind::Alias),
            '!' => self.dispatch_tag(),
            '\'' => self.dispatch_quoted_scalar(false),
            '"' => self.dispatch_quoted_scalar(true),
            '|' if self.flow_level == 0 => self.dispatch_block_scalar(false),
            '>' if self.flow_level == 0 => self.dispatch_block_scalar(true),
            '%' | '@' | '`' => Err(ScanError::new(ErrorKind::InvalidToken, mark)),
            _ => self.dispatch_plain_scalar(),
        }
    }

    /// True if the scalar `n` positions ahead is whitespace, a
    /// line break, or end of stream -- the "indicator is
    /// followed by a boundary" rule shared by `-`, `?`, and
    /// `:`.
    fn next_is_boundary(&self) -> bool
    {
        match self.reader.peek_nth(1)
        {
            None => true,
            Some(c) => is_blank(c) || is_newline(c),
        }
    }

    /// Consume blank runs, comments (accumulating them as
    /// pending leading comments), and line breaks, stopping at
    /// the first scalar that could start a real token.
    fn scan_to_next_token(&mut self) -> Result<()>
    {
        loop
        {
            self.reader.skip_while(is_blank).map_err(|e| from_read(e, self.reader.mark()))?;

            if self.reader.matches('#')
            {
                let mark = self.reader.mark();
                let text = self.scan_comment_text()?;

                if self.options.contains(O_EMIT_COMMENTS)
                {
                    let index = self.reserve_index();
                    let comment = Token::new(TokenData::Comment(Slice::Owned(text.clone())), mark);

                    self.queue.push(TokenEntry::new(comment, index));
                }

                self.append_pending_comment(text);
                continue;
            }

            if self.reader.matches_fn(is_newline)
            {
                self.reader.skip_line_break().map_err(|e| from_read(e, self.reader.mark()))?;

                if self.flow_level == 0
                {
                    self.keys_allowed = true;
                }

                continue;
            }

            break;
        }

        Ok(())
    }

    /// Scan a `#` comment's text, excluding the `#` itself and
    /// one leading space.
    fn scan_comment_text(&mut self) -> Result<String>
    {
        self.reader.advance().map_err(|e| from_read(e, self.reader.mark()))?; // '#'
        self.reader.skip(' ').map_err(|e| from_read(e, self.reader.mark()))?;

        self.reader.match_while(|c| !is_newline(c)).map_err(|e| from_read(e, self.reader.mark()))
    }

    fn append_pending_comment(&mut self, text: String)
    {
        match &mut self.pending_comment
        {
            Some(existing) =>
            {
                existing.push('\n');
                existing.push_str(&text);
            },
            None => self.pending_comment = Some(text),
        }
    }

    fn take_pending_comment(&mut self) -> Option<Slice<'b>>
    {
        self.pending_comment.take().map(Slice::Owned)
    }

    /// If, without crossing a line break, the rest of the
    /// current line is blanks then a `#` comment, consume and
    /// return its text. Otherwise leave the reader untouched.
    fn scan_trailing_comment(&mut self) -> Result<Option<(Mark, String)>>
    {
        let snapshot = self.reader.clone();

        loop
        {
            match self.reader.head()
            {
                Some(c) if is_blank(c) =>
                {
                    self.reader.advance().map_err(|e| from_read(e, self.reader.mark()))?;
                },
                Some('#') =>
                {
                    let mark = self.reader.mark();

                    return self.scan_comment_text().map(|text| Some((mark, text)));
                },
                _ => break,
            }
        }

        self.reader = snapshot;

        Ok(None)
    }

    fn reserve_index(&mut self) -> usize
    {
        let index = self.produced;
        self.produced += 1;

        index
    }

    fn push_token(&mut self, data: TokenData<'b>, mark: Mark) -> Result<()>
    {
        let index = self.reserve_index();

        self.push_token_at(index, data, mark)
    }

    fn push_token_at(&mut self, index: usize, data: TokenData<'b>, mark: Mark) -> Result<()>
    {
        let mut token = Token::new(data, mark);
        token.comments.before = self.take_pending_comment();

        if token.data.is_single_line()
        {
            if let Some((comment_mark, text)) = self.scan_trailing_comment()?
            {
                if self.options.contains(O_EMIT_COMMENTS)
                {
                    let comment_index = self.reserve_index();
                    let comment = Token::new(TokenData::Comment(Slice::Owned(text.clone())), comment_mark);

                    self.queue.push(TokenEntry::new(comment, comment_index));
                }

                token.comments.after = Some(Slice::Owned(text));
            }
        }

        self.queue.push(TokenEntry::new(token, index));

        Ok(())
    }

    fn current_simple_key(&mut self) -> &mut Option<SimpleKeyCandidate>
    {
        self.simple_keys.last_mut().expect("at least one nesting level is always present")
    }

    /// Discard any pending candidate at the current level,
    /// failing if it was required.
    fn remove_simple_key(&mut self) -> Result<()>
    {
        if let Some(candidate) = self.current_simple_key().take()
        {
            if candidate.required
            {
                return Err(ScanError::new(ErrorKind::ExpectedKey, candidate.mark));
            }
        }

        Ok(())
    }

    /// Discard every pending candidate across all nesting
    /// levels, failing if any was required. Used at
    /// stream/document boundaries.
    fn discard_simple_keys(&mut self) -> Result<()>
    {
        for level in 0..self.simple_keys.len()
        {
            if let Some(candidate) = self.simple_keys[level].take()
            {
                if candidate.required
                {
                    return Err(ScanError::new(ErrorKind::ExpectedKey, candidate.mark));
                }
            }
        }

        Ok(())
    }

    /// If a scalar is starting here and keys are currently
    /// allowed, reserve a FIFO slot for the mapping key it
    /// might retroactively become.
    fn save_simple_key(&mut self) -> Result<()>
    {
        if !self.keys_allowed
        {
            return Ok(());
        }

        self.remove_simple_key()?;

        let mark = self.reader.mark();
        let required = self.flow_level == 0 && self.indent.current() == mark.column();
        let index = self.reserve_index();

        *self.current_simple_key() = Some(SimpleKeyCandidate::new(index, mark, required));

        Ok(())
    }

    fn purge_stale_keys(&mut self) -> Result<()>
    {
        let mark = self.reader.mark();

        for level in 0..self.simple_keys.len()
        {
            let stale = matches!(&self.simple_keys[level], Some(candidate) if candidate.is_stale(mark));

            if stale
            {
                let candidate = self.simple_keys[level].take().expect("just observed as Some");

                if candidate.required
                {
                    return Err(ScanError::new(ErrorKind::ExpectedKey, candidate.mark));
                }
            }
        }

        Ok(())
    }

    fn dispatch_directive(&mut self) -> Result<()>
    {
        let mark = self.reader.mark();
        self.reader.advance().map_err(|e| from_read(e, mark))?; // '%'

        let kind = DirectiveKind::new(&self.reader)?;

        for _ in 0..kind.name_len()
        {
            self.reader.advance().map_err(|e| from_read(e, self.reader.mark()))?;
        }

        let data = scan_directive(&mut self.reader, kind)?;

        self.remove_simple_key()?;
        self.keys_allowed = false;

        self.push_token(data, mark)
    }

    fn dispatch_document_marker(&mut self, start: bool) -> Result<()>
    {
        let mark = self.reader.mark();

        for _ in 0..3
        {
            self.reader.advance().map_err(|e| from_read(e, mark))?;
        }

        let mut pops = 0;
        self.indent.unroll(0, || pops += 1);

        for _ in 0..pops
        {
            self.push_token(TokenData::BlockEnd, mark)?;
        }

        self.discard_simple_keys()?;

        self.indent.reset();
        self.flow_level = 0;
        self.simple_keys = vec![None];
        self.keys_allowed = true;

        let data = if start { TokenData::DocumentStart } else { TokenData::DocumentEnd };

        self.push_token(data, mark)
    }

    fn dispatch_block_entry(&mut self) -> Result<()>
    {
        if self.flow_level > 0
        {
            return Err(ScanError::new(ErrorKind::InvalidToken, self.reader.mark()));
        }

        let mark = self.reader.mark();

        if self.indent.roll(mark.column())
        {
            self.push_token(TokenData::BlockSequenceStart, mark)?;
        }

        self.remove_simple_key()?;
        self.keys_allowed = true;

        self.reader.advance().map_err(|e| from_read(e, mark))?;

        self.push_token(TokenData::BlockEntry, mark)
    }

    fn dispatch_explicit_key(&mut self) -> Result<()>
    {
        let mark = self.reader.mark();

        if self.flow_level == 0 && self.indent.roll(mark.column())
        {
            self.push_token(TokenData::BlockMappingStart, mark)?;
        }

        self.remove_simple_key()?;
        self.keys_allowed = true;

        self.reader.advance().map_err(|e| from_read(e, mark))?;

        self.push_token(TokenData::Key, mark)
    }

    /// Resolve a `:` value indicator: either against a
    /// pending simple-key candidate (retroactively inserting
    /// `blockMappingStart`/`key` before it) or, absent one, as
    /// an implicit empty key.
    fn resolve_value(&mut self) -> Result<()>
    {
        let mark = self.reader.mark();
        let candidate = self.current_simple_key().take();

        match candidate
        {
            Some(candidate) =>
            {
                if self.flow_level == 0 && self.indent.roll(candidate.mark.column())
                {
                    self.push_token_at(candidate.token_index, TokenData::BlockMappingStart, candidate.mark)?;
                }

                self.push_token_at(candidate.token_index, TokenData::Key, candidate.mark)?;
            },
            None =>
            {
                if !self.keys_allowed
                {
                    return Err(ScanError::new(ErrorKind::UnexpectedValue, mark));
                }

                if self.flow_level == 0 && self.indent.roll(mark.column())
                {
                    self.push_token(TokenData::BlockMappingStart, mark)?;
                }
            },
        }

        self.keys_allowed = true;

        self.reader.advance().map_err(|e| from_read(e, mark))?;

        self.push_token(TokenData::Value, mark)
    }

    fn dispatch_flow_start(&mut self, mapping: bool) -> Result<()>
    {
        self.save_simple_key()?;

        self.flow_level += 1;
        self.simple_keys.push(None);
        self.keys_allowed = true;

        let mark = self.reader.mark();
        self.reader.advance().map_err(|e| from_read(e, mark))?;

        let data = if mapping { TokenData::FlowMappingStart } else { TokenData::FlowSequenceStart };

        self.push_token(data, mark)
    }

    fn dispatch_flow_end(&mut self, mapping: bool) -> Result<()>
    {
        if self.flow_level == 0
        {
            return Err(ScanError::new(ErrorKind::InvalidToken, self.reader.mark()));
        }

        self.remove_simple_key()?;

        self.flow_level -= 1;
        self.simple_keys.pop();
        self.keys_allowed = false;

        let mark = self.reader.mark();
        self.reader.advance().map_err(|e| from_read(e, mark))?;

        let data = if mapping { TokenData::FlowMappingEnd } else { TokenData::FlowSequenceEnd };

        self.push_token(data, mark)
    }

    fn dispatch_flow_entry(&mut self) -> Result<()>
    {
        self.remove_simple_key()?;
        self.keys_allowed = true;

        let mark = self.reader.mark();
        self.reader.advance().map_err(|e| from_read(e, mark))?;

        self.push_token(TokenData::FlowEntry, mark)
    }

    fn dispatch_anchor(&mut self, kind: AnchorKind) -> Result<()>
    {
        self.save_simple_key()?;
        self.keys_allowed = false;

        let mark = self.reader.mark();
        let data = scan_anchor(&mut self.reader, kind)?;

        self.push_token(data, mark)
    }

    fn dispatch_tag(&mut self) -> Result<()>
    {
        self.save_simple_key()?;
        self.keys_allowed = false;

        let mark = self.reader.mark();
        let data = scan_tag(&mut self.reader, self.flow_level > 0)?;

        self.push_token(data, mark)
    }

    fn dispatch_quoted_scalar(&mut self, double: bool) -> Result<()>
    {
        self.save_simple_key()?;
        self.keys_allowed = false;

        let kind = if double { ScalarKind::DoubleQuoted } else { ScalarKind::SingleQuoted };
        let scanned = scan_scalar(&mut self.reader, kind)?;

        self.push_token(TokenData::Scalar(Slice::Owned(scanned.text), scanned.style), scanned.mark)
    }

    fn dispatch_plain_scalar(&mut self) -> Result<()>
    {
        self.save_simple_key()?;

        let kind = ScalarKind::Plain {
            flow_level:   self.flow_level,
            block_indent: self.indent.current().as_isize(),
        };
        let scanned = scan_scalar(&mut self.reader, kind)?;

        self.keys_allowed = false;

        self.push_token(TokenData::Scalar(Slice::Owned(scanned.text), scanned.style), scanned.mark)
    }

    fn dispatch_block_scalar(&mut self, folded: bool) -> Result<()>
    {
        self.remove_simple_key()?;
        self.keys_allowed = false;

        let kind = ScalarKind::Block {
            folded,
            chomp:  Chomp::Clip,
            indent: 0,
        };
        let scanned = scan_scalar(&mut self.reader, kind)?;

        self.push_token(TokenData::Scalar(Slice::Owned(scanned.text), scanned.style), scanned.mark)
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::token::{Marker, ScalarStyle};

    fn scan_all(input: &str) -> anyhow::Result<Vec<Token<'static>>>
    {
        let reader = Reader::new(input.as_bytes())?;
        let mut scanner = Scanner::new(reader, Flags::empty());
        let mut out = Vec::new();

        loop
        {
            let token = scanner.next_token()?;
            let done = token == Marker::StreamEnd;
            out.push(token.into_owned());

            if done
            {
                break;
            }
        }

        Ok(out)
    }

    #[test]
    fn scans_stream_bookends() -> anyhow::Result<()>
    {
        let tokens = scan_all("")?;

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Marker::StreamStart);
        assert_eq!(tokens[1], Marker::StreamEnd);

        Ok(())
    }

    #[test]
    fn scans_plain_block_sequence() -> anyhow::Result<()>
    {
        let tokens = scan_all("- a\n- b\n")?;
        let markers: Vec<Marker> = tokens.iter().map(Token::marker).collect();

        assert_eq!(
            markers,
            vec![
                Marker::StreamStart,
                Marker::BlockSequenceStart,
                Marker::BlockEntry,
                Marker::Scalar,
                Marker::BlockEntry,
                Marker::Scalar,
                Marker::BlockEnd,
                Marker::StreamEnd,
            ]
        );

        Ok(())
    }

    #[test]
    fn scans_simple_mapping_with_retroactive_key() -> anyhow::Result<()>
    {
        let tokens = scan_all("a: 1\nb: 2\n")?;
        let markers: Vec<Marker> = tokens.iter().map(Token::marker).collect();

        assert_eq!(
            markers,
            vec![
                Marker::StreamStart,
                Marker::BlockMappingStart,
                Marker::Key,
                Marker::Scalar,
                Marker::Value,
                Marker::Scalar,
                Marker::Key,
                Marker::Scalar,
                Marker::Value,
                Marker::Scalar,
                Marker::BlockEnd,
                Marker::StreamEnd,
            ]
        );

        assert_eq!(tokens[3].data, TokenData::Scalar(Slice::Owned("a".to_owned()), ScalarStyle::Plain));

        Ok(())
    }

    #[test]
    fn scans_nested_flow_sequence() -> anyhow::Result<()>
    {
        let tokens = scan_all("[1, [2, 3]]")?;
        let markers: Vec<Marker> = tokens.iter().map(Token::marker).collect();

        assert_eq!(
            markers,
            vec![
                Marker::StreamStart,
                Marker::FlowSequenceStart,
                Marker::Scalar,
                Marker::FlowEntry,
                Marker::FlowSequenceStart,
                Marker::Scalar,
                Marker::FlowEntry,
                Marker::Scalar,
                Marker::FlowSequenceEnd,
                Marker::FlowSequenceEnd,
                Marker::StreamEnd,
            ]
        );

        Ok(())
    }

    #[test]
    fn scans_anchor_and_alias() -> anyhow::Result<()>
    {
        let tokens = scan_all("- &a 1\n- *a\n")?;
        let markers: Vec<Marker> = tokens.iter().map(Token::marker).collect();

        assert_eq!(
            markers,
            vec![
                Marker::StreamStart,
                Marker::BlockSequenceStart,
                Marker::BlockEntry,
                Marker::Anchor,
                Marker::Scalar,
                Marker::BlockEntry,
                Marker::Alias,
                Marker::BlockEnd,
                Marker::StreamEnd,
            ]
        );

        Ok(())
    }

    #[test]
    fn required_simple_key_going_stale_is_an_error()
    {
        // Once a mapping is open, a second key spanning more
        // than one line before its `:` is never valid.
        let reader = Reader::new(b"a: 1\nb\n: 2\n").unwrap();
        let mut scanner = Scanner::new(reader, Flags::empty());

        let err = loop
        {
            match scanner.next_token()
            {
                Ok(token) if token == Marker::StreamEnd => panic!("expected an error before stream end"),
                Ok(_) => continue,
                Err(e) => break e,
            }
        };

        assert_eq!(err.kind, ErrorKind::ExpectedKey);
    }

    #[test]
    fn leading_comment_attaches_before_next_token() -> anyhow::Result<()>
    {
        let tokens = scan_all("# hello\nfoo: 1\n")?;

        let key_token = tokens
            .iter()
            .find(|t| t.marker() == Marker::BlockMappingStart)
            .expect("a blockMappingStart token");

        assert_eq!(key_token.comments.before.as_deref(), Some("hello"));

        Ok(())
    }

    #[test]
    fn document_markers_reset_indentation() -> anyhow::Result<()>
    {
        let tokens = scan_all("- a\n---\nkey: value\n")?;
        let markers: Vec<Marker> = tokens.iter().map(Token::marker).collect();

        assert_eq!(
            markers,
            vec![
                Marker::StreamStart,
                Marker::BlockSequenceStart,
                Marker::BlockEntry,
                Marker::Scalar,
                Marker::BlockEnd,
                Marker::DocumentStart,
                Marker::BlockMappingStart,
                Marker::Key,
                Marker::Scalar,
                Marker::Value,
                Marker::Scalar,
                Marker::BlockEnd,
                Marker::StreamEnd,
            ]
        );

        Ok(())
    }

    #[test]
    fn emit_comments_flag_surfaces_raw_comment_tokens() -> anyhow::Result<()>
    {
        let reader = Reader::new("# lead\nfoo: 1 # trail\n".as_bytes())?;
        let mut scanner = Scanner::new(reader, Flags::EMIT_COMMENTS);
        let mut tokens = Vec::new();

        loop
        {
            let token = scanner.next_token()?;
            let done = token == Marker::StreamEnd;
            tokens.push(token.into_owned());

            if done
            {
                break;
            }
        }

        let comments: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match &t.data
            {
                TokenData::Comment(text) => Some(text.as_ref()),
                _ => None,
            })
            .collect();

        assert_eq!(comments, vec!["lead", "trail"]);

        let key_token = tokens
            .iter()
            .find(|t| t.marker() == Marker::BlockMappingStart)
            .expect("a blockMappingStart token");

        assert_eq!(key_token.comments.before.as_deref(), Some("lead"));

        Ok(())
    }
}
