/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exposes the [`Parser`] struct and related
//! types. The Parser drives a [`Scanner`] over a [`Token`]
//! stream and turns it into a series of [`Event`]s. These
//! events are the core of higher level functionality
//! exposed by this library.
//!
//! ## Invoking the Parser
//!
//! A [`Parser`] owns both the underlying [`Scanner`] and a
//! single-slot pushback used to look one token ahead without
//! consuming it. The two interesting methods are:
//!
//! 1. [`next_event`](Parser::next_event)
//! 2. [`Iterator::next`], via the blanket [`Iterator`] impl
//!
//! [`Token`]: enum@crate::token::TokenData
//! [`Scanner`]: crate::scanner::Scanner

use crate::{
    event::{
        error::{err, Error, ErrorKind, ParseResult as Result},
        state::{Flags, State, StateMachine, O_EMPTY, O_FIRST, O_IMPLICIT, O_NIL},
        types::{
            default_tags, Alias, Directives, DocumentEnd as DocumentEndData, DocumentStart as DocumentStartData,
            Event, EventData, Mapping, Node, NodeKind, Scalar, Sequence, StreamStart as StreamStartData,
            TagDirectives, VersionDirective, DEFAULT_VERSION, EMPTY_SCALAR,
        },
    },
    mark::Mark,
    reader::Reader,
    scanner::Scanner,
    token::{CollectionStyle, Comments, Marker, Slice, Token, TokenData},
};

const EXPLICIT: bool = false;
const BLOCK_CONTEXT: bool = true;
const NO_ANCHOR: Option<Slice<'static>> = None;
const NO_TAG: Option<(Slice<'static>, Slice<'static>)> = None;

/// Turns a [`Token`] stream into an [`Event`] stream.
///
/// A Parser can iteratively consume an entire token stream,
/// ending when [`EventData::StreamEnd`] is produced; after
/// that, [`next_event`](Self::next_event) always returns
/// `None`.
#[derive(Debug)]
pub struct Parser<'b>
{
    scanner:  Scanner<'b>,
    pushback: Option<Token<'b>>,

    state:      StateMachine,
    directives: Directives<'static>,
    /// Reserved for future Parser-level options; `Flags` has
    /// no constants defined yet, so this is never read.
    #[allow(dead_code)]
    options:    super::flag::Flags,
    done:       bool,
}

impl<'b> Parser<'b>
{
    /// Instantiate a new [`Parser`], ready to scan `reader`.
    ///
    /// The Scanner backing this Parser is always built with
    /// [`scanner::flag::O_ZEROED`](crate::scanner::flag::O_ZEROED):
    /// raw `comment` tokens have no event to carry them, so
    /// the Parser never asks the Scanner to surface them.
    pub fn new(reader: Reader<'b>, options: super::flag::Flags) -> Self
    {
        Self {
            scanner: Scanner::new(reader, crate::scanner::flag::O_ZEROED),
            pushback: None,

            state:      StateMachine::default(),
            directives: Default::default(),
            options,
            done:       false,
        }
    }

    /// Fetch the next [`Event`] from the stream, if any.
    pub fn next_event(&mut self) -> Option<Result<Event<'b>>>
    {
        self.get_next_event().transpose()
    }

    /// Runs the state machine until it either provides the
    /// next [`Event`], an error, or the state machine is
    /// finished.
    fn get_next_event(&mut self) -> Result<Option<Event<'b>>>
    {
        let mut event = None;

        while !self.done && event.is_none()
        {
            event = self.state_transition()?;
        }

        Ok(event)
    }

    /// Process the next event in the state machine, running
    /// the associated routine.
    fn state_transition(&mut self) -> Result<Option<Event<'b>>>
    {
        match self.state.top().clone()
        {
            State::StreamStart => self.stream_start(),
            State::StreamEnd => self.stream_end(),

            State::DocumentStart(opts) => self.document_start(opts),
            State::DocumentContent => self.explicit_document_content(),
            State::DocumentEnd => self.document_end(),

            State::BlockNode => self.node(BLOCK_CONTEXT, NodeKind::Root),
            State::BlockSequenceEntry(opts) => self.block_sequence_entry(opts),
            State::IndentlessSequenceEntry => self.indentless_sequence_entry(),
            State::BlockMappingKey(opts) => self.block_mapping_key(opts),
            State::BlockMappingValue => self.block_mapping_value(),

            State::FlowSequenceEntry(opts) => self.flow_sequence_entry(opts),
            State::FlowSequenceEntryMappingKey => self.flow_sequence_entry_mapping_key(),
            State::FlowSequenceEntryMappingValue => self.flow_sequence_entry_mapping_value(),
            State::FlowSequenceEntryMappingEnd => self.flow_sequence_entry_mapping_end(),
            State::FlowMappingKey(opts) => self.flow_mapping_key(opts),
            State::FlowMappingValue(opts) => self.flow_mapping_value(opts),
        }
    }

    /// Ensure the pushback slot is filled, pulling a token
    /// from the Scanner if it is empty.
    fn fill(&mut self) -> Result<()>
    {
        if self.pushback.is_none()
        {
            let token = self.scanner.next_token().map_err(Error::from)?;

            log::trace!("parser: fetched {:?}", token.marker());

            self.pushback = Some(token);
        }

        Ok(())
    }

    /// Look at the head of the token stream without
    /// consuming it.
    fn peek(&mut self) -> Result<&Token<'b>>
    {
        self.fill()?;

        Ok(self.pushback.as_ref().expect("just filled"))
    }

    /// The discriminant of the token at the head of the
    /// stream.
    fn marker(&mut self) -> Result<Marker>
    {
        self.peek().map(Token::marker)
    }

    /// The [`Mark`] of the token at the head of the stream.
    fn mark(&mut self) -> Result<Mark>
    {
        self.peek().map(|t| t.mark)
    }

    /// Consume and return the token at the head of the
    /// stream.
    fn bump(&mut self) -> Result<Token<'b>>
    {
        self.fill()?;

        Ok(self.pushback.take().expect("just filled"))
    }

    /// Start of token stream: confirm the Scanner actually
    /// began with a `streamStart` token and prime the state
    /// machine for the first document.
    fn stream_start(&mut self) -> Result<Option<Event<'b>>>
    {
        let token = self.bump()?;

        let event = match token.data
        {
            TokenData::StreamStart(encoding) => Event::new(
                token.mark,
                false,
                token.comments,
                EventData::StreamStart(StreamStartData { encoding }),
            ),
            _ => return err(ErrorKind::InvalidToken, token.mark),
        };

        self.state.set_top(State::DocumentStart(O_IMPLICIT | O_FIRST));

        Ok(Some(event))
    }

    /// End of token stream: mark ourselves done and return
    /// the `streamEnd` event, if we haven't already.
    fn stream_end(&mut self) -> Result<Option<Event<'b>>>
    {
        if self.done
        {
            return err(ErrorKind::EndOfStream, self.mark().unwrap_or(Mark::START));
        }

        let token = self.bump()?;
        self.done = true;

        Ok(Some(Event::new(token.mark, false, token.comments, EventData::StreamEnd)))
    }

    /// Start of a new document: process any directives,
    /// determine whether it is explicit, and prime the state
    /// machine accordingly.
    fn document_start(&mut self, opts: Flags) -> Result<Option<Event<'b>>>
    {
        let mut event = None;
        let implicit = opts.contains(O_IMPLICIT);
        let first = opts.contains(O_FIRST);

        if !implicit
        {
            while self.marker()? == Marker::DocumentEnd
            {
                self.bump()?;
            }
        }

        let marker = self.marker()?;
        let directive_like =
            matches!(marker, Marker::TagDirective | Marker::VersionDirective | Marker::DocumentStart | Marker::StreamEnd);

        if implicit && !directive_like
        {
            let (mark, directives) = self.scan_document_directives()?;

            event = Some(Event::new(
                mark,
                true,
                Comments::default(),
                EventData::DocumentStart(DocumentStartData { directives }),
            ));

            self.state.push(State::DocumentEnd);
            self.state.set_top(State::BlockNode);
        }
        else if !matches!(marker, Marker::StreamEnd)
        {
            let (mark, directives) = self.scan_document_directives()?;

            let marker_token = match self.marker()?
            {
                Marker::DocumentStart => self.bump()?,
                _ => return err(ErrorKind::UnexpectedDirective, self.mark()?),
            };

            event = Some(Event::new(
                mark,
                false,
                marker_token.comments,
                EventData::DocumentStart(DocumentStartData { directives }),
            ));

            self.state.push(State::DocumentEnd);
            self.state.set_top(State::DocumentContent);
        }
        else if first
        {
            let (mark, directives) = self.scan_document_directives()?;

            event = Some(Event::new(
                mark,
                true,
                Comments::default(),
                EventData::DocumentStart(DocumentStartData { directives }),
            ));

            self.state.set_top(State::DocumentEnd);
        }
        else
        {
            self.state.set_top(State::StreamEnd);
        }

        if let Some(EventData::DocumentStart(doc)) = event.as_ref().map(Event::data)
        {
            self.directives = Directives {
                version: doc.directives.version,
                tags:    doc.directives.tags.iter().map(tags_to_owned).collect(),
            };
        }

        Ok(event)
    }

    /// End of document: determine whether it is explicit and
    /// return the associated event.
    fn document_end(&mut self) -> Result<Option<Event<'b>>>
    {
        let marker = self.marker()?;

        let (mark, implicit, comments) = if matches!(marker, Marker::DocumentEnd)
        {
            let token = self.bump()?;
            (token.mark, false, token.comments)
        }
        else
        {
            (self.mark()?, true, Comments::default())
        };

        let opts = if implicit { O_NIL } else { O_IMPLICIT };
        self.state.set_top(State::DocumentStart(opts));

        Ok(Some(Event::new(mark, implicit, comments, EventData::DocumentEnd(DocumentEndData))))
    }

    /// Handle an explicit, maybe-empty document, returning
    /// the root node event if the document has content, or
    /// nothing if it is empty.
    fn explicit_document_content(&mut self) -> Result<Option<Event<'b>>>
    {
        use Marker::*;

        let empty = matches!(
            self.marker()?,
            VersionDirective | TagDirective | DocumentStart | DocumentEnd | StreamEnd
        );

        if empty
        {
            self.state.pop();

            Ok(None)
        }
        else
        {
            self.node(BLOCK_CONTEXT, NodeKind::Root)
        }
    }

    /// Block context sequence entry: return the associated
    /// node or `sequenceEnd` event.
    fn block_sequence_entry(&mut self, _opts: Flags) -> Result<Option<Event<'b>>>
    {
        let kind = NodeKind::Entry;

        let event;
        let mark = self.mark()?;

        match self.marker()?
        {
            Marker::BlockEntry =>
            {
                self.bump()?;

                match self.marker()?
                {
                    Marker::BlockEntry | Marker::BlockEnd =>
                    {
                        self.state.set_top(State::BlockSequenceEntry(O_NIL));
                        event = Some(self.empty_scalar(self.mark()?, kind));
                    },
                    _ =>
                    {
                        self.state.push(State::BlockSequenceEntry(O_NIL));
                        event = self.node(BLOCK_CONTEXT, kind)?;
                    },
                }
            },
            Marker::BlockEnd =>
            {
                let token = self.bump()?;
                self.state.pop();

                event = Some(Event::new(mark, false, token.comments, EventData::SequenceEnd));
            },
            _ => return err(ErrorKind::InvalidToken, mark),
        }

        Ok(event)
    }

    /// Entries of a block sequence whose dashes sit at the
    /// same column as their enclosing mapping key -- no
    /// `blockSequenceStart`/`blockEnd` pair brackets it, so
    /// this ends the instant a non-`blockEntry` token
    /// appears, without consuming that token.
    fn indentless_sequence_entry(&mut self) -> Result<Option<Event<'b>>>
    {
        let kind = NodeKind::Entry;
        let mark = self.mark()?;

        let event = match self.marker()?
        {
            Marker::BlockEntry =>
            {
                self.bump()?;

                match self.marker()?
                {
                    Marker::BlockEntry =>
                    {
                        self.state.set_top(State::IndentlessSequenceEntry);
                        Some(self.empty_scalar(self.mark()?, kind))
                    },
                    _ =>
                    {
                        self.state.push(State::IndentlessSequenceEntry);
                        self.node(BLOCK_CONTEXT, kind)?
                    },
                }
            },
            _ =>
            {
                self.state.pop();
                Some(Event::new(mark, true, Comments::default(), EventData::SequenceEnd))
            },
        };

        Ok(event)
    }

    /// Block context mapping key: return the associated node
    /// or `mappingEnd` event, pushing a mapping value state
    /// to the stack in the former case.
    fn block_mapping_key(&mut self, _opts: Flags) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Key;

        let mark = self.mark()?;

        match self.marker()?
        {
            Marker::Key =>
            {
                self.bump()?;
                let mark = self.mark()?;

                if !matches!(self.marker()?, Marker::Key | Marker::Value | Marker::BlockEnd)
                {
                    self.state.push(State::BlockMappingValue);
                    event = self.node(BLOCK_CONTEXT, kind)?;
                }
                else
                {
                    self.state.set_top(State::BlockMappingValue);
                    event = Some(self.empty_scalar(mark, kind));
                }
            },
            Marker::BlockEnd =>
            {
                let token = self.bump()?;
                self.state.pop();

                event = Some(Event::new(mark, false, token.comments, EventData::MappingEnd));
            },
            _ => return err(ErrorKind::ExpectedKey, mark),
        }

        Ok(event)
    }

    /// Block context mapping value: return the associated
    /// node event, pushing a mapping key state to the stack.
    fn block_mapping_value(&mut self) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Value;
        let mark = self.mark()?;

        match self.marker()?
        {
            Marker::Value =>
            {
                self.bump()?;
                let mark = self.mark()?;

                if !matches!(self.marker()?, Marker::Key | Marker::Value | Marker::BlockEnd)
                {
                    self.state.push(State::BlockMappingKey(O_NIL));
                    event = self.node(BLOCK_CONTEXT, kind)?;
                }
                else
                {
                    self.state.set_top(State::BlockMappingKey(O_NIL));
                    event = Some(self.empty_scalar(mark, kind));
                }
            },
            // A key was already seen, so a value is implied regardless of what follows.
            _ =>
            {
                self.state.set_top(State::BlockMappingKey(O_NIL));
                event = Some(self.empty_scalar(mark, kind));
            },
        }

        Ok(event)
    }

    /// Flow context sequence entry: return the associated
    /// node or `sequenceEnd` event.
    fn flow_sequence_entry(&mut self, opts: Flags) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Entry;
        let first = opts.contains(O_FIRST);

        let mark = self.mark()?;

        if !matches!(self.marker()?, Marker::FlowSequenceEnd)
        {
            if !first
            {
                match self.marker()?
                {
                    Marker::FlowEntry =>
                    {
                        self.bump()?;
                    },
                    _ => return err(ErrorKind::InvalidToken, self.mark()?),
                }
            }

            let mark = self.mark()?;

            match self.marker()?
            {
                // "Compact" flow mapping: `[ key: value, ... ]`, with no `{` `}`.
                Marker::Key =>
                {
                    self.bump()?;

                    event = Some(Event::new(
                        mark,
                        true,
                        Comments::default(),
                        EventData::MappingStart(Node {
                            anchor:  NO_ANCHOR,
                            tag:     NO_TAG,
                            content: Mapping {
                                style: CollectionStyle::Flow,
                            },
                            kind:    NodeKind::Entry,
                        }),
                    ));

                    self.state.set_top(State::FlowSequenceEntryMappingKey);
                },
                Marker::FlowSequenceEnd => event = Some(self.fetch_sequence_end(mark)?),
                _ =>
                {
                    self.state.push(State::FlowSequenceEntry(O_NIL));
                    event = self.node(!BLOCK_CONTEXT, kind)?;
                },
            }
        }
        else
        {
            event = Some(self.fetch_sequence_end(mark)?);
        }

        Ok(event)
    }

    /// Flow mapping key nested in a flow sequence (the
    /// `[ key: value ]` shorthand).
    fn flow_sequence_entry_mapping_key(&mut self) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Key;
        let mark = self.mark()?;

        let empty = matches!(self.marker()?, Marker::Value | Marker::FlowEntry | Marker::FlowSequenceEnd);

        if !empty
        {
            self.state.push(State::FlowSequenceEntryMappingValue);
            event = self.node(!BLOCK_CONTEXT, kind)?;
        }
        else
        {
            self.state.set_top(State::FlowSequenceEntryMappingValue);
            event = Some(self.empty_scalar(mark, kind));
        }

        Ok(event)
    }

    /// Flow mapping value nested in a flow sequence.
    fn flow_sequence_entry_mapping_value(&mut self) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Value;
        let mark = self.mark()?;

        if matches!(self.marker()?, Marker::Value)
        {
            self.bump()?;

            if !matches!(self.marker()?, Marker::FlowEntry | Marker::FlowSequenceEnd)
            {
                self.state.push(State::FlowSequenceEntryMappingEnd);
                event = self.node(!BLOCK_CONTEXT, kind)?;
            }
            else
            {
                self.state.set_top(State::FlowSequenceEntryMappingEnd);
                event = Some(self.empty_scalar(mark, kind));
            }
        }
        else
        {
            self.state.set_top(State::FlowSequenceEntryMappingEnd);
            event = Some(self.empty_scalar(mark, kind));
        }

        Ok(event)
    }

    /// Clean up after a flow-sequence-turned-mapping, return
    /// control to the parent sequence.
    fn flow_sequence_entry_mapping_end(&mut self) -> Result<Option<Event<'b>>>
    {
        let mark = self.mark()?;

        debug_assert!(matches!(self.marker()?, Marker::FlowEntry | Marker::FlowSequenceEnd));

        self.state.set_top(State::FlowSequenceEntry(O_NIL));

        Ok(Some(Event::new(mark, true, Comments::default(), EventData::MappingEnd)))
    }

    /// Flow context mapping key: return the associated node
    /// or `mappingEnd` event, pushing a mapping value state
    /// in the former case.
    fn flow_mapping_key(&mut self, opts: Flags) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Key;
        let first = opts.contains(O_FIRST);

        let mark = self.mark()?;

        if !matches!(self.marker()?, Marker::FlowMappingEnd)
        {
            if !first
            {
                match self.marker()?
                {
                    Marker::FlowEntry =>
                    {
                        self.bump()?;
                    },
                    _ => return err(ErrorKind::InvalidToken, self.mark()?),
                }
            }

            let mark = self.mark()?;

            match self.marker()?
            {
                Marker::Key =>
                {
                    self.bump()?;
                    let mark = self.mark()?;

                    let empty = matches!(self.marker()?, Marker::Value | Marker::FlowEntry | Marker::FlowMappingEnd);

                    if !empty
                    {
                        self.state.push(State::FlowMappingValue(O_NIL));
                        event = self.node(!BLOCK_CONTEXT, kind)?;
                    }
                    else
                    {
                        self.state.set_top(State::FlowMappingValue(O_NIL));
                        event = Some(self.empty_scalar(mark, kind));
                    }
                },
                // `{ hello }` -- no `:` or `,`, an empty value is implied.
                t if !matches!(t, Marker::FlowMappingEnd) =>
                {
                    self.state.push(State::FlowMappingValue(O_EMPTY));
                    event = self.node(!BLOCK_CONTEXT, kind)?;
                },
                _ => event = Some(self.fetch_mapping_end(mark)?),
            }
        }
        else
        {
            event = Some(self.fetch_mapping_end(mark)?);
        }

        Ok(event)
    }

    /// Flow context mapping value: return the associated node
    /// event.
    fn flow_mapping_value(&mut self, opts: Flags) -> Result<Option<Event<'b>>>
    {
        let event;
        let kind = NodeKind::Value;
        let mark = self.mark()?;

        if opts.contains(O_EMPTY)
        {
            self.state.set_top(State::FlowMappingKey(O_NIL));
            event = Some(self.empty_scalar(mark, kind));
        }
        else if matches!(self.marker()?, Marker::Value)
        {
            self.bump()?;
            let mark = self.mark()?;

            if !matches!(self.marker()?, Marker::FlowEntry | Marker::FlowMappingEnd)
            {
                self.state.push(State::FlowMappingKey(O_NIL));
                event = self.node(!BLOCK_CONTEXT, kind)?;
            }
            else
            {
                self.state.set_top(State::FlowMappingKey(O_NIL));
                event = Some(self.empty_scalar(mark, kind));
            }
        }
        else
        {
            self.state.set_top(State::FlowMappingKey(O_NIL));
            event = Some(self.empty_scalar(mark, kind));
        }

        Ok(event)
    }

    /// Produce a node or alias event.
    fn node(&mut self, block: bool, kind: NodeKind) -> Result<Option<Event<'b>>>
    {
        let event;
        let mut mark = self.mark()?;

        if matches!(self.marker()?, Marker::Alias)
        {
            let token = self.bump()?;
            self.state.pop();

            let name = match token.data
            {
                TokenData::Alias(name) => name,
                _ => unreachable!("just matched Marker::Alias"),
            };

            event = Some(Event::new(
                token.mark,
                false,
                token.comments,
                EventData::Alias(Alias { name }),
            ));
        }
        else
        {
            let mut anchor = None;
            let mut tag = None;

            match self.marker()?
            {
                Marker::Anchor =>
                {
                    anchor = self.fetch_anchor(&mut mark)?;
                    tag = self.fetch_tag(&mut mark)?;
                },
                Marker::Tag =>
                {
                    tag = self.fetch_tag(&mut mark)?;
                    anchor = self.fetch_anchor(&mut mark)?;
                },
                _ =>
                {},
            }

            match self.marker()?
            {
                Marker::FlowSequenceStart =>
                {
                    let token = self.bump()?;
                    debug_assert!(matches!(token.data, TokenData::FlowSequenceStart));

                    event = Some(Event::new(
                        mark,
                        false,
                        token.comments,
                        EventData::SequenceStart(Node {
                            anchor,
                            tag,
                            content: Sequence {
                                style: CollectionStyle::Flow,
                            },
                            kind,
                        }),
                    ));

                    self.state.set_top(State::FlowSequenceEntry(O_FIRST));
                },
                Marker::FlowMappingStart =>
                {
                    let token = self.bump()?;
                    debug_assert!(matches!(token.data, TokenData::FlowMappingStart));

                    event = Some(Event::new(
                        mark,
                        false,
                        token.comments,
                        EventData::MappingStart(Node {
                            anchor,
                            tag,
                            content: Mapping {
                                style: CollectionStyle::Flow,
                            },
                            kind,
                        }),
                    ));

                    self.state.set_top(State::FlowMappingKey(O_FIRST));
                },
                Marker::BlockSequenceStart if block =>
                {
                    let token = self.bump()?;
                    debug_assert!(matches!(token.data, TokenData::BlockSequenceStart));

                    event = Some(Event::new(
                        mark,
                        false,
                        token.comments,
                        EventData::SequenceStart(Node {
                            anchor,
                            tag,
                            content: Sequence {
                                style: CollectionStyle::Block,
                            },
                            kind,
                        }),
                    ));

                    self.state.set_top(State::BlockSequenceEntry(O_NIL));
                },
                Marker::BlockMappingStart if block =>
                {
                    let token = self.bump()?;
                    debug_assert!(matches!(token.data, TokenData::BlockMappingStart));

                    event = Some(Event::new(
                        mark,
                        false,
                        token.comments,
                        EventData::MappingStart(Node {
                            anchor,
                            tag,
                            content: Mapping {
                                style: CollectionStyle::Block,
                            },
                            kind,
                        }),
                    ));

                    self.state.set_top(State::BlockMappingKey(O_NIL));
                },
                // An indentless block sequence: a bare `-` where a node was expected,
                // with no `blockSequenceStart` to bracket it.
                Marker::BlockEntry if block =>
                {
                    event = Some(Event::new(
                        mark,
                        true,
                        Comments::default(),
                        EventData::SequenceStart(Node {
                            anchor,
                            tag,
                            content: Sequence {
                                style: CollectionStyle::Block,
                            },
                            kind,
                        }),
                    ));

                    self.state.set_top(State::IndentlessSequenceEntry);
                },
                Marker::Scalar =>
                {
                    let token = self.bump()?;

                    let (data, style) = match token.data
                    {
                        TokenData::Scalar(data, style) => (data, style),
                        _ => unreachable!("just matched Marker::Scalar"),
                    };

                    event = Some(Event::new(
                        mark,
                        false,
                        token.comments,
                        EventData::Scalar(Node {
                            anchor,
                            tag,
                            content: Scalar::new(data, style),
                            kind,
                        }),
                    ));

                    self.state.pop();
                },
                // Implicit, empty scalar -- the node is implied by a lone anchor/tag.
                _ if anchor.is_some() || tag.is_some() =>
                {
                    event = Some(Event::new(
                        mark,
                        true,
                        Comments::default(),
                        EventData::Scalar(Node {
                            anchor,
                            tag,
                            content: EMPTY_SCALAR,
                            kind,
                        }),
                    ));

                    self.state.pop();
                },
                _ => return err(ErrorKind::ExpectedValue, mark),
            }
        }

        if let Some(ref mut event) = event
        {
            validate_event_tag(&self.directives.tags, event)?;
        }

        Ok(event)
    }

    /// Produce an implicit, empty scalar node event.
    fn empty_scalar(&mut self, mark: Mark, kind: NodeKind) -> Event<'b>
    {
        Event::new(
            mark,
            true,
            Comments::default(),
            EventData::Scalar(Node {
                anchor: NO_ANCHOR,
                tag: NO_TAG,
                content: EMPTY_SCALAR,
                kind,
            }),
        )
    }

    fn fetch_sequence_end(&mut self, mark: Mark) -> Result<Event<'b>>
    {
        let token = self.bump()?;
        self.state.pop();

        Ok(Event::new(mark, false, token.comments, EventData::SequenceEnd))
    }

    fn fetch_mapping_end(&mut self, mark: Mark) -> Result<Event<'b>>
    {
        let token = self.bump()?;
        self.state.pop();

        Ok(Event::new(mark, false, token.comments, EventData::MappingEnd))
    }

    /// Attempt to retrieve an anchor token's name if one sits
    /// at the head of the stream, advancing `mark` to its
    /// position.
    fn fetch_anchor(&mut self, mark: &mut Mark) -> Result<Option<Slice<'b>>>
    {
        if !matches!(self.marker()?, Marker::Anchor)
        {
            return Ok(None);
        }

        let token = self.bump()?;
        *mark = token.mark;

        match token.data
        {
            TokenData::Anchor(name) => Ok(Some(name)),
            _ => unreachable!("just matched Marker::Anchor"),
        }
    }

    /// Attempt to retrieve a tag token's handle and suffix if
    /// one sits at the head of the stream, advancing `mark`
    /// to its position.
    fn fetch_tag(&mut self, mark: &mut Mark) -> Result<Option<(Slice<'b>, Slice<'b>)>>
    {
        if !matches!(self.marker()?, Marker::Tag)
        {
            return Ok(None);
        }

        let token = self.bump()?;
        *mark = token.mark;

        match token.data
        {
            TokenData::Tag(handle, suffix) => Ok(Some((handle, suffix))),
            _ => unreachable!("just matched Marker::Tag"),
        }
    }

    /// Fetch all adjacent YAML directives from the stream,
    /// merged with the defaults, returning the mark the
    /// directive run began at and the resulting directives.
    fn scan_document_directives(&mut self) -> Result<(Mark, Directives<'b>)>
    {
        let mark = self.mark()?;

        let mut directives = Directives {
            version: DEFAULT_VERSION,
            tags:    default_tags(),
        };
        let mut seen_version = false;

        loop
        {
            match self.marker()?
            {
                Marker::VersionDirective if !seen_version =>
                {
                    seen_version = true;

                    let token = self.bump()?;
                    directives.version = match token.data
                    {
                        TokenData::VersionDirective(major, minor) => VersionDirective { major, minor },
                        _ => unreachable!("just matched Marker::VersionDirective"),
                    };
                },
                Marker::VersionDirective => return err(ErrorKind::UnexpectedDirective, self.mark()?),

                Marker::TagDirective =>
                {
                    let token = self.bump()?;
                    let (handle, prefix) = match token.data
                    {
                        TokenData::TagDirective(handle, prefix) => (handle, prefix),
                        _ => unreachable!("just matched Marker::TagDirective"),
                    };

                    if directives.tags.contains_key(&handle)
                    {
                        return err(ErrorKind::UnexpectedDirective, token.mark);
                    }

                    directives.tags.insert(handle, prefix);
                },

                _ => break,
            }
        }

        Ok((mark, directives))
    }
}

fn validate_event_tag(tags: &TagDirectives, event: &mut Event) -> Result<()>
{
    let mark = event.mark();

    match event.data_mut()
    {
        EventData::Scalar(node) => validate_tag(tags, &mut node.tag, true, mark),
        EventData::SequenceStart(node) => validate_tag(tags, &mut node.tag, false, mark),
        EventData::MappingStart(node) => validate_tag(tags, &mut node.tag, false, mark),
        _ => Ok(()),
    }
}

fn validate_tag(tags: &TagDirectives, tag: &mut Option<(Slice, Slice)>, scalar: bool, mark: Mark) -> Result<()>
{
    if let Some((handle, suffix)) = tag.as_ref()
    {
        // A non-specific scalar tag (`!`) is not resolved against the tag map.
        let resolvable = !(handle == "!" && suffix.is_empty());

        match (scalar, resolvable)
        {
            (false, _) | (true, true) =>
            {
                if tags.get(handle).is_none()
                {
                    return err(ErrorKind::TagFormat, mark);
                }
            },
            (true, false) => *tag = None,
        }
    }

    Ok(())
}

fn tags_to_owned<'a>((handle, prefix): (&Slice<'a>, &Slice<'a>)) -> (Slice<'static>, Slice<'static>)
{
    (handle.to_string().into(), prefix.to_string().into())
}

impl<'b> Iterator for Parser<'b>
{
    type Item = Result<Event<'b>>;

    fn next(&mut self) -> Option<Self::Item>
    {
        self.next_event()
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::flag::O_ZEROED;

    fn parse(src: &str) -> Vec<Event<'_>>
    {
        let reader = Reader::new(src.as_bytes()).expect("valid reader");
        let parser = Parser::new(reader, O_ZEROED);

        parser.map(|e| e.expect("no parse error")).collect()
    }

    fn kinds(events: &[Event<'_>]) -> Vec<&'static str>
    {
        events
            .iter()
            .map(|e| match e.data()
            {
                EventData::StreamStart(_) => "streamStart",
                EventData::StreamEnd => "streamEnd",
                EventData::DocumentStart(_) => "documentStart",
                EventData::DocumentEnd(_) => "documentEnd",
                EventData::Alias(_) => "alias",
                EventData::Scalar(_) => "scalar",
                EventData::MappingStart(_) => "mappingStart",
                EventData::MappingEnd => "mappingEnd",
                EventData::SequenceStart(_) => "sequenceStart",
                EventData::SequenceEnd => "sequenceEnd",
            })
            .collect()
    }

    #[test]
    fn empty_stream()
    {
        let events = parse("");

        assert_eq!(
            kinds(&events),
            vec!["streamStart", "documentStart", "documentEnd", "streamEnd"]
        );
        assert!(events[1].is_implicit());
        assert!(events[2].is_implicit());
    }

    #[test]
    fn plain_scalar_document()
    {
        let events = parse("hello\n");

        assert_eq!(
            kinds(&events),
            vec!["streamStart", "documentStart", "scalar", "documentEnd", "streamEnd"]
        );

        match events[2].data()
        {
            EventData::Scalar(node) => assert_eq!(&*node.content, "hello"),
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn block_sequence()
    {
        let events = parse("- a\n- b\n- c\n");

        assert_eq!(
            kinds(&events),
            vec![
                "streamStart",
                "documentStart",
                "sequenceStart",
                "scalar",
                "scalar",
                "scalar",
                "sequenceEnd",
                "documentEnd",
                "streamEnd"
            ]
        );
    }

    #[test]
    fn indentless_sequence_under_mapping_key()
    {
        let events = parse("key:\n- a\n- b\n");

        assert_eq!(
            kinds(&events),
            vec![
                "streamStart",
                "documentStart",
                "mappingStart",
                "scalar",
                "sequenceStart",
                "scalar",
                "scalar",
                "sequenceEnd",
                "mappingEnd",
                "documentEnd",
                "streamEnd"
            ]
        );

        // The sequence start/end were synthesized, with no bracketing token.
        let seq_start = &events[4];
        assert!(seq_start.is_implicit());
    }

    #[test]
    fn block_mapping()
    {
        let events = parse("a: 1\nb: 2\n");

        assert_eq!(
            kinds(&events),
            vec![
                "streamStart",
                "documentStart",
                "mappingStart",
                "scalar",
                "scalar",
                "scalar",
                "scalar",
                "mappingEnd",
                "documentEnd",
                "streamEnd"
            ]
        );
    }

    #[test]
    fn flow_sequence_and_mapping()
    {
        let events = parse("[1, {a: 2}, 3]\n");

        assert_eq!(
            kinds(&events),
            vec![
                "streamStart",
                "documentStart",
                "sequenceStart",
                "scalar",
                "mappingStart",
                "scalar",
                "scalar",
                "mappingEnd",
                "scalar",
                "sequenceEnd",
                "documentEnd",
                "streamEnd"
            ]
        );
    }

    #[test]
    fn anchor_and_alias()
    {
        let events = parse("- &a 1\n- *a\n");

        assert_eq!(
            kinds(&events),
            vec![
                "streamStart",
                "documentStart",
                "sequenceStart",
                "scalar",
                "alias",
                "sequenceEnd",
                "documentEnd",
                "streamEnd"
            ]
        );

        match events[3].data()
        {
            EventData::Scalar(node) => assert_eq!(node.anchor.as_deref(), Some("a")),
            _ => panic!("expected scalar"),
        }
        match events[4].data()
        {
            EventData::Alias(alias) => assert_eq!(&*alias.name, "a"),
            _ => panic!("expected alias"),
        }
    }

    #[test]
    fn undefined_tag_handle_errors()
    {
        let reader = Reader::new(b"!nope!tag value\n").expect("valid reader");
        let parser = Parser::new(reader, O_ZEROED);

        let err = parser.filter_map(|e| e.err()).next();

        assert_eq!(err.map(|e| e.kind()), Some(ErrorKind::TagFormat));
    }

    #[test]
    fn duplicate_yaml_directive_errors()
    {
        let reader = Reader::new(b"%YAML 1.2\n%YAML 1.2\n---\nx\n").expect("valid reader");
        let parser = Parser::new(reader, O_ZEROED);

        let err = parser.filter_map(|e| e.err()).next();
        assert!(err.is_some());
        assert_eq!(err.unwrap().kind(), ErrorKind::UnexpectedDirective);
    }
}
