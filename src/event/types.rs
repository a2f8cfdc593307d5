/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the various types used by [`Event`]s to represent
//! YAML.

use std::collections::HashMap;

use crate::{
    mark::Mark,
    token::{CollectionStyle, Comments, ScalarStyle, Slice, StreamEncoding},
};

/// Default tag directives applied to every YAML document.
///
/// Equivalent of:
///
/// ```yaml
/// %TAG !    !
/// %TAG !!   tag:yaml.org,2002:
/// ```
///
/// These are always in scope, though documents may expressly
/// override them.
pub fn default_tags() -> TagDirectives<'static>
{
    let mut tags = HashMap::with_capacity(2);
    tags.insert(Slice::Borrowed("!"), Slice::Borrowed("!"));
    tags.insert(Slice::Borrowed("!!"), Slice::Borrowed("tag:yaml.org,2002:"));
    tags
}

/// Default YAML stream version, assumed when unspecified in
/// the stream.
///
/// Equivalent of:
///
/// ```yaml
/// %YAML 1.2
/// ```
pub const DEFAULT_VERSION: VersionDirective = VersionDirective { major: 1, minor: 2 };

/// An empty YAML scalar: the node implied by, e.g., a block
/// mapping value with nothing after its `:`.
pub const EMPTY_SCALAR: Scalar<'static> = Scalar {
    data:  Slice::Borrowed(""),
    style: ScalarStyle::Plain,
};

/// A single production in the event stream: a `kind`, the
/// [`Mark`] it began at, whether it was synthesized rather
/// than backed by a real token, and any comments the scanner
/// attached to the tokens it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'de>
{
    mark:     Mark,
    implicit: bool,
    comments: Comments<'de>,
    data:     EventData<'de>,
}

impl<'de> Event<'de>
{
    pub(in crate::event) fn new(mark: Mark, implicit: bool, comments: Comments<'de>, data: EventData<'de>) -> Self
    {
        Self {
            mark,
            implicit,
            comments,
            data,
        }
    }

    /// The position this event's content began at.
    pub fn mark(&self) -> Mark
    {
        self.mark
    }

    /// Was this event synthesized without a corresponding
    /// source token (e.g. an implied empty scalar, or a
    /// document boundary the stream never wrote out)?
    pub fn is_implicit(&self) -> bool
    {
        self.implicit
    }

    /// Comments the scanner attached to the token(s) this
    /// event was built from.
    pub fn comments(&self) -> &Comments<'de>
    {
        &self.comments
    }

    /// The data associated with this event.
    pub fn data(&self) -> &EventData<'de>
    {
        &self.data
    }

    /// Mutably access this event's data, for in-place fixups
    /// (e.g. tag resolution) before the event is returned to
    /// the caller.
    pub(in crate::event) fn data_mut(&mut self) -> &mut EventData<'de>
    {
        &mut self.data
    }

    /// Consume this event, returning its data.
    pub fn into_data(self) -> EventData<'de>
    {
        self.data
    }
}

/// The possible variants of an [`Event`]. See the
/// documentation on each variant for an explanation of what
/// it represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData<'de>
{
    /// Beginning of the event stream; always the first event
    /// produced, and produced only once.
    StreamStart(StreamStart),
    /// End of the event stream; always the last event
    /// produced.
    StreamEnd,

    /// Start of a document. All following events (until the
    /// paired [`DocumentEnd`]) belong to this document's
    /// scope; tag resolution should use its directives.
    ///
    /// [`DocumentEnd`]: EventData::DocumentEnd
    DocumentStart(DocumentStart<'de>),
    /// End of a document. May be followed by another
    /// [`DocumentStart`](EventData::DocumentStart) or by
    /// [`StreamEnd`](EventData::StreamEnd).
    DocumentEnd(DocumentEnd),

    /// A reference to a previously anchored node.
    Alias(Alias<'de>),
    /// A scalar leaf node.
    Scalar(Node<'de, Scalar<'de>>),

    /// Start of a YAML mapping production, followed by zero
    /// or more key/value node pairs until a matching
    /// [`MappingEnd`](EventData::MappingEnd).
    MappingStart(Node<'de, Mapping>),
    /// End of a YAML mapping production.
    MappingEnd,
    /// Start of a YAML sequence production, followed by zero
    /// or more node entries until a matching
    /// [`SequenceEnd`](EventData::SequenceEnd).
    SequenceStart(Node<'de, Sequence>),
    /// End of a YAML sequence production.
    SequenceEnd,
}

/// Wrapper around [`Event`] variants that correspond to a
/// YAML node production -- those that may carry an anchor or
/// tag: `Scalar`, `MappingStart`, `SequenceStart`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'de, T>
{
    /// The anchor attached to this node (`&name`), if any.
    pub anchor:  Option<Slice<'de>>,
    /// The tag attached to this node, resolved to
    /// `(handle, suffix)`, if any.
    pub tag:     Option<(Slice<'de>, Slice<'de>)>,
    /// The node's content, or a marker type hinting at its
    /// (collection) structure.
    pub content: T,
    /// This node's placement in its parent production.
    pub kind:    NodeKind,
}

/// A YAML scalar's content and style.
///
/// Implements `Deref<Target = str>`, backed by the underlying
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar<'de>
{
    data:  Slice<'de>,
    style: ScalarStyle,
}

impl<'de> Scalar<'de>
{
    pub(in crate::event) fn new(data: Slice<'de>, style: ScalarStyle) -> Self
    {
        Self { data, style }
    }

    /// This scalar's content.
    pub fn data(&self) -> &Slice<'de>
    {
        &self.data
    }

    /// This scalar's style.
    pub fn style(&self) -> ScalarStyle
    {
        self.style
    }
}

impl<'de> AsRef<str> for Scalar<'de>
{
    fn as_ref(&self) -> &str
    {
        &self.data
    }
}

impl<'de> std::ops::Deref for Scalar<'de>
{
    type Target = str;

    fn deref(&self) -> &Self::Target
    {
        &self.data
    }
}

/// Contextual information about a [`Node`]'s placement in the
/// YAML byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind
{
    /// The top-level node of a document.
    Root,
    /// An entry in a sequence.
    Entry,
    /// A key in a mapping.
    Key,
    /// A value in a mapping.
    Value,
}

/// [`StreamStart`](EventData::StreamStart) contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamStart
{
    /// Encoding detected (or given) for the byte stream.
    pub encoding: StreamEncoding,
}

/// [`DocumentStart`](EventData::DocumentStart) contents.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStart<'de>
{
    /// This document's directive map.
    pub directives: Directives<'de>,
}

/// [`DocumentEnd`](EventData::DocumentEnd) contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentEnd;

/// [`Alias`](EventData::Alias) contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias<'de>
{
    /// Name of the anchor this alias refers to.
    pub name: Slice<'de>,
}

/// [`MappingStart`](EventData::MappingStart) content: whether
/// the mapping was written in block or flow style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping
{
    pub style: CollectionStyle,
}
/// [`SequenceStart`](EventData::SequenceStart) content: whether
/// the sequence was written in block or flow style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence
{
    pub style: CollectionStyle,
}

/// YAML directives in scope for a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Directives<'de>
{
    /// The `%YAML` version in scope for this document.
    pub version: VersionDirective,
    /// The `%TAG` handle -> prefix map in scope for this
    /// document, including the two defaults.
    pub tags:    TagDirectives<'de>,
}

impl Default for Directives<'_>
{
    fn default() -> Self
    {
        Self {
            version: DEFAULT_VERSION,
            tags:    default_tags(),
        }
    }
}

/// A `%YAML` directive's major and minor version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDirective
{
    pub major: u8,
    pub minor: u8,
}

/// Map of tag handles (`!`, `!!`, `!named!`) to the prefixes
/// they expand to, in scope for a single document.
pub type TagDirectives<'de> = HashMap<Slice<'de>, Slice<'de>>;
