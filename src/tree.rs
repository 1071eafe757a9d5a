/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The token tree produced by a successful parse.
//!
//! A [Stream] owns zero or more [Document]s, each of which
//! owns its directives, warnings and a single root [Node].
//! Everything in this module is plain owned data; scalar
//! values are normalized strings produced by folding and
//! escape decoding, never slices of the source buffer.

use std::fmt;

/// An ordered sequence of YAML documents parsed from one
/// character stream
#[derive(Debug, Clone, PartialEq)]
pub struct Stream
{
    pub documents: Vec<Document>,
}

impl Stream
{
    /// A stream with no documents, as produced by empty (or
    /// comment only) input
    pub fn empty() -> Self
    {
        Self {
            documents: Vec::new(),
        }
    }
}

/// A single document in a [Stream]
#[derive(Debug, Clone, PartialEq)]
pub struct Document
{
    /// How the document was introduced in the stream
    pub kind:       DocumentKind,
    /// Directives seen before the document's content, in
    /// source order
    pub directives: Vec<Directive>,
    /// The document's top level node
    pub root:       Node,
    /// Non fatal diagnostics attached to this document
    pub warnings:   Vec<Warning>,
}

/// The three document forms YAML distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind
{
    /// Content only, no '---' and no directives
    Bare,
    /// Introduced by a '---' marker
    Explicit,
    /// One or more directives followed by '---'
    Directive,
}

/// A processor instruction found before a document
#[derive(Debug, Clone, PartialEq)]
pub enum Directive
{
    /// %YAML major.minor, exactly as declared in the source
    Yaml(u32, u32),
    /// %TAG handle prefix
    Tag
    {
        handle: String, prefix: String
    },
    /// Any other directive name, recorded with its
    /// parameters
    Reserved
    {
        name: String, params: Vec<String>
    },
}

/// A node in the token tree: optional properties plus
/// content
#[derive(Debug, Clone, PartialEq)]
pub struct Node
{
    /// Anchor and/or tag attached to the node, if any.
    /// Always None for aliases
    pub property: Option<Property>,
    pub content:  Content,
}

impl Node
{
    /// A node with no property and empty content
    pub fn empty() -> Self
    {
        Self {
            property: None,
            content:  Content::Empty,
        }
    }

    pub(crate) fn scalar(value: String, style: ScalarStyle) -> Self
    {
        Self {
            property: None,
            content:  Content::Scalar(Scalar { value, style }),
        }
    }
}

/// Node content variants
#[derive(Debug, Clone, PartialEq)]
pub enum Content
{
    Scalar(Scalar),
    Sequence(Vec<Node>, CollectionStyle),
    Mapping(Vec<Entry>, CollectionStyle),
    /// A *name reference to a previously anchored node.
    /// The core records the name only; resolution is the
    /// composer's job
    Alias(String),
    /// An omitted node
    Empty,
}

/// A key value pair in a [Content::Mapping]
#[derive(Debug, Clone, PartialEq)]
pub struct Entry
{
    pub key:   Node,
    pub value: Node,
}

/// A scalar value with the style it was written in
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar
{
    /// Normalized content: folded, unescaped, with every
    /// interior line break encoded as a single U+000A
    pub value: String,
    pub style: ScalarStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle
{
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStyle
{
    Block,
    Flow,
}

/// Anchor and/or tag written before a node, in either order
#[derive(Debug, Clone, PartialEq)]
pub struct Property
{
    pub anchor: Option<String>,
    pub tag:    Option<Tag>,
}

impl Property
{
    /// True if neither an anchor nor a tag is present
    pub fn is_vacant(&self) -> bool
    {
        self.anchor.is_none() && self.tag.is_none()
    }
}

/// A node tag
#[derive(Debug, Clone, PartialEq)]
pub enum Tag
{
    /// !<uri>, taken verbatim from the source
    Verbatim(String),
    /// handle + suffix, e.g '!!' + 'str'
    Shorthand
    {
        handle: String, suffix: String
    },
    /// A lone '!', disabling tag resolution for the node
    NonSpecific,
}

/// A position in the source character stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position
{
    /// Byte offset from the start of the stream
    pub offset: usize,
    /// 1-based line number
    pub line:   usize,
    /// 0-based column, counted in code points
    pub column: usize,
}

impl fmt::Display for Position
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "line {}, column {}, at index {}",
            self.line, self.column, self.offset
        )
    }
}

/// A non fatal diagnostic attached to a [Document]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning
{
    pub code:     WarningCode,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode
{
    /// %YAML declared a version greater than 1.2; the
    /// document was processed with 1.2 semantics
    VersionUnsupported,
    /// A directive name other than YAML or TAG
    UnknownDirective,
    /// A %TAG directive rebound a handle already bound in
    /// this document; the later binding wins
    DuplicateTagHandle,
}

impl fmt::Display for WarningCode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            WarningCode::VersionUnsupported =>
            {
                f.write_str("%YAML version is newer than 1.2, processed as 1.2")
            },
            WarningCode::UnknownDirective => f.write_str("unknown directive was ignored"),
            WarningCode::DuplicateTagHandle =>
            {
                f.write_str("%TAG directive rebound an existing handle")
            },
        }
    }
}

impl fmt::Display for Warning
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}, on {}", self.code, self.position)
    }
}
