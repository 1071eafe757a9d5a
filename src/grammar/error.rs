/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{grammar::cursor::Cursor, tree::Position};

/// The result of evaluating one production: on success the
/// produced value plus the cursor past the consumed prefix,
/// otherwise a [Fault]
pub(in crate::grammar) type Step<'a, T> = std::result::Result<(T, Cursor<'a>), Fault>;

/// The two failure modes of a production.
///
/// A Miss means the production did not match at this
/// position; enclosing ordered choices are free to try
/// their next alternative from the same snapshot.
///
/// An Abort means the production matched a committing
/// prefix and then hit a hard constraint violation; it
/// bypasses every alternative and surfaces at the document
/// driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fault
{
    Miss(Diagnostic),
    Abort(Diagnostic),
}

impl Fault
{
    pub fn miss(code: Code, at: &Cursor<'_>) -> Self
    {
        Fault::Miss(Diagnostic::new(code, at.pos()))
    }

    pub fn abort(code: Code, at: &Cursor<'_>) -> Self
    {
        Fault::Abort(Diagnostic::new(code, at.pos()))
    }

    pub fn abort_detailed(code: Code, at: &Cursor<'_>, detail: String) -> Self
    {
        Fault::Abort(Diagnostic::new(code, at.pos()).with_detail(detail))
    }

    pub fn abort_at(code: Code, position: Position) -> Self
    {
        Fault::Abort(Diagnostic::new(code, position))
    }

    /// Promote a Miss into an Abort, keeping the underlying
    /// diagnostic. Used where a committing prefix has
    /// already been consumed and the caller's alternatives
    /// must not run
    pub fn commit(self) -> Self
    {
        match self
        {
            Fault::Miss(diag) => Fault::Abort(diag),
            abort => abort,
        }
    }

    pub fn diagnostic(&self) -> &Diagnostic
    {
        match self
        {
            Fault::Miss(ref diag) | Fault::Abort(ref diag) => diag,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic
    {
        match self
        {
            Fault::Miss(diag) | Fault::Abort(diag) => diag,
        }
    }
}

/// A positioned error description. The .detail field is
/// reserved for the handful of errors the spec requires to
/// name the offending characters, e.g escape sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Diagnostic
{
    pub code:     Code,
    pub detail:   Option<Box<str>>,
    pub position: Position,
}

impl Diagnostic
{
    pub fn new(code: Code, position: Position) -> Self
    {
        Self {
            code,
            detail: None,
            position,
        }
    }

    pub fn with_detail(mut self, detail: String) -> Self
    {
        self.detail = Some(detail.into_boxed_str());

        self
    }
}

impl fmt::Display for Diagnostic
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.detail
        {
            Some(ref detail) => write!(f, "{}: {}, on {}", self.code, detail, self.position),
            None => write!(f, "{}, on {}", self.code, self.position),
        }
    }
}

/// Lightweight error variants, specific to the grammar.
///
/// This enum should never be polluted with large variants
/// or wrap underlying errors; hot paths return it
/// constantly and it must stay trivially copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Code
{
    /// Got end of stream while evaluating a production
    UnexpectedEOF,

    /// Directive was not either YAML or TAG
    UnknownDirective,

    /// %YAML 1.2
    ///       ^
    MissingMajor,

    /// %YAML 1.2
    ///         ^
    MissingMinor,

    /// A directive version component was not a digit run
    InvalidVersion,

    /// %YAML declared a version newer than 1.2
    UnsupportedVersion,

    /// More than one %YAML directive in a single document
    DuplicateVersion,

    /// More than one %TAG directive for the same handle in
    /// a single document
    DuplicateTagDirective,

    /// Tag handle was not primary (!), secondary (!!) or
    /// named (!alphanumeric!)
    InvalidTagHandle,

    /// Tag prefix was missing or contained characters
    /// outside the uri set
    InvalidTagPrefix,

    /// Tag suffix was empty or resolved to something that
    /// is neither a local tag nor an absolute uri
    InvalidTagSuffix,

    /// A !<...> tag was empty, unclosed, or not a valid
    /// local tag or absolute uri
    InvalidVerbatimTag,

    /// A named tag handle was used without a %TAG directive
    /// binding it
    UndefinedTagHandle,

    /// Either an anchor (&) or alias (*)'s name was invalid
    InvalidAnchorName,

    /// A flow scalar contained a character sequence that is
    /// not permitted
    InvalidFlowScalar,

    /// A plain scalar contained a character sequence that
    /// is not permitted
    InvalidPlainScalar,

    /// A block scalar header was malformed
    InvalidBlockScalar,

    /// A block scalar declared an indentation indicator of
    /// 0, which has no meaning
    ZeroIndent,

    /// Content was found between the parent indent and the
    /// established content indent of a block scalar
    InvalidIndentation,

    /// A quoted scalar ran into the end of input or a
    /// document marker before its closing quote
    UnterminatedScalar,

    /// A character outside the printable set was found in
    /// scalar content
    NonPrintable,

    /// A character that is not a valid escape followed a
    /// backslash
    UnknownEscape,

    /// A hex escape had the wrong number of digits or named
    /// an impossible code point
    InvalidEscape,

    /// A tab character '\t' was found where structural
    /// indentation was expected
    InvalidTab,

    /// An implicit key ran past 1024 code points
    KeyOverflow,

    /// In certain cases YAML requires an indication that
    /// another document is being started, necessitating a
    /// DocumentStart '---' symbol. Most commonly, if a
    /// stream contains two documents the first must include
    /// a DocumentEnd ('...') symbol, or the second must
    /// start with a DocumentStart
    MissingDocumentStart,

    /// A flow sequence was missing a terminus (']') or
    /// continuation (',') symbol
    MissingFlowSequenceEntryOrEnd,

    /// A flow mapping was missing a terminus ('}') or
    /// continuation (',') symbol
    MissingFlowMappingEntryOrEnd,

    /// Content remained on a line after a complete node
    TrailingContent,
}

impl fmt::Display for Code
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        use Code::*;

        match self
        {
            UnexpectedEOF => f.write_str("unexpected end of input"),
            UnknownDirective => f.write_str("unknown directive"),
            MissingMajor => f.write_str("%YAML directive missing major version"),
            MissingMinor => f.write_str("%YAML directive missing minor version"),
            InvalidVersion => f.write_str("%YAML directive version is invalid"),
            UnsupportedVersion => f.write_str("%YAML directive version is newer than 1.2"),
            DuplicateVersion => f.write_str("duplicate %YAML directive found in a document"),
            DuplicateTagDirective =>
            {
                f.write_str("duplicate %TAG directive for a handle found in a document")
            },
            InvalidTagHandle =>
            {
                f.write_str("node tag handle is not one of !, !!, or ![a-zA-Z0-9]+!")
            },
            InvalidTagPrefix => f.write_str("%TAG directive prefix is invalid"),
            InvalidTagSuffix => f.write_str("node tag suffix is invalid"),
            InvalidVerbatimTag =>
            {
                f.write_str("verbatim tag is not a local tag or an absolute uri")
            },
            UndefinedTagHandle => f.write_str("tag handle has no %TAG directive binding it"),
            InvalidAnchorName => f.write_str("node anchor or alias contains invalid characters"),
            InvalidFlowScalar => f.write_str("flow scalar contains invalid characters"),
            InvalidPlainScalar => f.write_str("plain scalar contains invalid characters"),
            InvalidBlockScalar => f.write_str("block scalar header is invalid"),
            ZeroIndent => f.write_str("block scalar indentation indicator cannot be 0"),
            InvalidIndentation => f.write_str("content is not sufficiently indented"),
            UnterminatedScalar => f.write_str("quoted scalar was never closed"),
            NonPrintable => f.write_str("non printable character in scalar content"),
            UnknownEscape => f.write_str("unknown escape sequence"),
            InvalidEscape => f.write_str("invalid escape sequence"),
            InvalidTab => f.write_str("indentation contained a tab character"),
            KeyOverflow => f.write_str("implicit key is longer than 1024 characters"),
            MissingDocumentStart => f.write_str("missing document start or end indicator"),
            MissingFlowSequenceEntryOrEnd =>
            {
                f.write_str("missing flow sequence delimiter ',' or ']'")
            },
            MissingFlowMappingEntryOrEnd =>
            {
                f.write_str("missing flow mapping delimiter ',' or '}'")
            },
            TrailingContent => f.write_str("content found after the end of a node"),
        }
    }
}
