/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::{error::Error as StdError, fmt, io};

use crate::{
    grammar::{error::Code, StreamFault},
    tree::Position,
};

/// Result typedef used throughout this library's public API
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque type representing all possible errors which can
/// occur while parsing a stream.
///
/// Boxed so that the Ok path of [`Result`] stays a single
/// word wide.
pub struct Error
{
    inner: Box<internal::Error>,
}

impl Error
{
    /// The line at which the error occurred (1-based).
    pub fn line(&self) -> usize
    {
        self.inner.position.line
    }

    /// The column into the line where the error occurred,
    /// counted in code points.
    pub fn column(&self) -> usize
    {
        self.inner.position.column
    }

    /// The byte index into the stream at which the error
    /// occurred.
    pub fn at(&self) -> usize
    {
        self.inner.position.offset
    }

    /// The index of the document that was being parsed when
    /// the error occurred. The documents preceding it were
    /// well formed, though they are not returned.
    pub fn document_index(&self) -> usize
    {
        self.inner.document
    }

    /// Categorize the error into one of the following:
    ///
    /// - [`Category::Structural`] Mismatched delimiters,
    ///   missing indicators, misplaced documents
    /// - [`Category::Content`] Scalar content that could
    ///   not be decoded
    /// - [`Category::Indentation`] Indentation that cannot
    ///   delimit any scope
    /// - [`Category::Limit`] A length bound was exceeded
    /// - [`Category::Tag`] A tag failed validation
    /// - [`Category::EOF`] The stream ended unexpectedly
    pub fn classify(&self) -> Category
    {
        Category::from(self.inner.code)
    }

    pub(crate) fn new(fault: StreamFault) -> Self
    {
        Self {
            inner: Box::new(internal::Error {
                code:     fault.diagnostic.code,
                detail:   fault.diagnostic.detail,
                position: fault.diagnostic.position,
                document: fault.document,
            }),
        }
    }
}

/// Rough category of an [`Error`].
///
/// Useful for making decisions upon encountering an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category
{
    /// The stream's structure was not well formed
    Structural,

    /// Scalar content was malformed (a bad escape, a non
    /// printable character, an unterminated quote)
    Content,

    /// Indentation could not delimit any valid scope,
    /// including tabs used structurally
    Indentation,

    /// A length limit was blown through (the 1024 code
    /// point implicit key bound)
    Limit,

    /// A tag was not a valid local tag or absolute uri, or
    /// referenced an unbound handle
    Tag,

    /// The stream unexpectedly terminated before it was
    /// appropriate to do so
    EOF,
}

pub(crate) mod internal
{
    use super::*;

    /// Internal error representation.
    ///
    /// Contains enough metadata about the position of the
    /// error that callers can contextualize it against the
    /// source
    pub(crate) struct Error
    {
        /// Error variant encountered
        pub code:     Code,
        /// Extra description for the errors the grammar
        /// diagnoses in detail (escape sequences, mostly)
        pub detail:   Option<Box<str>>,
        /// Position in the stream the error occurred
        pub position: Position,
        /// Which document the error belongs to
        pub document: usize,
    }
}

impl From<Code> for Category
{
    fn from(code: Code) -> Self
    {
        use Code::*;

        match code
        {
            UnknownDirective | MissingMajor | MissingMinor | InvalidVersion
            | UnsupportedVersion | DuplicateVersion | MissingDocumentStart
            | MissingFlowSequenceEntryOrEnd | MissingFlowMappingEntryOrEnd
            | TrailingContent => Category::Structural,

            InvalidFlowScalar | InvalidPlainScalar | InvalidBlockScalar
            | UnterminatedScalar | NonPrintable | UnknownEscape | InvalidEscape
            | InvalidAnchorName => Category::Content,

            InvalidTab | InvalidIndentation | ZeroIndent => Category::Indentation,

            KeyOverflow => Category::Limit,

            InvalidTagHandle | InvalidTagPrefix | InvalidTagSuffix | InvalidVerbatimTag
            | UndefinedTagHandle | DuplicateTagDirective => Category::Tag,

            UnexpectedEOF => Category::EOF,
        }
    }
}

impl fmt::Debug for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Error")
            .field("code", &self.inner.code)
            .field("detail", &self.inner.detail)
            .field("line", &self.inner.position.line)
            .field("column", &self.inner.position.column)
            .field("index", &self.inner.position.offset)
            .field("document", &self.inner.document)
            .finish()
    }
}

impl fmt::Display for Error
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.inner.detail
        {
            Some(ref detail) => write!(
                f,
                "{}: {}, on {} (document {})",
                self.inner.code, detail, self.inner.position, self.inner.document
            ),
            None => write!(
                f,
                "{}, on {} (document {})",
                self.inner.code, self.inner.position, self.inner.document
            ),
        }
    }
}

impl StdError for Error {}

impl From<Error> for io::Error
{
    fn from(err: Error) -> Self
    {
        match err.classify()
        {
            Category::EOF => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            Category::Content => io::Error::new(io::ErrorKind::InvalidData, err),
            _ => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse;

    #[test]
    fn error_carries_position_and_document()
    {
        let err = parse("key: |0\n").expect_err("a zero indent indicator error");

        assert_eq!(err.classify(), Category::Indentation);
        assert_eq!(err.line(), 1);
        assert_eq!(err.column(), 6);
        assert_eq!(err.document_index(), 0);
    }

    #[test]
    fn error_document_attribution()
    {
        let err = parse("one\n...\ntwo\n...\n| bad\n").expect_err("a header error");

        assert_eq!(err.document_index(), 2);
    }

    #[test]
    fn error_display_mentions_the_line()
    {
        let err = parse("key: \"\\q\"\n").expect_err("an unknown escape error");

        let shown = err.to_string();
        assert!(shown.contains("line 1"), "display was: {}", shown);
        assert!(shown.contains("\\q"), "display was: {}", shown);
    }
}
