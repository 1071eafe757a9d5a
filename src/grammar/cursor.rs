/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the cursor type threaded through every
//! production, tracking:
//!
//! - How far into the source have we read?
//! - How many lines have we seen?
//! - What is the current column?
//!
//! A Cursor is Copy and never mutated in place; alternative
//! branches receive snapshots, which is what makes
//! backtracking safe without any rewind bookkeeping.

use crate::{grammar::chars, tree::Position};

#[derive(Debug, Clone, Copy)]
pub(in crate::grammar) struct Cursor<'a>
{
    src:    &'a str,
    /// Byte offset into .src
    offset: usize,
    /// 1-based line count
    line:   usize,
    /// Code points since the last line break
    column: usize,
}

impl<'a> Cursor<'a>
{
    pub fn new(src: &'a str) -> Self
    {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// Snapshot the current position for diagnostics
    pub fn pos(&self) -> Position
    {
        Position {
            offset: self.offset,
            line:   self.line,
            column: self.column,
        }
    }

    /// The unread remainder of the source
    pub fn rest(&self) -> &'a str
    {
        &self.src[self.offset..]
    }

    pub fn is_end(&self) -> bool
    {
        self.offset >= self.src.len()
    }

    /// True at offset 0 and immediately after a line break
    pub fn at_line_start(&self) -> bool
    {
        self.column == 0
    }

    pub fn column(&self) -> usize
    {
        self.column
    }

    pub fn peek(&self) -> Option<char>
    {
        self.rest().chars().next()
    }

    /// The .nth code point past the current one (0 is the
    /// current). Only ever used with tiny offsets, so the
    /// linear walk is irrelevant
    pub fn peek_at(&self, nth: usize) -> Option<char>
    {
        self.rest().chars().nth(nth)
    }

    pub fn starts_with(&self, prefix: &str) -> bool
    {
        self.rest().starts_with(prefix)
    }

    /// Advance over one code point. Must not be called on a
    /// carriage return; breaks go through .take_break so
    /// that CR LF counts as one line
    pub fn bump(mut self) -> Self
    {
        if let Some(c) = self.peek()
        {
            self.offset += c.len_utf8();

            match c
            {
                '\n' =>
                {
                    self.line += 1;
                    self.column = 0;
                },
                _ => self.column += 1,
            }
        }

        self
    }

    /// Advance over .count code points
    pub fn skip(self, count: usize) -> Self
    {
        let mut cur = self;

        for _ in 0..count
        {
            cur = cur.bump();
        }

        cur
    }

    /// Advance past .want if it is next in the stream
    pub fn eat_char(self, want: char) -> Option<Self>
    {
        match self.peek()
        {
            Some(c) if c == want => Some(self.bump()),
            _ => None,
        }
    }

    /// Advance past .want if it prefixes the stream. Only
    /// meaningful for ASCII, break free needles
    pub fn eat_str(self, want: &str) -> Option<Self>
    {
        match self.starts_with(want)
        {
            true => Some(self.skip(want.chars().count())),
            false => None,
        }
    }

    /// True if the next character is a YAML line break
    pub fn at_break(&self) -> bool
    {
        matches!(self.peek(), Some('\r') | Some('\n'))
    }

    /// Consume one b-break (CR LF, CR or LF), advancing the
    /// line count
    pub fn take_break(mut self) -> Option<Self>
    {
        let len = match self.peek()
        {
            Some('\r') if self.peek_at(1) == Some('\n') => 2,
            Some('\r') | Some('\n') => 1,
            _ => return None,
        };

        self.offset += len;
        self.line += 1;
        self.column = 0;

        Some(self)
    }

    /// Consume a byte order mark without counting it as a
    /// column, as it is invisible in the character stream
    pub fn skip_bom(mut self) -> Self
    {
        if self.peek() == Some('\u{FEFF}')
        {
            self.offset += '\u{FEFF}'.len_utf8();
        }

        self
    }

    /// The source consumed between .self and .end
    pub fn slice(&self, end: &Cursor<'a>) -> &'a str
    {
        &self.src[self.offset..end.offset]
    }

    /// Code points consumed between .self and .end, used
    /// for the implicit key length bound
    pub fn chars_between(&self, end: &Cursor<'a>) -> usize
    {
        self.slice(end).chars().count()
    }

    /// A '---' or '...' line at column 0, delimited by
    /// whitespace or the end of input
    pub fn at_document_marker(&self) -> bool
    {
        self.column == 0
            && (self.starts_with("---") || self.starts_with("..."))
            && match self.peek_at(3)
            {
                None => true,
                Some(c) => chars::is_white(c) || chars::is_break(c),
            }
    }
}
