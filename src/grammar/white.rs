/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Indentation and separation scanners.
//!
//! Structural indentation is always spaces; a tab found
//! where the grammar demands indentation is a hard error,
//! while tabs inside separation (after the indent has been
//! satisfied) are fine.

use crate::grammar::{
    chars,
    comment::sl_comments,
    context::Context,
    cursor::Cursor,
    error::{Code, Fault, Step},
};

/// s-indent(n): exactly .n spaces
pub(in crate::grammar) fn indent_exact(cur: Cursor<'_>, n: usize) -> Step<'_, ()>
{
    let mut cur = cur;

    for _ in 0..n
    {
        match cur.peek()
        {
            Some(' ') => cur = cur.bump(),
            _ => return Err(Fault::miss(Code::InvalidIndentation, &cur)),
        }
    }

    Ok(((), cur))
}

/// s-indent(<n): as many spaces as present, capped below .n
pub(in crate::grammar) fn indent_less_than(cur: Cursor<'_>, n: usize) -> Step<'_, usize>
{
    let mut cur = cur;
    let mut count = 0;

    while count + 1 < n && cur.peek() == Some(' ')
    {
        cur = cur.bump();
        count += 1;
    }

    Ok((count, cur))
}

/// A run of spaces, counted. Infallible; zero length runs
/// are fine
pub(in crate::grammar) fn space_run(cur: Cursor<'_>) -> (usize, Cursor<'_>)
{
    let mut cur = cur;
    let mut count = 0;

    while cur.peek() == Some(' ')
    {
        cur = cur.bump();
        count += 1;
    }

    (count, cur)
}

/// A run of spaces and tabs, counted. Infallible
pub(in crate::grammar) fn white_run(cur: Cursor<'_>) -> (usize, Cursor<'_>)
{
    let mut cur = cur;
    let mut count = 0;

    while matches!(cur.peek(), Some(c) if chars::is_white(c))
    {
        cur = cur.bump();
        count += 1;
    }

    (count, cur)
}

/// s-separate-in-line: one or more white characters, or a
/// zero width match at the start of a line
pub(in crate::grammar) fn separate_in_line(cur: Cursor<'_>) -> Step<'_, ()>
{
    let (count, next) = white_run(cur);

    match count > 0 || cur.at_line_start()
    {
        true => Ok(((), next)),
        false => Err(Fault::miss(Code::InvalidIndentation, &cur)),
    }
}

/// s-flow-line-prefix(n): the indent plus any further
/// separation white
pub(in crate::grammar) fn flow_line_prefix(cur: Cursor<'_>, n: usize) -> Step<'_, ()>
{
    let ((), cur) = indent_exact(cur, n)?;
    let (_, cur) = white_run(cur);

    Ok(((), cur))
}

/// s-line-prefix(n, c): block contexts take the bare
/// indent, flow contexts also chomp separation white
pub(in crate::grammar) fn line_prefix(cur: Cursor<'_>, n: usize, c: Context) -> Step<'_, ()>
{
    match c
    {
        Context::BlockIn | Context::BlockOut => indent_exact(cur, n),
        _ => flow_line_prefix(cur, n),
    }
}

/// s-separate(n, c): key contexts must stay on the line,
/// everything else may continue across line breaks
pub(in crate::grammar) fn separate(cur: Cursor<'_>, n: usize, c: Context) -> Step<'_, ()>
{
    match c.is_key()
    {
        true => separate_in_line(cur),
        false => separate_lines(cur, n),
    }
}

/// s-separate-lines(n): either comments followed by the
/// flow line prefix of the next content line, or in line
/// separation
pub(in crate::grammar) fn separate_lines(cur: Cursor<'_>, n: usize) -> Step<'_, ()>
{
    alt!(
        sl_comments(cur).and_then(|((), cur)| flow_line_prefix(cur, n)),
        separate_in_line(cur)
    )
}

/// From the start of a line, skip over blank and comment
/// only lines until a line carrying content, returning the
/// content's column with the cursor placed on it.
///
/// End of input is a Miss (the caller decides whether that
/// terminates a collection or the document). A tab in the
/// indentation of the content line is a hard error, as no
/// block production can accept it.
pub(in crate::grammar) fn next_content_line(cur: Cursor<'_>) -> Step<'_, usize>
{
    let mut cur = cur;

    loop
    {
        let (spaces, at_content) = space_run(cur);
        let (trailing, past_white) = white_run(at_content);

        match past_white.peek()
        {
            None => return Err(Fault::miss(Code::UnexpectedEOF, &past_white)),

            // Blank line, keep looking
            Some(c) if chars::is_break(c) =>
            {
                cur = past_white.take_break().expect("a line break");
            },

            // Comment only line, keep looking; these may be
            // indented however they like
            Some('#') =>
            {
                let mut skip = past_white;

                while matches!(skip.peek(), Some(c) if !chars::is_break(c))
                {
                    skip = skip.bump();
                }

                match skip.take_break()
                {
                    Some(next) => cur = next,
                    None => return Err(Fault::miss(Code::UnexpectedEOF, &skip)),
                }
            },

            // Content; tabs between the spaces and it make the
            // column meaningless
            Some(_) => match trailing
            {
                0 => return Ok((spaces, at_content)),
                _ => return Err(Fault::abort(Code::InvalidTab, &at_content)),
            },
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn indent_exact_spaces_only()
    {
        let cur = Cursor::new("   x");

        let ((), next) = indent_exact(cur, 3).expect("3 spaces");
        assert_eq!(next.peek(), Some('x'));

        assert!(indent_exact(cur, 4).is_err());
        assert!(indent_exact(Cursor::new("\t x"), 1).is_err());
    }

    #[test]
    fn separate_in_line_zero_width_at_line_start()
    {
        let cur = Cursor::new("x");
        let ((), next) = separate_in_line(cur).expect("zero width at line start");
        assert_eq!(next.pos().offset, 0);

        let cur = Cursor::new("x y").bump();
        let ((), next) = separate_in_line(cur).expect("one space");
        assert_eq!(next.peek(), Some('y'));

        assert!(separate_in_line(Cursor::new("xy").bump()).is_err());
    }

    #[test]
    fn next_content_line_skips_noise()
    {
        let data = "\n  # remark\n\t# tabbed remark\n   value";

        let (col, at) = next_content_line(Cursor::new(data)).expect("a content line");
        assert_eq!(col, 3);
        assert_eq!(at.peek(), Some('v'));
        assert_eq!(at.pos().line, 4);
    }

    #[test]
    fn next_content_line_rejects_tab_indent()
    {
        let data = "  \tvalue";

        match next_content_line(Cursor::new(data))
        {
            Err(Fault::Abort(diag)) => assert_eq!(diag.code, Code::InvalidTab),
            other => panic!("expected an InvalidTab abort, got {:?}", other),
        }
    }

    #[test]
    fn next_content_line_misses_at_eof()
    {
        assert!(next_content_line(Cursor::new("")).is_err());
        assert!(next_content_line(Cursor::new("   \n\n")).is_err());
    }
}
