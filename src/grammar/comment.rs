/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Comment productions. Comments are structure, not
//! content: they separate tokens and are dropped, never
//! attached to the tree.

use crate::grammar::{
    chars,
    cursor::Cursor,
    error::{Code, Fault, Step},
    white::separate_in_line,
};

/// c-nb-comment-text: '#' followed by the rest of the line
fn comment_text(cur: Cursor<'_>) -> Step<'_, ()>
{
    let mut cur = match cur.eat_char('#')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::TrailingContent, &cur)),
    };

    while matches!(cur.peek(), Some(c) if chars::is_nb_char(c))
    {
        cur = cur.bump();
    }

    Ok(((), cur))
}

/// b-comment: a line break or the end of input
fn b_comment(cur: Cursor<'_>) -> Step<'_, ()>
{
    match cur.take_break()
    {
        Some(next) => Ok(((), next)),
        None if cur.is_end() => Ok(((), cur)),
        None => Err(Fault::miss(Code::TrailingContent, &cur)),
    }
}

/// s-b-comment: optional in line comment, then the line's
/// end
pub(in crate::grammar) fn sb_comment(cur: Cursor<'_>) -> Step<'_, ()>
{
    let cur = match separate_in_line(cur)
    {
        Ok(((), next)) =>
        {
            let (_, next) = opt!(next, comment_text(next))?;

            next
        },
        Err(_) => cur,
    };

    b_comment(cur)
}

/// l-comment: a (possibly empty) comment line
fn l_comment(cur: Cursor<'_>) -> Step<'_, ()>
{
    let ((), cur) = separate_in_line(cur)?;
    let (_, cur) = opt!(cur, comment_text(cur))?;

    b_comment(cur)
}

/// s-l-comments: the end of the current line (or a zero
/// width match at a line start), plus any number of
/// following comment lines. Leaves the cursor at the start
/// of the next content line, or at the end of input
pub(in crate::grammar) fn sl_comments(cur: Cursor<'_>) -> Step<'_, ()>
{
    let mut cur = match sb_comment(cur)
    {
        Ok(((), next)) => next,
        Err(_) if cur.at_line_start() => cur,
        Err(fault) => return Err(fault),
    };

    // Greedily chew comment lines, stopping on the first
    // miss or when a match stops consuming (which happens
    // exactly once, at the end of input)
    while let Ok(((), next)) = l_comment(cur)
    {
        if next.pos().offset == cur.pos().offset
        {
            break;
        }

        cur = next;
    }

    Ok(((), cur))
}
