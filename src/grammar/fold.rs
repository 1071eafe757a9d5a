/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Line folding: the machinery that collapses the breaks
//! of a multi line scalar into spaces, while preserving
//! blank lines as line feeds. Content is appended to a
//! caller owned scratch String; breaks always normalize to
//! a single U+000A regardless of how they were written.

use crate::grammar::{
    context::Context,
    cursor::Cursor,
    error::{Code, Fault, Step},
    white::{flow_line_prefix, indent_less_than, line_prefix, white_run},
};

/// l-empty(n, c): a line holding nothing (beyond its
/// prefix), contributing one line feed to the content
pub(in crate::grammar) fn empty_line(cur: Cursor<'_>, n: usize, c: Context) -> Step<'_, ()>
{
    let ((), cur) = alt!(
        line_prefix(cur, n, c),
        indent_less_than(cur, n).map(|(_, next)| ((), next))
    )?;

    match cur.take_break()
    {
        Some(next) => Ok(((), next)),
        None => Err(Fault::miss(Code::InvalidIndentation, &cur)),
    }
}

/// b-l-folded(n, c): a break and any empty lines after it.
/// A lone break folds to a space; otherwise the first
/// break is discarded and every empty line contributes a
/// line feed
pub(in crate::grammar) fn folded<'a>(
    cur: Cursor<'a>,
    n: usize,
    c: Context,
    out: &mut String,
) -> Step<'a, ()>
{
    let mut cur = match cur.take_break()
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::InvalidIndentation, &cur)),
    };

    let mut feeds = 0;

    while let Ok(((), next)) = empty_line(cur, n, c)
    {
        feeds += 1;
        cur = next;
    }

    match feeds
    {
        0 => out.push(' '),
        _ =>
        {
            for _ in 0..feeds
            {
                out.push('\n')
            }
        },
    }

    Ok(((), cur))
}

/// s-flow-folded(n): folding as it applies inside flow
/// scalars; trailing white before the break is dropped and
/// the next line must carry the flow line prefix
pub(in crate::grammar) fn flow_folded<'a>(cur: Cursor<'a>, n: usize, out: &mut String)
    -> Step<'a, ()>
{
    let mark = out.len();

    let (_, cur) = white_run(cur);

    let run = folded(cur, n, Context::FlowIn, out)
        .and_then(|((), cur)| flow_line_prefix(cur, n));

    if run.is_err()
    {
        out.truncate(mark);
    }

    run
}
