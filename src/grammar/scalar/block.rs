/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the scanner for block scalars: the
//! header with its indentation and chomping indicators,
//! content indentation detection, and the literal / folded
//! content rules.
//!
//! The content loop is line oriented. Between content
//! lines it carries a count of pending breaks; how those
//! breaks land in the value depends on the style (folded
//! joins a lone break between two ordinary text lines into
//! a space), and whatever is pending when the scalar ends
//! is resolved by the chomping indicator.

use crate::grammar::{
    chars,
    comment::sb_comment,
    context::Indent,
    cursor::Cursor,
    error::{Code, Fault, Step},
    white::space_run,
};

/// How the final break and trailing empty lines of a block
/// scalar are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::grammar) enum Chomp
{
    /// '-': drop the final break and all trailing empties
    Strip,
    /// Default: keep a single final line feed
    Clip,
    /// '+': keep the final break and every trailing empty
    Keep,
}

/// c-l+literal(n) / c-l+folded(n): scan a block scalar at
/// parent indent .n, returning its chomped content. The
/// cursor must sit on the '|' or '>' indicator
pub(in crate::grammar) fn block_scalar<'a>(
    cur: Cursor<'a>,
    n: Indent,
    fold: bool,
) -> Step<'a, String>
{
    let (header, cur) = scan_header(cur, n)?;

    scan_content(cur, n, header, fold)
}

/// The parsed block scalar header: the established content
/// indent (None until detected) and the chomping method
#[derive(Debug, Clone, Copy)]
struct Header
{
    base:  Option<usize>,
    chomp: Chomp,
}

/// c-b-block-header(m, t): the two optional indicators in
/// either order, then the end of the line (possibly with a
/// comment)
fn scan_header<'a>(cur: Cursor<'a>, n: Indent) -> Step<'a, Header>
{
    let mut cur = match cur.peek()
    {
        Some('|') | Some('>') => cur.bump(),
        _ => return Err(Fault::miss(Code::InvalidBlockScalar, &cur)),
    };

    let mut base: Option<usize> = None;
    let mut chomp: Option<Chomp> = None;

    loop
    {
        match cur.peek()
        {
            Some('0') => return Err(Fault::abort(Code::ZeroIndent, &cur)),

            Some(d @ '1'..='9') =>
            {
                if base.is_some()
                {
                    return Err(Fault::abort(Code::InvalidBlockScalar, &cur));
                }

                base = Some(n + d.to_digit(10).expect("a digit") as usize);
                cur = cur.bump();
            },

            Some(c @ '-') | Some(c @ '+') =>
            {
                if chomp.is_some()
                {
                    return Err(Fault::abort(Code::InvalidBlockScalar, &cur));
                }

                chomp = Some(match c == '-'
                {
                    true => Chomp::Strip,
                    false => Chomp::Keep,
                });
                cur = cur.bump();
            },

            _ => break,
        }
    }

    // Whatever remains on the line must be blank or a
    // comment; the header is committed at this point
    let ((), cur) = sb_comment(cur).map_err(Fault::commit)?;

    Ok((
        Header {
            base,
            chomp: chomp.unwrap_or(Chomp::Clip),
        },
        cur,
    ))
}

fn scan_content<'a>(cur: Cursor<'a>, n: Indent, header: Header, fold: bool) -> Step<'a, String>
{
    let mut cur = cur;
    let mut out = String::new();

    let mut base = header.base;

    // Breaks consumed since the last content character
    let mut pending: usize = 0;
    // Deepest leading empty line seen before detection
    let mut max_empty: usize = 0;

    let mut have_content = false;
    let mut prev_spaced = false;

    loop
    {
        if cur.is_end()
        {
            break;
        }

        let (spaces, at) = match base
        {
            None => space_run(cur),
            Some(base) => spaces_capped(cur, base),
        };

        match at.peek()
        {
            // A line that ends (or runs out of input) inside
            // its indentation
            None => break,
            Some(b) if chars::is_break(b) =>
            {
                if base.is_none()
                {
                    // Full run already consumed in detection mode
                    max_empty = max_empty.max(spaces);
                }

                pending += 1;
                cur = at.take_break().expect("a line break");

                continue;
            },

            Some(first) =>
            {
                // Detection: the first non empty line fixes the
                // content indent
                let col = match base
                {
                    Some(col) => col,
                    None =>
                    {
                        if spaces == 0 && at.at_document_marker()
                        {
                            break;
                        }

                        if !(n < spaces)
                        {
                            // All content belongs to the parent; the
                            // scalar is empty
                            break;
                        }

                        if spaces < max_empty
                        {
                            return Err(Fault::abort(Code::InvalidIndentation, &at));
                        }

                        base = Some(spaces);

                        spaces
                    },
                };

                if spaces < col
                {
                    // Shallower than the established indent: either
                    // the scalar is over, or the line is broken
                    if spaces == 0 && at.at_document_marker()
                    {
                        break;
                    }

                    if first == '#' || !(n < spaces)
                    {
                        break;
                    }

                    return Err(Fault::abort(Code::InvalidIndentation, &at));
                }

                if spaces == 0 && at.at_document_marker()
                {
                    break;
                }

                // A content line. More indented lines (beginning
                // in white) are never folded
                let spaced = chars::is_white(first);

                match (have_content, fold && !prev_spaced && !spaced)
                {
                    (false, _) | (true, false) =>
                    {
                        for _ in 0..pending
                        {
                            out.push('\n');
                        }
                    },
                    (true, true) => match pending
                    {
                        0 => (),
                        1 => out.push(' '),
                        _ =>
                        {
                            for _ in 0..pending - 1
                            {
                                out.push('\n');
                            }
                        },
                    },
                }

                pending = 0;

                let (text, after) = line_text(at)?;
                out.push_str(text);

                have_content = true;
                prev_spaced = spaced;

                match after.take_break()
                {
                    Some(next) =>
                    {
                        pending = 1;
                        cur = next;
                    },
                    None =>
                    {
                        cur = after;

                        break;
                    },
                }
            },
        }
    }

    // Resolve the tail against the chomping method
    match header.chomp
    {
        Chomp::Strip => (),
        Chomp::Clip =>
        {
            if have_content && pending > 0
            {
                out.push('\n');
            }
        },
        Chomp::Keep =>
        {
            for _ in 0..pending
            {
                out.push('\n');
            }
        },
    }

    Ok((out, cur))
}

/// Everything from the cursor to the line's end, verbatim
fn line_text(cur: Cursor<'_>) -> Step<'_, &'_ str>
{
    let start = cur;
    let mut cur = cur;

    loop
    {
        match cur.peek()
        {
            None => break,
            Some(b) if chars::is_break(b) => break,
            Some(ch) if chars::is_nb_char(ch) => cur = cur.bump(),
            Some(_) => return Err(Fault::abort(Code::NonPrintable, &cur)),
        }
    }

    Ok((start.slice(&cur), cur))
}

/// Consume leading spaces, but no more than .cap of them
fn spaces_capped(cur: Cursor<'_>, cap: usize) -> (usize, Cursor<'_>)
{
    let mut cur = cur;
    let mut count = 0;

    while count < cap && cur.peek() == Some(' ')
    {
        cur = cur.bump();
        count += 1;
    }

    (count, cur)
}
