/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Block nodes and block collections.
//!
//! Everything here is line oriented: collection productions
//! expect the cursor at the start of a line and leave it at
//! the start of the line after their last entry, with each
//! entry's node having consumed its own trailing comments.
//! Entry columns are fixed by the first entry; a shallower
//! line ends the collection and is left for the enclosing
//! scope to claim.

use crate::{
    grammar::{
        chars,
        comment::sl_comments,
        context::{seq_spaces, Context, Indent},
        cursor::Cursor,
        error::{Code, Fault, Step},
        flow::{check_key_span, flow_node, json_key, yaml_key},
        props::{properties, Binds},
        scalar::block::block_scalar,
        white::{indent_exact, next_content_line, separate, separate_in_line, space_run},
    },
    tree::{CollectionStyle, Content, Entry, Node, ScalarStyle},
};

/// s-l+block-node(n, c)
pub(in crate::grammar) fn block_node<'a>(
    binds: &Binds,
    cur: Cursor<'a>,
    n: Indent,
    c: Context,
) -> Step<'a, Node>
{
    alt!(
        block_in_block(binds, cur, n, c),
        flow_in_block(binds, cur, n)
    )
}

/// s-l+block-in-block(n, c): a block scalar or a block
/// collection
fn block_in_block<'a>(binds: &Binds, cur: Cursor<'a>, n: Indent, c: Context) -> Step<'a, Node>
{
    alt!(
        block_scalar_node(binds, cur, n, c),
        block_collection_node(binds, cur, n, c)
    )
}

/// s-l+flow-in-block(n): a flow node one level deeper than
/// the block structure, closed out by comments
fn flow_in_block<'a>(binds: &Binds, cur: Cursor<'a>, n: Indent) -> Step<'a, Node>
{
    let ((), cur) = separate(cur, n + 1, Context::FlowOut)?;
    let (node, cur) = flow_node(binds, cur, n + 1, Context::FlowOut)?;

    // The node parsed; anything left on the line that is
    // not a comment can belong to nothing else
    let ((), cur) = sl_comments(cur)
        .map_err(|fault| Fault::abort_at(Code::TrailingContent, fault.diagnostic().position))?;

    Ok((node, cur))
}

/// s-l+block-scalar(n, c): separation, optional node
/// properties, then a literal or folded scalar
fn block_scalar_node<'a>(binds: &Binds, cur: Cursor<'a>, n: Indent, c: Context)
    -> Step<'a, Node>
{
    let ((), cur) = separate(cur, n + 1, c)?;

    let (property, cur) = match properties(cur, n + 1, c, binds)
    {
        Ok((property, next)) =>
        {
            let ((), next) = separate(next, n + 1, c)?;

            (Some(property), next)
        },
        Err(abort @ Fault::Abort(_)) => return Err(abort),
        Err(_) => (None, cur),
    };

    let fold = match cur.peek()
    {
        Some('|') => false,
        Some('>') => true,
        _ => return Err(Fault::miss(Code::InvalidBlockScalar, &cur)),
    };

    let (value, cur) = block_scalar(cur, n, fold)?;

    let style = match fold
    {
        true => ScalarStyle::Folded,
        false => ScalarStyle::Literal,
    };

    let mut node = Node::scalar(value, style);
    node.property = property;

    Ok((node, cur))
}

/// s-l+block-collection(n, c): optional properties on the
/// introducing line, then a sequence or mapping on the
/// following lines
fn block_collection_node<'a>(
    binds: &Binds,
    cur: Cursor<'a>,
    n: Indent,
    c: Context,
) -> Step<'a, Node>
{
    let (property, cur) = match separate(cur, n + 1, c)
        .and_then(|((), next)| properties(next, n + 1, c, binds))
    {
        Ok((property, next)) => (Some(property), next),
        Err(abort @ Fault::Abort(_)) => return Err(abort),
        Err(_) => (None, cur),
    };

    let ((), cur) = sl_comments(cur)?;

    let (mut node, cur) = alt!(
        block_sequence(binds, cur, seq_spaces(n, c)),
        block_mapping(binds, cur, n)
    )?;

    node.property = property;

    Ok((node, cur))
}

/// Does the cursor sit on a '-' that introduces a sequence
/// entry (as opposed to one opening a plain scalar)?
fn at_block_entry(cur: &Cursor<'_>) -> bool
{
    cur.peek() == Some('-')
        && match cur.peek_at(1)
        {
            None => true,
            Some(next) => chars::is_white(next) || chars::is_break(next),
        }
}

/// l+block-sequence(n): detect the entry column, then
/// collect entries
fn block_sequence<'a>(binds: &Binds, cur: Cursor<'a>, n: Indent) -> Step<'a, Node>
{
    let (col, at) = next_content_line(cur)?;

    if !(n < col) || !at_block_entry(&at)
    {
        return Err(Fault::miss(Code::InvalidIndentation, &cur));
    }

    sequence_entries(binds, at, col)
}

/// The entry loop, starting from the first '-' at .col
fn sequence_entries<'a>(binds: &Binds, at: Cursor<'a>, col: usize) -> Step<'a, Node>
{
    let mut at = at;
    let mut entries = Vec::new();

    loop
    {
        // Past the '-'
        let (node, next) = block_indented(binds, at.bump(), col, Context::BlockIn)?;

        entries.push(node);

        // The entry consumed through its own line(s); find
        // the next entry at exactly our column
        match next_content_line(next)
        {
            Ok((c, content)) if c == col && at_block_entry(&content) => at = content,
            Err(abort @ Fault::Abort(_)) => return Err(abort),
            _ =>
            {
                return Ok((
                    Node {
                        property: None,
                        content:  Content::Sequence(entries, CollectionStyle::Block),
                    },
                    next,
                ))
            },
        }
    }
}

/// l+block-mapping(n): detect the entry column, then
/// collect entries
fn block_mapping<'a>(binds: &Binds, cur: Cursor<'a>, n: Indent) -> Step<'a, Node>
{
    let (col, at) = next_content_line(cur)?;

    if !(n < col)
    {
        return Err(Fault::miss(Code::InvalidIndentation, &cur));
    }

    mapping_entries(binds, at, col)
}

/// The entry loop, starting from the first key at .col
fn mapping_entries<'a>(binds: &Binds, at: Cursor<'a>, col: usize) -> Step<'a, Node>
{
    let mut at = at;
    let mut entries = Vec::new();

    loop
    {
        match map_entry(binds, at, col)
        {
            Ok((entry, next)) =>
            {
                entries.push(entry);

                match next_content_line(next)
                {
                    Ok((c, content)) if c == col && !content.at_document_marker() =>
                    {
                        at = content
                    },
                    Err(abort @ Fault::Abort(_)) => return Err(abort),
                    _ =>
                    {
                        return Ok((
                            Node {
                                property: None,
                                content:  Content::Mapping(entries, CollectionStyle::Block),
                            },
                            next,
                        ))
                    },
                }
            },
            Err(abort @ Fault::Abort(_)) => return Err(abort),
            Err(miss) => match entries.is_empty()
            {
                true => return Err(miss),
                // A non-entry at our column: the mapping is
                // over, somebody else's problem now
                false =>
                {
                    return Err(Fault::abort(Code::TrailingContent, &at))
                },
            },
        }
    }
}

/// ns-l-block-map-entry(n): explicit or implicit
fn map_entry<'a>(binds: &Binds, at: Cursor<'a>, col: usize) -> Step<'a, Entry>
{
    alt!(
        explicit_map_entry(binds, at, col),
        implicit_map_entry(binds, at, col)
    )
}

/// c-l-block-map-explicit-entry(n): '?' key, optionally
/// followed by an ':' value line at the same column
fn explicit_map_entry<'a>(binds: &Binds, at: Cursor<'a>, col: usize) -> Step<'a, Entry>
{
    let cur = match at.eat_char('?')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::InvalidIndentation, &at)),
    };

    // '?' not followed by separation is a plain scalar's
    // problem
    if !matches!(cur.peek(), None | Some(' ') | Some('\t') | Some('\r') | Some('\n'))
    {
        return Err(Fault::miss(Code::InvalidIndentation, &at));
    }

    let (key, cur) = block_indented(binds, cur, col, Context::BlockOut)?;

    let value = indent_exact(cur, col)
        .and_then(|((), next)| match next.eat_char(':')
        {
            Some(past) => block_indented(binds, past, col, Context::BlockOut),
            None => Err(Fault::miss(Code::InvalidIndentation, &next)),
        });

    match value
    {
        Ok((value, next)) => Ok((Entry { key, value }, next)),
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => Ok((
            Entry {
                key,
                value: Node::empty(),
            },
            cur,
        )),
    }
}

/// ns-l-block-map-implicit-entry(n): a single line key (or
/// nothing) and its ':' value
fn implicit_map_entry<'a>(binds: &Binds, at: Cursor<'a>, col: usize) -> Step<'a, Entry>
{
    let key_probe = alt!(
        json_key(binds, at, Context::BlockKey),
        yaml_key(binds, at, Context::BlockKey)
    );

    let (key, cur) = match key_probe
    {
        Ok((key, key_end)) =>
        {
            let (_, next) = opt!(key_end, separate_in_line(key_end))?;

            let next = match next.eat_char(':')
            {
                Some(past) => past,
                None => return Err(Fault::miss(Code::InvalidIndentation, &next)),
            };

            check_key_span(&at, &key_end)?;

            (key, next)
        },
        Err(abort @ Fault::Abort(_)) => return Err(abort),

        // No key at all: an empty key entry, if the ':' is
        // there
        Err(_) => match at.eat_char(':')
        {
            Some(past) => (Node::empty(), past),
            None => return Err(Fault::miss(Code::InvalidIndentation, &at)),
        },
    };

    // c-l-block-map-implicit-value(n)
    let value = block_node(binds, cur, Indent::new(col), Context::BlockOut);

    match value
    {
        Ok((value, next)) => Ok((Entry { key, value }, next)),
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => match sl_comments(cur)
        {
            Ok(((), next)) => Ok((
                Entry {
                    key,
                    value: Node::empty(),
                },
                next,
            )),
            Err(fault) => Err(Fault::abort_at(
                Code::TrailingContent,
                fault.diagnostic().position,
            )),
        },
    }
}

/// s-l+block-indented(n, c): what may follow a '-', '?' or
/// explicit-value ':' indicator. Either a compact
/// collection on the same line, a full block node, or
/// nothing
pub(in crate::grammar) fn block_indented<'a>(
    binds: &Binds,
    cur: Cursor<'a>,
    col: usize,
    c: Context,
) -> Step<'a, Node>
{
    // Compact forms: the indicator's own width plus any
    // further spaces count as indentation
    let (m, at) = space_run(cur);

    if m > 0
    {
        if at_block_entry(&at)
        {
            return sequence_entries(binds, at, at.column());
        }

        match mapping_entries(binds, at, at.column())
        {
            Ok(done) => return Ok(done),
            Err(abort @ Fault::Abort(_)) => return Err(abort),
            Err(_) => (),
        }
    }

    match block_node(binds, cur, Indent::new(col), c)
    {
        Ok(done) => Ok(done),
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => match sl_comments(cur)
        {
            Ok(((), next)) => Ok((Node::empty(), next)),
            Err(fault) => Err(Fault::abort_at(
                Code::TrailingContent,
                fault.diagnostic().position,
            )),
        },
    }
}
