/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Flow collections and flow nodes.
//!
//! One wrinkle worth spelling out: everything in here can
//! be evaluated while probing an implicit key, and in the
//! key contexts a malformed collection must Miss rather
//! than Abort, because the same characters will be parsed
//! again as an ordinary flow node which either succeeds or
//! produces the error at full fidelity. Outside the key
//! contexts a broken collection is committed and aborts.
//!
//! The other wrinkle is implicit key ordering: JSON-like
//! keys must be probed before YAML keys, as a property
//! followed by a quoted scalar would otherwise be eaten by
//! the yaml path's empty-scalar fallback.

use crate::{
    grammar::{
        context::Context,
        cursor::Cursor,
        error::{Code, Fault, Step},
        props::{alias, properties, Binds},
        scalar::{
            flow::{double_quoted, single_quoted},
            plain::{plain, plain_safe},
        },
        white::{separate, separate_in_line},
    },
    tree::{CollectionStyle, Content, Entry, Node, ScalarStyle},
};

/// The hard limit on the length of an implicit key, in
/// code points
pub(in crate::grammar) const KEY_LIMIT: usize = 1024;

/// Enforce the implicit key bound over a parsed key's
/// source span. Only called once the ':' is found, i.e
/// once the key interpretation is the only one possible
pub(in crate::grammar) fn check_key_span(start: &Cursor<'_>, end: &Cursor<'_>)
    -> Result<(), Fault>
{
    match start.chars_between(end) > KEY_LIMIT
    {
        true => Err(Fault::abort_at(Code::KeyOverflow, start.pos())),
        false => Ok(()),
    }
}

/// ns-flow-node(n, c): alias, content, or properties with
/// optional content
pub(in crate::grammar) fn flow_node<'a>(
    binds: &Binds,
    cur: Cursor<'a>,
    n: usize,
    c: Context,
) -> Step<'a, Node>
{
    alt!(
        alias(cur).map(|(name, next)| {
            (
                Node {
                    property: None,
                    content:  Content::Alias(name),
                },
                next,
            )
        }),
        propertied_node(binds, cur, n, c),
        flow_content(binds, cur, n, c)
    )
}

/// c-ns-properties(n, c) followed by separated content, or
/// by nothing, which is an empty scalar carrying the
/// properties
fn propertied_node<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    let (property, cur) = properties(cur, n, c, binds)?;

    let content = separate(cur, n, c).and_then(|((), next)| flow_content(binds, next, n, c));

    match content
    {
        Ok((mut node, next)) =>
        {
            node.property = Some(property);

            Ok((node, next))
        },
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => Ok((
            Node {
                property: Some(property),
                content:  Content::Empty,
            },
            cur,
        )),
    }
}

/// ns-flow-content(n, c): plain scalar or JSON-like content
fn flow_content<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    alt!(
        flow_json_content(binds, cur, n, c),
        plain(cur, n, c).map(|(value, next)| (Node::scalar(value, ScalarStyle::Plain), next))
    )
}

/// c-flow-json-content(n, c): flow collections and quoted
/// scalars
fn flow_json_content<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context)
    -> Step<'a, Node>
{
    match cur.peek()
    {
        Some('[') => flow_sequence(binds, cur, n, c),
        Some('{') => flow_mapping(binds, cur, n, c),
        Some('"') => double_quoted(cur, n, c)
            .map(|(value, next)| (Node::scalar(value, ScalarStyle::DoubleQuoted), next)),
        Some('\'') => single_quoted(cur, n, c)
            .map(|(value, next)| (Node::scalar(value, ScalarStyle::SingleQuoted), next)),
        _ => Err(Fault::miss(Code::InvalidFlowScalar, &cur)),
    }
}

/// ns-flow-yaml-node(n, c): like ns-flow-node but content
/// restricted to plain scalars; used for mapping keys
fn flow_yaml_node<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    alt!(
        alias(cur).map(|(name, next)| {
            (
                Node {
                    property: None,
                    content:  Content::Alias(name),
                },
                next,
            )
        }),
        propertied_yaml_node(binds, cur, n, c),
        plain(cur, n, c).map(|(value, next)| (Node::scalar(value, ScalarStyle::Plain), next))
    )
}

fn propertied_yaml_node<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context)
    -> Step<'a, Node>
{
    let (property, cur) = properties(cur, n, c, binds)?;

    let content = separate(cur, n, c).and_then(|((), next)| plain(next, n, c));

    match content
    {
        Ok((value, next)) =>
        {
            let mut node = Node::scalar(value, ScalarStyle::Plain);
            node.property = Some(property);

            Ok((node, next))
        },
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => Ok((
            Node {
                property: Some(property),
                content:  Content::Empty,
            },
            cur,
        )),
    }
}

/// c-flow-json-node(n, c): optionally propertied JSON-like
/// content. No empty fallback here; properties without
/// JSON content are not a JSON node
fn flow_json_node<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    match properties(cur, n, c, binds)
    {
        Ok((property, next)) =>
        {
            let ((), next) = separate(next, n, c)?;
            let (mut node, next) = flow_json_content(binds, next, n, c)?;

            node.property = Some(property);

            Ok((node, next))
        },
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => flow_json_content(binds, cur, n, c),
    }
}

/// ns-s-implicit-yaml-key / c-s-implicit-json-key: single
/// line keys with optional trailing in-line separation
pub(in crate::grammar) fn implicit_yaml_key<'a>(binds: &Binds, cur: Cursor<'a>, key: Context) -> Step<'a, Node>
{
    flow_yaml_node(binds, cur, 0, key)
}

pub(in crate::grammar) fn implicit_json_key<'a>(binds: &Binds, cur: Cursor<'a>, key: Context) -> Step<'a, Node>
{
    flow_json_node(binds, cur, 0, key)
}

pub(in crate::grammar) use self::{implicit_json_key as json_key, implicit_yaml_key as yaml_key};

/// c-flow-sequence(n, c): '[' entries ']'
pub(in crate::grammar) fn flow_sequence<'a>(
    binds: &Binds,
    cur: Cursor<'a>,
    n: usize,
    c: Context,
) -> Step<'a, Node>
{
    let inner = c.in_flow();

    let fail = |code: Code, at: &Cursor<'_>| match inner.is_key()
    {
        true => Fault::miss(code, at),
        false => Fault::abort(code, at),
    };

    let mut cur = match cur.eat_char('[')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::MissingFlowSequenceEntryOrEnd, &cur)),
    };

    let (_, next) = opt!(cur, separate(cur, n, c))?;
    cur = next;

    let mut entries = Vec::new();

    loop
    {
        match cur.peek()
        {
            None => return Err(fail(Code::UnexpectedEOF, &cur)),
            Some(']') =>
            {
                return Ok((
                    Node {
                        property: None,
                        content:  Content::Sequence(entries, CollectionStyle::Flow),
                    },
                    cur.bump(),
                ))
            },
            Some(_) => match seq_entry(binds, cur, n, inner)
            {
                Ok((node, next)) =>
                {
                    entries.push(node);
                    cur = next;
                },
                Err(abort @ Fault::Abort(_)) => return Err(abort),
                Err(_) =>
                {
                    return Err(fail(Code::MissingFlowSequenceEntryOrEnd, &cur))
                },
            },
        }

        let (_, next) = opt!(cur, separate(cur, n, inner))?;
        cur = next;

        match cur.peek()
        {
            Some(',') =>
            {
                cur = cur.bump();

                let (_, next) = opt!(cur, separate(cur, n, inner))?;
                cur = next;
            },
            Some(']') => (),
            None => return Err(fail(Code::UnexpectedEOF, &cur)),
            Some(_) => return Err(fail(Code::MissingFlowSequenceEntryOrEnd, &cur)),
        }
    }
}

/// ns-flow-seq-entry(n, c): a single pair, or any flow node
fn seq_entry<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    alt!(
        flow_pair(binds, cur, n, c),
        flow_node(binds, cur, n, c)
    )
}

/// ns-flow-pair(n, c): a single key value pair appearing
/// directly as a sequence entry, yielding a one entry flow
/// mapping
fn flow_pair<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    let pair = |entry: Entry, next: Cursor<'a>| {
        Ok((
            Node {
                property: None,
                content:  Content::Mapping(vec![entry], CollectionStyle::Flow),
            },
            next,
        ))
    };

    // Explicit single pair: '?' separated entry
    if let Some(next) = cur.eat_char('?')
    {
        let ((), next) = separate(next, n, c)?;

        let (entry, next) = match map_implicit_entry(binds, next, n, c)
        {
            Ok(done) => done,
            Err(abort @ Fault::Abort(_)) => return Err(abort),
            Err(_) => (
                Entry {
                    key:   Node::empty(),
                    value: Node::empty(),
                },
                next,
            ),
        };

        return pair(entry, next);
    }

    let key_start = cur;

    // JSON-like key, probed before the yaml flavour (see
    // the module docs)
    let json = implicit_json_key(binds, cur, Context::FlowKey).and_then(|(key, next)| {
        let (_, next) = opt!(next, separate_in_line(next))?;
        let key_end = next;

        let (value, next) = adjacent_value(binds, next, n, c)?;

        check_key_span(&key_start, &key_end)?;

        Ok((Entry { key, value }, next))
    });

    match json
    {
        Ok((entry, next)) => return pair(entry, next),
        Err(abort @ Fault::Abort(_)) => return Err(abort),
        Err(_) => (),
    }

    // YAML plain key
    let yaml = implicit_yaml_key(binds, cur, Context::FlowKey).and_then(|(key, next)| {
        let (_, next) = opt!(next, separate_in_line(next))?;
        let key_end = next;

        let (value, next) = separate_value(binds, next, n, c)?;

        check_key_span(&key_start, &key_end)?;

        Ok((Entry { key, value }, next))
    });

    match yaml
    {
        Ok((entry, next)) => return pair(entry, next),
        Err(abort @ Fault::Abort(_)) => return Err(abort),
        Err(_) => (),
    }

    // Empty key: a bare ':' value
    let (value, next) = separate_value(binds, cur, n, c)?;

    pair(
        Entry {
            key: Node::empty(),
            value,
        },
        next,
    )
}

/// c-flow-mapping(n, c): '{' entries '}'
pub(in crate::grammar) fn flow_mapping<'a>(
    binds: &Binds,
    cur: Cursor<'a>,
    n: usize,
    c: Context,
) -> Step<'a, Node>
{
    let inner = c.in_flow();

    let fail = |code: Code, at: &Cursor<'_>| match inner.is_key()
    {
        true => Fault::miss(code, at),
        false => Fault::abort(code, at),
    };

    let mut cur = match cur.eat_char('{')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::MissingFlowMappingEntryOrEnd, &cur)),
    };

    let (_, next) = opt!(cur, separate(cur, n, c))?;
    cur = next;

    let mut entries = Vec::new();

    loop
    {
        match cur.peek()
        {
            None => return Err(fail(Code::UnexpectedEOF, &cur)),
            Some('}') =>
            {
                return Ok((
                    Node {
                        property: None,
                        content:  Content::Mapping(entries, CollectionStyle::Flow),
                    },
                    cur.bump(),
                ))
            },
            Some(_) => match map_entry(binds, cur, n, inner)
            {
                Ok((entry, next)) =>
                {
                    entries.push(entry);
                    cur = next;
                },
                Err(abort @ Fault::Abort(_)) => return Err(abort),
                Err(_) =>
                {
                    return Err(fail(Code::MissingFlowMappingEntryOrEnd, &cur))
                },
            },
        }

        let (_, next) = opt!(cur, separate(cur, n, inner))?;
        cur = next;

        match cur.peek()
        {
            Some(',') =>
            {
                cur = cur.bump();

                let (_, next) = opt!(cur, separate(cur, n, inner))?;
                cur = next;
            },
            Some('}') => (),
            None => return Err(fail(Code::UnexpectedEOF, &cur)),
            Some(_) => return Err(fail(Code::MissingFlowMappingEntryOrEnd, &cur)),
        }
    }
}

/// ns-flow-map-entry(n, c): explicit ('?') or implicit
fn map_entry<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Entry>
{
    // Explicit entry. The '?' must be followed by
    // separation, else it opens a plain scalar
    if let Some(next) = cur.eat_char('?')
    {
        if let Ok(((), next)) = separate(next, n, c)
        {
            return match map_implicit_entry(binds, next, n, c)
            {
                Ok(done) => Ok(done),
                Err(abort @ Fault::Abort(_)) => Err(abort),
                Err(_) => Ok((
                    Entry {
                        key:   Node::empty(),
                        value: Node::empty(),
                    },
                    next,
                )),
            };
        }
    }

    map_implicit_entry(binds, cur, n, c)
}

/// ns-flow-map-implicit-entry(n, c). Keys inside an actual
/// flow mapping are full flow nodes; the single line and
/// 1024 restrictions belong to flow pairs and block
/// mappings, not here
fn map_implicit_entry<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context)
    -> Step<'a, Entry>
{
    // JSON-like key, probed first (see the module docs)
    let json = flow_json_node(binds, cur, n, c).and_then(|(key, next)| {
        let (_, next) = opt!(next, separate(next, n, c))?;
        let (value, next) = adjacent_value(binds, next, n, c)?;

        Ok((Entry { key, value }, next))
    });

    match json
    {
        Ok(done) => return Ok(done),
        Err(abort @ Fault::Abort(_)) => return Err(abort),
        Err(_) => (),
    }

    // YAML key, with or without a value
    let yaml = flow_yaml_node(binds, cur, n, c).and_then(|(key, key_end)| {
        let probe = opt!(key_end, separate(key_end, n, c))
            .and_then(|(_, next)| separate_value(binds, next, n, c));

        match probe
        {
            Ok((value, next)) => Ok((Entry { key, value }, next)),
            Err(abort @ Fault::Abort(_)) => Err(abort),
            Err(_) => Ok((
                Entry {
                    key,
                    value: Node::empty(),
                },
                key_end,
            )),
        }
    });

    match yaml
    {
        Ok(done) => return Ok(done),
        Err(abort @ Fault::Abort(_)) => return Err(abort),
        Err(_) => (),
    }

    // Empty key entry
    let (value, next) = separate_value(binds, cur, n, c)?;

    Ok((
        Entry {
            key: Node::empty(),
            value,
        },
        next,
    ))
}

/// c-ns-flow-map-separate-value(n, c): ':' that is not
/// gluing a plain scalar together, then an optional
/// separated value
fn separate_value<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    match cur.peek()
    {
        Some(':') => (),
        _ => return Err(Fault::miss(Code::MissingFlowMappingEntryOrEnd, &cur)),
    }

    // ':' followed by a plain safe character is plain
    // scalar content, not a value indicator
    if matches!(cur.peek_at(1), Some(after) if plain_safe(after, c))
    {
        return Err(Fault::miss(Code::MissingFlowMappingEntryOrEnd, &cur));
    }

    let cur = cur.bump();

    let value = separate(cur, n, c).and_then(|((), next)| flow_node(binds, next, n, c));

    match value
    {
        Ok(done) => Ok(done),
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => Ok((Node::empty(), cur)),
    }
}

/// c-ns-flow-map-adjacent-value(n, c): after a JSON-like
/// key the ':' may sit flush against both key and value
fn adjacent_value<'a>(binds: &Binds, cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, Node>
{
    let cur = match cur.eat_char(':')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::MissingFlowMappingEntryOrEnd, &cur)),
    };

    let value = opt!(cur, separate(cur, n, c))
        .and_then(|(_, next)| flow_node(binds, next, n, c));

    match value
    {
        Ok(done) => Ok(done),
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => Ok((Node::empty(), cur)),
    }
}
