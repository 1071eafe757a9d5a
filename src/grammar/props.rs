/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the scanners for node properties
//! and alias names.
//!
//! A quick refresher on tag terminology. In YAML, a tag is
//! made out of several components:
//!
//! 1. handle
//! 2. prefix
//! 3. suffix
//!
//! ---
//! %TAG <handle> <prefix>
//! key: <handle><suffix> value
//! ...
//!
//! A handle is one of !, !! or !:alphanumeric:!, referred
//! to as primary, secondary and named respectively. A
//! prefix is bound to a handle by a %TAG directive, with
//! the primary and secondary handles carrying overridable
//! defaults ('!' and 'tag:yaml.org,2002:'). The suffix is
//! written on the node and concatenates with the resolved
//! prefix.
//!
//! The concatenation must come out as either a local tag
//! (leading '!') or an absolute uri; anything else is a
//! hard error, as is a named handle no %TAG directive ever
//! bound.

use crate::{
    grammar::{
        chars,
        context::Context,
        cursor::Cursor,
        error::{Code, Fault, Step},
        uri::{percent_decode, percent_encode},
        white::separate,
    },
    tree::{Property, Tag},
};

/// One handle -> prefix binding
#[derive(Debug, Clone)]
struct Bind
{
    handle:   String,
    prefix:   String,
    /// Came from a %TAG directive, as opposed to the
    /// built in defaults
    explicit: bool,
}

/// The handle -> prefix bindings of the current document
#[derive(Debug, Clone)]
pub(in crate::grammar) struct Binds
{
    entries: Vec<Bind>,
}

impl Binds
{
    const PRIMARY: &'static str = "!";
    const SECONDARY: &'static str = "!!";
    const SECONDARY_PREFIX: &'static str = "tag:yaml.org,2002:";

    /// The default bindings every document starts from
    pub fn with_defaults() -> Self
    {
        let default = |handle: &str, prefix: &str| Bind {
            handle:   handle.into(),
            prefix:   prefix.into(),
            explicit: false,
        };

        Self {
            entries: vec![
                default(Self::PRIMARY, Self::PRIMARY),
                default(Self::SECONDARY, Self::SECONDARY_PREFIX),
            ],
        }
    }

    /// Bind .handle to .prefix, returning false if the
    /// handle was already bound by an earlier %TAG
    /// directive. The newer binding wins either way
    pub fn bind(&mut self, handle: &str, prefix: &str) -> bool
    {
        match self.entries.iter_mut().find(|b| b.handle == handle)
        {
            Some(bind) =>
            {
                let fresh = !bind.explicit;

                bind.prefix = prefix.into();
                bind.explicit = true;

                fresh
            },
            None =>
            {
                self.entries.push(Bind {
                    handle:   handle.into(),
                    prefix:   prefix.into(),
                    explicit: true,
                });

                true
            },
        }
    }

    pub fn lookup(&self, handle: &str) -> Option<&str>
    {
        self.entries
            .iter()
            .find(|b| b.handle == handle)
            .map(|b| b.prefix.as_str())
    }
}

/// c-ns-properties(n, c): a tag and/or an anchor, in either
/// order
pub(in crate::grammar) fn properties<'a>(
    cur: Cursor<'a>,
    n: usize,
    c: Context,
    binds: &Binds,
) -> Step<'a, Property>
{
    match cur.peek()
    {
        Some('!') =>
        {
            let (tag, cur) = tag_property(cur, binds)?;

            let second = separate(cur, n, c).and_then(|((), next)| anchor_property(next));

            match second
            {
                Ok((anchor, cur)) => Ok((
                    Property {
                        anchor: Some(anchor),
                        tag:    Some(tag),
                    },
                    cur,
                )),
                Err(abort @ Fault::Abort(_)) => Err(abort),
                Err(_) => Ok((
                    Property {
                        anchor: None,
                        tag:    Some(tag),
                    },
                    cur,
                )),
            }
        },
        Some('&') =>
        {
            let (anchor, cur) = anchor_property(cur)?;

            let second = separate(cur, n, c).and_then(|((), next)| tag_property(next, binds));

            match second
            {
                Ok((tag, cur)) => Ok((
                    Property {
                        anchor: Some(anchor),
                        tag:    Some(tag),
                    },
                    cur,
                )),
                Err(abort @ Fault::Abort(_)) => Err(abort),
                Err(_) => Ok((
                    Property {
                        anchor: Some(anchor),
                        tag:    None,
                    },
                    cur,
                )),
            }
        },
        _ => Err(Fault::miss(Code::InvalidTagHandle, &cur)),
    }
}

/// c-ns-anchor-property: '&' followed by an anchor name
pub(in crate::grammar) fn anchor_property(cur: Cursor<'_>) -> Step<'_, String>
{
    let cur = match cur.eat_char('&')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::InvalidAnchorName, &cur)),
    };

    anchor_name(cur)
}

/// c-ns-alias-node: '*' followed by the name of a
/// (hopefully) previously anchored node
pub(in crate::grammar) fn alias(cur: Cursor<'_>) -> Step<'_, String>
{
    let cur = match cur.eat_char('*')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::InvalidAnchorName, &cur)),
    };

    anchor_name(cur)
}

/// ns-anchor-name: one or more anchor characters. The
/// leading indicator is already consumed, so an empty name
/// is a hard error
fn anchor_name(cur: Cursor<'_>) -> Step<'_, String>
{
    let start = cur;
    let mut cur = cur;

    while matches!(cur.peek(), Some(ch) if chars::is_anchor_char(ch))
    {
        cur = cur.bump();
    }

    match start.pos().offset == cur.pos().offset
    {
        true => Err(Fault::abort(Code::InvalidAnchorName, &start)),
        false => Ok((start.slice(&cur).to_owned(), cur)),
    }
}

/// c-ns-tag-property: verbatim (!<...>), shorthand
/// (handle + suffix) or non specific (a lone !)
pub(in crate::grammar) fn tag_property<'a>(cur: Cursor<'a>, binds: &Binds) -> Step<'a, Tag>
{
    if !matches!(cur.peek(), Some('!'))
    {
        return Err(Fault::miss(Code::InvalidTagHandle, &cur));
    }

    match cur.peek_at(1)
    {
        Some('<') => verbatim_tag(cur),
        _ => shorthand_tag(cur, binds),
    }
}

/// c-verbatim-tag: !<uri>, used exactly as written
fn verbatim_tag(cur: Cursor<'_>) -> Step<'_, Tag>
{
    let start = cur;

    // Past the '!<'
    let mut cur = cur.skip(2);
    let content = cur;

    loop
    {
        match cur.peek()
        {
            Some('>') => break,
            Some('%') => cur = percent_run(cur, Code::InvalidVerbatimTag)?,
            Some(ch) if chars::is_uri_char(ch) => cur = cur.bump(),
            _ => return Err(Fault::abort(Code::InvalidVerbatimTag, &cur)),
        }
    }

    let uri = content.slice(&cur);

    if uri.is_empty()
    {
        return Err(Fault::abort(Code::InvalidVerbatimTag, &start));
    }

    if !uri.starts_with('!') && !is_absolute_uri(uri)
    {
        return Err(Fault::abort(Code::InvalidVerbatimTag, &start));
    }

    Ok((Tag::Verbatim(uri.to_owned()), cur.bump()))
}

/// c-ns-shorthand-tag / c-non-specific-tag: a handle and
/// its suffix, degrading to the non specific '!' when the
/// primary handle has no suffix at all
fn shorthand_tag<'a>(cur: Cursor<'a>, binds: &Binds) -> Step<'a, Tag>
{
    let start = cur;

    // Past the leading '!'
    let cur = cur.bump();

    let (handle, cur) = match cur.peek()
    {
        // Secondary handle
        Some('!') => ("!!", cur.bump()),
        _ =>
        {
            // A named handle is a word run closed by '!';
            // anything else leaves the primary handle and the
            // run is part of the suffix
            let mut probe = cur;

            while matches!(probe.peek(), Some(ch) if chars::is_word_char(ch))
            {
                probe = probe.bump();
            }

            match (probe.peek(), probe.pos().offset > cur.pos().offset)
            {
                (Some('!'), true) => (start.slice(&probe.bump()), probe.bump()),
                _ => ("!", cur),
            }
        },
    };

    let suffix_start = cur;
    let mut cur = cur;

    loop
    {
        match cur.peek()
        {
            Some('%') => cur = percent_run(cur, Code::InvalidTagSuffix)?,
            Some(ch) if chars::is_tag_char(ch) => cur = cur.bump(),
            _ => break,
        }
    }

    let suffix = suffix_start.slice(&cur);

    if suffix.is_empty()
    {
        return match handle
        {
            // A lone '!' disables resolution for the node
            "!" => Ok((Tag::NonSpecific, cur)),
            _ => Err(Fault::abort(Code::InvalidTagSuffix, &cur)),
        };
    }

    let prefix = match binds.lookup(handle)
    {
        Some(prefix) => prefix,
        None => return Err(Fault::abort(Code::UndefinedTagHandle, &start)),
    };

    let resolved = format!("{}{}", prefix, suffix);

    if !resolved.starts_with('!') && !is_valid_global(&resolved)
    {
        return Err(Fault::abort(Code::InvalidTagSuffix, &start));
    }

    Ok((
        Tag::Shorthand {
            handle: handle.to_owned(),
            suffix: suffix.to_owned(),
        },
        cur,
    ))
}

/// A %HH run; the two digits are mandatory
fn percent_run<'a>(cur: Cursor<'a>, code: Code) -> Result<Cursor<'a>, Fault>
{
    let hex = |c: Option<char>| matches!(c, Some(h) if chars::is_hex_digit(h));

    match hex(cur.peek_at(1)) && hex(cur.peek_at(2))
    {
        true => Ok(cur.skip(3)),
        false => Err(Fault::abort(code, &cur)),
    }
}

/// Validate a resolved global tag: decode its percent
/// escapes, re-encode into normal form and check the
/// result is an absolute uri
fn is_valid_global(resolved: &str) -> bool
{
    let mut scratch = Vec::new();

    if percent_decode(resolved, &mut scratch).is_err()
    {
        return false;
    }

    let decoded = match String::from_utf8(scratch)
    {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };

    let mut normal = Vec::new();
    percent_encode(&decoded, &mut normal);

    match std::str::from_utf8(&normal)
    {
        Ok(normal) => is_absolute_uri(normal),
        Err(_) => false,
    }
}

/// scheme ':' hier-part, with the scheme as RFC 2396 wants
/// it: a letter followed by letters, digits and '+-.'
fn is_absolute_uri(uri: &str) -> bool
{
    let (scheme, rest) = match uri.split_once(':')
    {
        Some(split) => split,
        None => return false,
    };

    let scheme_ok = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    scheme_ok && !rest.is_empty()
}
