/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use atoi::atoi;

use crate::{
    grammar::{
        chars,
        comment::sl_comments,
        cursor::Cursor,
        error::{Code, Fault, Step},
        white::white_run,
    },
    tree::{Directive, Position, WarningCode},
};

/// l-directive: scan one directive line. The cursor must
/// sit on a '%' in column 0.
///
/// YAML and TAG directives are understood; anything else
/// comes back as a Reserved directive together with the
/// warning the caller should attach (or promote, when
/// running pedantically). An unsupported YAML version also
/// produces a warning; the declared version is preserved
/// in the directive either way
pub(in crate::grammar) fn directive(
    cur: Cursor<'_>,
) -> Step<'_, (Directive, Option<(WarningCode, Position)>)>
{
    let start = cur;

    let cur = match cur.at_line_start()
    {
        true => match cur.eat_char('%')
        {
            Some(next) => next,
            None => return Err(Fault::miss(Code::UnknownDirective, &cur)),
        },
        false => return Err(Fault::miss(Code::UnknownDirective, &cur)),
    };

    // %YAML 1.2
    //  ^^^^
    let (name, cur) = ns_run(cur);

    if name.is_empty()
    {
        return Err(Fault::abort(Code::UnknownDirective, &start));
    }

    match name
    {
        "YAML" => yaml_directive(cur),
        "TAG" => tag_directive(cur),
        _ => reserved_directive(start, name, cur),
    }
}

fn yaml_directive(cur: Cursor<'_>) -> Step<'_, (Directive, Option<(WarningCode, Position)>)>
{
    // %YAML 1.2
    //      ^
    let (count, cur) = white_run(cur);

    if count == 0
    {
        return Err(Fault::abort(Code::MissingMajor, &cur));
    }

    let version_at = cur.pos();

    // %YAML 1.2
    //       ^
    let (major, cur) = scan_version_part(cur, Code::MissingMajor)?;

    // %YAML 1.2
    //        ^
    let cur = match cur.eat_char('.')
    {
        Some(next) => next,
        None => return Err(Fault::abort(Code::InvalidVersion, &cur)),
    };

    // %YAML 1.2
    //         ^
    let (minor, cur) = scan_version_part(cur, Code::MissingMinor)?;

    let ((), cur) = sl_comments(cur).map_err(Fault::commit)?;

    let warn = match (major, minor) > (1, 2)
    {
        true => Some((WarningCode::VersionUnsupported, version_at)),
        false => None,
    };

    Ok(((Directive::Yaml(major, minor), warn), cur))
}

fn scan_version_part<'a>(cur: Cursor<'a>, missing: Code) -> Step<'a, u32>
{
    let start = cur;
    let mut cur = cur;

    while matches!(cur.peek(), Some(d) if chars::is_dec_digit(d))
    {
        cur = cur.bump();
    }

    let digits = start.slice(&cur);

    if digits.is_empty()
    {
        return Err(Fault::abort(missing, &start));
    }

    match atoi::<u32>(digits.as_bytes())
    {
        Some(version) => Ok((version, cur)),
        None => Err(Fault::abort(Code::InvalidVersion, &start)),
    }
}

fn tag_directive(cur: Cursor<'_>) -> Step<'_, (Directive, Option<(WarningCode, Position)>)>
{
    // %TAG !named! tag:prefix # a comment
    //     ^
    let (count, cur) = white_run(cur);

    if count == 0
    {
        return Err(Fault::abort(Code::InvalidTagHandle, &cur));
    }

    // %TAG !named! tag:prefix # a comment
    //      ^^^^^^^
    let (handle, cur) = scan_handle(cur)?;

    // Check that there is >= 1 whitespace between handle
    // and prefix
    let (count, cur) = white_run(cur);

    if count == 0
    {
        return Err(Fault::abort(Code::InvalidTagPrefix, &cur));
    }

    // %TAG !named! tag:prefix # a comment
    //              ^^^^^^^^^^
    let (prefix, cur) = scan_prefix(cur)?;

    let ((), cur) = sl_comments(cur).map_err(Fault::commit)?;

    Ok((
        (
            Directive::Tag {
                handle: handle.to_owned(),
                prefix: prefix.to_owned(),
            },
            None,
        ),
        cur,
    ))
}

/// c-tag-handle: primary (!), secondary (!!) or named
/// (!word!)
fn scan_handle(cur: Cursor<'_>) -> Step<'_, &'_ str>
{
    let start = cur;

    let cur = match cur.eat_char('!')
    {
        Some(next) => next,
        None => return Err(Fault::abort(Code::InvalidTagHandle, &start)),
    };

    match cur.peek()
    {
        // Secondary
        Some('!') =>
        {
            let cur = cur.bump();

            Ok((start.slice(&cur), cur))
        },
        // Primary
        None => Ok((start.slice(&cur), cur)),
        Some(c) if chars::is_white(c) => Ok((start.slice(&cur), cur)),

        // Named, or nothing valid at all
        Some(_) =>
        {
            let mut cur = cur;

            while matches!(cur.peek(), Some(w) if chars::is_word_char(w))
            {
                cur = cur.bump();
            }

            match cur.eat_char('!')
            {
                Some(next) => Ok((start.slice(&next), next)),
                None => Err(Fault::abort(Code::InvalidTagHandle, &start)),
            }
        },
    }
}

/// ns-tag-prefix: a local prefix ('!' + uri characters) or
/// a global one (tag char + uri characters)
fn scan_prefix(cur: Cursor<'_>) -> Step<'_, &'_ str>
{
    let start = cur;

    let mut cur = match cur.peek()
    {
        Some('!') => cur.bump(),
        Some('%') => percent(cur)?,
        Some(c) if chars::is_tag_char(c) => cur.bump(),
        _ => return Err(Fault::abort(Code::InvalidTagPrefix, &start)),
    };

    loop
    {
        match cur.peek()
        {
            Some('%') => cur = percent(cur)?,
            Some(c) if chars::is_uri_char(c) => cur = cur.bump(),
            _ => break,
        }
    }

    match cur.peek()
    {
        None => Ok((start.slice(&cur), cur)),
        Some(c) if chars::is_white(c) || chars::is_break(c) => Ok((start.slice(&cur), cur)),
        _ => Err(Fault::abort(Code::InvalidTagPrefix, &cur)),
    }
}

fn percent(cur: Cursor<'_>) -> Result<Cursor<'_>, Fault>
{
    let hex = |c: Option<char>| matches!(c, Some(h) if chars::is_hex_digit(h));

    match hex(cur.peek_at(1)) && hex(cur.peek_at(2))
    {
        true => Ok(cur.skip(3)),
        false => Err(Fault::abort(Code::InvalidTagPrefix, &cur)),
    }
}

fn reserved_directive<'a>(
    start: Cursor<'a>,
    name: &str,
    cur: Cursor<'a>,
) -> Step<'a, (Directive, Option<(WarningCode, Position)>)>
{
    let mut cur = cur;
    let mut params = Vec::new();

    loop
    {
        let (count, next) = white_run(cur);

        match next.peek()
        {
            None | Some('#') => break,
            Some(b) if chars::is_break(b) => break,
            Some(_) =>
            {
                let (param, next) = ns_run(next);

                // Junk that is not an ns run; leave it for the
                // trailing comment check to reject
                if param.is_empty() || count == 0 && !params.is_empty()
                {
                    break;
                }

                params.push(param.to_owned());
                cur = next;
            },
        }
    }

    let ((), cur) = sl_comments(cur).map_err(Fault::commit)?;

    Ok((
        (
            Directive::Reserved {
                name: name.to_owned(),
                params,
            },
            Some((WarningCode::UnknownDirective, start.pos())),
        ),
        cur,
    ))
}

/// A run of ns characters, possibly empty
fn ns_run(cur: Cursor<'_>) -> (&'_ str, Cursor<'_>)
{
    let start = cur;
    let mut cur = cur;

    while matches!(cur.peek(), Some(c) if chars::is_ns_char(c))
    {
        cur = cur.bump();
    }

    (start.slice(&cur), cur)
}

#[cfg(test)]
mod tests
{
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;

    type TestResult = anyhow::Result<()>;

    #[test]
    fn yaml_version() -> TestResult
    {
        let ((dir, warn), next) =
            directive(Cursor::new("%YAML 1.2\n")).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(dir, Directive::Yaml(1, 2));
        assert_eq!(warn, None);
        assert!(next.at_line_start());

        Ok(())
    }

    #[test]
    fn yaml_version_newer_warns() -> TestResult
    {
        let ((dir, warn), _) =
            directive(Cursor::new("%YAML 1.3\n")).map_err(|e| anyhow!("{:?}", e))?;

        // The declared version is preserved, not rewritten
        assert_eq!(dir, Directive::Yaml(1, 3));
        assert_eq!(
            warn.map(|(code, _)| code),
            Some(WarningCode::VersionUnsupported)
        );

        Ok(())
    }

    #[test]
    fn yaml_version_older_is_silent() -> TestResult
    {
        let ((dir, warn), _) =
            directive(Cursor::new("%YAML 1.1\n")).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(dir, Directive::Yaml(1, 1));
        assert_eq!(warn, None);

        Ok(())
    }

    #[test]
    fn yaml_version_malformed()
    {
        let data = &["%YAML\n", "%YAML 1\n", "%YAML .2\n", "%YAML 1.\n", "%YAML x.y\n"];
        let expected = &[
            Code::MissingMajor,
            Code::InvalidVersion,
            Code::MissingMajor,
            Code::MissingMinor,
            Code::MissingMajor,
        ];

        for (i, (&t, &code)) in data.iter().zip(expected).enumerate()
        {
            match directive(Cursor::new(t))
            {
                Err(Fault::Abort(diag)) =>
                {
                    assert_eq!(diag.code, code, "on iteration {}", i)
                },
                other => panic!("on iteration {}, expected an abort, got {:?}", i, other),
            }
        }
    }

    #[test]
    fn tag_directive_handles() -> TestResult
    {
        let data = &[
            "%TAG ! !local-\n",
            "%TAG !! tag:example.com,2000:\n",
            "%TAG !e! tag:example.com,2000:app/\n",
        ];
        let expected = &[
            ("!", "!local-"),
            ("!!", "tag:example.com,2000:"),
            ("!e!", "tag:example.com,2000:app/"),
        ];

        for (i, (&t, &(h, p))) in data.iter().zip(expected).enumerate()
        {
            let ((dir, warn), _) = directive(Cursor::new(t))
                .map_err(|e| anyhow!("on iteration {}, test errored with {:?}", i, e))?;

            assert_eq!(
                dir,
                Directive::Tag {
                    handle: h.into(),
                    prefix: p.into()
                },
                "on iteration {}",
                i
            );
            assert_eq!(warn, None, "on iteration {}", i);
        }

        Ok(())
    }

    #[test]
    fn tag_directive_malformed()
    {
        let data = &["%TAG\n", "%TAG x tag:\n", "%TAG !e!\n", "%TAG ! bad prefix\n"];

        for (i, &t) in data.iter().enumerate()
        {
            match directive(Cursor::new(t))
            {
                Err(Fault::Abort(_)) => (),
                other => panic!("on iteration {}, expected an abort, got {:?}", i, other),
            }
        }
    }

    #[test]
    fn reserved_directive_warns() -> TestResult
    {
        let ((dir, warn), _) =
            directive(Cursor::new("%FOO bar baz # note\n")).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(
            dir,
            Directive::Reserved {
                name:   "FOO".into(),
                params: vec!["bar".into(), "baz".into()],
            }
        );
        assert_eq!(warn.map(|(code, _)| code), Some(WarningCode::UnknownDirective));

        Ok(())
    }

    #[test]
    fn directive_needs_column_zero()
    {
        let cur = Cursor::new(" %YAML 1.2\n").bump();

        match directive(cur)
        {
            Err(Fault::Miss(_)) => (),
            other => panic!("expected a miss, got {:?}", other),
        }
    }
}
