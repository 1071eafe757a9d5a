/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Scanners for the two quoted flow scalar styles.
//!
//! Both may span lines in flow-in and flow-out contexts,
//! with interior breaks folded; in the key contexts they
//! are strictly single line, and a break is a Miss so that
//! key probes can fall back to other interpretations.
//!
//! Trailing white before a folded break is dropped. The
//! one exception is double quoted line continuation (a
//! backslash immediately before the break), which keeps
//! the white and suppresses the break entirely.

use crate::grammar::{
    chars,
    context::Context,
    cursor::Cursor,
    error::{Code, Fault, Step},
    fold::{empty_line, folded},
    scalar::escape::unescape,
    white::flow_line_prefix,
};

/// c-double-quoted(n, c): scan a double quoted scalar,
/// returning its normalized content
pub(in crate::grammar) fn double_quoted<'a>(
    cur: Cursor<'a>,
    n: usize,
    c: Context,
) -> Step<'a, String>
{
    let start = cur;

    let mut cur = match cur.eat_char('"')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::InvalidFlowScalar, &cur)),
    };

    let mut out = String::new();

    // Start of the trailing white run in .out, if the last
    // pushed character was white. Folding discards that run
    let mut white_mark: Option<usize> = None;

    loop
    {
        if cur.at_line_start() && cur.at_document_marker()
        {
            return Err(Fault::abort_detailed(
                Code::UnterminatedScalar,
                &cur,
                "document marker inside a double quoted scalar".into(),
            ));
        }

        match cur.peek()
        {
            None => match c.is_key()
            {
                true => return Err(Fault::miss(Code::UnterminatedScalar, &start)),
                false => return Err(Fault::abort(Code::UnterminatedScalar, &start)),
            },

            Some('"') => return Ok((out, cur.bump())),

            // Escaped break: line continuation. Keeps any
            // pending white, suppresses the break
            Some('\\') if matches!(cur.peek_at(1), Some(b) if chars::is_break(b)) =>
            {
                if c.is_key()
                {
                    return Err(Fault::miss(Code::InvalidFlowScalar, &cur));
                }

                white_mark = None;

                let broke = cur.bump().take_break().expect("a line break");
                let ((), next) = continuation(broke, n, &mut out)?;

                cur = next;
            },

            Some('\\') =>
            {
                let ((), next) = unescape(cur, &mut out)?;

                white_mark = None;
                cur = next;
            },

            Some(b) if chars::is_break(b) =>
            {
                if c.is_key()
                {
                    return Err(Fault::miss(Code::InvalidFlowScalar, &cur));
                }

                if let Some(mark) = white_mark.take()
                {
                    out.truncate(mark);
                }

                let ((), next) = folded(cur, n, Context::FlowIn, &mut out)?;
                let ((), next) = flow_line_prefix(next, n).map_err(Fault::commit)?;

                cur = next;
            },

            Some(w) if chars::is_white(w) =>
            {
                white_mark.get_or_insert(out.len());

                out.push(w);
                cur = cur.bump();
            },

            Some(ch) if chars::is_nb_char(ch) =>
            {
                white_mark = None;

                out.push(ch);
                cur = cur.bump();
            },

            Some(_) => return Err(Fault::abort(Code::NonPrintable, &cur)),
        }
    }
}

/// s-double-escaped(n) after the suppressed break: empty
/// lines become line feeds, then the next line's prefix is
/// consumed
fn continuation<'a>(cur: Cursor<'a>, n: usize, out: &mut String) -> Step<'a, ()>
{
    let mut cur = cur;

    while let Ok(((), next)) = empty_line(cur, n, Context::FlowIn)
    {
        out.push('\n');
        cur = next;
    }

    flow_line_prefix(cur, n).map_err(Fault::commit)
}

/// c-single-quoted(n, c): scan a single quoted scalar. The
/// only escape is the doubled quote
pub(in crate::grammar) fn single_quoted<'a>(
    cur: Cursor<'a>,
    n: usize,
    c: Context,
) -> Step<'a, String>
{
    let start = cur;

    let mut cur = match cur.eat_char('\'')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::InvalidFlowScalar, &cur)),
    };

    let mut out = String::new();
    let mut white_mark: Option<usize> = None;

    loop
    {
        if cur.at_line_start() && cur.at_document_marker()
        {
            return Err(Fault::abort_detailed(
                Code::UnterminatedScalar,
                &cur,
                "document marker inside a single quoted scalar".into(),
            ));
        }

        match cur.peek()
        {
            None => match c.is_key()
            {
                true => return Err(Fault::miss(Code::UnterminatedScalar, &start)),
                false => return Err(Fault::abort(Code::UnterminatedScalar, &start)),
            },

            // '' is a quote, a lone ' ends the scalar
            Some('\'') => match cur.peek_at(1)
            {
                Some('\'') =>
                {
                    white_mark = None;

                    out.push('\'');
                    cur = cur.skip(2);
                },
                _ => return Ok((out, cur.bump())),
            },

            Some(b) if chars::is_break(b) =>
            {
                if c.is_key()
                {
                    return Err(Fault::miss(Code::InvalidFlowScalar, &cur));
                }

                if let Some(mark) = white_mark.take()
                {
                    out.truncate(mark);
                }

                let ((), next) = folded(cur, n, Context::FlowIn, &mut out)?;
                let ((), next) = flow_line_prefix(next, n).map_err(Fault::commit)?;

                cur = next;
            },

            Some(w) if chars::is_white(w) =>
            {
                white_mark.get_or_insert(out.len());

                out.push(w);
                cur = cur.bump();
            },

            Some(ch) if chars::is_nb_char(ch) =>
            {
                white_mark = None;

                out.push(ch);
                cur = cur.bump();
            },

            Some(_) => return Err(Fault::abort(Code::NonPrintable, &cur)),
        }
    }
}

#[cfg(test)]
mod tests
{
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;

    type TestResult = anyhow::Result<()>;

    #[test]
    fn double_simple() -> TestResult
    {
        let data = r#""hello world""#;

        let (value, next) = double_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "hello world");
        assert!(next.is_end());

        Ok(())
    }

    #[test]
    fn double_escapes_inline() -> TestResult
    {
        let data = r#""fun \n with \x41""#;

        let (value, _) = double_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "fun \n with A");

        Ok(())
    }

    #[test]
    fn double_folds_lines() -> TestResult
    {
        let data = "\"line0\n  line1\n\n  line3\"";

        let (value, _) = double_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "line0 line1\nline3");

        Ok(())
    }

    #[test]
    fn double_discards_trailing_white_on_fold() -> TestResult
    {
        let data = "\"drop   \n  kept\"";

        let (value, _) = double_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "drop kept");

        Ok(())
    }

    #[test]
    fn double_continuation_keeps_white() -> TestResult
    {
        let data = "\"kept  \\\n  next\"";

        let (value, _) = double_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "kept  next");

        Ok(())
    }

    #[test]
    fn double_unterminated()
    {
        let data = "\"no end";

        match double_quoted(Cursor::new(data), 0, Context::FlowOut)
        {
            Err(Fault::Abort(diag)) => assert_eq!(diag.code, Code::UnterminatedScalar),
            other => panic!("expected an abort, got {:?}", other),
        }
    }

    #[test]
    fn double_single_line_in_key_context()
    {
        let data = "\"a\nb\"";

        match double_quoted(Cursor::new(data), 0, Context::FlowKey)
        {
            Err(Fault::Miss(_)) => (),
            other => panic!("expected a miss, got {:?}", other),
        }
    }

    #[test]
    fn single_doubled_quote() -> TestResult
    {
        let data = "'it''s'";

        let (value, next) = single_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "it's");
        assert!(next.is_end());

        Ok(())
    }

    #[test]
    fn single_no_backslash_semantics() -> TestResult
    {
        let data = r#"'a \n b'"#;

        let (value, _) = single_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, r#"a \n b"#);

        Ok(())
    }

    #[test]
    fn single_folds_lines() -> TestResult
    {
        let data = "'line0\n            line1\n            \n            line3'";

        let (value, _) = single_quoted(Cursor::new(data), 0, Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "line0 line1\nline3");

        Ok(())
    }
}
