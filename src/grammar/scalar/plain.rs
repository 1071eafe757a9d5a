use crate::grammar::{
    chars,
    context::Context,
    cursor::Cursor,
    error::{Code, Fault, Step},
    fold::flow_folded,
    white::white_run,
};

/// ns-plain(n, c): scan a plain (unquoted) scalar,
/// returning its folded content.
///
/// Callable in flow-out, flow-in and the two key contexts;
/// the key contexts are restricted to a single line, the
/// flow contexts additionally forbid the flow indicators.
///
/// See:
///     YAML 1.2: Section 7.3.3
///     yaml.org/spec/1.2/spec.html#ns-plain-first(c)
pub(in crate::grammar) fn plain<'a>(cur: Cursor<'a>, n: usize, c: Context) -> Step<'a, String>
{
    // A plain scalar can never be a document marker line
    if cur.at_document_marker()
    {
        return Err(Fault::miss(Code::InvalidPlainScalar, &cur));
    }

    let mut cur = match cur.peek()
    {
        Some(ch) if chars::is_ns_char(ch) && !chars::is_indicator(ch) => cur,

        // An indicator from the '-?:' set may open a plain
        // scalar if what follows is immediately safe
        Some('-') | Some('?') | Some(':')
            if matches!(cur.peek_at(1), Some(next) if plain_safe(next, c)) =>
        {
            cur
        },

        _ => return Err(Fault::miss(Code::InvalidPlainScalar, &cur)),
    };

    let mut out = String::new();

    loop
    {
        cur = scan_segment(cur, c, &mut out)?;

        if c.is_key()
        {
            break;
        }

        // Multi line: fold onto the next line if it holds a
        // valid continuation character
        let mark = out.len();

        let next = match flow_folded(cur, n, &mut out)
        {
            Ok(((), next)) => next,
            Err(Fault::Abort(diag)) => return Err(Fault::Abort(diag)),
            Err(_) => break,
        };

        let continues = !next.at_document_marker()
            && match next.peek()
            {
                Some('#') => false,
                Some(':') => matches!(next.peek_at(1), Some(after) if plain_safe(after, c)),
                Some(ch) => plain_safe(ch, c),
                None => false,
            };

        match continues
        {
            true => cur = next,
            false =>
            {
                out.truncate(mark);

                break;
            },
        }
    }

    Ok((out, cur))
}

/// One line's worth of plain content. Trailing white is
/// never consumed; the cursor stops before it so enclosing
/// productions (separation, comments) see it intact
fn scan_segment<'a>(cur: Cursor<'a>, c: Context, out: &mut String)
    -> Result<Cursor<'a>, Fault>
{
    let mut cur = cur;

    loop
    {
        match cur.peek()
        {
            None => break,

            Some(b) if chars::is_break(b) => break,

            Some(w) if chars::is_white(w) =>
            {
                let (_, after) = white_run(cur);

                let continues = match after.peek()
                {
                    // ' #' starts a comment, ending the scalar
                    Some('#') | None => false,
                    Some(b) if chars::is_break(b) => false,
                    Some(':') =>
                    {
                        matches!(after.peek_at(1), Some(next) if plain_safe(next, c))
                    },
                    Some(ch) => plain_safe(ch, c),
                };

                match continues
                {
                    true =>
                    {
                        out.push_str(cur.slice(&after));
                        cur = after;
                    },
                    false => break,
                }
            },

            Some(':') => match cur.peek_at(1)
            {
                // ': ' would start a mapping value; the colon
                // stays unconsumed
                Some(next) if plain_safe(next, c) =>
                {
                    out.push(':');
                    cur = cur.bump();
                },
                _ => break,
            },

            Some(ch) if plain_safe(ch, c) =>
            {
                out.push(ch);
                cur = cur.bump();
            },

            Some(ch) if !chars::is_printable(ch) =>
            {
                return Err(Fault::abort(Code::NonPrintable, &cur))
            },

            // A flow indicator in a flow context, or some
            // other delimiter
            Some(_) => break,
        }
    }

    Ok(cur)
}

/// ns-plain-safe(c): which characters may appear in plain
/// content for the given context
pub(in crate::grammar) fn plain_safe(ch: char, c: Context) -> bool
{
    match c.excludes_flow_indicators()
    {
        true => !chars::is_flow_indicator(ch) && chars::is_ns_char(ch),
        false => chars::is_ns_char(ch),
    }
}

#[cfg(test)]
mod tests
{
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;

    type TestResult = anyhow::Result<()>;

    fn run(data: &str, c: Context) -> Step<'_, String>
    {
        plain(Cursor::new(data), 0, c)
    }

    #[test]
    fn plain_simple() -> TestResult
    {
        let (value, _) = run("hello from a plain scalar!", Context::FlowOut)
            .map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "hello from a plain scalar!");

        Ok(())
    }

    #[test]
    fn plain_stops_before_value_colon() -> TestResult
    {
        let (value, next) = run("key: value", Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "key");
        assert_eq!(next.peek(), Some(':'));

        Ok(())
    }

    #[test]
    fn plain_embedded_colon_continues() -> TestResult
    {
        let (value, _) = run("a:b:c", Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "a:b:c");

        Ok(())
    }

    #[test]
    fn plain_stops_before_comment() -> TestResult
    {
        let (value, next) = run("value # note", Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "value");
        assert_eq!(next.peek(), Some(' '));

        Ok(())
    }

    #[test]
    fn plain_leading_indicator_pairs() -> TestResult
    {
        for data in ["-value", "?value", ":value"]
        {
            let (value, _) = run(data, Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;

            assert_eq!(value, data);
        }

        Ok(())
    }

    #[test]
    fn plain_rejects_lone_indicators()
    {
        for data in ["- value", "? value", ": value", "#comment", "[a]"]
        {
            assert!(
                run(data, Context::FlowOut).is_err(),
                "{:?} must not start a plain scalar",
                data
            );
        }
    }

    #[test]
    fn plain_flow_context_stops_at_indicators() -> TestResult
    {
        let (value, next) = run("one,two", Context::FlowIn).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "one");
        assert_eq!(next.peek(), Some(','));

        // And the same content in flow-out is one token
        let (value, _) = run("one,two", Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;
        assert_eq!(value, "one,two");

        Ok(())
    }

    #[test]
    fn plain_multi_line_folds() -> TestResult
    {
        let data = "1st non-empty\n\n 2nd non-empty \n\t3rd non-empty";

        let (value, _) = run(data, Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "1st non-empty\n2nd non-empty 3rd non-empty");

        Ok(())
    }

    #[test]
    fn plain_single_line_in_key_context() -> TestResult
    {
        let data = "key\nmore";

        let (value, next) = run(data, Context::BlockKey).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "key");
        assert!(next.at_break());

        Ok(())
    }

    #[test]
    fn plain_stops_at_document_markers() -> TestResult
    {
        let data = "content\n--- next";

        let (value, next) = run(data, Context::FlowOut).map_err(|e| anyhow!("{:?}", e))?;

        assert_eq!(value, "content");
        assert!(next.at_break());

        Ok(())
    }
}
