//! This module exports the decoder for escape sequences in
//! double quoted scalars. YAML defines 18 special escapes,
//! plus 8, 16 and 32 bit code point escapes; nothing else
//! may follow a backslash, except a line break which is
//! line continuation and handled by the quoted scalar
//! scanner itself.

use crate::grammar::{
    cursor::Cursor,
    error::{Code, Fault, Step},
};

/// Decode the escape sequence at .cur (which must sit on
/// the backslash), appending the decoded character to .out
/// and returning the cursor past the sequence
pub(in crate::grammar) fn unescape<'a>(cur: Cursor<'a>, out: &mut String) -> Step<'a, ()>
{
    let start = cur;

    let cur = match cur.eat_char('\\')
    {
        Some(next) => next,
        None => return Err(Fault::miss(Code::UnknownEscape, &cur)),
    };

    // See 5.7: Escaped Characters
    // yaml.org/spec/1.2/spec.html#id2776092
    let (decoded, cur) = match cur.peek()
    {
        Some('0') => ('\x00', cur.bump()),
        Some('a') => ('\x07', cur.bump()),
        Some('b') => ('\x08', cur.bump()),
        Some('t') | Some('\t') => ('\x09', cur.bump()),
        Some('n') => ('\x0A', cur.bump()),
        Some('v') => ('\x0B', cur.bump()),
        Some('f') => ('\x0C', cur.bump()),
        Some('r') => ('\x0D', cur.bump()),
        Some('e') => ('\x1B', cur.bump()),
        Some(' ') => ('\x20', cur.bump()),
        Some('"') => ('"', cur.bump()),
        Some('/') => ('/', cur.bump()),
        Some('\\') => ('\\', cur.bump()),
        Some('N') => ('\u{85}', cur.bump()),
        Some('_') => ('\u{A0}', cur.bump()),
        Some('L') => ('\u{2028}', cur.bump()),
        Some('P') => ('\u{2029}', cur.bump()),

        Some('x') => return unescape_hex(start, cur.bump(), 'x', 2, out),
        Some('u') => return unescape_hex(start, cur.bump(), 'u', 4, out),
        Some('U') => return unescape_hex(start, cur.bump(), 'U', 8, out),

        None => return Err(Fault::abort(Code::UnexpectedEOF, &cur)),
        Some(c) =>
        {
            return Err(Fault::abort_detailed(
                Code::UnknownEscape,
                &start,
                format!("'\\{}' is not a YAML escape", c),
            ))
        },
    };

    out.push(decoded);

    Ok(((), cur))
}

/// Decode a fixed length hex escape, e.g '\\u0041'. The digit
/// count is exact; a short run is diagnosed against
/// whatever span of hex characters was found
fn unescape_hex<'a>(
    start: Cursor<'a>,
    cur: Cursor<'a>,
    letter: char,
    digits: u32,
    out: &mut String,
) -> Step<'a, ()>
{
    let mut cur = cur;
    let mut value: u32 = 0;
    let span_start = cur;

    for _ in 0..digits
    {
        match cur.peek()
        {
            Some(c) if c.is_ascii_hexdigit() =>
            {
                value = (value << 4) + c.to_digit(16).expect("a hex digit");
                cur = cur.bump();
            },
            _ =>
            {
                return Err(Fault::abort_detailed(
                    Code::InvalidEscape,
                    &start,
                    format!(
                        "'\\{}' requires exactly {} hex digits, found \"{}\"",
                        letter,
                        digits,
                        span_start.slice(&cur)
                    ),
                ))
            },
        }
    }

    match std::char::from_u32(value)
    {
        Some(c) =>
        {
            out.push(c);

            Ok(((), cur))
        },
        None => Err(Fault::abort_detailed(
            Code::InvalidEscape,
            &start,
            format!(
                "'\\{}{}' is not a Unicode scalar value",
                letter,
                span_start.slice(&cur)
            ),
        )),
    }
}
