//! Percent escape utilities consumed by tag validation.
//!
//! YAML requires non uri characters in tags to be UTF-8
//! percent encoded; decoding therefore has to validate both
//! the %HH runs and the byte sequence they produce. All
//! scratch space is owned by the caller; there is no hidden
//! buffer anywhere in here.

use crate::grammar::chars;

/// Ways a percent escaped string can be malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::grammar) enum UriFault
{
    /// A '%' was not followed by two hex digits
    BadEscape,
    /// The escape run ran off the end of the string
    Truncated,
    /// The decoded bytes were not valid UTF-8
    BadUtf8,
}

/// Decode every %HH escape in .base into .scratch, leaving
/// all other bytes untouched. The scratch is cleared first
/// and holds the decoded byte sequence on success
pub(in crate::grammar) fn percent_decode(base: &str, scratch: &mut Vec<u8>)
    -> Result<(), UriFault>
{
    scratch.clear();

    let bytes = base.as_bytes();
    let mut index = 0;

    while index < bytes.len()
    {
        match bytes[index]
        {
            b'%' =>
            {
                if index + 2 >= bytes.len()
                {
                    return Err(UriFault::Truncated);
                }

                let hi = as_hex(bytes[index + 1]).ok_or(UriFault::BadEscape)?;
                let lo = as_hex(bytes[index + 2]).ok_or(UriFault::BadEscape)?;

                scratch.push((hi << 4) | lo);
                index += 3;
            },
            b =>
            {
                scratch.push(b);
                index += 1;
            },
        }
    }

    match std::str::from_utf8(scratch)
    {
        Ok(_) => Ok(()),
        Err(_) => Err(UriFault::BadUtf8),
    }
}

/// Encode every byte of .base that is not uri safe as %HH,
/// writing the (pure ASCII) result into .scratch. Used to
/// bring a decoded tag back into its normal form before
/// syntactic checks
pub(in crate::grammar) fn percent_encode(base: &str, scratch: &mut Vec<u8>)
{
    scratch.clear();

    for b in base.bytes()
    {
        let safe = b.is_ascii() && b != b'%' && chars::is_uri_char(b as char);

        match safe
        {
            true => scratch.push(b),
            false =>
            {
                scratch.push(b'%');
                scratch.push(to_hex(b >> 4));
                scratch.push(to_hex(b & 0x0F));
            },
        }
    }
}

fn as_hex(b: u8) -> Option<u8>
{
    match b
    {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn to_hex(nibble: u8) -> u8
{
    match nibble
    {
        0..=9 => b'0' + nibble,
        _ => b'A' + nibble - 10,
    }
}
