/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Code point predicates for the YAML 1.2 character
//! classes. These are the productions the entire grammar
//! bottoms out in, so they take plain chars and stay
//! branch-light.

/// c-printable: the characters permitted anywhere in a YAML
/// stream
pub(in crate::grammar) fn is_printable(c: char) -> bool
{
    matches!(c,
        '\u{09}' | '\u{0A}' | '\u{0D}' | '\u{20}'..='\u{7E}' | '\u{85}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// nb-char: printable minus line breaks and the byte order
/// mark
pub(in crate::grammar) fn is_nb_char(c: char) -> bool
{
    !matches!(c, '\u{0A}' | '\u{0D}' | '\u{FEFF}') && is_printable(c)
}

/// ns-char: nb-char minus space and tab
pub(in crate::grammar) fn is_ns_char(c: char) -> bool
{
    !is_white(c) && is_nb_char(c)
}

/// s-white: space or tab
pub(in crate::grammar) fn is_white(c: char) -> bool
{
    matches!(c, ' ' | '\t')
}

/// b-char: the two line break characters YAML 1.2 folds.
/// NEL and the Unicode separators are ordinary content in
/// 1.2, unlike 1.1
pub(in crate::grammar) fn is_break(c: char) -> bool
{
    matches!(c, '\r' | '\n')
}

/// c-indicator: characters with special meaning at the
/// start of a node
pub(in crate::grammar) fn is_indicator(c: char) -> bool
{
    matches!(
        c,
        '-' | '?'
            | ':'
            | ','
            | '['
            | ']'
            | '{'
            | '}'
            | '#'
            | '&'
            | '*'
            | '!'
            | '|'
            | '>'
            | '\''
            | '"'
            | '%'
            | '@'
            | '`'
    )
}

/// c-flow-indicator: indicators that delimit flow
/// collection entries
pub(in crate::grammar) fn is_flow_indicator(c: char) -> bool
{
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// ns-dec-digit
pub(in crate::grammar) fn is_dec_digit(c: char) -> bool
{
    c.is_ascii_digit()
}

/// ns-hex-digit
pub(in crate::grammar) fn is_hex_digit(c: char) -> bool
{
    c.is_ascii_hexdigit()
}

/// ns-word-char: alphanumeric ASCII or '-'
pub(in crate::grammar) fn is_word_char(c: char) -> bool
{
    c.is_ascii_alphanumeric() || c == '-'
}

/// ns-uri-char, minus the '%' hex hex escapes which are a
/// sequence property and validated by the uri scanners
pub(in crate::grammar) fn is_uri_char(c: char) -> bool
{
    is_word_char(c)
        || matches!(
            c,
            '#' | ';'
                | '/'
                | '?'
                | ':'
                | '@'
                | '&'
                | '='
                | '+'
                | '$'
                | ','
                | '_'
                | '.'
                | '!'
                | '~'
                | '*'
                | '\''
                | '('
                | ')'
                | '['
                | ']'
        )
}

/// ns-tag-char: uri-char minus '!' and the flow indicators,
/// so that a shorthand tag ends where its node begins
pub(in crate::grammar) fn is_tag_char(c: char) -> bool
{
    !matches!(c, '!' | ',' | '[' | ']' | '{' | '}') && is_uri_char(c)
}

/// ns-anchor-char: ns-char minus the flow indicators, used
/// for both anchor and alias names
pub(in crate::grammar) fn is_anchor_char(c: char) -> bool
{
    !is_flow_indicator(c) && is_ns_char(c)
}
