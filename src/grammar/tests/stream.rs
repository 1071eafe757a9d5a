//! Test cases for stream composition: multiple documents,
//! markers, prefixes and suffixes.

use pretty_assertions::assert_eq;

use super::macros::*;
use crate::{tree::DocumentKind, Category};

#[test]
fn empty_input_is_an_empty_stream()
{
    assert_eq!(stream("").documents, vec![]);
}

#[test]
fn comments_only_is_an_empty_stream()
{
    assert_eq!(stream("\u{FEFF}# nothing\n# to see\n\n").documents, vec![]);
}

#[test]
fn lone_suffix_is_an_empty_stream()
{
    assert_eq!(stream("...\n").documents, vec![]);
}

#[test]
fn anchor_then_alias_across_documents()
{
    let parsed = stream("&a one\n...\n*a\n");

    assert_eq!(parsed.documents.len(), 2);
    assert_eq!(parsed.documents[1].root, alias("a"));
}

#[test]
fn explicit_documents_chain_without_suffixes()
{
    let parsed = stream("--- one\n--- two\n--- three\n");

    assert_eq!(parsed.documents.len(), 3);
    assert_eq!(parsed.documents[2].root, plain("three"));
}

#[test]
fn bare_document_needs_a_suffix_before_the_next()
{
    // After '...' a bare document is fine again
    let parsed = stream("one\n...\ntwo\n");

    assert_eq!(parsed.documents.len(), 2);
    assert_eq!(parsed.documents[0].kind, DocumentKind::Bare);
    assert_eq!(parsed.documents[1].kind, DocumentKind::Bare);
}

#[test]
fn unmarked_second_document_rejected()
{
    let err = assert_error!("- a\nb: c\n", Category::Structural);

    assert_eq!(err.line(), 2);
}

#[test]
fn stream_concatenation()
{
    let first = "a: 1\n...\n";
    let second = "--- b\n";

    let joined = format!("{}{}", first, second);

    let mut expected = stream(first).documents;
    expected.extend(stream(second).documents);

    assert_eq!(stream(&joined).documents, expected);
}

#[test]
fn repeated_suffixes_allowed()
{
    let parsed = stream("one\n...\n...\ntwo\n");

    assert_eq!(parsed.documents.len(), 2);
}

#[test]
fn suffix_trailing_junk_rejected()
{
    assert_error!("one\n... junk\n", Category::Structural);
}

#[test]
fn plain_scalars_stop_at_markers()
{
    let parsed = stream("one\ntwo\n...\n");

    assert_eq!(parsed.documents.len(), 1);
    assert_eq!(parsed.documents[0].root, plain("one two"));
}

#[test]
fn marker_lookalikes_are_content()
{
    // Only '---' and '...' followed by whitespace delimit
    // documents
    assert_eq!(stream("---x\n").documents[0].root, plain("---x"));
    assert_eq!(stream("....\n").documents[0].root, plain("...."));
}

#[test]
fn document_order_preserved()
{
    let parsed = stream("--- 1\n--- 2\n--- 3\n--- 4\n");

    let roots: Vec<_> = parsed.documents.into_iter().map(|d| d.root).collect();

    assert_eq!(
        roots,
        vec![plain("1"), plain("2"), plain("3"), plain("4")]
    );
}
