//! Test cases for directives and the three document forms.

use pretty_assertions::assert_eq;

use super::macros::*;
use crate::{
    tree::{Directive, DocumentKind, ScalarStyle, WarningCode},
    Category, O_PEDANTIC,
};

#[test]
fn bare_document()
{
    let doc = document("key: value\n");

    assert_eq!(doc.kind, DocumentKind::Bare);
    assert_eq!(doc.directives, vec![]);
    assert_eq!(doc.warnings, vec![]);
    assert_eq!(doc.root, block_map(vec![(plain("key"), plain("value"))]));
}

#[test]
fn explicit_document()
{
    let doc = document("--- value\n");

    assert_eq!(doc.kind, DocumentKind::Explicit);
    assert_eq!(doc.root, plain("value"));
}

#[test]
fn explicit_document_with_block_content()
{
    let doc = document("---\n- a\n- b\n");

    assert_eq!(doc.kind, DocumentKind::Explicit);
    assert_eq!(doc.root, block_seq(vec![plain("a"), plain("b")]));
}

#[test]
fn explicit_document_empty()
{
    let doc = document("--- # nothing here\n");

    assert_eq!(doc.kind, DocumentKind::Explicit);
    assert_eq!(doc.root, empty());
}

#[test]
fn directive_document()
{
    let data = "%YAML 1.2\n---\nfoo: |\n  bar\n  baz\n";
    let doc = document(data);

    assert_eq!(doc.kind, DocumentKind::Directive);
    assert_eq!(doc.directives, vec![Directive::Yaml(1, 2)]);
    assert_eq!(doc.warnings, vec![]);
    assert_eq!(
        doc.root,
        block_map(vec![(
            plain("foo"),
            scalar("bar\nbaz\n", ScalarStyle::Literal)
        )])
    );
}

#[test]
fn newer_version_warns_but_parses()
{
    let doc = document("%YAML 1.3\n--- x\n");

    // The declared version survives; processing continued
    // with 1.2 semantics
    assert_eq!(doc.directives, vec![Directive::Yaml(1, 3)]);
    assert_eq!(doc.warnings.len(), 1);
    assert_eq!(doc.warnings[0].code, WarningCode::VersionUnsupported);
    assert_eq!(doc.root, plain("x"));
}

#[test]
fn newer_version_fails_pedantically()
{
    let err = crate::parse_with(O_PEDANTIC, "%YAML 1.3\n--- x\n")
        .expect_err("pedantic mode should fail");

    assert_eq!(err.classify(), Category::Structural);
}

#[test]
fn duplicate_version_rejected()
{
    assert_error!("%YAML 1.2\n%YAML 1.2\n--- x\n", Category::Structural);
}

#[test]
fn tag_directive_binds_handles()
{
    let data = "%TAG !e! tag:example.com,2000:app/\n---\n!e!thing x\n";
    let doc = document(data);

    assert_eq!(
        doc.directives,
        vec![Directive::Tag {
            handle: "!e!".into(),
            prefix: "tag:example.com,2000:app/".into(),
        }]
    );

    let property = doc.root.property.expect("a tag property");
    assert_eq!(
        property.tag,
        Some(crate::tree::Tag::Shorthand {
            handle: "!e!".into(),
            suffix: "thing".into(),
        })
    );
}

#[test]
fn duplicate_tag_handle_warns()
{
    let data = "%TAG !e! tag:one/\n%TAG !e! tag:two/\n--- !e!x v\n";
    let doc = document(data);

    assert_eq!(doc.warnings.len(), 1);
    assert_eq!(doc.warnings[0].code, WarningCode::DuplicateTagHandle);

    // And pedantically it is fatal
    let err = crate::parse_with(O_PEDANTIC, data).expect_err("pedantic mode should fail");
    assert_eq!(err.classify(), Category::Tag);
}

#[test]
fn reserved_directive_warns()
{
    let doc = document("%FOO bar baz\n--- x\n");

    assert_eq!(
        doc.directives,
        vec![Directive::Reserved {
            name:   "FOO".into(),
            params: vec!["bar".into(), "baz".into()],
        }]
    );
    assert_eq!(doc.warnings.len(), 1);
    assert_eq!(doc.warnings[0].code, WarningCode::UnknownDirective);
}

#[test]
fn directives_demand_document_start()
{
    assert_error!("%YAML 1.2\nx\n", Category::Structural);
}

#[test]
fn tag_bindings_reset_per_document()
{
    // The first document binds !e!, the second does not
    let data = "%TAG !e! tag:one/\n--- !e!x v\n...\n--- !e!x v\n";

    let err = assert_error!(data, Category::Tag);
    assert_eq!(err.document_index(), 1);
}

#[test]
fn document_prefix_comments_ignored()
{
    let doc = document("# leading\n# commentary\nkey: value\n");

    assert_eq!(doc.kind, DocumentKind::Bare);
    assert_eq!(doc.root, block_map(vec![(plain("key"), plain("value"))]));
}
