//! Test cases for node properties (anchors and tags) and
//! alias nodes.

use pretty_assertions::assert_eq;

use super::macros::*;
use crate::{
    tree::{Node, Property, ScalarStyle, Tag},
    Category,
};

fn with_anchor(mut node: Node, name: &str) -> Node
{
    let property = node.property.get_or_insert(Property {
        anchor: None,
        tag:    None,
    });
    property.anchor = Some(name.into());

    node
}

fn with_tag(mut node: Node, tag: Tag) -> Node
{
    let property = node.property.get_or_insert(Property {
        anchor: None,
        tag:    None,
    });
    property.tag = Some(tag);

    node
}

fn shorthand(handle: &str, suffix: &str) -> Tag
{
    Tag::Shorthand {
        handle: handle.into(),
        suffix: suffix.into(),
    }
}

#[test]
fn anchored_scalar()
{
    assert_eq!(root("&a one\n"), with_anchor(plain("one"), "a"));
}

#[test]
fn anchor_and_alias_in_sequence()
{
    assert_eq!(
        root("- &a one\n- *a\n"),
        block_seq(vec![with_anchor(plain("one"), "a"), alias("a")])
    );
}

#[test]
fn alias_carries_no_property()
{
    let node = root("- &a one\n- *a\n");

    match node.content
    {
        crate::tree::Content::Sequence(items, _) =>
        {
            assert_eq!(items[1].property, None);
        },
        other => panic!("expected a sequence, got {:?}", other),
    }
}

#[test]
fn shorthand_tags()
{
    assert_eq!(
        root("!!str 42\n"),
        with_tag(plain("42"), shorthand("!!", "str"))
    );

    assert_eq!(
        root("!local x\n"),
        with_tag(plain("x"), shorthand("!", "local"))
    );
}

#[test]
fn verbatim_tag()
{
    assert_eq!(
        root("!<tag:yaml.org,2002:str> x\n"),
        with_tag(plain("x"), Tag::Verbatim("tag:yaml.org,2002:str".into()))
    );
}

#[test]
fn non_specific_tag()
{
    assert_eq!(
        root("! x\n"),
        with_tag(plain("x"), Tag::NonSpecific)
    );
}

#[test]
fn both_properties_either_order()
{
    for data in ["key: !!str &v x\n", "key: &v !!str x\n"]
    {
        let expected = with_anchor(
            with_tag(plain("x"), shorthand("!!", "str")),
            "v",
        );

        assert_eq!(
            root(data),
            block_map(vec![(plain("key"), expected)]),
            "for input {:?}",
            data
        );
    }
}

#[test]
fn property_only_node_is_empty_content()
{
    assert_eq!(root("--- &a\n"), with_anchor(empty(), "a"));
}

#[test]
fn anchored_block_collection()
{
    assert_eq!(
        root("&all\n- a\n- b\n"),
        with_anchor(block_seq(vec![plain("a"), plain("b")]), "all")
    );
}

#[test]
fn tagged_quoted_key()
{
    // A propertied JSON-like key must stay a JSON-like key
    assert_eq!(
        root("{ !!str \"k\": v }\n"),
        flow_map(vec![(
            with_tag(scalar("k", ScalarStyle::DoubleQuoted), shorthand("!!", "str")),
            plain("v"),
        )])
    );
}

#[test]
fn undefined_named_handle_rejected()
{
    assert_error!("!e!tag x\n", Category::Tag);
}

#[test]
fn bad_anchor_names_rejected()
{
    // The flow indicator ends the name, leaving content
    // nothing can claim
    assert_error!("&a[ x\n", Category::Structural);

    // An alias indicator with no name at all
    assert_error!("key: *\n", Category::Content);
}

#[test]
fn anchors_may_repeat()
{
    // Later anchors shadow earlier ones; resolution is the
    // composer's job, the grammar just records names in
    // order
    assert_eq!(
        root("- &a 1\n- &a 2\n- *a\n"),
        block_seq(vec![
            with_anchor(plain("1"), "a"),
            with_anchor(plain("2"), "a"),
            alias("a"),
        ])
    );
}
