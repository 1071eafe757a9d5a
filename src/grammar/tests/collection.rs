//! Test cases for flow and block collections: sequences,
//! mappings, compact forms, implicit keys and the errors
//! around them.

use super::macros::*;
use crate::{tree::ScalarStyle, Category};

mod flow
{
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sequence_simple()
    {
        assert_eq!(
            root("[ one, two, three ]\n"),
            flow_seq(vec![plain("one"), plain("two"), plain("three")])
        );
    }

    #[test]
    fn sequence_nested_mapping()
    {
        assert_eq!(
            root("[ one, two, { three: four } ]\n"),
            flow_seq(vec![
                plain("one"),
                plain("two"),
                flow_map(vec![(plain("three"), plain("four"))]),
            ])
        );
    }

    #[test]
    fn sequence_trailing_comma()
    {
        assert_eq!(
            root("[ a, b, ]\n"),
            flow_seq(vec![plain("a"), plain("b")])
        );
    }

    #[test]
    fn sequence_single_pair_entry()
    {
        assert_eq!(
            root("[ a: b ]\n"),
            flow_seq(vec![flow_map(vec![(plain("a"), plain("b"))])])
        );
    }

    #[test]
    fn sequence_multi_line()
    {
        assert_eq!(
            root("[ one,\n  two,\n  three ]\n"),
            flow_seq(vec![plain("one"), plain("two"), plain("three")])
        );
    }

    #[test]
    fn sequence_unterminated()
    {
        assert_error!("[ a, b\n", Category::EOF);
        assert_error!("[ {a: b} {c: d} ]\n", Category::Structural);
    }

    #[test]
    fn mapping_simple()
    {
        assert_eq!(
            root("{ a: b, c: d }\n"),
            flow_map(vec![(plain("a"), plain("b")), (plain("c"), plain("d"))])
        );
    }

    #[test]
    fn mapping_empty_values()
    {
        assert_eq!(
            root("{ a, : b, c: }\n"),
            flow_map(vec![
                (plain("a"), empty()),
                (empty(), plain("b")),
                (plain("c"), empty()),
            ])
        );
    }

    #[test]
    fn mapping_adjacent_value()
    {
        assert_eq!(
            root("{ \"a\":b }\n"),
            flow_map(vec![(
                scalar("a", ScalarStyle::DoubleQuoted),
                plain("b")
            )])
        );
    }

    #[test]
    fn mapping_explicit_entries()
    {
        assert_eq!(
            root("{ ? a : b, ? c }\n"),
            flow_map(vec![(plain("a"), plain("b")), (plain("c"), empty())])
        );
    }

    #[test]
    fn mapping_glued_colon_is_a_key()
    {
        // ':' followed by a safe character is plain content,
        // making the whole of a:b the key
        assert_eq!(root("{ a:b }\n"), flow_map(vec![(plain("a:b"), empty())]));
    }

    #[test]
    fn mapping_unterminated()
    {
        assert_error!("{ a: b\n", Category::EOF);
        assert_error!("{ a: b c: d }\n", Category::Structural);
    }

    #[test]
    fn stray_value_colon_rejected()
    {
        // A plain scalar cannot swallow ': '; the second
        // colon belongs to nothing
        assert_error!("[ one: two: three ]\n", Category::Structural);
    }

    #[test]
    fn collection_as_key()
    {
        assert_eq!(
            root("{ [a, b]: c }\n"),
            flow_map(vec![(flow_seq(vec![plain("a"), plain("b")]), plain("c"))])
        );
    }
}

mod block
{
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sequence_simple()
    {
        assert_eq!(
            root("- a\n- b\n- c\n"),
            block_seq(vec![plain("a"), plain("b"), plain("c")])
        );
    }

    #[test]
    fn sequence_empty_entries()
    {
        assert_eq!(
            root("- a\n-\n- c\n"),
            block_seq(vec![plain("a"), empty(), plain("c")])
        );
    }

    #[test]
    fn sequence_dash_needs_space()
    {
        // '-1' opens a plain scalar, not an entry
        assert_eq!(root("- -1\n"), block_seq(vec![plain("-1")]));
    }

    #[test]
    fn sequence_compact_nested()
    {
        assert_eq!(
            root("- - a\n  - b\n"),
            block_seq(vec![block_seq(vec![plain("a"), plain("b")])])
        );
    }

    #[test]
    fn sequence_compact_mapping_entry()
    {
        assert_eq!(
            root("- a: b\n  c: d\n"),
            block_seq(vec![block_map(vec![
                (plain("a"), plain("b")),
                (plain("c"), plain("d")),
            ])])
        );
    }

    #[test]
    fn mapping_simple()
    {
        assert_eq!(
            root("key: value\n"),
            block_map(vec![(plain("key"), plain("value"))])
        );
    }

    #[test]
    fn mapping_nested()
    {
        let data = "outer:\n  inner: value\n  other: more\nnext: done\n";

        assert_eq!(
            root(data),
            block_map(vec![
                (
                    plain("outer"),
                    block_map(vec![
                        (plain("inner"), plain("value")),
                        (plain("other"), plain("more")),
                    ])
                ),
                (plain("next"), plain("done")),
            ])
        );
    }

    #[test]
    fn mapping_sequence_value_at_same_column()
    {
        // seq-spaces: a sequence may sit at its parent
        // key's column
        let data = "key:\n- a\n- b\nother: x\n";

        assert_eq!(
            root(data),
            block_map(vec![
                (plain("key"), block_seq(vec![plain("a"), plain("b")])),
                (plain("other"), plain("x")),
            ])
        );
    }

    #[test]
    fn mapping_empty_value()
    {
        assert_eq!(
            root("a:\nb: x\n"),
            block_map(vec![(plain("a"), empty()), (plain("b"), plain("x"))])
        );
    }

    #[test]
    fn mapping_explicit_entries()
    {
        let data = "? key\n: value\n? lone\n";

        assert_eq!(
            root(data),
            block_map(vec![
                (plain("key"), plain("value")),
                (plain("lone"), empty()),
            ])
        );
    }

    #[test]
    fn mapping_empty_key()
    {
        assert_eq!(
            root(": value\n"),
            block_map(vec![(empty(), plain("value"))])
        );
    }

    #[test]
    fn mapping_quoted_keys()
    {
        assert_eq!(
            root("\"a key\": x\n'another': y\n"),
            block_map(vec![
                (scalar("a key", ScalarStyle::DoubleQuoted), plain("x")),
                (scalar("another", ScalarStyle::SingleQuoted), plain("y")),
            ])
        );
    }

    #[test]
    fn mapping_value_on_next_line()
    {
        assert_eq!(
            root("key:\n  value\n"),
            block_map(vec![(plain("key"), plain("value"))])
        );
    }

    #[test]
    fn tab_indentation_rejected()
    {
        assert_error!("a:\n\tb: c\n", Category::Indentation);
    }

    #[test]
    fn mapping_values_mid_line_rejected()
    {
        assert_error!("a: b: c\n", Category::Structural);
    }
}

mod keys
{
    use super::*;
    use pretty_assertions::assert_eq;

    fn long_key(len: usize) -> String
    {
        std::iter::repeat('k').take(len).collect()
    }

    #[test]
    fn implicit_key_at_the_limit()
    {
        let data = format!("{}: v\n", long_key(1024));

        assert_eq!(
            root(&data),
            block_map(vec![(plain(&long_key(1024)), plain("v"))])
        );
    }

    #[test]
    fn implicit_key_over_the_limit()
    {
        let data = format!("{}: v\n", long_key(1025));

        assert_error!(&data, Category::Limit);
    }

    #[test]
    fn flow_pair_key_over_the_limit()
    {
        let data = format!("[ {}: v ]\n", long_key(1025));

        assert_error!(&data, Category::Limit);
    }

    #[test]
    fn long_plain_scalar_is_not_a_key()
    {
        // Without a ':' the same run of characters is a
        // perfectly good scalar
        let data = format!("{}\n", long_key(2000));

        assert_eq!(root(&data), plain(&long_key(2000)));
    }
}
