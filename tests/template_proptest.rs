//! Property-based tests for template compilation
//!
//! These tests pin down the laws that hold for any input of a given shape:
//! - Class values accumulate in source order, every other key is unique
//! - An if/elif/else run closes exactly once
//! - Nesting depth follows indentation order, not absolute widths
//! - Rendering a parsed tree never changes it

use haml_jinja::ast::{NodeId, Tree};
use haml_jinja::builder::build_tree;
use haml_jinja::{compile, compile_with, LineError, RenderOptions, Renderer};
use proptest::prelude::*;

/// Generate class names usable in `.shorthand` form
fn class_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,8}"
}

/// Generate attribute keys other than `class`
fn attribute_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("class may repeat", |k| k != "class")
}

/// Generate quoted attribute values, commas and colons included
fn attribute_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]([a-zA-Z0-9 ]{0,10}[a-zA-Z0-9])?",
        "[a-z]{1,4}, [a-z]{1,4}",
        "[a-z]{1,4}: [a-z]{1,4}",
        "/[a-z]{1,6}\\?q=[0-9]{1,3}",
    ]
}

/// Generate simple control-tag expressions
fn expression_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}( == [0-9]{1,2})?"
}

/// Generate a valid sequence of nesting depths: starts at 0 and never
/// descends more than one level at a time.
fn depth_sequence_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 1..12).prop_map(|steps| {
        let mut depths = Vec::with_capacity(steps.len());
        let mut current = 0usize;
        for (i, step) in steps.into_iter().enumerate() {
            if i > 0 {
                current = if step == 0 { current + 1 } else { current.saturating_sub(step - 1) };
            }
            depths.push(current);
        }
        depths
    })
}

fn preorder(tree: &Tree, id: NodeId, out: &mut Vec<usize>) {
    for &child in tree.children(id) {
        out.push(tree.depth(child).unwrap_or(0));
        preorder(tree, child, out);
    }
}

proptest! {
    #[test]
    fn classes_accumulate_in_source_order(
        shorthand in prop::collection::vec(class_name_strategy(), 1..5),
        explicit in class_name_strategy(),
    ) {
        let source = format!(
            "%div.{}(class=\"{}\")",
            shorthand.join("."),
            explicit
        );
        let mut expected = shorthand.clone();
        expected.push(explicit);

        let html = compile(&source).unwrap();
        prop_assert_eq!(html, format!("<div class=\"{}\"></div>", expected.join(" ")));
    }

    #[test]
    fn repeated_keys_are_rejected(
        key in attribute_key_strategy(),
        first in attribute_value_strategy(),
        second in attribute_value_strategy(),
    ) {
        let source = format!("%div({}=\"{}\", {}=\"{}\")", key, first, key, second);
        let error = compile(&source).unwrap_err();
        prop_assert!(!error.is_indentation());
        prop_assert_eq!(error.line(), 0);

        let mut tree = Tree::new();
        let is_duplicate = matches!(
            haml_jinja::classify::parse_line(&mut tree, &source),
            Err(LineError::DuplicateAttribute { .. })
        );
        prop_assert!(is_duplicate);
    }

    #[test]
    fn quoted_values_survive_intact(
        key in attribute_key_strategy(),
        value in attribute_value_strategy(),
    ) {
        let source = format!("%span(id=\"x\", {}=\"{}\") text", key, value);
        let html = compile(&source);
        if key == "id" {
            prop_assert!(html.is_err());
        } else {
            prop_assert_eq!(
                html.unwrap(),
                format!("<span id=\"x\" {}=\"{}\">text</span>", key, value)
            );
        }
    }

    #[test]
    fn if_chain_closes_once(
        condition in expression_strategy(),
        branches in prop::collection::vec(expression_strategy(), 0..5),
        with_else in any::<bool>(),
    ) {
        let mut source = format!("-if {}\n  body\n", condition);
        for branch in &branches {
            source.push_str(&format!("-elif {}\n  body\n", branch));
        }
        if with_else {
            source.push_str("-else\n  body\n");
        }

        let options = RenderOptions::new("\n", "");
        let output = compile_with(&source, &options).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        prop_assert_eq!(output.matches("{% endif %}").count(), 1);
        prop_assert_eq!(lines.last().copied(), Some("{% endif %}"));
        prop_assert_eq!(output.matches("{% elif ").count(), branches.len());
        prop_assert_eq!(output.matches("{% else %}").count(), usize::from(with_else));
    }

    #[test]
    fn depth_follows_indentation_order(
        depths in depth_sequence_strategy(),
        unit in 1usize..5,
    ) {
        let source: Vec<String> = depths
            .iter()
            .map(|depth| format!("{}%div", " ".repeat(depth * unit)))
            .collect();
        let tree = build_tree(&source.join("\n")).unwrap();

        let mut observed = Vec::new();
        preorder(&tree, tree.root(), &mut observed);
        prop_assert_eq!(observed, depths);
    }

    #[test]
    fn rendering_is_repeatable(
        condition in expression_strategy(),
        classes in prop::collection::vec(class_name_strategy(), 0..3),
        unit in prop_oneof![Just(""), Just("  "), Just("\t")],
    ) {
        let class_suffix: String = classes.iter().map(|c| format!(".{c}")).collect();
        let source = format!(
            "-if {}\n  %-p{} yes\n-else\n  %pre\n    |raw\n",
            condition, class_suffix
        );
        let renderer = Renderer::new(&source, RenderOptions::new("\n", unit)).unwrap();
        let before = renderer.tree().clone();
        let first = renderer.render();
        prop_assert_eq!(&first, &renderer.render());
        prop_assert_eq!(before.len(), renderer.tree().len());
    }
}
