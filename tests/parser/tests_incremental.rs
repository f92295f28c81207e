//! Incremental reparsing: strategy choice, reuse figures, and agreement
//! with a parse from scratch.

#![allow(clippy::unwrap_used)]

use rstest::rstest;
use zensyn::{Grammar, InputEdit, Parser, ParserOptions, ReuseStrategy};

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_helpers::{assert_same_as_fresh, edit_and_reparse};

fn parser() -> Parser {
    Parser::new(Grammar::zenscript()).unwrap()
}

// ============================================================================
// Strategy selection
// ============================================================================

#[test]
fn test_edit_inside_function_body_reparses_the_block() {
    let mut parser = parser();
    let tree = parser.parse(BLOCK_BODY, None).unwrap();
    let at = BLOCK_BODY.find("1;").unwrap();

    let (source, new_tree) = edit_and_reparse(&mut parser, BLOCK_BODY, &tree, at..at + 1, "10");

    let stats = parser.last_reuse();
    assert_eq!(stats.strategy, ReuseStrategy::Block);
    assert!(stats.reused_nodes > 0);
    assert!(stats.relexed_bytes < source.len());
    assert_same_as_fresh(&source, &new_tree);
}

#[test]
fn test_block_reparse_shares_siblings() {
    let mut parser = parser();
    let tree = parser.parse(BLOCK_BODY, None).unwrap();
    let at = BLOCK_BODY.find("y").unwrap();

    let (_, new_tree) = edit_and_reparse(&mut parser, BLOCK_BODY, &tree, at..at + 1, "z");

    let old_call = tree.root_node().named_child(1).unwrap();
    let new_call = new_tree.root_node().named_child(1).unwrap();
    let (old_green, new_green) = (
        old_call.syntax().as_node().unwrap().green(),
        new_call.syntax().as_node().unwrap().green(),
    );
    assert!(std::ptr::eq(&*old_green, &*new_green));
}

#[test]
fn test_edit_between_items_reuses_top_level() {
    let mut parser = parser();
    let tree = parser.parse(MANY_ITEMS, None).unwrap();
    let at = MANY_ITEMS.find('3').unwrap();

    let (source, new_tree) = edit_and_reparse(&mut parser, MANY_ITEMS, &tree, at..at + 1, "33");

    let stats = parser.last_reuse();
    assert_eq!(stats.strategy, ReuseStrategy::TopLevel);
    assert!(stats.reused_nodes >= 3, "{stats:?}");
    assert!(stats.relexed_bytes < source.len());
    assert_same_as_fresh(&source, &new_tree);
}

#[test]
fn test_first_parse_is_full() {
    let mut parser = parser();
    parser.parse(MANY_ITEMS, None).unwrap();
    let stats = parser.last_reuse();
    assert_eq!(stats.strategy, ReuseStrategy::Full);
    assert_eq!(stats.reused_nodes, 0);
    assert_eq!(stats.relexed_bytes, MANY_ITEMS.len());
}

#[test]
fn test_unedited_previous_tree_parses_from_scratch() {
    let mut parser = parser();
    let tree = parser.parse(MANY_ITEMS, None).unwrap();
    let again = parser.parse(MANY_ITEMS, Some(&tree)).unwrap();
    assert_eq!(parser.last_reuse().strategy, ReuseStrategy::Full);
    assert_eq!(again.to_sexp(), tree.to_sexp());
}

#[test]
fn test_mismatched_edit_record_falls_back_to_full() {
    let mut parser = parser();
    let mut tree = parser.parse("a; b;", None).unwrap();
    tree.edit(&InputEdit::replace("a; b;", 0..1, "xyz").unwrap())
        .unwrap();
    // The edit says the text grew by two bytes; this source did not.
    let new_tree = parser.parse("q; b;", Some(&tree)).unwrap();
    assert_eq!(parser.last_reuse().strategy, ReuseStrategy::Full);
    assert_same_as_fresh("q; b;", &new_tree);
}

#[test]
fn test_tree_from_another_grammar_is_not_reused() {
    let mut first = Parser::new(Grammar::zenscript()).unwrap();
    let mut tree = first.parse("a; b;", None).unwrap();
    tree.edit(&InputEdit::replace("a; b;", 3..4, "c").unwrap())
        .unwrap();

    let mut second = Parser::new(Grammar::zenscript()).unwrap();
    second.parse("a; c;", Some(&tree)).unwrap();
    assert_eq!(second.last_reuse().strategy, ReuseStrategy::Full);
}

#[test]
fn test_disabled_reuse() {
    let options = ParserOptions::default().with_reuse(false);
    let mut parser = Parser::with_options(Grammar::zenscript(), options).unwrap();
    let tree = parser.parse(BLOCK_BODY, None).unwrap();
    let at = BLOCK_BODY.find("1;").unwrap();
    let (source, new_tree) = edit_and_reparse(&mut parser, BLOCK_BODY, &tree, at..at + 1, "2");
    assert_eq!(parser.last_reuse().strategy, ReuseStrategy::Full);
    assert_same_as_fresh(&source, &new_tree);
}

// ============================================================================
// Changed ranges
// ============================================================================

#[test]
fn test_changed_ranges_after_block_reparse() {
    let mut parser = parser();
    let tree = parser.parse(BLOCK_BODY, None).unwrap();
    let at = BLOCK_BODY.find("1;").unwrap();
    let (_, new_tree) = edit_and_reparse(&mut parser, BLOCK_BODY, &tree, at..at + 1, "10");
    assert_eq!(tree.changed_ranges(&new_tree), vec![at..at + 2]);
}

#[test]
fn test_changed_ranges_after_top_level_reparse() {
    let mut parser = parser();
    let tree = parser.parse(MANY_ITEMS, None).unwrap();
    let at = MANY_ITEMS.find('3').unwrap();
    let (_, new_tree) = edit_and_reparse(&mut parser, MANY_ITEMS, &tree, at..at + 1, "33");
    assert_eq!(tree.changed_ranges(&new_tree), vec![at..at + 2]);
}

#[test]
fn test_changed_ranges_for_inserted_item() {
    let mut parser = parser();
    let source = "a;\nc;\n";
    let tree = parser.parse(source, None).unwrap();
    let (new_source, new_tree) = edit_and_reparse(&mut parser, source, &tree, 3..3, "b;\n");
    assert_eq!(new_source, "a;\nb;\nc;\n");
    let ranges = tree.changed_ranges(&new_tree);
    assert_eq!(ranges.len(), 1);
    assert!(ranges[0].start <= 3 && ranges[0].end >= 5, "{ranges:?}");
}

#[test]
fn test_identical_trees_have_no_changed_ranges() {
    let mut parser = parser();
    let a = parser.parse(CLASS, None).unwrap();
    let b = parser.parse(CLASS, None).unwrap();
    assert!(a.changed_ranges(&b).is_empty());
}

// ============================================================================
// Agreement with a parse from scratch
// ============================================================================

#[rstest]
#[case::open_comment_in_body(BLOCK_BODY, "x = 1;", "/* x = 1;")]
#[case::close_brace_in_body(BLOCK_BODY, "y = 2;", "} y = 2;")]
#[case::open_string(MANY_ITEMS, "c = 3;", "c = \"3;")]
#[case::break_keyword(FUNCTIONS, "function greet", "functio greet")]
#[case::join_items(MANY_ITEMS, ";\nd", "d")]
#[case::new_class_member(CLASS, "var value", "var extra as int;\n    var value")]
#[case::static_to_variable(FUNCTIONS, "static function helper() as void;", "static helper = 1;")]
#[case::wrap_in_block(RECIPES, "for i in 0 .. 10 {", "{ for i in 0 .. 10 {")]
#[case::unclose_handler(RECIPES, "<minecraft:stone>", "<minecraft:stone")]
#[case::else_removed(FUNCTIONS, "} else {", "} {")]
#[case::line_comment_before_close_brace(BLOCK_BODY, "y = 2;\n}", "y = 2;\n// }")]
#[case::preprocessor_before_close_brace(BLOCK_BODY, "y = 2;\n}", "y = 2;\n#}")]
#[case::comment_out_last_method_line(CLASS, "return value;\n    }\n}", "return value; // }\n}")]
fn test_reparse_matches_fresh_parse(
    #[case] source: &str,
    #[case] find: &str,
    #[case] replace: &str,
) {
    let mut parser = parser();
    let tree = parser.parse(source, None).unwrap();
    let at = source.find(find).unwrap();
    let (new_source, new_tree) =
        edit_and_reparse(&mut parser, source, &tree, at..at + find.len(), replace);
    assert_same_as_fresh(&new_source, &new_tree);

    // And back again.
    let (restored, back) =
        edit_and_reparse(&mut parser, &new_source, &new_tree, at..at + replace.len(), find);
    assert_eq!(restored, source);
    assert_same_as_fresh(&restored, &back);
}

#[test]
fn test_comment_typed_before_closing_brace_on_same_line() {
    let mut parser = parser();
    let source = "function f() {\n  a; }\n";
    let tree = parser.parse(source, None).unwrap();
    let at = source.find('}').unwrap();
    for typed in ["// ", "#", "/* "] {
        let (new_source, new_tree) = edit_and_reparse(&mut parser, source, &tree, at..at, typed);
        assert_ne!(parser.last_reuse().strategy, ReuseStrategy::Block);
        assert_same_as_fresh(&new_source, &new_tree);
    }
}

#[test]
fn test_closing_a_comment_inside_a_body_is_undone() {
    let mut parser = parser();
    let source = "function f() { /* a; */ b; }";
    let tree = parser.parse(source, None).unwrap();
    let at = source.find("*/").unwrap();
    let (new_source, new_tree) = edit_and_reparse(&mut parser, source, &tree, at..at + 2, "");
    assert_same_as_fresh(&new_source, &new_tree);
}

#[test]
fn test_appending_at_end_of_file() {
    let mut parser = parser();
    let source = "a;";
    let tree = parser.parse(source, None).unwrap();
    let (source, tree) = edit_and_reparse(&mut parser, source, &tree, 2..2, " b;");
    assert_same_as_fresh(&source, &tree);
    let (source, tree) = edit_and_reparse(&mut parser, &source, &tree, 5..5, "\nc = 1;");
    assert_same_as_fresh(&source, &tree);
    assert_eq!(tree.root_node().named_child_count(), 3);
}

#[test]
fn test_single_character_edits_everywhere() {
    let mut parser = parser();
    for source in [FUNCTIONS, CLASS, RECIPES] {
        let tree = parser.parse(source, None).unwrap();
        for at in (0..source.len()).step_by(5) {
            for replacement in ["", "x", "{", "}", ";", "\"", "/*"] {
                let (new_source, new_tree) =
                    edit_and_reparse(&mut parser, source, &tree, at..at + 1, replacement);
                assert_same_as_fresh(&new_source, &new_tree);
            }
        }
    }
}

#[test]
fn test_several_edits_before_one_reparse() {
    let mut parser = parser();
    let source = MANY_ITEMS;
    let mut tree = parser.parse(source, None).unwrap();

    let mut text = source.to_string();
    for (range, replacement) in [(25..26, "44"), (4..5, ""), (0..0, "z = 0;\n")] {
        let edit = InputEdit::replace(&text, range.clone(), replacement).unwrap();
        tree.edit(&edit).unwrap();
        text.replace_range(range, replacement);
    }
    assert_eq!(tree.len(), text.len());

    let new_tree = parser.parse(&text, Some(&tree)).unwrap();
    assert_same_as_fresh(&text, &new_tree);
}

#[test]
fn test_chain_of_reparses() {
    let mut parser = parser();
    let mut source = String::from("function f() {\n}\n");
    let mut tree = parser.parse(&source, None).unwrap();
    for i in 0..20 {
        let at = source.rfind('}').unwrap();
        let line = format!("  v{i} = {i};\n");
        let (next_source, next_tree) = edit_and_reparse(&mut parser, &source, &tree, at..at, &line);
        assert_same_as_fresh(&next_source, &next_tree);
        source = next_source;
        tree = next_tree;
    }
    assert_eq!(tree.root_node().child(0).unwrap().kind_name(), "function_declaration");
}
