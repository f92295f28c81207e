//! Whole-source parse scenarios checked against the canonical s-expression.

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_helpers::{parse, sexp};

// ============================================================================
// Well-formed input
// ============================================================================

#[rstest]
#[case::empty("", "(source_file)")]
#[case::import_and_call(
    "import a.b.C; f();",
    "(source_file (import_statement (qualified_name (simple_name) (simple_name) (simple_name))) (expression_statement (call_expression (simple_name))))"
)]
#[case::import_alias(
    "import a.b as c;",
    "(source_file (import_statement (qualified_name (simple_name) (simple_name)) (simple_name)))"
)]
#[case::precedence(
    "a + b * c;",
    "(source_file (expression_statement (binary_expression (simple_name) (binary_expression (simple_name) (simple_name)))))"
)]
#[case::conditional(
    "x = a ? b : c;",
    "(source_file (expression_statement (assignment_expression (simple_name) (conditional_expression (simple_name) (simple_name) (simple_name)))))"
)]
#[case::postfix_chain(
    "-a.b(1)[2];",
    "(source_file (expression_statement (unary_expression (member_index_expression (call_expression (member_access_expression (simple_name) (member_name)) (int_literal)) (int_literal)))))"
)]
#[case::call_arguments(
    "f(1, \"s\", a.b);",
    "(source_file (expression_statement (call_expression (simple_name) (int_literal) (string_literal) (member_access_expression (simple_name) (member_name)))))"
)]
#[case::cast_to_array(
    "x as string[];",
    "(source_file (expression_statement (type_cast_expression (simple_name) (array_type (primitive_type)))))"
)]
#[case::map_typed_variable(
    "val m as int[string] = {a: 1};",
    "(source_file (variable_declaration (simple_name) (map_type (primitive_type) (primitive_type)) (map_literal (map_entry (simple_name) (int_literal)))))"
)]
#[case::foreach_range(
    "for i in 0 .. 10 { }",
    "(source_file (foreach_statement (simple_name) (int_range_expression (int_literal) (int_literal)) (block_statement)))"
)]
#[case::if_else(
    "if a b; else c;",
    "(source_file (if_statement (simple_name) (expression_statement (simple_name)) (expression_statement (simple_name))))"
)]
#[case::dangling_else(
    "if a if b c; else d;",
    "(source_file (if_statement (simple_name) (if_statement (simple_name) (expression_statement (simple_name)) (expression_statement (simple_name)))))"
)]
#[case::while_break(
    "while true { break; }",
    "(source_file (while_statement (true) (block_statement (break_statement))))"
)]
#[case::function(
    "function f(a as int, b) as int { return a; }",
    "(source_file (function_declaration (simple_name) (parameter_list (parameter (simple_name) (primitive_type)) (parameter (simple_name))) (primitive_type) (function_body (return_statement (simple_name)))))"
)]
#[case::expand_function(
    "$expand string$twice() as string { return this; }",
    "(source_file (expand_function_declaration (primitive_type) (simple_name) (parameter_list) (primitive_type) (function_body (return_statement (simple_name)))))"
)]
#[case::expand_spaced_dollar_name(
    "$expand IItemStack $name() { }",
    "(source_file (expand_function_declaration (class_type) (simple_name) (parameter_list) (function_body)))"
)]
#[case::expand_dotted_type_glued_name(
    "$expand a.B$c() { }",
    "(source_file (expand_function_declaration (class_type) (simple_name) (parameter_list) (function_body)))"
)]
#[case::dollar_identifier(
    "val $x = 1;",
    "(source_file (variable_declaration (simple_name) (int_literal)))"
)]
#[case::range_binds_tighter_than_add(
    "x = 1 + 2 to 3;",
    "(source_file (expression_statement (assignment_expression (simple_name) (binary_expression (int_literal) (int_range_expression (int_literal) (int_literal))))))"
)]
#[case::class(
    "zenClass A extends B { var x as int; }",
    "(source_file (class_declaration (class_name) (qualified_name (simple_name)) (class_body (field_declaration (simple_name) (primitive_type)))))"
)]
#[case::comment_is_a_named_extra(
    "// note\nx;",
    "(source_file (comment) (expression_statement (simple_name)))"
)]
fn test_parses_to(#[case] source: &str, #[case] expected: &str) {
    let tree = parse(source);
    assert_eq!(tree.to_sexp(), expected);
    assert!(!tree.has_error(), "unexpected errors: {:?}", tree.errors());
}

// ============================================================================
// Malformed input
// ============================================================================

#[rstest]
#[case::nameless_import("import ;", "(source_file (ERROR))")]
#[case::missing_semicolon(
    "val x = 1",
    "(source_file (variable_declaration (simple_name) (int_literal) (MISSING \";\")))"
)]
#[case::missing_operand(
    "a + ;",
    "(source_file (expression_statement (binary_expression (simple_name) (MISSING identifier))))"
)]
#[case::unclosed_call(
    "f(;",
    "(source_file (expression_statement (call_expression (simple_name) (MISSING identifier) (MISSING \")\"))))"
)]
#[case::break_at_eof("break", "(source_file (break_statement (MISSING \";\")))")]
#[case::invalid_assignment_target(
    "1 + 2 = 3;",
    "(source_file (expression_statement (assignment_expression (ERROR (binary_expression (int_literal) (int_literal))) (int_literal))))"
)]
#[case::stray_character(
    "x = 1 @ 2;",
    "(source_file (expression_statement (assignment_expression (simple_name) (int_literal)) (MISSING \";\")) (ERROR) (expression_statement (int_literal)))"
)]
#[case::deleted_token(
    "x = 1 @;",
    "(source_file (expression_statement (assignment_expression (simple_name) (int_literal)) (ERROR)))"
)]
fn test_recovers_to(#[case] source: &str, #[case] expected: &str) {
    let tree = parse(source);
    assert_eq!(tree.to_sexp(), expected);
    assert!(tree.has_error());
    assert_eq!(tree.text(), source);
}

// ============================================================================
// Fixtures
// ============================================================================

#[rstest]
#[case::imports(IMPORTS)]
#[case::recipes(RECIPES)]
#[case::functions(FUNCTIONS)]
#[case::class(CLASS)]
#[case::many_items(MANY_ITEMS)]
#[case::block_body(BLOCK_BODY)]
fn test_fixture_parses_cleanly(#[case] source: &str) {
    let tree = parse(source);
    assert!(!tree.has_error(), "{}\n{:?}", tree.to_sexp(), tree.errors());
    assert_eq!(tree.text(), source);
}

#[test]
fn test_recipes_top_level_shape() {
    let tree = parse(RECIPES);
    let kinds: Vec<&str> = tree
        .root_node()
        .named_children()
        .map(|child| child.kind_name())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "preprocessor",
            "import_statement",
            "variable_declaration",
            "variable_declaration",
            "comment",
            "expression_statement",
            "expression_statement",
            "foreach_statement",
        ]
    );
}

#[test]
fn test_broken_fixture_keeps_every_byte() {
    let tree = parse(BROKEN);
    assert!(tree.has_error());
    assert_eq!(tree.text(), BROKEN);
    assert!(sexp(BROKEN).starts_with("(source_file "));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let source = format!("x = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    let tree = parse(&source);
    assert_eq!(tree.text(), source);
    assert!(tree.has_error());
}
