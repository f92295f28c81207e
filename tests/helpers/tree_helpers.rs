//! Parse and compare helpers.

use std::sync::Arc;

use once_cell::sync::Lazy;
use zensyn::{Grammar, InputEdit, Node, Parser, SyntaxTree};

/// One grammar table shared by every fresh parse in the test run.
pub static GRAMMAR: Lazy<Arc<Grammar>> = Lazy::new(Grammar::zenscript);

pub fn parse(source: &str) -> SyntaxTree {
    Parser::new(Arc::clone(&GRAMMAR)).unwrap().parse(source, None).unwrap()
}

pub fn sexp(source: &str) -> String {
    parse(source).to_sexp()
}

/// Applies `source[range] = text` to both the source and a previous tree,
/// then reparses with `parser`. Returns the new source and tree.
pub fn edit_and_reparse(
    parser: &mut Parser,
    source: &str,
    tree: &SyntaxTree,
    range: std::ops::Range<usize>,
    text: &str,
) -> (String, SyntaxTree) {
    let edit = InputEdit::replace(source, range.clone(), text).unwrap();
    let mut old = tree.clone();
    old.edit(&edit).unwrap();
    let mut new_source = source.to_string();
    new_source.replace_range(range, text);
    let new_tree = parser.parse(&new_source, Some(&old)).unwrap();
    (new_source, new_tree)
}

/// Asserts an incremental result matches a parse from scratch.
pub fn assert_same_as_fresh(source: &str, tree: &SyntaxTree) {
    let fresh = parse(source);
    assert_eq!(tree.text(), source, "incremental tree lost text");
    assert_eq!(
        tree.to_sexp(),
        fresh.to_sexp(),
        "incremental and fresh trees differ for {source:?}"
    );
    assert_eq!(tree.errors(), fresh.errors());
}

/// Every node in pre-order, collected with a cursor.
pub fn all_nodes(tree: &SyntaxTree) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut cursor = tree.walk();
    loop {
        nodes.push(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return nodes;
            }
        }
    }
}
