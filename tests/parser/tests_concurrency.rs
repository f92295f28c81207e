//! Sharing grammars and trees across threads.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use zensyn::{Grammar, Parser, SyntaxTree, parse_batch};

use crate::helpers::source_fixtures::*;
use crate::helpers::tree_helpers::parse;

fn assert_send_sync<T: Send + Sync>() {}
fn assert_send<T: Send>() {}

#[test]
fn test_thread_safety_markers() {
    assert_send_sync::<Grammar>();
    assert_send_sync::<SyntaxTree>();
    assert_send::<Parser>();
}

#[test]
fn test_one_grammar_many_parsers() {
    let grammar = Grammar::zenscript();
    let handles: Vec<_> = VALID
        .iter()
        .map(|&source| {
            let grammar = Arc::clone(&grammar);
            thread::spawn(move || {
                let mut parser = Parser::new(grammar).unwrap();
                parser.parse(source, None).unwrap().to_sexp()
            })
        })
        .collect();

    for (handle, source) in handles.into_iter().zip(VALID) {
        assert_eq!(handle.join().unwrap(), parse(source).to_sexp());
    }
}

#[test]
fn test_tree_read_from_other_threads() {
    let tree = Arc::new(parse(CLASS));
    let expected = tree.to_sexp();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || (tree.to_sexp(), tree.errors().len()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), (expected.clone(), 0));
    }
}

#[test]
fn test_tree_outlives_parser_and_moves_threads() {
    let tree = {
        let mut parser = Parser::new(Grammar::zenscript()).unwrap();
        parser.parse(FUNCTIONS, None).unwrap()
    };
    let text = thread::spawn(move || tree.text()).join().unwrap();
    assert_eq!(text, FUNCTIONS);
}

#[test]
fn test_parse_batch_matches_sequential() {
    let grammar = Grammar::zenscript();
    let sources: Vec<&str> = VALID.iter().copied().chain([BROKEN]).collect();
    let trees = parse_batch(&grammar, &sources).unwrap();
    assert_eq!(trees.len(), sources.len());
    for (tree, source) in trees.iter().zip(&sources) {
        assert_eq!(tree.to_sexp(), parse(source).to_sexp());
        assert!(Arc::ptr_eq(tree.grammar(), &grammar));
    }
}
