//! Changed ranges between two trees
//!
//! Walks an old and a new tree side by side. Subtrees whose green nodes are
//! identical are skipped without looking inside, which is cheap after an
//! incremental parse because unchanged subtrees are shared, not copied.

use std::ops::Range;

use rowan::NodeOrToken;

use super::tree::SyntaxTree;
use crate::grammar::{SyntaxElement, SyntaxNode};

pub(crate) fn changed_ranges(old: &SyntaxTree, new: &SyntaxTree) -> Vec<Range<usize>> {
    let old_root = SyntaxNode::new_root(old.green().clone());
    let new_root = SyntaxNode::new_root(new.green().clone());
    let mut ranges = Vec::new();
    diff_nodes(&old_root, &new_root, &mut ranges);
    merge(ranges)
}

fn same_green(old: &SyntaxElement, new: &SyntaxElement) -> bool {
    match (old, new) {
        (NodeOrToken::Node(old), NodeOrToken::Node(new)) => {
            let (old, new) = (old.green(), new.green());
            std::ptr::eq(&*old, &*new) || *old == *new
        }
        (NodeOrToken::Token(old), NodeOrToken::Token(new)) => {
            old.kind() == new.kind() && old.text() == new.text()
        }
        _ => false,
    }
}

fn span(element: &SyntaxElement) -> Range<usize> {
    let range = element.text_range();
    usize::from(range.start())..usize::from(range.end())
}

fn diff_nodes(old: &SyntaxNode, new: &SyntaxNode, out: &mut Vec<Range<usize>>) {
    let old_children: Vec<SyntaxElement> = old.children_with_tokens().collect();
    let new_children: Vec<SyntaxElement> = new.children_with_tokens().collect();

    let prefix = old_children
        .iter()
        .zip(&new_children)
        .take_while(|(o, n)| same_green(o, n))
        .count();
    let suffix = old_children[prefix..]
        .iter()
        .rev()
        .zip(new_children[prefix..].iter().rev())
        .take_while(|(o, n)| same_green(o, n))
        .count();

    let old_middle = &old_children[prefix..old_children.len() - suffix];
    let new_middle = &new_children[prefix..new_children.len() - suffix];
    if old_middle.is_empty() && new_middle.is_empty() {
        return;
    }

    if old_middle.len() == new_middle.len() {
        for (o, n) in old_middle.iter().zip(new_middle) {
            diff_elements(o, n, out);
        }
        return;
    }

    // Children were added or removed: the whole stretch changed.
    let start = match new_middle.first() {
        Some(first) => span(first).start,
        None => new_children
            .get(prefix)
            .map(|next| span(next).start)
            .unwrap_or_else(|| usize::from(new.text_range().end())),
    };
    let end = new_middle.last().map(|last| span(last).end).unwrap_or(start);
    out.push(start..end);
}

fn diff_elements(old: &SyntaxElement, new: &SyntaxElement, out: &mut Vec<Range<usize>>) {
    if same_green(old, new) {
        return;
    }
    match (old, new) {
        (NodeOrToken::Node(o), NodeOrToken::Node(n)) if o.kind() == n.kind() => {
            diff_nodes(o, n, out)
        }
        _ => out.push(span(new)),
    }
}

/// Sorts and joins overlapping or touching ranges.
fn merge(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|range| (range.start, range.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
