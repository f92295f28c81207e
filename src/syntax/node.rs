//! Read-only view of one node of a [`SyntaxTree`]
//!
//! A [`Node`] wraps a rowan element (node or token) together with the tree
//! it belongs to, so spans can be reported through the tree's recorded
//! edits and names looked up in its grammar.
//!
//! Whitespace is kept in the green tree for losslessness but is never a
//! child here. Comments and preprocessor lines are named extra leaves.
//! A MISSING placeholder shows up as a zero-width leaf of the kind that was
//! expected.

use std::fmt;
use std::ops::Range;

use rowan::{NodeOrToken, TextRange};

use super::cursor::TreeCursor;
use super::sexp;
use super::tree::SyntaxTree;
use crate::base::Point;
use crate::grammar::{SyntaxElement, SyntaxKind, SyntaxNode};

#[derive(Clone)]
pub struct Node<'tree> {
    tree: &'tree SyntaxTree,
    element: SyntaxElement,
}

fn is_visible(element: &SyntaxElement) -> bool {
    element.kind() != SyntaxKind::WHITESPACE
}

impl<'tree> Node<'tree> {
    pub(crate) fn root(tree: &'tree SyntaxTree, root: SyntaxNode) -> Self {
        Self {
            tree,
            element: NodeOrToken::Node(root),
        }
    }

    fn wrap(&self, element: SyntaxElement) -> Self {
        Self {
            tree: self.tree,
            element,
        }
    }

    /// The rowan element behind this node.
    pub fn syntax(&self) -> &SyntaxElement {
        &self.element
    }

    pub fn tree(&self) -> &'tree SyntaxTree {
        self.tree
    }

    // =========================================================================
    // Kind
    // =========================================================================

    /// The node's kind. For a MISSING placeholder, the kind of the token
    /// that was expected.
    pub fn kind(&self) -> SyntaxKind {
        match self.missing_kind() {
            Some(kind) => kind,
            None => self.element.kind(),
        }
    }

    fn missing_kind(&self) -> Option<SyntaxKind> {
        let node = self.element.as_node()?;
        if node.kind() != SyntaxKind::MISSING {
            return None;
        }
        node.first_token().map(|token| token.kind())
    }

    pub fn kind_name(&self) -> &'static str {
        self.tree.grammar().kind_name(self.kind())
    }

    pub fn is_named(&self) -> bool {
        self.is_error() || self.tree.grammar().is_named(self.kind())
    }

    pub fn is_extra(&self) -> bool {
        self.tree.grammar().is_extra(self.kind())
    }

    pub fn is_error(&self) -> bool {
        self.element.kind() == SyntaxKind::ERROR
    }

    pub fn is_missing(&self) -> bool {
        self.element.kind() == SyntaxKind::MISSING
    }

    /// True if this node is, or contains, an ERROR or MISSING node.
    pub fn has_error(&self) -> bool {
        match &self.element {
            NodeOrToken::Node(node) => node
                .descendants()
                .any(|n| matches!(n.kind(), SyntaxKind::ERROR | SyntaxKind::MISSING)),
            NodeOrToken::Token(_) => false,
        }
    }

    /// True if an edit recorded on the tree touches this node.
    pub fn has_changes(&self) -> bool {
        let range = self.element.text_range();
        self.tree.range_has_changes(range.start(), range.end())
    }

    // =========================================================================
    // Span
    // =========================================================================

    fn text_range(&self) -> TextRange {
        self.element.text_range()
    }

    fn is_root(&self) -> bool {
        self.element.parent().is_none()
    }

    /// The root always starts at byte 0, even when text was inserted there.
    pub fn start_byte(&self) -> usize {
        if self.is_root() {
            return 0;
        }
        self.tree.map_offset(self.text_range().start())
    }

    pub fn end_byte(&self) -> usize {
        if self.is_root() {
            return self.tree.len();
        }
        self.tree.map_offset(self.text_range().end())
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    pub fn start_position(&self) -> Point {
        if self.is_root() {
            return Point::default();
        }
        self.tree.map_point(self.text_range().start())
    }

    pub fn end_position(&self) -> Point {
        self.tree.map_point(self.text_range().end())
    }

    /// The node's text in `source`, which should be the text the tree
    /// currently describes (the parsed text with recorded edits applied).
    pub fn utf8_text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.byte_range()).unwrap_or("")
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Visible children in order. Empty for tokens and MISSING placeholders.
    pub fn children(&self) -> impl Iterator<Item = Node<'tree>> + '_ {
        let node = match &self.element {
            NodeOrToken::Node(node) if !self.is_missing() => Some(node.clone()),
            _ => None,
        };
        node.into_iter()
            .flat_map(|node| node.children_with_tokens())
            .filter(is_visible)
            .map(|element| self.wrap(element))
    }

    pub fn named_children(&self) -> impl Iterator<Item = Node<'tree>> + '_ {
        self.children().filter(Node::is_named)
    }

    pub fn child(&self, index: usize) -> Option<Node<'tree>> {
        self.children().nth(index)
    }

    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    pub fn named_child(&self, index: usize) -> Option<Node<'tree>> {
        self.named_children().nth(index)
    }

    pub fn named_child_count(&self) -> usize {
        self.named_children().count()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn parent(&self) -> Option<Node<'tree>> {
        self.element
            .parent()
            .map(|parent| self.wrap(NodeOrToken::Node(parent)))
    }

    pub fn next_sibling(&self) -> Option<Node<'tree>> {
        let mut next = self.element.next_sibling_or_token();
        while let Some(element) = next {
            if is_visible(&element) {
                return Some(self.wrap(element));
            }
            next = element.next_sibling_or_token();
        }
        None
    }

    pub fn prev_sibling(&self) -> Option<Node<'tree>> {
        let mut prev = self.element.prev_sibling_or_token();
        while let Some(element) = prev {
            if is_visible(&element) {
                return Some(self.wrap(element));
            }
            prev = element.prev_sibling_or_token();
        }
        None
    }

    pub fn next_named_sibling(&self) -> Option<Node<'tree>> {
        let mut next = self.next_sibling();
        while let Some(node) = next {
            if node.is_named() {
                return Some(node);
            }
            next = node.next_sibling();
        }
        None
    }

    pub fn prev_named_sibling(&self) -> Option<Node<'tree>> {
        let mut prev = self.prev_sibling();
        while let Some(node) = prev {
            if node.is_named() {
                return Some(node);
            }
            prev = node.prev_sibling();
        }
        None
    }

    /// The smallest node under this one spanning `start..end`.
    pub fn descendant_for_byte_range(&self, start: usize, end: usize) -> Option<Node<'tree>> {
        self.descendant_for_range(start, end, false)
    }

    /// The smallest named node under this one spanning `start..end`.
    pub fn named_descendant_for_byte_range(
        &self,
        start: usize,
        end: usize,
    ) -> Option<Node<'tree>> {
        self.descendant_for_range(start, end, true)
    }

    fn descendant_for_range(&self, start: usize, end: usize, named: bool) -> Option<Node<'tree>> {
        if start > end || start < self.start_byte() || end > self.end_byte() {
            return None;
        }
        let mut best = self.clone();
        let mut current = self.clone();
        loop {
            // A position on a boundary belongs to the node starting there.
            let next = current
                .children()
                .take_while(|child| child.start_byte() <= start)
                .find(|child| {
                    let range = child.byte_range();
                    end <= range.end && (range.end > start || range.start == end)
                });
            let Some(child) = next else {
                return Some(best);
            };
            if !named || child.is_named() {
                best = child.clone();
            }
            current = child;
        }
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn to_sexp(&self) -> String {
        sexp::to_sexp(self)
    }

    pub fn walk(&self) -> TreeCursor<'tree> {
        TreeCursor::new(self.clone())
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.element == other.element
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind_name(), self.byte_range())
    }
}
