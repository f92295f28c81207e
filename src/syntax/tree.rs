//! The syntax tree handed back by a parse
//!
//! A [`SyntaxTree`] owns an immutable rowan green tree plus the grammar it was
//! parsed with. It shares nothing with the [`Parser`](crate::Parser) that
//! built it. Cloning is cheap: clones share the green tree, so an old tree
//! kept for incremental reparsing costs no extra memory for unchanged
//! subtrees.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rowan::{GreenNode, TextSize};

use super::cursor::TreeCursor;
use super::edit::InputEdit;
use super::node::Node;
use super::{changes, diagnostics, sexp};
use crate::base::{LineIndex, Point};
use crate::error::Error;
use crate::grammar::{Grammar, SyntaxNode};
use crate::parser::SyntaxError;

#[derive(Clone)]
pub struct SyntaxTree {
    green: GreenNode,
    grammar: Arc<Grammar>,
    edits: Vec<InputEdit>,
    lines: Arc<OnceLock<LineIndex>>,
}

impl SyntaxTree {
    pub(crate) fn new(green: GreenNode, grammar: Arc<Grammar>) -> Self {
        Self {
            green,
            grammar,
            edits: Vec::new(),
            lines: Arc::default(),
        }
    }

    /// The root node, spanning the whole source.
    pub fn root_node(&self) -> Node<'_> {
        Node::root(self, SyntaxNode::new_root(self.green.clone()))
    }

    /// A cursor positioned on the root node.
    pub fn walk(&self) -> TreeCursor<'_> {
        self.root_node().walk()
    }

    /// Records an edit made to the source since this tree was parsed.
    ///
    /// Spans of every node after the edit shift by its length change; the
    /// structure is untouched until the tree is passed to
    /// [`Parser::parse`](crate::Parser::parse) as the previous tree.
    pub fn edit(&mut self, edit: &InputEdit) -> Result<(), Error> {
        edit.validate(self.len())?;
        self.edits.try_reserve(1)?;
        self.edits.push(*edit);
        Ok(())
    }

    /// Edits recorded since the tree was parsed, oldest first.
    pub fn edits(&self) -> &[InputEdit] {
        &self.edits
    }

    /// Byte length of the source this tree currently describes, that is the
    /// parsed text with every recorded edit applied.
    pub fn len(&self) -> usize {
        self.edits
            .iter()
            .fold(usize::from(self.text_len()), |len, edit| {
                len - edit.old_end_byte + edit.new_end_byte
            })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text that was parsed. Edits recorded afterwards are not applied.
    pub fn text(&self) -> String {
        SyntaxNode::new_root(self.green.clone()).text().to_string()
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    /// Every ERROR and MISSING node, in source order.
    pub fn errors(&self) -> Vec<SyntaxError> {
        diagnostics::collect(self.root_node())
    }

    pub fn has_error(&self) -> bool {
        self.root_node().has_error()
    }

    /// Byte ranges of `other` whose structure differs from this tree.
    ///
    /// `self` is normally the old tree (with its edits recorded) and `other`
    /// the tree reparsed from it.
    pub fn changed_ranges(&self, other: &SyntaxTree) -> Vec<std::ops::Range<usize>> {
        changes::changed_ranges(self, other)
    }

    /// Canonical parenthesized form of the whole tree.
    pub fn to_sexp(&self) -> String {
        sexp::to_sexp(&self.root_node())
    }

    /// The underlying green tree.
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    // =========================================================================
    // Span mapping
    // =========================================================================

    pub(crate) fn text_len(&self) -> TextSize {
        self.green.text_len()
    }

    /// Maps an offset in the parsed text through the recorded edits.
    pub(crate) fn map_offset(&self, offset: TextSize) -> usize {
        self.edits
            .iter()
            .fold(usize::from(offset), |offset, edit| edit.map_offset(offset))
    }

    pub(crate) fn map_point(&self, offset: TextSize) -> Point {
        let lines = self.lines.get_or_init(|| LineIndex::new(&self.text()));
        let mut point = lines.point(offset);
        let mut offset = usize::from(offset);
        for edit in &self.edits {
            point = edit.map_point(offset, point);
            offset = edit.map_offset(offset);
        }
        point
    }

    /// True if an edit touches the parsed-text range `start..end`.
    pub(crate) fn range_has_changes(&self, start: TextSize, end: TextSize) -> bool {
        let (mut start, mut end) = (usize::from(start), usize::from(end));
        for edit in &self.edits {
            if edit.touches(start, end) {
                return true;
            }
            start = edit.map_offset(start);
            end = edit.map_offset(end);
        }
        false
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("grammar", &self.grammar.name())
            .field("len", &self.len())
            .field("edits", &self.edits.len())
            .finish()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sexp())
    }
}
