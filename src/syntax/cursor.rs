//! Stateful tree walking
//!
//! A [`TreeCursor`] moves over the same visible nodes [`Node`] exposes but
//! never above the node it was created on.

use super::node::Node;

#[derive(Clone)]
pub struct TreeCursor<'tree> {
    node: Node<'tree>,
    depth: u32,
}

impl<'tree> TreeCursor<'tree> {
    pub fn new(node: Node<'tree>) -> Self {
        Self { node, depth: 0 }
    }

    pub fn node(&self) -> Node<'tree> {
        self.node.clone()
    }

    /// Steps below the node the cursor started on.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn goto_first_child(&mut self) -> bool {
        let child = self.node.child(0);
        self.descend(child)
    }

    pub fn goto_last_child(&mut self) -> bool {
        let child = self.node.children().last();
        self.descend(child)
    }

    /// Moves to the first child that ends after `byte`; returns its index.
    pub fn goto_first_child_for_byte(&mut self, byte: usize) -> Option<usize> {
        let found = self
            .node
            .children()
            .enumerate()
            .find(|(_, child)| child.end_byte() > byte);
        let (index, child) = found?;
        self.descend(Some(child));
        Some(index)
    }

    pub fn goto_parent(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        match self.node.parent() {
            Some(parent) => {
                self.node = parent;
                self.depth -= 1;
                true
            }
            None => false,
        }
    }

    pub fn goto_next_sibling(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        match self.node.next_sibling() {
            Some(sibling) => {
                self.node = sibling;
                true
            }
            None => false,
        }
    }

    pub fn goto_previous_sibling(&mut self) -> bool {
        if self.depth == 0 {
            return false;
        }
        match self.node.prev_sibling() {
            Some(sibling) => {
                self.node = sibling;
                true
            }
            None => false,
        }
    }

    /// Restarts the walk at `node`.
    pub fn reset(&mut self, node: Node<'tree>) {
        self.node = node;
        self.depth = 0;
    }

    fn descend(&mut self, child: Option<Node<'tree>>) -> bool {
        match child {
            Some(child) => {
                self.node = child;
                self.depth += 1;
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for TreeCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeCursor")
            .field("node", &self.node)
            .field("depth", &self.depth)
            .finish()
    }
}
