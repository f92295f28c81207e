//! Parser session options

/// Options for a [`Parser`](super::Parser) session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Nesting limit for statements, expressions and types. Input nested
    /// deeper is wrapped in one ERROR node.
    pub max_depth: u32,
    /// Reuse subtrees of a previous tree (false = always parse from scratch)
    pub reuse_subtrees: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            reuse_subtrees: true,
        }
    }
}

impl ParserOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_reuse(mut self, reuse_subtrees: bool) -> Self {
        self.reuse_subtrees = reuse_subtrees;
        self
    }
}
