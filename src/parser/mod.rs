//! Rowan-based incremental parser for ZenScript
//!
//! This module provides a lossless, incremental parser using:
//! - **logos** for fast lexing
//! - **rowan** for the concrete syntax tree
//!
//! The tree keeps every byte of the source, whitespace and comments
//! included. Malformed input never fails a parse: it becomes ERROR nodes
//! around skipped input and MISSING placeholders for expected tokens.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! RuleParser + rules → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxTree → Node / TreeCursor views with edit-adjusted spans
//! ```
//!
//! ## Incremental Reparsing
//!
//! When a tree with recorded edits is passed back in, we:
//! 1. Find the smallest block containing the change and reparse only it
//! 2. Otherwise reparse the top-level items around the change
//! 3. Reuse unchanged green nodes (they're immutable and cheap to share)

mod errors;
mod lexer;
mod options;
mod reparse;
mod rule_parser;
mod rules;

use std::sync::Arc;

use tracing::debug;

pub use errors::{ErrorCode, Severity, SyntaxError};
pub use lexer::{Lexer, Token, lex, token_text};
pub use options::ParserOptions;
pub use reparse::{ReuseStats, ReuseStrategy};

use crate::error::Error;
use crate::grammar::Grammar;
use crate::syntax::SyntaxTree;

/// Tokens reserved up front for a new session.
const INITIAL_TOKEN_CAPACITY: usize = 256;

/// A parsing session bound to one grammar.
///
/// A session holds scratch buffers that are reused from one parse to the
/// next. Trees it returns are independent of it: dropping or reusing the
/// parser never affects them.
#[derive(Debug)]
pub struct Parser {
    grammar: Arc<Grammar>,
    options: ParserOptions,
    tokens: Vec<Token>,
    last_reuse: ReuseStats,
}

impl Parser {
    pub fn new(grammar: Arc<Grammar>) -> Result<Self, Error> {
        Self::with_options(grammar, ParserOptions::default())
    }

    pub fn with_options(grammar: Arc<Grammar>, options: ParserOptions) -> Result<Self, Error> {
        let mut tokens = Vec::new();
        tokens.try_reserve(INITIAL_TOKEN_CAPACITY)?;
        debug!(grammar = grammar.name(), ?options, "parser created");
        Ok(Self {
            grammar,
            options,
            tokens,
            last_reuse: ReuseStats::default(),
        })
    }

    /// Parses `source` into a tree.
    ///
    /// With a `previous` tree whose recorded edits turn its text into
    /// `source`, unchanged subtrees are reused. Only allocation failure and
    /// sources past the 32-bit offset limit are errors; anything else
    /// yields a tree.
    pub fn parse(
        &mut self,
        source: &str,
        previous: Option<&SyntaxTree>,
    ) -> Result<SyntaxTree, Error> {
        if u32::try_from(source.len()).is_err() {
            return Err(Error::SourceTooLarge { len: source.len() });
        }
        self.tokens.clear();
        // About one token per four bytes of typical script source.
        self.tokens.try_reserve(source.len() / 4)?;

        let tokens = std::mem::take(&mut self.tokens);
        let result = reparse::reparse(&self.grammar, &self.options, source, previous, tokens);
        self.tokens = result.tokens;
        self.last_reuse = result.stats;
        Ok(SyntaxTree::new(result.green, Arc::clone(&self.grammar)))
    }

    /// Drops scratch state left by earlier parses.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.tokens.shrink_to(INITIAL_TOKEN_CAPACITY);
        self.last_reuse = ReuseStats::default();
    }

    pub fn grammar(&self) -> &Arc<Grammar> {
        &self.grammar
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ParserOptions) {
        self.options = options;
    }

    /// How the most recent parse reused the previous tree.
    pub fn last_reuse(&self) -> ReuseStats {
        self.last_reuse
    }
}
