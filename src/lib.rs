//! # zensyn
//!
//! Incremental, error-tolerant parsing of ZenScript into lossless syntax
//! trees.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch     → parallel parsing of many buffers
//!   ↓
//! syntax    → SyntaxTree, Node, TreeCursor, InputEdit, diagnostics
//!   ↓
//! parser    → Parser session, logos lexer, grammar rules, incremental reparse
//!   ↓
//! grammar   → SyntaxKind, kind metadata, operator precedence table
//!   ↓
//! base      → Primitives (Point, LineIndex, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use zensyn::{Grammar, InputEdit, Parser};
//!
//! let mut parser = Parser::new(Grammar::zenscript())?;
//! let mut tree = parser.parse("val x = 1;", None)?;
//! assert_eq!(
//!     tree.to_sexp(),
//!     "(source_file (variable_declaration (simple_name) (int_literal)))"
//! );
//!
//! tree.edit(&InputEdit::replace("val x = 1;", 8..9, "42")?)?;
//! let tree = parser.parse("val x = 42;", Some(&tree))?;
//! assert!(!tree.has_error());
//! # Ok::<(), zensyn::Error>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → grammar → parser → syntax → batch)
// ============================================================================

/// Foundation types: Point, LineIndex, TextRange
pub mod base;

/// Grammar table: kinds, metadata, operator precedence
pub mod grammar;

/// Parser: Logos lexer, recursive-descent rules, incremental reparse
pub mod parser;

/// Syntax: trees, nodes, cursors, edits
pub mod syntax;

mod batch;
mod error;

pub use base::{LineIndex, Point, TextRange, TextSize};
pub use batch::parse_batch;
pub use error::Error;
pub use grammar::{Grammar, SyntaxKind};
pub use parser::{
    ErrorCode, Parser, ParserOptions, ReuseStats, ReuseStrategy, Severity, SyntaxError,
};
pub use syntax::{InputEdit, Node, SyntaxTree, TreeCursor};
