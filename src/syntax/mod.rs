//! Syntax trees and the read-only API over them
//!
//! - [`SyntaxTree`] - the parse result, with recorded edits
//! - [`Node`] - one visible node, with edit-adjusted spans
//! - [`TreeCursor`] - stateful walking
//! - [`InputEdit`] - a byte-range replacement record

mod changes;
mod cursor;
mod diagnostics;
mod edit;
mod node;
mod sexp;
mod tree;

pub use cursor::TreeCursor;
pub use edit::InputEdit;
pub use node::Node;
pub use tree::SyntaxTree;
