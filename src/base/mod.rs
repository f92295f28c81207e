//! Foundation types shared by the grammar, parser and tree layers.
//!
//! - [`TextRange`], [`TextSize`] - byte offsets into a source buffer
//! - [`Point`] - zero-based row/column positions (columns count bytes)
//! - [`LineIndex`] - offset to point conversion for one buffer
//!
//! This module has NO dependencies on other zensyn modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::Point;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
