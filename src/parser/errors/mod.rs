//! Syntax diagnostics
//!
//! Malformed input never fails a parse; it becomes ERROR and MISSING nodes.
//! The types here describe those nodes to humans and tools:
//! - Categorized error codes for filtering and documentation
//! - Severity levels
//! - Messages naming the expected or offending token

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{Severity, SyntaxError};
