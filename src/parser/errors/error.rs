//! Syntax error type
//!
//! A [`SyntaxError`] describes one ERROR or MISSING node of a tree: where it
//! is, what category of problem it is, and a message naming the token
//! involved.

use std::fmt;

use rowan::TextRange;

use super::codes::ErrorCode;

/// Severity level for diagnostics. Every ERROR or MISSING node is a hard
/// error: the tree does not match the grammar there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

/// A syntax error found in a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location; empty for missing tokens
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    pub severity: Severity,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            severity: Severity::Error,
        }
    }

    /// An error carrying its code's default message.
    pub fn from_code(range: TextRange, code: ErrorCode) -> Self {
        Self::new(code.default_message(), range, code)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {:?}",
            self.severity.as_str(),
            self.code,
            self.message,
            self.range
        )
    }
}
