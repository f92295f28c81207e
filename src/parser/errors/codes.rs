//! Error code definitions for syntax diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (delimiters, semicolons)
//! - E03xx: Name errors
//! - E09xx: Generic/fallback errors

use std::fmt;

use crate::grammar::SyntaxKind;

/// Error codes for syntax diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Characters no token matches
    E0101,
    /// String literal without its closing quote
    E0102,
    /// Block comment without its closing `*/`
    E0103,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing `;`
    E0201,
    /// Missing `}`
    E0202,
    /// Missing `)`
    E0203,
    /// Missing `]`
    E0204,
    /// Bracket handler without its closing `>`
    E0205,

    // =========================================================================
    // E03xx: Names
    // =========================================================================
    /// Missing identifier
    E0301,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Input that fits nowhere in the grammar
    E0901,
    /// Some other expected token is missing
    E0902,
}

impl ErrorCode {
    /// The code for a missing token of `kind`.
    pub fn for_missing(kind: SyntaxKind) -> Self {
        match kind {
            SyntaxKind::SEMICOLON => Self::E0201,
            SyntaxKind::R_BRACE => Self::E0202,
            SyntaxKind::R_PAREN => Self::E0203,
            SyntaxKind::R_BRACKET => Self::E0204,
            SyntaxKind::GT => Self::E0205,
            SyntaxKind::IDENT => Self::E0301,
            _ => Self::E0902,
        }
    }

    /// The code for an ERROR node whose only token is `kind`.
    pub fn for_error_token(kind: SyntaxKind) -> Self {
        match kind {
            SyntaxKind::GARBAGE => Self::E0101,
            SyntaxKind::UNTERMINATED_STRING => Self::E0102,
            SyntaxKind::UNTERMINATED_COMMENT => Self::E0103,
            _ => Self::E0901,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 => {
                "structural error"
            }
            Self::E0301 => "name error",
            Self::E0901 | Self::E0902 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unclosed bracket handler",
            Self::E0301 => "missing identifier",
            Self::E0901 => "unexpected input",
            Self::E0902 => "expected token",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
