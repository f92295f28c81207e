//! Syntax kinds for the Rowan-based CST
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexer) and node kinds
//! (from the parser). Logos derives token recognition; node kinds and
//! synthesized tokens carry no token/regex attributes.
//! `ZenLanguage` implements Rowan's `Language` trait for tree construction.

use logos::Logos;

/// All syntax kinds (tokens and nodes) in ZenScript
///
/// Tokens come first and must stay below [`TokenSet`]'s capacity, then nodes,
/// then the `__LAST` sentinel used for bounds checks.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    #[regex(r"\s+")]
    WHITESPACE = 0,
    #[regex(r"//[^\n]*")]
    COMMENT,
    #[regex(r"#[^\n]*")]
    PREPROCESSOR,
    /// `/*` without a closing `*/`; runs to the end of input.
    UNTERMINATED_COMMENT,

    // =========================================================================
    // LEXICAL ERRORS
    // =========================================================================
    /// Run of characters no token matches.
    GARBAGE,
    /// Quote without a closing quote; runs to the end of input.
    UNTERMINATED_STRING,

    // Openers the lexer finishes by hand; never stored in a tree.
    #[token("\"")]
    DOUBLE_QUOTE,
    #[token("'")]
    SINGLE_QUOTE,
    #[token("/*")]
    COMMENT_OPEN,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{L}_$][\p{L}\p{Nd}¢_$]*")]
    IDENT,
    #[regex(r"0|[1-9][0-9]*|0x[0-9a-fA-F]+")]
    INT_LITERAL,
    #[regex(r"(0|[1-9][0-9]*)\.[0-9]+([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"(0|[1-9][0-9]*)[eE][+-]?[0-9]+[fF]?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fF]?")]
    FLOAT_LITERAL,
    STRING_LITERAL,
    /// Raw text between the angle brackets of `<item:name>`.
    HANDLER_CONTENT,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("import")]
    IMPORT_KW,
    #[token("as")]
    AS_KW,
    #[token("function")]
    FUNCTION_KW,
    #[token("static")]
    STATIC_KW,
    #[token("global")]
    GLOBAL_KW,
    #[token("var")]
    VAR_KW,
    #[token("val")]
    VAL_KW,
    #[token("zenConstructor")]
    ZEN_CONSTRUCTOR_KW,
    #[token("$expand")]
    EXPAND_KW,
    #[token("operator")]
    OPERATOR_KW,
    #[token("zenClass")]
    ZEN_CLASS_KW,
    #[token("extends")]
    EXTENDS_KW,
    #[token("return")]
    RETURN_KW,
    #[token("break")]
    BREAK_KW,
    #[token("continue")]
    CONTINUE_KW,
    #[token("if")]
    IF_KW,
    #[token("else")]
    ELSE_KW,
    #[token("for")]
    FOR_KW,
    #[token("in")]
    IN_KW,
    #[token("while")]
    WHILE_KW,
    #[token("instanceof")]
    INSTANCEOF_KW,
    #[token("to")]
    TO_KW,
    #[token("has")]
    HAS_KW,
    #[token("true")]
    TRUE_KW,
    #[token("false")]
    FALSE_KW,
    #[token("null")]
    NULL_KW,

    // Primitive types
    #[token("any")]
    ANY_KW,
    #[token("byte")]
    BYTE_KW,
    #[token("short")]
    SHORT_KW,
    #[token("int")]
    INT_KW,
    #[token("long")]
    LONG_KW,
    #[token("float")]
    FLOAT_KW,
    #[token("double")]
    DOUBLE_KW,
    #[token("bool")]
    BOOL_KW,
    #[token("void")]
    VOID_KW,
    #[token("string")]
    STRING_KW,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    L_BRACE,
    #[token("}")]
    R_BRACE,
    #[token("[")]
    L_BRACKET,
    #[token("]")]
    R_BRACKET,
    #[token("(")]
    L_PAREN,
    #[token(")")]
    R_PAREN,
    #[token(";")]
    SEMICOLON,
    #[token(":")]
    COLON,
    #[token(",")]
    COMMA,
    #[token(".")]
    DOT,
    #[token("..")]
    DOT_DOT,
    #[token("...")]
    ELLIPSIS,
    #[token("?")]
    QUESTION,
    #[token("$", priority = 3)]
    DOLLAR,

    // Comparison
    #[token("=")]
    EQ,
    #[token("==")]
    EQ_EQ,
    #[token("!=")]
    BANG_EQ,
    #[token("<")]
    LT,
    #[token("<=")]
    LT_EQ,
    #[token(">")]
    GT,
    #[token(">=")]
    GT_EQ,

    // Arithmetic and logic
    #[token("+")]
    PLUS,
    #[token("-")]
    MINUS,
    #[token("*")]
    STAR,
    #[token("/")]
    SLASH,
    #[token("%")]
    PERCENT,
    #[token("~")]
    TILDE,
    #[token("^")]
    CARET,
    #[token("|")]
    PIPE,
    #[token("&")]
    AMP,
    #[token("!")]
    BANG,
    #[token("&&")]
    AMP_AMP,
    #[token("||")]
    PIPE_PIPE,

    // Compound assignment
    #[token("+=")]
    PLUS_EQ,
    #[token("-=")]
    MINUS_EQ,
    #[token("~=")]
    TILDE_EQ,
    #[token("*=")]
    STAR_EQ,
    #[token("/=")]
    SLASH_EQ,
    #[token("%=")]
    PERCENT_EQ,
    #[token("|=")]
    PIPE_EQ,
    #[token("&=")]
    AMP_EQ,
    #[token("^=")]
    CARET_EQ,

    // =========================================================================
    // NODES - top level
    // =========================================================================
    SOURCE_FILE,
    IMPORT_STATEMENT,
    FUNCTION_DECLARATION,
    EXPAND_FUNCTION_DECLARATION,
    CLASS_DECLARATION,
    CLASS_NAME,
    CLASS_BODY,
    FIELD_DECLARATION,
    CONSTRUCTOR_DECLARATION,
    OPERATOR_FUNCTION_DECLARATION,
    PARAMETER_LIST,
    PARAMETER,
    FUNCTION_BODY,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    BLOCK_STATEMENT,
    RETURN_STATEMENT,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    IF_STATEMENT,
    FOREACH_STATEMENT,
    WHILE_STATEMENT,
    VARIABLE_DECLARATION,
    EXPRESSION_STATEMENT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    PARENS_EXPRESSION,
    FUNCTION_EXPRESSION,
    BRACKET_HANDLER_EXPRESSION,
    ARRAY_LITERAL,
    MAP_LITERAL,
    MAP_ENTRY,
    INSTANCEOF_EXPRESSION,
    TYPE_CAST_EXPRESSION,
    CALL_EXPRESSION,
    MEMBER_INDEX_EXPRESSION,
    INT_RANGE_EXPRESSION,
    MEMBER_ACCESS_EXPRESSION,
    MEMBER_NAME,
    UNARY_EXPRESSION,
    BINARY_EXPRESSION,
    COMPARE_EXPRESSION,
    LOGICAL_EXPRESSION,
    CONDITIONAL_EXPRESSION,
    ASSIGNMENT_EXPRESSION,

    // =========================================================================
    // NODES - names and types
    // =========================================================================
    SIMPLE_NAME,
    QUALIFIED_NAME,
    PRIMITIVE_TYPE,
    CLASS_TYPE,
    FUNCTION_TYPE,
    LIST_TYPE,
    ARRAY_TYPE,
    MAP_TYPE,
    INTERSECTION_TYPE,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Input the grammar could not place.
    ERROR,
    /// Zero-width stand-in for a required token; wraps one empty token of the
    /// expected kind.
    MISSING,

    // Must be last - used for bounds checking in `from_raw`
    #[doc(hidden)]
    __LAST,
}

/// How a kind shows up in the public tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Printed by name: `(simple_name)`.
    Named,
    /// Keywords and punctuation; only shown quoted when missing.
    Anonymous,
    /// Structural tokens callers normally never see by name.
    Hidden,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            WHITESPACE | COMMENT | PREPROCESSOR | UNTERMINATED_COMMENT
        )
    }

    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < (SOURCE_FILE as u16)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (IMPORT_KW as u16..=STRING_KW as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_primitive_type(self) -> bool {
        (ANY_KW as u16..=STRING_KW as u16).contains(&(self as u16))
    }

    /// Converts a raw discriminant, `None` when out of range.
    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        if raw < __LAST as u16 {
            // Safety: SyntaxKind is repr(u16) with contiguous discriminants
            // and the bound was checked above
            Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
        } else {
            None
        }
    }

    /// Display name used when stringifying trees.
    pub fn display_name(self) -> &'static str {
        match self {
            WHITESPACE => "whitespace",
            COMMENT => "comment",
            PREPROCESSOR => "preprocessor",
            UNTERMINATED_COMMENT => "unterminated_comment",
            GARBAGE => "garbage",
            UNTERMINATED_STRING => "unterminated_string",
            DOUBLE_QUOTE => "\"",
            SINGLE_QUOTE => "'",
            COMMENT_OPEN => "/*",
            IDENT => "identifier",
            INT_LITERAL => "int_literal",
            FLOAT_LITERAL => "float_literal",
            STRING_LITERAL => "string_literal",
            HANDLER_CONTENT => "bracket_handler_content",

            IMPORT_KW => "import",
            AS_KW => "as",
            FUNCTION_KW => "function",
            STATIC_KW => "static",
            GLOBAL_KW => "global",
            VAR_KW => "var",
            VAL_KW => "val",
            ZEN_CONSTRUCTOR_KW => "zenConstructor",
            EXPAND_KW => "$expand",
            OPERATOR_KW => "operator",
            ZEN_CLASS_KW => "zenClass",
            EXTENDS_KW => "extends",
            RETURN_KW => "return",
            BREAK_KW => "break",
            CONTINUE_KW => "continue",
            IF_KW => "if",
            ELSE_KW => "else",
            FOR_KW => "for",
            IN_KW => "in",
            WHILE_KW => "while",
            INSTANCEOF_KW => "instanceof",
            TO_KW => "to",
            HAS_KW => "has",
            TRUE_KW => "true",
            FALSE_KW => "false",
            NULL_KW => "null",
            ANY_KW => "any",
            BYTE_KW => "byte",
            SHORT_KW => "short",
            INT_KW => "int",
            LONG_KW => "long",
            FLOAT_KW => "float",
            DOUBLE_KW => "double",
            BOOL_KW => "bool",
            VOID_KW => "void",
            STRING_KW => "string",

            L_BRACE => "{",
            R_BRACE => "}",
            L_BRACKET => "[",
            R_BRACKET => "]",
            L_PAREN => "(",
            R_PAREN => ")",
            SEMICOLON => ";",
            COLON => ":",
            COMMA => ",",
            DOT => ".",
            DOT_DOT => "..",
            ELLIPSIS => "...",
            QUESTION => "?",
            DOLLAR => "$",
            EQ => "=",
            EQ_EQ => "==",
            BANG_EQ => "!=",
            LT => "<",
            LT_EQ => "<=",
            GT => ">",
            GT_EQ => ">=",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            PERCENT => "%",
            TILDE => "~",
            CARET => "^",
            PIPE => "|",
            AMP => "&",
            BANG => "!",
            AMP_AMP => "&&",
            PIPE_PIPE => "||",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            TILDE_EQ => "~=",
            STAR_EQ => "*=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            PIPE_EQ => "|=",
            AMP_EQ => "&=",
            CARET_EQ => "^=",

            SOURCE_FILE => "source_file",
            IMPORT_STATEMENT => "import_statement",
            FUNCTION_DECLARATION => "function_declaration",
            EXPAND_FUNCTION_DECLARATION => "expand_function_declaration",
            CLASS_DECLARATION => "class_declaration",
            CLASS_NAME => "class_name",
            CLASS_BODY => "class_body",
            FIELD_DECLARATION => "field_declaration",
            CONSTRUCTOR_DECLARATION => "constructor_declaration",
            OPERATOR_FUNCTION_DECLARATION => "operator_function_declaration",
            PARAMETER_LIST => "parameter_list",
            PARAMETER => "parameter",
            FUNCTION_BODY => "function_body",
            BLOCK_STATEMENT => "block_statement",
            RETURN_STATEMENT => "return_statement",
            BREAK_STATEMENT => "break_statement",
            CONTINUE_STATEMENT => "continue_statement",
            IF_STATEMENT => "if_statement",
            FOREACH_STATEMENT => "foreach_statement",
            WHILE_STATEMENT => "while_statement",
            VARIABLE_DECLARATION => "variable_declaration",
            EXPRESSION_STATEMENT => "expression_statement",
            PARENS_EXPRESSION => "parens_expression",
            FUNCTION_EXPRESSION => "function_expression",
            BRACKET_HANDLER_EXPRESSION => "bracket_handler_expression",
            ARRAY_LITERAL => "array_literal",
            MAP_LITERAL => "map_literal",
            MAP_ENTRY => "map_entry",
            INSTANCEOF_EXPRESSION => "instanceof_expression",
            TYPE_CAST_EXPRESSION => "type_cast_expression",
            CALL_EXPRESSION => "call_expression",
            MEMBER_INDEX_EXPRESSION => "member_index_expression",
            INT_RANGE_EXPRESSION => "int_range_expression",
            MEMBER_ACCESS_EXPRESSION => "member_access_expression",
            MEMBER_NAME => "member_name",
            UNARY_EXPRESSION => "unary_expression",
            BINARY_EXPRESSION => "binary_expression",
            COMPARE_EXPRESSION => "compare_expression",
            LOGICAL_EXPRESSION => "logical_expression",
            CONDITIONAL_EXPRESSION => "conditional_expression",
            ASSIGNMENT_EXPRESSION => "assignment_expression",
            SIMPLE_NAME => "simple_name",
            QUALIFIED_NAME => "qualified_name",
            PRIMITIVE_TYPE => "primitive_type",
            CLASS_TYPE => "class_type",
            FUNCTION_TYPE => "function_type",
            LIST_TYPE => "list_type",
            ARRAY_TYPE => "array_type",
            MAP_TYPE => "map_type",
            INTERSECTION_TYPE => "intersection_type",
            ERROR => "ERROR",
            MISSING => "MISSING",
            __LAST => "__LAST",
        }
    }

    pub fn visibility(self) -> Visibility {
        match self {
            INT_LITERAL | FLOAT_LITERAL | STRING_LITERAL | TRUE_KW | FALSE_KW | NULL_KW
            | COMMENT | PREPROCESSOR => Visibility::Named,
            WHITESPACE | UNTERMINATED_COMMENT | GARBAGE | UNTERMINATED_STRING | DOUBLE_QUOTE
            | SINGLE_QUOTE | COMMENT_OPEN | IDENT | HANDLER_CONTENT | __LAST => Visibility::Hidden,
            kind if kind.is_token() => Visibility::Anonymous,
            _ => Visibility::Named,
        }
    }

    /// Extras may appear between any two tokens.
    pub fn is_extra(self) -> bool {
        matches!(self, COMMENT | PREPROCESSOR)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZenLanguage {}

impl rowan::Language for ZenLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Green trees are only ever built from SyntaxKind values
        SyntaxKind::from_raw(raw.0).unwrap_or(ERROR)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<ZenLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ZenLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ZenLanguage>;

/// 128-bit bitset of token kinds for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        kind < 128 && self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for raw in 0..128u16 {
            if self.0 & (1 << raw) != 0
                && let Some(kind) = SyntaxKind::from_raw(raw)
            {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}
