//! Grammar rules for ZenScript
//!
//! Recursive descent over a [`RuleParser`](super::rule_parser::RuleParser):
//! - `items` - top-level items, declarations and class members
//! - `statements` - statements and blocks
//! - `expressions` - Pratt expression parser driven by the grammar's operator table
//! - `types` - type expressions
//!
//! Every rule is a pure function of the tokens from its first token on. No
//! rule depends on what surrounds it, which is what lets old subtrees be
//! spliced into a new tree unchanged.

pub(crate) mod expressions;
pub(crate) mod items;
pub(crate) mod statements;
pub(crate) mod types;

use super::rule_parser::RuleParser;
use crate::grammar::SyntaxKind::*;
use crate::grammar::TokenSet;

pub(crate) const NAME_FIRST: TokenSet = TokenSet::new(&[IDENT, TO_KW]);

pub(crate) const LITERALS: TokenSet = TokenSet::new(&[
    INT_LITERAL,
    FLOAT_LITERAL,
    STRING_LITERAL,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
]);

pub(crate) const EXPR_FIRST: TokenSet = NAME_FIRST.union(LITERALS).union(TokenSet::new(&[
    UNTERMINATED_STRING,
    L_PAREN,
    L_BRACKET,
    L_BRACE,
    LT,
    BANG,
    MINUS,
    FUNCTION_KW,
]));

pub(crate) const DECLARATION_MODIFIERS: TokenSet =
    TokenSet::new(&[VAR_KW, VAL_KW, STATIC_KW, GLOBAL_KW]);

pub(crate) const STMT_FIRST: TokenSet =
    EXPR_FIRST.union(DECLARATION_MODIFIERS).union(TokenSet::new(&[
        RETURN_KW,
        BREAK_KW,
        CONTINUE_KW,
        IF_KW,
        FOR_KW,
        WHILE_KW,
        SEMICOLON,
    ]));

pub(crate) const ITEM_FIRST: TokenSet =
    STMT_FIRST.union(TokenSet::new(&[IMPORT_KW, EXPAND_KW, ZEN_CLASS_KW]));

pub(crate) const STMT_RECOVERY: TokenSet = STMT_FIRST.union(TokenSet::new(&[R_BRACE]));

pub(crate) const MEMBER_FIRST: TokenSet = TokenSet::new(&[
    FUNCTION_KW,
    STATIC_KW,
    VAR_KW,
    VAL_KW,
    ZEN_CONSTRUCTOR_KW,
    OPERATOR_KW,
]);

pub(crate) const MEMBER_RECOVERY: TokenSet = MEMBER_FIRST.union(TokenSet::new(&[R_BRACE]));

/// Tokens `expect` never deletes to reach the token it wants.
pub(crate) const NEVER_DELETE: TokenSet = TokenSet::new(&[L_BRACE, R_BRACE, SEMICOLON]);

/// Tokens that end a bracket handler that never saw its `>`.
pub(crate) const HANDLER_STOP: TokenSet = TokenSet::new(&[SEMICOLON, L_BRACE, R_BRACE]);

/// Where an operand is missing rather than malformed: closers, separators,
/// operators and statement keywords are left for the enclosing rule.
pub(crate) const OPERAND_STOP: TokenSet = TokenSet::new(&[
    SEMICOLON,
    R_PAREN,
    R_BRACKET,
    R_BRACE,
    COMMA,
    COLON,
    QUESTION,
    DOT,
    DOT_DOT,
    AS_KW,
    INSTANCEOF_KW,
    IN_KW,
    HAS_KW,
    ELSE_KW,
    RETURN_KW,
    BREAK_KW,
    CONTINUE_KW,
    IF_KW,
    FOR_KW,
    WHILE_KW,
    VAR_KW,
    VAL_KW,
    STATIC_KW,
    GLOBAL_KW,
    IMPORT_KW,
    EXPAND_KW,
    ZEN_CLASS_KW,
    EQ,
    EQ_EQ,
    BANG_EQ,
    LT_EQ,
    GT,
    GT_EQ,
    PLUS,
    STAR,
    SLASH,
    PERCENT,
    TILDE,
    CARET,
    PIPE,
    AMP,
    AMP_AMP,
    PIPE_PIPE,
    PLUS_EQ,
    MINUS_EQ,
    TILDE_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    PIPE_EQ,
    AMP_EQ,
    CARET_EQ,
]);

// =============================================================================
// Shared rules
// =============================================================================

/// simple_name = identifier | 'to'
pub(crate) fn parse_simple_name(p: &mut RuleParser<'_>) {
    if p.at_set(NAME_FIRST) {
        p.start_node(SIMPLE_NAME);
        p.bump();
        p.finish_node();
    } else {
        p.missing(IDENT);
    }
}

/// qualified_name = simple_name ('.' simple_name)*
pub(crate) fn parse_qualified_name(p: &mut RuleParser<'_>) {
    p.start_node(QUALIFIED_NAME);
    parse_simple_name(p);
    while p.eat(DOT) {
        parse_simple_name(p);
    }
    p.finish_node();
}

/// parameter_list = '(' (parameter (',' parameter)*)? ')'
pub(crate) fn parse_parameter_list(p: &mut RuleParser<'_>) {
    p.start_node(PARAMETER_LIST);
    p.expect(L_PAREN);
    while !p.at(R_PAREN) && !p.at_eof() {
        if p.at_set(NAME_FIRST) || p.at(ELLIPSIS) {
            parse_parameter(p);
        } else if p.at_set(STMT_RECOVERY) {
            break;
        } else {
            p.error_recover(TokenSet::new(&[COMMA, R_PAREN, IDENT, ELLIPSIS, L_BRACE, SEMICOLON]));
            continue;
        }
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(R_PAREN);
    p.finish_node();
}

/// parameter = '...'? simple_name ('as' type)? ('=' expression)?
fn parse_parameter(p: &mut RuleParser<'_>) {
    p.start_node(PARAMETER);
    p.eat(ELLIPSIS);
    parse_simple_name(p);
    if p.eat(AS_KW) {
        types::parse_type(p);
    }
    if p.eat(EQ) {
        expressions::parse_expression(p);
    }
    p.finish_node();
}

