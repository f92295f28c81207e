//! Operator precedence and associativity.
//!
//! Levels are listed lowest first. Binding powers are derived from the level
//! so that left-associative operators bind tighter on their right side.

use super::syntax_kind::SyntaxKind::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Assign = 1,
    Conditional,
    OrOr,
    AndAnd,
    Or,
    Xor,
    And,
    Compare,
    Add,
    Mul,
    Unary,
    As,
    Range,
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// One entry of the infix table: what a binary operator token builds and
/// how tightly it binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixOp {
    pub node: SyntaxKind,
    pub precedence: Precedence,
    pub assoc: Assoc,
}

impl InfixOp {
    const fn new(node: SyntaxKind, precedence: Precedence, assoc: Assoc) -> Self {
        Self {
            node,
            precedence,
            assoc,
        }
    }

    /// `(left, right)` binding powers.
    pub fn binding_power(self) -> (u8, u8) {
        let base = self.precedence as u8 * 2;
        match self.assoc {
            Assoc::Left => (base, base + 1),
            Assoc::Right => (base, base - 1),
        }
    }
}

/// Binding power of a precedence level used as the floor for its operand.
pub fn operand_power(precedence: Precedence) -> u8 {
    precedence as u8 * 2
}

/// Every infix operator in the ZenScript grammar.
pub(super) const INFIX_OPERATORS: &[(SyntaxKind, InfixOp)] = &[
    (EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (PLUS_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (MINUS_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (TILDE_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (STAR_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (SLASH_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (PERCENT_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (PIPE_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (AMP_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (CARET_EQ, InfixOp::new(ASSIGNMENT_EXPRESSION, Precedence::Assign, Assoc::Right)),
    (QUESTION, InfixOp::new(CONDITIONAL_EXPRESSION, Precedence::Conditional, Assoc::Right)),
    (PIPE_PIPE, InfixOp::new(LOGICAL_EXPRESSION, Precedence::OrOr, Assoc::Left)),
    (AMP_AMP, InfixOp::new(LOGICAL_EXPRESSION, Precedence::AndAnd, Assoc::Left)),
    (PIPE, InfixOp::new(BINARY_EXPRESSION, Precedence::Or, Assoc::Left)),
    (CARET, InfixOp::new(BINARY_EXPRESSION, Precedence::Xor, Assoc::Left)),
    (AMP, InfixOp::new(BINARY_EXPRESSION, Precedence::And, Assoc::Left)),
    (EQ_EQ, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (BANG_EQ, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (LT, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (LT_EQ, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (GT, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (GT_EQ, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (IN_KW, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (HAS_KW, InfixOp::new(COMPARE_EXPRESSION, Precedence::Compare, Assoc::Left)),
    (TO_KW, InfixOp::new(INT_RANGE_EXPRESSION, Precedence::Range, Assoc::Left)),
    (DOT_DOT, InfixOp::new(INT_RANGE_EXPRESSION, Precedence::Range, Assoc::Left)),
    (PLUS, InfixOp::new(BINARY_EXPRESSION, Precedence::Add, Assoc::Left)),
    (MINUS, InfixOp::new(BINARY_EXPRESSION, Precedence::Add, Assoc::Left)),
    (TILDE, InfixOp::new(BINARY_EXPRESSION, Precedence::Add, Assoc::Left)),
    (STAR, InfixOp::new(BINARY_EXPRESSION, Precedence::Mul, Assoc::Left)),
    (SLASH, InfixOp::new(BINARY_EXPRESSION, Precedence::Mul, Assoc::Left)),
    (PERCENT, InfixOp::new(BINARY_EXPRESSION, Precedence::Mul, Assoc::Left)),
];

/// Prefix operators and the node they build.
pub(super) const PREFIX_OPERATORS: &[(SyntaxKind, SyntaxKind)] =
    &[(BANG, UNARY_EXPRESSION), (MINUS, UNARY_EXPRESSION)];

/// Postfix operators: type tests and casts, then member, call and index.
pub(super) const POSTFIX_OPERATORS: &[(SyntaxKind, SyntaxKind, Precedence)] = &[
    (AS_KW, TYPE_CAST_EXPRESSION, Precedence::As),
    (INSTANCEOF_KW, INSTANCEOF_EXPRESSION, Precedence::As),
    (DOT, MEMBER_ACCESS_EXPRESSION, Precedence::Postfix),
    (L_PAREN, CALL_EXPRESSION, Precedence::Postfix),
    (L_BRACKET, MEMBER_INDEX_EXPRESSION, Precedence::Postfix),
];
