//! The ZenScript grammar table.
//!
//! A [`Grammar`] is built once, wrapped in an `Arc`, and handed to every
//! [`Parser`](crate::Parser) that should speak the language. It is never
//! mutated after construction, so any number of parsers on any number of
//! threads may share it.
//!
//! The table owns:
//! - kind metadata (display names, named/anonymous/hidden, extras)
//! - a reverse name lookup
//! - the operator precedence table the expression parser is driven by

mod precedence;
mod syntax_kind;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

pub use precedence::{Assoc, InfixOp, Precedence, operand_power};
pub use syntax_kind::{
    SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenSet, Visibility, ZenLanguage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub name: &'static str,
    pub visibility: Visibility,
    pub extra: bool,
}

/// Immutable language table shared by parsers and trees.
#[derive(Debug)]
pub struct Grammar {
    name: SmolStr,
    kinds: Vec<KindInfo>,
    named: FxHashMap<&'static str, SyntaxKind>,
    anonymous: FxHashMap<&'static str, SyntaxKind>,
    infix: FxHashMap<SyntaxKind, InfixOp>,
    prefix: FxHashMap<SyntaxKind, SyntaxKind>,
    postfix: FxHashMap<SyntaxKind, (SyntaxKind, Precedence)>,
}

impl Grammar {
    /// Builds the ZenScript table.
    pub fn zenscript() -> Arc<Grammar> {
        let kinds: Vec<KindInfo> = (0..SyntaxKind::__LAST as u16)
            .filter_map(SyntaxKind::from_raw)
            .map(|kind| KindInfo {
                name: kind.display_name(),
                visibility: kind.visibility(),
                extra: kind.is_extra(),
            })
            .collect();

        let mut named = FxHashMap::default();
        let mut anonymous = FxHashMap::default();
        for (raw, info) in kinds.iter().enumerate() {
            let Some(kind) = SyntaxKind::from_raw(raw as u16) else {
                continue;
            };
            match info.visibility {
                Visibility::Named => named.entry(info.name).or_insert(kind),
                Visibility::Anonymous => anonymous.entry(info.name).or_insert(kind),
                Visibility::Hidden => continue,
            };
        }

        Arc::new(Grammar {
            name: SmolStr::new_static("zenscript"),
            kinds,
            named,
            anonymous,
            infix: precedence::INFIX_OPERATORS.iter().copied().collect(),
            prefix: precedence::PREFIX_OPERATORS.iter().copied().collect(),
            postfix: precedence::POSTFIX_OPERATORS
                .iter()
                .map(|&(token, node, prec)| (token, (node, prec)))
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of kinds (tokens and nodes) the grammar knows.
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn kind_info(&self, kind: SyntaxKind) -> KindInfo {
        self.kinds[kind as usize]
    }

    pub fn kind_name(&self, kind: SyntaxKind) -> &'static str {
        self.kind_info(kind).name
    }

    pub fn is_named(&self, kind: SyntaxKind) -> bool {
        self.kind_info(kind).visibility == Visibility::Named
    }

    pub fn is_extra(&self, kind: SyntaxKind) -> bool {
        self.kind_info(kind).extra
    }

    /// Looks a kind up by display name. `named` picks between e.g. the
    /// `true` literal node and a same-named anonymous keyword.
    pub fn kind_for_name(&self, name: &str, named: bool) -> Option<SyntaxKind> {
        let table = if named { &self.named } else { &self.anonymous };
        table.get(name).copied()
    }

    pub fn infix_operator(&self, token: SyntaxKind) -> Option<InfixOp> {
        self.infix.get(&token).copied()
    }

    pub fn prefix_operator(&self, token: SyntaxKind) -> Option<SyntaxKind> {
        self.prefix.get(&token).copied()
    }

    pub fn postfix_operator(&self, token: SyntaxKind) -> Option<(SyntaxKind, Precedence)> {
        self.postfix.get(&token).copied()
    }
}
