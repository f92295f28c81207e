//! Incremental reparsing
//!
//! Given the previous tree and the edits recorded on it, rebuild the tree for
//! the new source while sharing as many old green subtrees as possible.
//!
//! Strategies, tried in order:
//! 1. **Block**: the change lies strictly inside the braces of a function
//!    body, class body or block. Relex and reparse just that block and swap
//!    it into the old tree.
//! 2. **Top level**: keep the leading top-level children that end well
//!    before the change, parse from there, and once a new item starts where
//!    an old one did (past the change), append the old items from there on.
//! 3. **Full**: no usable previous tree.
//!
//! Reuse is sound because every grammar rule is a pure function of the
//! tokens from its first token on, looks at most two significant tokens past
//! its own end, and the lexer never needs more than a few tokens of
//! look-behind to resynchronise.

use rowan::{GreenNode, GreenNodeData, GreenToken, NodeOrToken, TextRange, TextSize, TokenAtOffset};
use tracing::{debug, trace, warn};

use super::lexer::Token;
use super::options::ParserOptions;
use super::rule_parser::{Rule, RuleParser, parse_rule};
use super::rules;
use crate::grammar::{Grammar, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use crate::syntax::{InputEdit, SyntaxTree};

/// Raw tokens stepped back from the change before lexing restarts.
const LEXER_LOOKBEHIND: usize = 3;
/// Significant tokens a finished item may have looked at past its end, plus
/// one for safety.
const PARSER_LOOKAHEAD: usize = 3;

/// How the last parse was carried out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReuseStrategy {
    /// Parsed from scratch
    #[default]
    Full,
    /// Reparsed one block and spliced it into the old tree
    Block,
    /// Reused leading and trailing top-level items
    TopLevel,
}

/// Figures about the most recent parse of a [`Parser`](super::Parser)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReuseStats {
    pub strategy: ReuseStrategy,
    /// Old subtrees shared with the new tree
    pub reused_nodes: usize,
    /// Nodes built by this parse
    pub reparsed_nodes: usize,
    /// Bytes of source run through the lexer
    pub relexed_bytes: usize,
}

pub(crate) struct Reparse {
    pub green: GreenNode,
    pub stats: ReuseStats,
    pub tokens: Vec<Token>,
}

/// The changed region of all recorded edits, in old and new coordinates:
/// `old[start..old_end]` became `new[start..new_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChangedRegion {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

/// Folds a sequence of edits, each relative to the text after the previous
/// one, into a single region.
pub(crate) fn compose(edits: &[InputEdit]) -> Option<ChangedRegion> {
    let (first, rest) = edits.split_first()?;
    let mut region = ChangedRegion {
        start: first.start_byte,
        old_end: first.old_end_byte,
        new_end: first.new_end_byte,
    };
    for edit in rest {
        let reach = edit.old_end_byte.max(region.new_end);
        region = ChangedRegion {
            start: region.start.min(edit.start_byte),
            old_end: region.old_end + reach - region.new_end,
            new_end: edit.new_end_byte + reach - edit.old_end_byte,
        };
    }
    Some(region)
}

pub(crate) fn reparse(
    grammar: &Grammar,
    options: &ParserOptions,
    source: &str,
    previous: Option<&SyntaxTree>,
    tokens: Vec<Token>,
) -> Reparse {
    let usable = previous.filter(|_| options.reuse_subtrees).and_then(|old| {
        if !std::ptr::eq(old.grammar().as_ref(), grammar) {
            debug!("previous tree uses another grammar; parsing from scratch");
            return None;
        }
        let region = compose(old.edits())?;
        let old_len = usize::from(old.text_len());
        if region.old_end > old_len || old_len - region.old_end + region.new_end != source.len() {
            warn!(
                old_len,
                new_len = source.len(),
                ?region,
                "edit record does not match the new source; parsing from scratch"
            );
            return None;
        }
        Some((old, region))
    });

    let result = match usable {
        Some((old, region)) => {
            let old_root = SyntaxNode::new_root(old.green().clone());
            match reparse_block(grammar, options, source, &old_root, region) {
                Some((green, stats)) => Reparse { green, stats, tokens },
                None => {
                    let old = Some((&old_root, region));
                    parse_top_level(grammar, options, source, old, tokens)
                }
            }
        }
        None => parse_top_level(grammar, options, source, None, tokens),
    };

    debug!(
        strategy = ?result.stats.strategy,
        len = source.len(),
        reused = result.stats.reused_nodes,
        reparsed = result.stats.reparsed_nodes,
        relexed = result.stats.relexed_bytes,
        "parsed"
    );
    result
}

// =============================================================================
// Block reparse
// =============================================================================

fn reparse_block(
    grammar: &Grammar,
    options: &ParserOptions,
    source: &str,
    old_root: &SyntaxNode,
    region: ChangedRegion,
) -> Option<(GreenNode, ReuseStats)> {
    let start = TextSize::try_from(region.start).ok()?;
    let old_end = TextSize::try_from(region.old_end).ok()?;
    let covering = match old_root.covering_element(TextRange::new(start, old_end)) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent()?,
    };

    for node in covering.ancestors() {
        let Some(rule) = Rule::for_kind(node.kind()) else {
            continue;
        };
        if rule == Rule::SourceFile || !has_real_braces(&node) {
            continue;
        }
        let range = node.text_range();
        // Strictly inside the braces, so both stay where they were.
        if start <= range.start() || old_end >= range.end() {
            continue;
        }

        let new_end = usize::from(range.end()) - region.old_end + region.new_end;
        let new_range = TextRange::new(range.start(), TextSize::try_from(new_end).ok()?);
        // Every enclosing node accounts for at most two levels of nesting.
        let ancestors = node.ancestors().count() as u32;
        let parse = parse_rule(
            grammar,
            rule,
            source,
            new_range,
            ancestors.saturating_mul(2),
            options.max_depth,
        );
        let same_kind = parse.green.kind() == rule.kind().into();
        if !same_kind || !parse.complete || parse.peeked_past_end || parse.depth_exceeded {
            trace!(?rule, ?new_range, "block reparse rejected");
            continue;
        }

        let reparsed_nodes = count_nodes(&parse.green);
        let reused_nodes = node
            .ancestors()
            .map(|ancestor| ancestor.children().count().saturating_sub(1))
            .sum();
        trace!(?rule, ?new_range, "block reparse accepted");
        let green = node.replace_with(parse.green);
        return Some((
            green,
            ReuseStats {
                strategy: ReuseStrategy::Block,
                reused_nodes,
                reparsed_nodes,
                relexed_bytes: usize::from(new_range.len()),
            },
        ));
    }
    None
}

fn has_real_braces(node: &SyntaxNode) -> bool {
    let first = node.first_child_or_token();
    let last = node.last_child_or_token();
    matches!(&first, Some(NodeOrToken::Token(t)) if t.kind() == SyntaxKind::L_BRACE)
        && matches!(&last, Some(NodeOrToken::Token(t)) if t.kind() == SyntaxKind::R_BRACE)
}

fn count_nodes(green: &GreenNodeData) -> usize {
    1 + green
        .children()
        .filter_map(NodeOrToken::into_node)
        .map(count_nodes)
        .sum::<usize>()
}

// =============================================================================
// Top-level reuse
// =============================================================================

fn parse_top_level(
    grammar: &Grammar,
    options: &ParserOptions,
    source: &str,
    old: Option<(&SyntaxNode, ChangedRegion)>,
    tokens: Vec<Token>,
) -> Reparse {
    let old_children: Vec<SyntaxElement> = old
        .map(|(root, _)| root.children_with_tokens().collect())
        .unwrap_or_default();

    // Leading children that end before the restart point.
    let (prefix_len, restart) = match old {
        Some((root, region)) => {
            let safe = safe_restart(root, region.start);
            let prefix_len = old_children
                .iter()
                .take_while(|child| child.text_range().end() <= safe)
                .count();
            let restart = prefix_len
                .checked_sub(1)
                .map(|last| old_children[last].text_range().end())
                .unwrap_or_default();
            (prefix_len, restart)
        }
        None => (0, TextSize::default()),
    };

    // Old children an item could be spliced back onto, by old start offset.
    let splice_points: Vec<(TextSize, usize)> = old_children
        .iter()
        .enumerate()
        .skip(prefix_len)
        .filter(|(_, child)| starts_significant(child))
        .map(|(index, child)| (child.text_range().start(), index))
        .collect();

    let range = TextRange::new(restart, TextSize::of(source));
    let mut p = RuleParser::new(grammar, source, range, tokens, options.max_depth);
    let mut suffix_from = None;
    p.start_node(SyntaxKind::SOURCE_FILE);
    let stopped = rules::items::parse_items(&mut p, |offset| {
        let Some((_, region)) = old else {
            return false;
        };
        let offset = usize::from(offset);
        if offset < region.new_end {
            return false;
        }
        let Ok(old_offset) = TextSize::try_from(offset - region.new_end + region.old_end) else {
            return false;
        };
        match splice_points.binary_search_by_key(&old_offset, |&(start, _)| start) {
            Ok(found) => {
                suffix_from = Some(splice_points[found].1);
                true
            }
            Err(_) => false,
        }
    });
    if stopped.is_some() {
        p.drain_trivia();
    } else {
        p.eat_trivia();
    }
    p.finish_node();
    let relexed_bytes = usize::from(p.lexed_len());
    let (middle, tokens) = p.finish();

    let suffix_from = suffix_from.unwrap_or(old_children.len());
    let reused_nodes = old_children[..prefix_len]
        .iter()
        .chain(&old_children[suffix_from..])
        .filter(|child| child.as_node().is_some())
        .count();
    let reparsed_nodes = count_nodes(&middle) - 1;

    let strategy = if old.is_some() {
        trace!(prefix_len, suffix_from, ?stopped, "top-level reuse");
        ReuseStrategy::TopLevel
    } else {
        ReuseStrategy::Full
    };

    let green = if prefix_len == 0 && suffix_from == old_children.len() {
        middle
    } else {
        let children: Vec<NodeOrToken<GreenNode, GreenToken>> = old_children[..prefix_len]
            .iter()
            .map(green_element)
            .chain(middle.children().map(|child| match child {
                NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
                NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
            }))
            .chain(old_children[suffix_from..].iter().map(green_element))
            .collect();
        GreenNode::new(SyntaxKind::SOURCE_FILE.into(), children)
    };

    Reparse {
        green,
        stats: ReuseStats {
            strategy,
            reused_nodes,
            reparsed_nodes,
            relexed_bytes,
        },
        tokens,
    }
}

fn green_element(element: &SyntaxElement) -> NodeOrToken<GreenNode, GreenToken> {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.green().into_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.green().to_owned()),
    }
}

/// True if the element's first token is significant: a real item, not
/// trivia or an ERROR around an unterminated comment.
fn starts_significant(element: &SyntaxElement) -> bool {
    let first = match element {
        NodeOrToken::Node(node) => node.first_token(),
        NodeOrToken::Token(token) => Some(token.clone()),
    };
    first.is_some_and(|token| !token.kind().is_trivia() && !token.text().is_empty())
}

/// Offset before which nothing can be affected by a change at `offset`.
fn safe_restart(root: &SyntaxNode, offset: usize) -> TextSize {
    let Ok(offset) = TextSize::try_from(offset) else {
        return TextSize::default();
    };
    let touching = match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) => Some(token),
        TokenAtOffset::Between(left, _) => Some(left),
    };
    let Some(mut token) = touching.and_then(|token| {
        if token.text().is_empty() {
            prev_nonempty(&token)
        } else {
            Some(token)
        }
    }) else {
        return TextSize::default();
    };

    for _ in 0..LEXER_LOOKBEHIND {
        match prev_nonempty(&token) {
            Some(prev) => token = prev,
            None => return TextSize::default(),
        }
    }
    let mut significant = 0;
    while significant < PARSER_LOOKAHEAD {
        match prev_nonempty(&token) {
            Some(prev) => {
                if !prev.kind().is_trivia() {
                    significant += 1;
                }
                token = prev;
            }
            None => return TextSize::default(),
        }
    }
    token.text_range().start()
}

/// The previous token with text; MISSING placeholders are skipped.
fn prev_nonempty(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut prev = token.prev_token();
    while let Some(candidate) = prev {
        if !candidate.text().is_empty() {
            return Some(candidate);
        }
        prev = candidate.prev_token();
    }
    None
}
