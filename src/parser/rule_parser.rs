//! Parser state machine and low-level operations.
//!
//! Grammar rules in [`super::rules`] drive a [`RuleParser`]: a token cursor
//! over a lazily lexed range of the source plus a rowan `GreenNodeBuilder`.
//!
//! Trivia tokens are buffered and flushed when the next node starts or the
//! next token is consumed, so nodes never begin or end with trivia.
//!
//! A [`Rule`] can also be parsed on its own over any range of the source;
//! block reparsing relies on this.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::lexer::{Lexer, Token, token_text, word_kind};
use super::rules;
use crate::grammar::{Grammar, SyntaxKind, TokenSet};

/// Grammar rules that can be parsed individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// source_file = item*
    SourceFile,
    /// function_body = '{' statement* '}'
    FunctionBody,
    /// class_body = '{' class_member* '}'
    ClassBody,
    /// block_statement = '{' statement* '}'
    Block,
}

impl Rule {
    /// The rule that rebuilds a node of `kind`, if it has one.
    pub fn for_kind(kind: SyntaxKind) -> Option<Rule> {
        match kind {
            SyntaxKind::SOURCE_FILE => Some(Rule::SourceFile),
            SyntaxKind::FUNCTION_BODY => Some(Rule::FunctionBody),
            SyntaxKind::CLASS_BODY => Some(Rule::ClassBody),
            SyntaxKind::BLOCK_STATEMENT => Some(Rule::Block),
            _ => None,
        }
    }

    pub fn kind(self) -> SyntaxKind {
        match self {
            Rule::SourceFile => SyntaxKind::SOURCE_FILE,
            Rule::FunctionBody => SyntaxKind::FUNCTION_BODY,
            Rule::ClassBody => SyntaxKind::CLASS_BODY,
            Rule::Block => SyntaxKind::BLOCK_STATEMENT,
        }
    }
}

/// Result of parsing one rule over a range of the source.
#[derive(Debug)]
pub(crate) struct RuleParse {
    pub green: GreenNode,
    /// Every token of the range was consumed by the rule.
    pub complete: bool,
    /// The rule looked past the end of the range to make a decision.
    pub peeked_past_end: bool,
    /// The nesting limit was hit somewhere inside.
    pub depth_exceeded: bool,
}

/// Parses `rule` over `source[range]`, starting at nesting `depth`.
pub(crate) fn parse_rule(
    grammar: &Grammar,
    rule: Rule,
    source: &str,
    range: TextRange,
    depth: u32,
    max_depth: u32,
) -> RuleParse {
    let mut p = RuleParser::new(grammar, source, range, Vec::new(), max_depth);
    p.depth = depth;
    match rule {
        Rule::SourceFile => {
            p.start_node(SyntaxKind::SOURCE_FILE);
            rules::items::parse_items(&mut p, |_| false);
            p.eat_trivia();
            p.finish_node();
        }
        Rule::FunctionBody => rules::items::parse_function_body(&mut p),
        Rule::ClassBody => rules::items::parse_class_body(&mut p),
        Rule::Block => rules::statements::parse_block_statement(&mut p),
    }
    let peeked_past_end = p.peeked_eof;
    let depth_exceeded = p.depth_exceeded;
    // Trivia left over after the closing brace, e.g. a comment that swallowed
    // it, makes the range incomplete.
    let complete = p.at_end_of_input();
    let (green, _) = p.finish();
    RuleParse {
        green,
        complete,
        peeked_past_end,
        depth_exceeded,
    }
}

pub(crate) struct RuleParser<'src> {
    pub(super) grammar: &'src Grammar,
    source: &'src str,
    lexer: Lexer<'src>,
    start: TextSize,
    lexed_to: TextSize,
    exhausted: bool,
    tokens: Vec<Token>,
    pos: usize,
    trivia_buffer: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    depth: u32,
    max_depth: u32,
    depth_exceeded: bool,
    peeked_eof: bool,
}

impl<'src> RuleParser<'src> {
    /// `tokens` is a scratch buffer whose allocation is reused.
    pub(crate) fn new(
        grammar: &'src Grammar,
        source: &'src str,
        range: TextRange,
        mut tokens: Vec<Token>,
        max_depth: u32,
    ) -> Self {
        tokens.clear();
        Self {
            grammar,
            source,
            lexer: Lexer::with_range(source, range),
            start: range.start(),
            lexed_to: range.start(),
            exhausted: false,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            depth: 0,
            max_depth,
            depth_exceeded: false,
            peeked_eof: false,
        }
    }

    /// Finishes the tree and hands back the scratch buffer.
    ///
    /// The root is closed by now, so trivia still buffered has no node to go
    /// into and is dropped. Callers that keep it drain it before closing the
    /// root; [`parse_rule`] reports it as an incomplete parse instead.
    pub(crate) fn finish(self) -> (GreenNode, Vec<Token>) {
        (self.builder.finish(), self.tokens)
    }

    /// Bytes pulled through the lexer so far.
    pub(crate) fn lexed_len(&self) -> TextSize {
        self.lexed_to - self.start
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Makes sure token `idx` has been lexed. `false` at end of input.
    fn fill(&mut self, idx: usize) -> bool {
        while self.tokens.len() <= idx {
            if self.exhausted {
                return false;
            }
            match self.lexer.next() {
                Some(token) => {
                    self.lexed_to = token.span.end();
                    self.tokens.push(token);
                }
                None => self.exhausted = true,
            }
        }
        true
    }

    fn raw(&mut self, idx: usize) -> Option<Token> {
        if self.fill(idx) {
            Some(self.tokens[idx])
        } else {
            None
        }
    }

    /// Kind of the current significant token; `ERROR` at end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        match self.raw(self.pos) {
            Some(token) => token.kind,
            None => {
                self.peeked_eof = true;
                SyntaxKind::ERROR
            }
        }
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        match self.raw(self.pos) {
            Some(token) => token.span,
            None => TextRange::empty(self.lexed_to),
        }
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        self.skip_trivia_to_buffer();
        match self.raw(self.pos) {
            Some(token) => token_text(self.source, &token),
            None => "",
        }
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_set(&mut self, set: TokenSet) -> bool {
        let kind = self.current();
        set.contains(kind)
    }

    pub(super) fn at_eof(&mut self) -> bool {
        self.current() == SyntaxKind::ERROR
    }

    /// LL(k) lookahead past trivia; `nth(0)` is the current token.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        match self.nth_index(n) {
            Some(idx) => self.tokens[idx].kind,
            None => SyntaxKind::ERROR,
        }
    }

    /// Index into `tokens` of the `n`th significant token from here.
    fn nth_index(&mut self, n: usize) -> Option<usize> {
        self.skip_trivia_to_buffer();
        let mut count = 0;
        let mut idx = self.pos;
        while let Some(token) = self.raw(idx) {
            if !token.kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
            idx += 1;
        }
        self.peeked_eof = true;
        None
    }

    /// All input consumed. Not a parsing decision, so it does not count as
    /// looking past the end.
    fn at_end_of_input(&mut self) -> bool {
        self.trivia_buffer.is_empty() && !self.fill(self.pos)
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_trivia_to_buffer(&mut self) {
        while let Some(token) = self.raw(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.trivia_buffer.push(token);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in std::mem::take(&mut self.trivia_buffer) {
            let text = token_text(self.source, &token);
            if token.kind == SyntaxKind::UNTERMINATED_COMMENT {
                self.builder.start_node(SyntaxKind::ERROR.into());
                self.builder.token(token.kind.into(), text);
                self.builder.finish_node();
            } else {
                self.builder.token(token.kind.into(), text);
            }
        }
    }

    pub(super) fn eat_trivia(&mut self) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consumes the current token, storing it as `kind`.
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) {
        self.skip_trivia_to_buffer();
        let Some(token) = self.raw(self.pos) else {
            return;
        };
        self.drain_trivia();
        self.builder.token(kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: deletes one stray token if `kind` follows it, otherwise
    /// records a MISSING placeholder without consuming.
    pub(super) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        if !self.at_eof() && !self.at_set(rules::NEVER_DELETE) && self.nth(1) == kind {
            self.bump_as_error();
            self.bump();
            return true;
        }
        self.missing(kind);
        false
    }

    /// Zero-width placeholder for a required token, placed right after the
    /// previous token.
    pub(super) fn missing(&mut self, kind: SyntaxKind) {
        self.builder.start_node(SyntaxKind::MISSING.into());
        self.builder.token(kind.into(), "");
        self.builder.finish_node();
    }

    /// Consumes the raw text of a bracket handler up to its closing `>`.
    ///
    /// The content stays one opaque token. Returns `false` when a statement
    /// boundary comes first; trailing trivia is then left in place.
    pub(super) fn bump_handler_content(&mut self) -> bool {
        let mut idx = self.pos;
        let closed = loop {
            match self.raw(idx) {
                Some(token) if token.kind == SyntaxKind::GT => break true,
                Some(token) if rules::HANDLER_STOP.contains(token.kind) => break false,
                Some(_) => idx += 1,
                None => {
                    self.peeked_eof = true;
                    break false;
                }
            }
        };

        let mut end = idx;
        if !closed {
            while end > self.pos && self.tokens[end - 1].kind.is_trivia() {
                end -= 1;
            }
        }
        if end > self.pos {
            let start = self.tokens[self.pos].span.start();
            let stop = self.tokens[end - 1].span.end();
            let text = &self.source[usize::from(start)..usize::from(stop)];
            self.drain_trivia();
            self.builder.token(SyntaxKind::HANDLER_CONTENT.into(), text);
            self.pos = end;
        }
        closed
    }

    /// Text of the `n`th significant token; empty at end of input.
    pub(super) fn nth_text(&mut self, n: usize) -> &'src str {
        match self.nth_index(n) {
            Some(idx) => token_text(self.source, &self.tokens[idx]),
            None => "",
        }
    }

    /// Re-tokenizes the `n`th significant token around each `$` in it, so
    /// `Type$name` reads as `Type`, `$`, `name`. Pieces between dollars are
    /// lexed on their own and may come out as keywords.
    pub(super) fn split_nth_at_dollars(&mut self, n: usize) {
        let Some(idx) = self.nth_index(n) else {
            return;
        };
        let token = self.tokens[idx];
        let text = token_text(self.source, &token);
        let base = token.span.start();
        let mut pieces = Vec::new();
        let mut word_start = 0;
        for (at, _) in text.match_indices('$') {
            if at > word_start {
                pieces.push(piece(word_kind(&text[word_start..at]), base, word_start, at));
            }
            pieces.push(piece(SyntaxKind::DOLLAR, base, at, at + 1));
            word_start = at + 1;
        }
        if word_start < text.len() {
            let kind = word_kind(&text[word_start..]);
            pieces.push(piece(kind, base, word_start, text.len()));
        }
        self.tokens.splice(idx..=idx, pieces);
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(super) fn bump_as_error(&mut self) {
        if !self.at_eof() {
            self.start_node(SyntaxKind::ERROR);
            self.bump();
            self.finish_node();
        }
    }

    /// Wraps skipped tokens in an ERROR node until a token in `recovery`.
    /// Always consumes at least one token so callers make progress.
    pub(super) fn error_recover(&mut self, recovery: TokenSet) {
        if self.at_eof() {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        while !self.at_set(recovery) && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    /// `false` once the nesting limit is reached; the caller should
    /// [`bail_out`](Self::bail_out) instead of descending.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.depth_exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Turns all remaining input into one ERROR node.
    pub(super) fn bail_out(&mut self) {
        if self.at_eof() {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        while !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }
}

fn piece(kind: SyntaxKind, base: TextSize, start: usize, end: usize) -> Token {
    let offset = |at: usize| base + TextSize::from(at as u32);
    Token::new(kind, TextRange::new(offset(start), offset(end)))
}
