//! Logos-based lexer for ZenScript
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed. The lexer is an iterator so the parser can pull
//! tokens on demand and stop early when it splices in old subtrees.
//!
//! ## Error handling
//!
//! Consecutive characters no token matches are coalesced into a single
//! `GARBAGE` token. Strings and block comments are finished by hand so that an
//! unterminated one becomes a single `UNTERMINATED_STRING` /
//! `UNTERMINATED_COMMENT` token running to the end of input.

use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use crate::grammar::SyntaxKind;

/// Zero-copy token: kind + absolute span, text retrieved via [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, SyntaxKind>,
    base: usize,
    pending: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_range(source, TextRange::up_to(TextSize::of(source)))
    }

    /// Lexes only `source[range]`; spans stay absolute offsets into `source`.
    pub fn with_range(source: &'src str, range: TextRange) -> Self {
        let base = usize::from(range.start());
        Self {
            inner: SyntaxKind::lexer(&source[Range::<usize>::from(range)]),
            base,
            pending: None,
        }
    }

    fn span(&self, range: Range<usize>) -> TextRange {
        TextRange::new(
            TextSize::from((self.base + range.start) as u32),
            TextSize::from((self.base + range.end) as u32),
        )
    }

    /// Finishes strings and block comments, whose ends logos does not see.
    fn finish(&mut self, kind: SyntaxKind) -> Token {
        let start = self.inner.span().start;
        let remainder = self.inner.remainder();
        let (kind, rest) = match kind {
            SyntaxKind::DOUBLE_QUOTE => close_string(remainder, b'"'),
            SyntaxKind::SINGLE_QUOTE => close_string(remainder, b'\''),
            SyntaxKind::COMMENT_OPEN => match remainder.find("*/") {
                Some(end) => (SyntaxKind::COMMENT, end + 2),
                None => (SyntaxKind::UNTERMINATED_COMMENT, remainder.len()),
            },
            kind => (kind, 0),
        };
        self.inner.bump(rest);
        Token::new(kind, self.span(start..self.inner.span().end))
    }
}

/// Scans a string body after its opening quote. Returns the kind and the
/// number of bytes up to and including the closing quote.
fn close_string(remainder: &str, quote: u8) -> (SyntaxKind, usize) {
    let bytes = remainder.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return (SyntaxKind::STRING_LITERAL, i + 1),
            _ => i += 1,
        }
    }
    (SyntaxKind::UNTERMINATED_STRING, remainder.len())
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let mut garbage_start: Option<usize> = None;
        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let token = self.finish(kind);
                    if let Some(start) = garbage_start {
                        let end = usize::from(token.span.start()) - self.base;
                        self.pending = Some(token);
                        return Some(Token::new(SyntaxKind::GARBAGE, self.span(start..end)));
                    }
                    return Some(token);
                }
                Some(Err(())) => {
                    garbage_start.get_or_insert(self.inner.span().start);
                }
                None => {
                    let end = self.inner.source().len();
                    return garbage_start
                        .map(|start| Token::new(SyntaxKind::GARBAGE, self.span(start..end)));
                }
            }
        }
    }
}

/// Tokenize an entire string into a Vec
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Kind of `text` lexed on its own: the keyword it spells, or `IDENT`.
pub(crate) fn word_kind(text: &str) -> SyntaxKind {
    let mut lexer = SyntaxKind::lexer(text);
    match lexer.next() {
        Some(Ok(kind)) if lexer.span() == (0..text.len()) => kind,
        _ => SyntaxKind::IDENT,
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[Range::<usize>::from(token.span)]
}
