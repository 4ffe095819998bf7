//! Token types for the fgen segmenter.
//!
//! Tokens carry no text of their own: every token is a [`Span`] into the source plus a coarse classification. Only
//! punctuation is resolved to a registry id (`Punctuation(PunctuationId)`); words are classified lazily by the
//! builder through `fgen_core::lang::keywords`.
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use fgen_core::lang::keywords::{self, KeywordId};
use fgen_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Comment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...` up to (not including) the newline.
    Line,
    /// `/* ... */`, possibly unterminated at end of input.
    Block,
}

/// Kind of token produced by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // ========== Trivia ==========
    Comment(CommentStyle),
    /// A whole preprocessor directive, continuation lines included.
    Preprocessor,
    Whitespace,

    // ========== Significant ==========
    /// Quoted string or character literal, including raw strings and encoding prefixes.
    StringLiteral,
    /// Keyword, identifier, or numeric literal.
    Word,
    Punctuation(PunctuationId),

    // ========== Special ==========
    Eof, // zero-width end of input
}

/// A token with its kind and source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Source text covered by this token.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

/// Resolve a word spelling to a keyword id, if registered.
pub fn keyword_id(word: &str) -> Option<KeywordId> {
    keywords::from_str(word)
}
