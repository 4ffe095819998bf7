//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy to work with
//! ID-based punctuation.

use crate::lexer::{Token, TokenKind, keyword_id};
use fgen_core::lang::keywords::{self, KeywordId};
use fgen_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for tokens the builder skips (comments, directives, whitespace).
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Comment(_) | TokenKind::Preprocessor | TokenKind::Whitespace
        )
    }

    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Word)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// Keyword id of a `Word` token, if its spelling is registered.
    pub fn keyword_id(&self, source: &str) -> Option<KeywordId> {
        match self.kind {
            TokenKind::Word => keyword_id(self.text(source)),
            _ => None,
        }
    }

    /// Return `true` if this is a `Word` spelling the given keyword.
    pub fn is_keyword(&self, source: &str, id: KeywordId) -> bool {
        self.keyword_id(source) == Some(id)
    }

    /// Return `true` if this is a `Word` that is not a registered keyword.
    pub fn is_identifier(&self, source: &str) -> bool {
        self.kind.is_word()
            && self.keyword_id(source).is_none()
            && !self.text(source).starts_with(|c: char| c.is_ascii_digit())
    }

    /// Return `true` if this word can name a variable or parameter: an identifier, or a contextual keyword such as
    /// `final`.
    pub fn is_declarator_name(&self, source: &str) -> bool {
        self.is_identifier(source) || self.keyword_id(source).is_some_and(keywords::is_contextual)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::lex;
    use fgen_core::lang::keywords::{self, KeywordId};

    #[test]
    fn test_word_classification() {
        let source = "virtual Foo 42";
        let tokens = lex(source);
        assert!(tokens[0].is_keyword(source, KeywordId::Virtual));
        assert!(!tokens[0].is_identifier(source));
        assert!(tokens[2].is_identifier(source));
        assert!(!tokens[4].is_identifier(source));
        assert!(tokens[1].kind.is_trivia());
    }

    #[test]
    fn test_contextual_keywords_can_name_declarators() {
        let source = "final override const count";
        let tokens = lex(source);
        assert!(!tokens[0].is_identifier(source));
        assert!(tokens[0].is_declarator_name(source));
        assert!(tokens[2].is_declarator_name(source));
        assert!(!tokens[4].is_declarator_name(source));
        assert!(tokens[6].is_declarator_name(source));
    }
}
