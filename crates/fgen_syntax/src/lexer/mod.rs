//! Lexical segmenter for C++ headers
//!
//! Splits a header into classified tokens without discarding anything:
//! - Comments (line/block), preprocessor directives, and whitespace are kept as trivia tokens
//! - String and character literals (including raw strings and encoding prefixes)
//! - Words: keywords, identifiers, and numeric literals alike
//! - Single-character punctuation, plus `::`, `->`, and `...`
//!
//! Concatenating the text of every token reproduces the input byte-for-byte, and the stream always ends with a
//! zero-width `Eof` token. The segmenter never fails: unterminated comments and literals simply run to the end of
//! what they can claim.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, CommentStyle)
//! - `trivia` - Whitespace, comment, and preprocessor scanning
//! - `literals` - Quoted and raw string literal scanning

mod literals;
pub mod tokens;
mod trivia;

pub use tokens::{CommentStyle, Token, TokenKind, keyword_id};

use crate::ast::Span;
use fgen_core::lang::punctuation::{self, PunctuationId};

/// Word spellings that turn an immediately following quote into part of a literal.
const ENCODING_PREFIXES: &[&str] = &["L", "u", "U", "u8"];
/// Word spellings that start a raw string literal when followed by `"`.
const RAW_PREFIXES: &[&str] = &["R", "LR", "uR", "UR", "u8R"];

/// Lexer for C++ header text.
///
/// Converts source text into a lossless stream of tokens.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Only whitespace has been seen since the last newline (or start of input).
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));
        self.tokens
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters until `current_pos` reaches `target` (or input ends).
    fn advance_to(&mut self, target: usize) {
        while self.current_pos < target && self.advance().is_some() {}
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        if kind != TokenKind::Whitespace {
            self.at_line_start = false;
        }
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            c if is_blank(c) => self.scan_whitespace(c, start),
            '/' if self.peek() == Some('/') => self.scan_line_comment(start),
            '/' if self.peek() == Some('*') => self.scan_block_comment(start),
            '#' if self.at_line_start => self.scan_preprocessor(start),
            '"' | '\'' => {
                self.scan_quoted(c);
                self.push(TokenKind::StringLiteral, start);
            }
            c if is_word_char(c) => self.scan_word(c, start),
            ':' => {
                let id = if self.match_char(':') {
                    PunctuationId::ColonColon
                } else {
                    PunctuationId::Colon
                };
                self.push(TokenKind::Punctuation(id), start);
            }
            '-' => {
                let id = if self.match_char('>') {
                    PunctuationId::Arrow
                } else {
                    PunctuationId::Minus
                };
                self.push(TokenKind::Punctuation(id), start);
            }
            '.' if self.peek() == Some('.') && self.peek_next() == Some('.') => {
                self.advance();
                self.advance();
                self.push(TokenKind::Punctuation(PunctuationId::Ellipsis), start);
            }
            c => match punctuation::from_char(c) {
                Some(id) => self.push(TokenKind::Punctuation(id), start),
                // Every printable ASCII symbol is registered; anything else reads as part of a word.
                None => self.push(TokenKind::Word, start),
            },
        }
    }

    // ========================================================================
    // Words
    // ========================================================================

    fn scan_word(&mut self, first: char, start: usize) {
        let numeric = first.is_ascii_digit();
        while let Some(c) = self.peek() {
            if is_word_char(c) {
                self.advance();
            } else if c == '\'' && numeric && self.peek_next().is_some_and(|n| n.is_ascii_alphanumeric()) {
                // C++14 digit separator: 1'000'000
                self.advance();
            } else {
                break;
            }
        }

        let word = &self.source[start..self.current_pos];
        match self.peek() {
            Some('"') if RAW_PREFIXES.contains(&word) => {
                self.advance();
                self.scan_raw_string();
                self.push(TokenKind::StringLiteral, start);
            }
            Some(quote @ ('"' | '\'')) if ENCODING_PREFIXES.contains(&word) => {
                self.advance();
                self.scan_quoted(quote);
                self.push(TokenKind::StringLiteral, start);
            }
            _ => self.push(TokenKind::Word, start),
        }
    }
}

/// Characters that form `Word` tokens.
///
/// ## Notes
/// - Non-ASCII characters are always word characters, so stray Unicode symbols never need a punctuation id.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Characters that form `Whitespace` tokens (ASCII control characters included).
fn is_blank(c: char) -> bool {
    c.is_ascii_whitespace() || c.is_ascii_control()
}

/// Convenience function to segment a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<&str> {
        lex(source).iter().map(|t| t.text(source)).collect()
    }

    fn rebuild(source: &str) -> String {
        lex(source).iter().map(|t| t.text(source)).collect()
    }

    #[test]
    fn test_eof_is_zero_width() {
        let tokens = lex("int x;");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span::new(6, 6));
        assert_eq!(lex(""), vec![Token::new(TokenKind::Eof, Span::new(0, 0))]);
    }

    #[test]
    fn test_word_and_punctuation() {
        assert_eq!(texts("std::vector<int> v;"), vec![
            "std", "::", "vector", "<", "int", ">", " ", "v", ";", ""
        ]);
        assert_eq!(
            kinds("a->b")[1],
            TokenKind::Punctuation(PunctuationId::Arrow)
        );
    }

    #[test]
    fn test_shift_operators_stay_single_characters() {
        let k = kinds("<<>>");
        assert_eq!(k[..4], [
            TokenKind::Punctuation(PunctuationId::Lt),
            TokenKind::Punctuation(PunctuationId::Lt),
            TokenKind::Punctuation(PunctuationId::Gt),
            TokenKind::Punctuation(PunctuationId::Gt),
        ]);
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(texts("f(...)"), vec!["f", "(", "...", ")", ""]);
        assert_eq!(texts("a..b"), vec!["a", ".", ".", "b", ""]);
    }

    #[test]
    fn test_digit_separators() {
        assert_eq!(texts("1'000'000;"), vec!["1'000'000", ";", ""]);
        // An identifier followed by a quote is not a number.
        assert_eq!(kinds("x'a'")[1], TokenKind::StringLiteral);
    }

    #[test]
    fn test_line_comment_excludes_newline() {
        let source = "// note\nint";
        assert_eq!(texts(source), vec!["// note", "\n", "int", ""]);
        assert_eq!(kinds(source)[0], TokenKind::Comment(CommentStyle::Line));
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        let source = "/* a /* b */ c */";
        let t = texts(source);
        assert_eq!(t[0], "/* a /* b */");
        assert_eq!(t[2], "c");
    }

    #[test]
    fn test_unterminated_block_comment_is_final_token() {
        let source = "int x; /* open";
        let tokens = lex(source);
        let last = &tokens[tokens.len() - 2];
        assert_eq!(last.kind, TokenKind::Comment(CommentStyle::Block));
        assert_eq!(last.text(source), "/* open");
    }

    #[test]
    fn test_preprocessor_only_at_line_start() {
        let source = "  #define X 1\nint a; # not\n";
        let tokens = lex(source);
        assert_eq!(tokens[1].kind, TokenKind::Preprocessor);
        assert_eq!(tokens[1].text(source), "#define X 1");
        assert!(
            tokens
                .iter()
                .any(|t| t.kind == TokenKind::Punctuation(PunctuationId::Hash))
        );
    }

    #[test]
    fn test_preprocessor_continuation_lines() {
        let source = "#define MAX(a, b) \\\r\n  ((a) > (b) ? (a) : (b))\r\nint x;";
        let tokens = lex(source);
        assert_eq!(
            tokens[0].text(source),
            "#define MAX(a, b) \\\r\n  ((a) > (b) ? (a) : (b))"
        );
    }

    #[test]
    fn test_preprocessor_block_comment_spans_lines() {
        let source = "#if 0 /* long\ncomment */\nint x;";
        assert_eq!(texts(source)[0], "#if 0 /* long\ncomment */");
    }

    #[test]
    fn test_string_escapes() {
        let source = r#"f("a\"b", '\'');"#;
        assert_eq!(texts(source), vec!["f", "(", r#""a\"b""#, ",", " ", r"'\''", ")", ";", ""]);
    }

    #[test]
    fn test_encoding_prefixes() {
        assert_eq!(texts("L\"wide\" u8'x'"), vec!["L\"wide\"", " ", "u8'x'", ""]);
    }

    #[test]
    fn test_raw_string() {
        let source = "R\"sql(a \"quoted\" )\" thing)sql\";";
        let tokens = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text(source), "R\"sql(a \"quoted\" )\" thing)sql\"");
        assert_eq!(tokens[1].text(source), ";");
    }

    #[test]
    fn test_unterminated_raw_string_runs_to_end() {
        let source = "R\"(never closed";
        assert_eq!(texts(source), vec![source, ""]);
    }

    #[test]
    fn test_unicode_words() {
        let source = "int π = 3; // ünïcode";
        assert_eq!(rebuild(source), source);
        assert!(texts(source).contains(&"π"));
    }

    #[test]
    fn test_crlf_whitespace_is_one_token() {
        let source = "a;\r\n\r\n  b";
        assert_eq!(texts(source), vec!["a", ";", "\r\n\r\n  ", "b", ""]);
    }

    #[test]
    fn test_lossless_on_awkward_input() {
        for source in [
            "\"unterminated",
            "'",
            "#",
            "/",
            "/*",
            "R\"",
            "a\\\nb",
            "\u{0}\u{7f}x",
            "template<class T>class X{};",
        ] {
            assert_eq!(rebuild(source), source, "segmenter lost text for {source:?}");
        }
    }
}
