//! Whitespace, comment, and preprocessor scanning.
//!
//! Trivia tokens are kept in the stream (the renderers reproduce them verbatim) but are skipped by the builder.

use super::Lexer;
use super::is_blank;
use super::tokens::{CommentStyle, TokenKind};

impl<'a> Lexer<'a> {
    /// Scan a run of blank characters; `first` has already been consumed.
    pub(super) fn scan_whitespace(&mut self, first: char, start: usize) {
        let mut saw_newline = first == '\n';
        while let Some(c) = self.peek() {
            if !is_blank(c) {
                break;
            }
            saw_newline |= c == '\n';
            self.advance();
        }
        self.push(TokenKind::Whitespace, start);
        if saw_newline {
            self.at_line_start = true;
        }
    }

    /// Scan `// ...` up to (not including) the newline; the first `/` has been consumed.
    pub(super) fn scan_line_comment(&mut self, start: usize) {
        self.skip_to_line_end();
        self.push(TokenKind::Comment(CommentStyle::Line), start);
    }

    /// Scan `/* ... */`; the first `/` has been consumed. Unterminated comments run to end of input.
    pub(super) fn scan_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        self.skip_block_comment_body();
        self.push(TokenKind::Comment(CommentStyle::Block), start);
    }

    /// Scan a directive up to the first newline not preceded by a backslash; `#` has been consumed.
    ///
    /// Block comments and quoted text inside the directive are part of it, even when a block comment spans lines.
    pub(super) fn scan_preprocessor(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => break,
                '\r' if self.peek_next() == Some('\n') => break,
                '\\' => {
                    self.advance();
                    // A continuation swallows the line break that follows it.
                    if self.match_char('\r') {
                        self.match_char('\n');
                    } else {
                        self.match_char('\n');
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    self.advance();
                    self.advance();
                    self.skip_block_comment_body();
                }
                '/' if self.peek_next() == Some('/') => {
                    self.skip_to_line_end();
                    break;
                }
                '"' | '\'' => {
                    self.advance();
                    self.scan_quoted(c);
                }
                _ => {
                    self.advance();
                }
            }
        }
        self.push(TokenKind::Preprocessor, start);
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Consume up to (not including) the next `\n`, leaving a `\r` before it unconsumed as well.
    fn skip_to_line_end(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || (c == '\r' && self.peek_next() == Some('\n')) {
                break;
            }
            self.advance();
        }
    }

    /// Consume a block comment body through the first `*/` (no nesting).
    fn skip_block_comment_body(&mut self) {
        while let Some(c) = self.advance() {
            if c == '*' && self.match_char('/') {
                return;
            }
        }
    }
}
