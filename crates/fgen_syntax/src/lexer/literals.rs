//! String and character literal scanning.

use super::Lexer;

/// Longest delimiter a raw string may declare.
const MAX_RAW_DELIMITER: usize = 16;

impl<'a> Lexer<'a> {
    /// Scan the rest of a quoted literal; the opening `quote` has been consumed.
    ///
    /// ## Notes
    /// - A backslash escapes the next character, line breaks included.
    /// - An unescaped line break ends an unterminated literal (the break itself is not consumed).
    pub(super) fn scan_quoted(&mut self, quote: char) {
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '\n' => return,
                '\r' if self.peek_next() == Some('\n') => return,
                c if c == quote => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Scan `delim( ... )delim"`; the prefix and the opening `"` have been consumed.
    ///
    /// Falls back to an ordinary quoted literal when the delimiter is malformed; an unterminated raw string runs to
    /// end of input.
    pub(super) fn scan_raw_string(&mut self) {
        let rest = &self.source[self.current_pos..];
        let Some(open) = rest.find('(') else {
            self.scan_quoted('"');
            return;
        };
        let delimiter = &rest[..open];
        let valid = delimiter.len() <= MAX_RAW_DELIMITER
            && !delimiter
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '\\' | '"' | ')'));
        if !valid {
            self.scan_quoted('"');
            return;
        }

        let terminator = format!("){delimiter}\"");
        let body_start = self.current_pos + open + 1;
        let end = match self.source[body_start..].find(&terminator) {
            Some(offset) => body_start + offset + terminator.len(),
            None => self.source.len(),
        };
        self.advance_to(end);
    }
}
