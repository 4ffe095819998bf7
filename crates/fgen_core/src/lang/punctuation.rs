//! Punctuation vocabulary.
//!
//! Every printable ASCII character that is neither an identifier character nor a quote is a punctuation token, plus
//! the three multi-character spellings the builder needs to see whole (`::`, `->`, `...`).
//!
//! ## Notes
//! - Multi-character operators such as `<<` or `==` are deliberately *not* registered: they lex as single-character
//!   tokens, which keeps angle-bracket depth counting exact (`vector<vector<int>>`). The builder reassembles operator
//!   names from source text.
//! - Lookup via [`from_str`] is exact.
//!
//! ## Examples
//! ```rust
//! use fgen_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("::"), Some(PunctuationId::ColonColon));
//! assert_eq!(punctuation::from_char('~'), Some(PunctuationId::Tilde));
//! assert_eq!(punctuation::as_str(PunctuationId::Ellipsis), "...");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces, parentheses, and angle brackets.
    Delimiter,
    /// `,` `;` `:`.
    Separator,
    /// `::` `.` `->`.
    Access,
    /// Characters that only ever appear inside operator spellings or expressions.
    Operator,
    /// Characters with no role in the declaration grammar (`@`, `` ` ``, `$`, `\`).
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Lt,
    Gt,

    // Separators
    Comma,
    Semicolon,
    Colon,

    // Access / path
    ColonColon,
    Dot,
    Arrow,

    // Operator characters
    Tilde,
    Eq,
    Star,
    Amp,
    Plus,
    Minus,
    Slash,
    Percent,
    Caret,
    Pipe,
    Bang,
    Question,
    Hash,
    Ellipsis,

    // Markers
    At,
    Dollar,
    Backslash,
    Backtick,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    info(PunctuationId::Lt, "<", PunctuationCategory::Delimiter),
    info(PunctuationId::Gt, ">", PunctuationCategory::Delimiter),
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    // Access
    info(PunctuationId::ColonColon, "::", PunctuationCategory::Access),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::Arrow, "->", PunctuationCategory::Access),
    // Operator characters
    info(PunctuationId::Tilde, "~", PunctuationCategory::Operator),
    info(PunctuationId::Eq, "=", PunctuationCategory::Operator),
    info(PunctuationId::Star, "*", PunctuationCategory::Operator),
    info(PunctuationId::Amp, "&", PunctuationCategory::Operator),
    info(PunctuationId::Plus, "+", PunctuationCategory::Operator),
    info(PunctuationId::Minus, "-", PunctuationCategory::Operator),
    info(PunctuationId::Slash, "/", PunctuationCategory::Operator),
    info(PunctuationId::Percent, "%", PunctuationCategory::Operator),
    info(PunctuationId::Caret, "^", PunctuationCategory::Operator),
    info(PunctuationId::Pipe, "|", PunctuationCategory::Operator),
    info(PunctuationId::Bang, "!", PunctuationCategory::Operator),
    info(PunctuationId::Question, "?", PunctuationCategory::Operator),
    info(PunctuationId::Hash, "#", PunctuationCategory::Operator),
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Operator),
    // Markers
    info(PunctuationId::At, "@", PunctuationCategory::Marker),
    info(PunctuationId::Dollar, "$", PunctuationCategory::Marker),
    info(PunctuationId::Backslash, "\\", PunctuationCategory::Marker),
    info(PunctuationId::Backtick, "`", PunctuationCategory::Marker),
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Full metadata for an id.
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Lookup by exact spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Lookup a single-character spelling.
///
/// ## Notes
/// - Returns `None` for identifier characters, quotes, whitespace, and non-ASCII characters.
pub fn from_char(c: char) -> Option<PunctuationId> {
    let mut buf = [0u8; 4];
    from_str(c.encode_utf8(&mut buf))
}

// --- helpers -----------------------------------------------------------------

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
    }
}
