/// Parameter lists and declaration specifiers.
///
/// These helpers work on significant-token index ranges that have already been delimited, so they never move the
/// cursor.

/// Leading declaration specifiers found in front of a type.
#[derive(Debug, Clone, Copy)]
struct Specifiers {
    /// First index after the specifiers.
    end: usize,
    is_virtual: bool,
    is_static: bool,
}

impl<'a> Parser<'a> {
    /// Split `start..end` at top-level commas.
    fn split_top_level(&self, start: usize, end: usize) -> Vec<(usize, usize)> {
        let mut segments = Vec::new();
        if start >= end {
            return segments;
        }
        let mut depth = 0usize;
        let mut from = start;
        for index in start..end {
            match self.token_at(index).punctuation_id() {
                Some(
                    PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace | PunctuationId::Lt,
                ) => depth += 1,
                Some(
                    PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace | PunctuationId::Gt,
                ) => depth = depth.saturating_sub(1),
                Some(PunctuationId::Comma) if depth == 0 => {
                    segments.push((from, index));
                    from = index + 1;
                }
                _ => {}
            }
        }
        segments.push((from, end));
        segments
    }

    /// First top-level occurrence of `id` in `start..end`.
    fn top_level_position(&self, start: usize, end: usize, id: PunctuationId) -> Option<usize> {
        let mut depth = 0usize;
        for index in start..end {
            match self.token_at(index).punctuation_id() {
                Some(found) if found == id && depth == 0 => return Some(index),
                Some(
                    PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace | PunctuationId::Lt,
                ) => depth += 1,
                Some(
                    PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace | PunctuationId::Gt,
                ) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        None
    }

    /// Index just past the group opened at `open`, bounded by `limit`.
    fn group_end(&self, open: usize, limit: usize) -> usize {
        let mut depth = 0usize;
        for index in open..limit {
            match self.token_at(index).punctuation_id() {
                Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => depth += 1,
                Some(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return index + 1;
                    }
                }
                _ => {}
            }
        }
        limit
    }

    /// Parameters between a function's parentheses (`start..end` excludes them).
    ///
    /// ## Notes
    /// - `(void)` declares no parameters.
    /// - Default arguments are split off into [`Param::default`].
    fn params(&self, start: usize, end: usize) -> Vec<Param> {
        let segments = self.split_top_level(start, end);
        if let [(from, to)] = segments[..] {
            if to == from + 1 && self.keyword_at(from) == Some(KeywordId::Void) {
                return Vec::new();
            }
        }

        segments
            .into_iter()
            .filter(|(from, to)| from < to)
            .map(|(from, to)| {
                let eq = self.top_level_position(from, to, PunctuationId::Eq);
                let decl_end = eq.unwrap_or(to);
                Param {
                    decl: self.normalize(from, decl_end),
                    name: self.param_name(from, decl_end),
                    default: eq.map(|at| self.normalize(at + 1, to)),
                }
            })
            .collect()
    }

    /// Declared name of one parameter (`const Sample& other` → `other`, `const string&` → none).
    ///
    /// A trailing identifier only counts as a name when a type precedes it and it is not the tail of a qualified
    /// type (`std::string`).
    fn param_name(&self, start: usize, end: usize) -> Option<Ident> {
        // Parenthesized declarator: `void (*callback)(int)`.
        let mut depth = 0usize;
        for index in start..end {
            match self.token_at(index).punctuation_id() {
                Some(PunctuationId::LParen) if depth == 0 => {
                    let next = self.token_at(index + 1).punctuation_id();
                    if matches!(
                        next,
                        Some(PunctuationId::Star | PunctuationId::Amp | PunctuationId::Caret)
                    ) {
                        let close = self.group_end(index, end);
                        return (index..close)
                            .find(|&i| self.is_identifier_at(i))
                            .map(|i| self.text_at(i).to_string());
                    }
                    depth += 1;
                }
                Some(PunctuationId::LParen | PunctuationId::Lt) => depth += 1,
                Some(PunctuationId::RParen | PunctuationId::Gt) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        // Strip array extents: `int values[3]`.
        let mut last = end;
        while last > start && self.token_at(last - 1).kind.is_punctuation(PunctuationId::RBracket) {
            match (start..last - 1)
                .rev()
                .find(|&i| self.token_at(i).kind.is_punctuation(PunctuationId::LBracket))
            {
                Some(open) => last = open,
                None => break,
            }
        }

        let name = last.checked_sub(1)?;
        if name <= start
            || !self.is_declarator_name_at(name)
            || self.token_at(name - 1).kind.is_punctuation(PunctuationId::ColonColon)
        {
            return None;
        }

        let mut depth = 0usize;
        let has_type = (start..name).any(|index| {
            match self.token_at(index).punctuation_id() {
                Some(PunctuationId::Lt | PunctuationId::LParen) => depth += 1,
                Some(PunctuationId::Gt | PunctuationId::RParen) => depth = depth.saturating_sub(1),
                _ => {}
            }
            depth == 0 && self.is_type_word(index)
        });
        has_type.then(|| self.text_at(name).to_string())
    }

    /// A word that can name a type: any identifier, or a fundamental type keyword.
    fn is_type_word(&self, index: usize) -> bool {
        if self.is_identifier_at(index) {
            return true;
        }
        self.keyword_at(index)
            .is_some_and(|id| keywords::category(id) == KeywordCategory::FundamentalType)
    }

    /// Leading specifiers in `start..end` (`virtual`, `static`, `inline`, attributes, `extern "C"`, ...).
    fn leading_specifiers(&self, start: usize, end: usize) -> Specifiers {
        let mut specifiers = Specifiers {
            end: start,
            is_virtual: false,
            is_static: false,
        };
        let mut index = start;
        while index < end {
            let token = self.token_at(index);
            if token.kind.is_punctuation(PunctuationId::LBracket)
                && self.token_at(index + 1).kind.is_punctuation(PunctuationId::LBracket)
            {
                index = self.group_end(index, end);
                continue;
            }
            if ATTRIBUTE_MACROS.contains(&self.text_at(index))
                && self.token_at(index + 1).kind.is_punctuation(PunctuationId::LParen)
            {
                index = self.group_end(index + 1, end);
                continue;
            }
            match self.keyword_at(index) {
                Some(KeywordId::Virtual) => specifiers.is_virtual = true,
                Some(KeywordId::Static) => specifiers.is_static = true,
                Some(KeywordId::Extern) => {
                    if self.token_at(index + 1).kind == TokenKind::StringLiteral {
                        index += 1;
                    }
                }
                Some(KeywordId::Explicit) => {
                    if self.token_at(index + 1).kind.is_punctuation(PunctuationId::LParen) {
                        index = self.group_end(index + 1, end);
                        continue;
                    }
                }
                Some(
                    KeywordId::Inline
                    | KeywordId::Constexpr
                    | KeywordId::Consteval
                    | KeywordId::Mutable
                    | KeywordId::Friend,
                ) => {}
                _ => break,
            }
            index += 1;
        }
        specifiers.end = index.min(end);
        specifiers
    }
}
