/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout the builder:
/// - Peeking/consuming significant tokens (`peek`, `advance`)
/// - Matching keywords and punctuation
/// - Balanced-group skipping (`skip_group`, `skip_to_statement_end`)
/// - Mapping significant positions back to stream ranges, spans, and normalized text
/// - Recording recovered spans (`recover`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` once every significant token has been consumed.
    fn is_at_end(&self) -> bool {
        self.pos >= self.significant.len()
    }

    /// Return the current token without consuming it (`Eof` at the end).
    fn peek(&self) -> &Token {
        self.token_at(self.pos)
    }

    /// Return the token `offset` significant tokens ahead.
    fn peek_at(&self, offset: usize) -> &Token {
        self.token_at(self.pos + offset)
    }

    fn token_at(&self, index: usize) -> &Token {
        match self.significant.get(index) {
            Some(&raw) => &self.tokens[raw],
            None => &self.eof,
        }
    }

    /// Advance past the current token.
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Source text of the significant token at `index`.
    fn text_at(&self, index: usize) -> &'a str {
        let source = self.source;
        match self.significant.get(index) {
            Some(&raw) => self.tokens[raw].text(source),
            None => "",
        }
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_punct_at(&self, offset: usize, id: PunctuationId) -> bool {
        self.peek_at(offset).kind.is_punctuation(id)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn keyword_at(&self, index: usize) -> Option<KeywordId> {
        self.token_at(index).keyword_id(self.source)
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.keyword_at(self.pos) == Some(id)
    }

    fn check_keyword_at(&self, offset: usize, id: KeywordId) -> bool {
        self.keyword_at(self.pos + offset) == Some(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Return `true` if the token at `index` is a non-keyword, non-numeric word.
    fn is_identifier_at(&self, index: usize) -> bool {
        self.token_at(index).is_identifier(self.source)
    }

    /// Return `true` if the token at `index` can name a field or parameter (`int final;` is legal).
    fn is_declarator_name_at(&self, index: usize) -> bool {
        self.token_at(index).is_declarator_name(self.source)
    }

    /// Visibility named by a `public:` / `protected:` / `private:` marker at the current position.
    fn access_marker(&self) -> Option<Visibility> {
        if !self.check_punct_at(1, PunctuationId::Colon) {
            return None;
        }
        match self.keyword_at(self.pos)? {
            KeywordId::Public => Some(Visibility::Public),
            KeywordId::Protected => Some(Visibility::Protected),
            KeywordId::Private => Some(Visibility::Private),
            _ => None,
        }
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Skip a bracketed group starting at the current opening `(`, `[`, or `{`.
    ///
    /// ## Returns
    /// - `true` when the matching closer was consumed.
    /// - `false` at end of input, or when a `}` closes a brace opened *outside* the group; that `}` is left
    ///   unconsumed so the enclosing scope still sees it.
    fn skip_group(&mut self) -> bool {
        let mut stack: Vec<PunctuationId> = Vec::new();
        loop {
            let Some(id) = self.peek().punctuation_id() else {
                if self.is_at_end() {
                    return false;
                }
                self.advance();
                continue;
            };
            match id {
                PunctuationId::LParen => stack.push(PunctuationId::RParen),
                PunctuationId::LBracket => stack.push(PunctuationId::RBracket),
                PunctuationId::LBrace => stack.push(PunctuationId::RBrace),
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace => {
                    if stack.last() == Some(&id) {
                        stack.pop();
                    } else if id == PunctuationId::RBrace {
                        // Unwind to the nearest open brace, or stop if the group never opened one.
                        match stack.iter().rposition(|c| *c == PunctuationId::RBrace) {
                            Some(at) => stack.truncate(at),
                            None => return false,
                        }
                    }
                }
                _ => {}
            }
            self.advance();
            if stack.is_empty() {
                return true;
            }
        }
    }

    /// Skip an angle-bracketed group starting at the current `<`.
    ///
    /// Parenthesized and bracketed text inside is skipped as a unit, so `>` inside `(a > b)` does not close the
    /// group. Returns `false` when a `;`, `{`, `}` or end of input interrupts the group (nothing past it is consumed).
    fn skip_angle_group(&mut self) -> bool {
        let mut depth = 0usize;
        loop {
            match self.peek().punctuation_id() {
                Some(PunctuationId::Lt) => depth += 1,
                Some(PunctuationId::Gt) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return true;
                    }
                }
                Some(PunctuationId::LParen | PunctuationId::LBracket) => {
                    if !self.skip_group() {
                        return false;
                    }
                    continue;
                }
                Some(PunctuationId::Semicolon | PunctuationId::LBrace | PunctuationId::RBrace) => return false,
                _ if self.is_at_end() => return false,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip to and past the `;` that ends the current statement, stepping over bracketed groups.
    ///
    /// ## Returns
    /// - `true` when the `;` was consumed.
    /// - `false` at end of input or before an unmatched `}` (left unconsumed).
    fn skip_to_statement_end(&mut self) -> bool {
        loop {
            match self.peek().punctuation_id() {
                Some(PunctuationId::Semicolon) => {
                    self.advance();
                    return true;
                }
                Some(PunctuationId::RBrace) => return false,
                Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => {
                    if !self.skip_group() {
                        return false;
                    }
                }
                _ if self.is_at_end() => return false,
                _ => self.advance(),
            }
        }
    }

    /// Skip `[[...]]` attribute groups and attribute-like macros (`alignas(8)`, `__declspec(...)`, ...).
    fn skip_attributes(&mut self) {
        loop {
            if self.check_punct(PunctuationId::LBracket) && self.check_punct_at(1, PunctuationId::LBracket) {
                self.skip_group();
            } else if ATTRIBUTE_MACROS.contains(&self.text_at(self.pos))
                && self.check_punct_at(1, PunctuationId::LParen)
            {
                self.advance();
                self.skip_group();
            } else {
                return;
            }
        }
    }

    // ========================================================================
    // Ranges and text
    // ========================================================================

    /// Stream index of the significant token at `index` (the `Eof` position when past the end).
    fn raw_index(&self, index: usize) -> usize {
        self.significant
            .get(index)
            .copied()
            .unwrap_or(self.tokens.len().saturating_sub(1))
    }

    /// Stream range covering significant tokens `start..end` (including any trivia between them).
    fn range(&self, start: usize, end: usize) -> TokenRange {
        let first = self.raw_index(start);
        if end <= start {
            return TokenRange::new(first, first);
        }
        TokenRange::new(first, self.raw_index(end - 1) + 1)
    }

    /// Byte span covering significant tokens `start..end`.
    fn span(&self, start: usize, end: usize) -> Span {
        let first = self.token_at(start).span;
        if end <= start {
            return Span::new(first.start, first.start);
        }
        first.merge(self.token_at(end - 1).span)
    }

    /// Text of significant tokens `start..end`, with every run of trivia collapsed to a single space.
    fn normalize(&self, start: usize, end: usize) -> String {
        let mut out = String::new();
        for index in start..end.min(self.significant.len()) {
            if index > start && self.significant[index] != self.significant[index - 1] + 1 {
                out.push(' ');
            }
            out.push_str(self.text_at(index));
        }
        out
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Record significant tokens `start..self.pos` as an opaque recovered span and emit a warning.
    ///
    /// Guarantees progress: if nothing was consumed, the current token is swallowed.
    fn recover(&mut self, reason: RecoveryReason, start: usize) -> Recovered {
        if self.pos == start {
            self.advance();
        }
        let recovered = Recovered {
            tokens: self.range(start, self.pos),
            span: self.span(start, self.pos),
            reason,
        };
        tracing::warn!(
            reason = %reason,
            start = recovered.span.start,
            end = recovered.span.end,
            "structural recovery"
        );
        self.diagnostics.push(StructuralRecovery::from(&recovered));
        recovered
    }

    /// Wrap the statement `start..self.pos` in a node.
    fn node(&self, decl: Declaration, ctx: &ScopeCtx, template: Option<TemplateHeader>, start: usize) -> DeclNode {
        DeclNode {
            decl,
            visibility: ctx.visibility,
            template,
            tokens: self.range(start, self.pos),
            span: self.span(start, self.pos),
        }
    }
}

/// Words that behave like attributes when followed by a parenthesized argument list.
const ATTRIBUTE_MACROS: &[&str] = &["alignas", "__attribute__", "__declspec", "_Alignas"];

/// Return `true` for spellings that conventionally name a macro (`EXPORT_API`, `Q_DECL_OVERRIDE`, `__nonnull`).
fn looks_like_macro(word: &str) -> bool {
    word.starts_with("__")
        || (word.len() > 1
            && word.chars().any(|c| c.is_ascii_uppercase())
            && word.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
}
