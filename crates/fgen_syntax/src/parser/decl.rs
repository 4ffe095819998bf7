/// Type definitions: class-likes and enums.
///
/// Both fall back to the generic member path when the keyword turns out to be an elaborated type specifier
/// (`struct stat* find();`, `enum Color paint;`).
impl<'a> Parser<'a> {
    /// `class|struct|union [EXPORT] [Name[<args>]] [final] [: bases] { ... } [declarators];`
    fn class_like(&mut self, start: usize, template: Option<TemplateHeader>, ctx: &ScopeCtx) -> Statement {
        let decl_start = self.pos;
        let key = match self.keyword_at(self.pos) {
            Some(KeywordId::Struct) => ClassKey::Struct,
            Some(KeywordId::Union) => ClassKey::Union,
            _ => ClassKey::Class,
        };
        self.advance();
        self.skip_attributes();

        // The last identifier wins, so `class EXPORT_API Widget` is named `Widget`.
        let mut name = None;
        while self.is_identifier_at(self.pos) {
            if self.check_punct_at(1, PunctuationId::LParen) {
                // Export macro with arguments: `class DECLSPEC(dllexport) Widget`
                self.advance();
                self.skip_group();
                continue;
            }
            name = Some(self.text_at(self.pos).to_string());
            self.advance();
            if self.check_punct(PunctuationId::Lt) && !self.skip_angle_group() {
                break;
            }
            // `class Outer::Inner {` keeps the last component.
            self.match_punct(PunctuationId::ColonColon);
        }

        let is_final = self.check_keyword(KeywordId::Final)
            && (self.check_punct_at(1, PunctuationId::LBrace) || self.check_punct_at(1, PunctuationId::Colon));
        if is_final {
            self.advance();
        }

        let mut bases = Vec::new();
        if self.check_punct(PunctuationId::Colon) {
            self.advance();
            match self.base_clause() {
                Some(list) => bases = list,
                None => {
                    self.pos = decl_start;
                    return self.member(start, template, ctx);
                }
            }
        }

        if !self.check_punct(PunctuationId::LBrace) {
            if name.is_some() && self.check_punct(PunctuationId::Semicolon) {
                return self.opaque(start, "forward declaration");
            }
            self.pos = decl_start;
            return self.member(start, template, ctx);
        }
        if self.depth >= MAX_NESTING_DEPTH {
            return self.too_deep(start);
        }

        let body_start = self.pos;
        self.advance(); // {
        self.depth += 1;
        let mut inner = ScopeCtx::class(name.clone(), key);
        let body = self.scope_body(&mut inner, true);
        self.depth -= 1;
        let body_range = self.range(body_start, self.pos);

        let mut recovered = body.recovered;
        if body.closed {
            // Trailing declarators: `} instance, *pointer;`
            if !self.match_punct(PunctuationId::Semicolon) && !self.check_punct(PunctuationId::RBrace) {
                self.skip_to_statement_end();
            }
        } else {
            recovered.push(self.recover(RecoveryReason::UnterminatedBlock, body_start));
        }

        let decl = Declaration::Class(ClassDecl {
            key,
            name,
            nested: ctx.in_class,
            is_final,
            bases,
            members: body.members,
            recovered,
            body: body_range,
        });
        Statement::Decl(self.node(decl, ctx, template, start))
    }

    /// Base-clause entries up to (not including) the class body's `{`.
    ///
    /// Returns `None` when no body follows, in which case the caller rewinds.
    fn base_clause(&mut self) -> Option<Vec<String>> {
        let mut bases = Vec::new();
        let mut entry_start = self.pos;
        loop {
            match self.peek().punctuation_id() {
                Some(PunctuationId::LBrace) => break,
                Some(PunctuationId::Comma) => {
                    bases.push(self.normalize(entry_start, self.pos));
                    self.advance();
                    entry_start = self.pos;
                }
                Some(PunctuationId::Lt) => {
                    if !self.skip_angle_group() {
                        return None;
                    }
                }
                Some(PunctuationId::LParen) => {
                    if !self.skip_group() {
                        return None;
                    }
                }
                Some(PunctuationId::Semicolon | PunctuationId::RBrace) => return None,
                _ if self.is_at_end() => return None,
                _ => self.advance(),
            }
        }
        if self.pos > entry_start {
            bases.push(self.normalize(entry_start, self.pos));
        }
        Some(bases)
    }

    /// `enum [class|struct] [Name] [: type] { ... } [declarators];`
    fn enum_decl(&mut self, start: usize, template: Option<TemplateHeader>, ctx: &ScopeCtx) -> Statement {
        let decl_start = self.pos;
        self.advance(); // enum
        let scoped = self.match_keyword(KeywordId::Class) || self.match_keyword(KeywordId::Struct);
        self.skip_attributes();

        let name = if self.is_identifier_at(self.pos) {
            let name = self.text_at(self.pos).to_string();
            self.advance();
            Some(name)
        } else {
            None
        };

        let mut underlying = None;
        if self.check_punct(PunctuationId::Colon) {
            self.advance();
            let type_start = self.pos;
            while !self.is_at_end()
                && !self.check_punct(PunctuationId::LBrace)
                && !self.check_punct(PunctuationId::Semicolon)
                && !self.check_punct(PunctuationId::RBrace)
            {
                self.advance();
            }
            underlying = Some(self.normalize(type_start, self.pos));
        }

        if !self.check_punct(PunctuationId::LBrace) {
            if self.check_punct(PunctuationId::Semicolon) && (name.is_some() || underlying.is_some()) {
                return self.opaque(start, "enum forward declaration");
            }
            self.pos = decl_start;
            return self.member(start, template, ctx);
        }

        let body_start = self.pos;
        if !self.skip_group() {
            return Statement::Recovered(self.recover(RecoveryReason::UnterminatedBlock, start));
        }
        let body = self.range(body_start, self.pos);
        if !self.match_punct(PunctuationId::Semicolon) && !self.check_punct(PunctuationId::RBrace) {
            self.skip_to_statement_end();
        }

        let decl = Declaration::Enum(EnumDecl {
            name,
            scoped,
            underlying,
            body,
        });
        Statement::Decl(self.node(decl, ctx, template, start))
    }

    /// Names declared in a template parameter list (`typename T, int N = 3` → `T`, `N`).
    fn template_params(&self, start: usize, end: usize) -> Vec<Ident> {
        self.split_top_level(start, end)
            .into_iter()
            .filter_map(|(from, to)| {
                let to = self.top_level_position(from, to, PunctuationId::Eq).unwrap_or(to);
                let last = to.checked_sub(1)?;
                (last > from && self.is_identifier_at(last)).then(|| self.text_at(last).to_string())
            })
            .collect()
    }
}
