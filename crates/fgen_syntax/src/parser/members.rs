/// Functions, fields, and the opaque statements that look like them.
///
/// The head of a statement is scanned up to its first top-level `(` (a function) or declarator terminator (`;`,
/// `=`, `,`, `:`, `[`, `{`). Names are taken from the tokens right before that point; everything in front of the
/// name, minus leading specifiers, is the return or field type.
impl<'a> Parser<'a> {
    fn member(&mut self, start: usize, template: Option<TemplateHeader>, ctx: &ScopeCtx) -> Statement {
        let head_start = self.pos;
        let mut angle = 0usize;
        let mut operator_at = None;

        loop {
            let token = *self.peek();
            match token.kind {
                TokenKind::Eof => return self.unparseable(start),
                TokenKind::Punctuation(id) => match id {
                    PunctuationId::Semicolon | PunctuationId::LBrace | PunctuationId::RBrace => break,
                    PunctuationId::Eq | PunctuationId::Comma | PunctuationId::Colon if angle == 0 => break,
                    PunctuationId::LBracket if self.check_punct_at(1, PunctuationId::LBracket) => {
                        self.skip_group();
                    }
                    PunctuationId::LBracket if angle == 0 => break,
                    PunctuationId::LParen if angle == 0 => {
                        return self.function(start, head_start, operator_at, template, ctx);
                    }
                    PunctuationId::LParen | PunctuationId::LBracket => {
                        if !self.skip_group() {
                            return self.unparseable(start);
                        }
                    }
                    PunctuationId::Lt => {
                        angle += 1;
                        self.advance();
                    }
                    PunctuationId::Gt => {
                        angle = angle.saturating_sub(1);
                        self.advance();
                    }
                    _ => self.advance(),
                },
                TokenKind::Word => {
                    if ctx.in_class && self.pos > head_start && self.access_marker().is_some() {
                        break;
                    }
                    if ATTRIBUTE_MACROS.contains(&self.text_at(self.pos))
                        && self.check_punct_at(1, PunctuationId::LParen)
                    {
                        self.skip_attributes();
                    } else if self.check_keyword(KeywordId::Operator) && angle == 0 {
                        operator_at = Some(self.pos);
                        self.advance();
                        self.operator_symbol();
                    } else {
                        self.advance();
                    }
                }
                _ => self.advance(),
            }
        }

        self.field(start, head_start, template, ctx)
    }

    /// Consume the symbol after `operator`, stopping at the parameter list's `(`.
    fn operator_symbol(&mut self) {
        if self.check_punct(PunctuationId::LParen) && self.check_punct_at(1, PunctuationId::RParen) {
            // operator()
            self.advance();
            self.advance();
            return;
        }
        if self.check_punct(PunctuationId::LBracket) && self.check_punct_at(1, PunctuationId::RBracket) {
            self.advance();
            self.advance();
            return;
        }
        if self.check_keyword(KeywordId::Delete) || self.text_at(self.pos) == "new" {
            self.advance();
            if self.check_punct(PunctuationId::LBracket) && self.check_punct_at(1, PunctuationId::RBracket) {
                self.advance();
                self.advance();
            }
            return;
        }
        // Symbolic operators (`<<=`), literal operators (`"" _km`), and conversion types (`const char*`).
        let mut angle = 0usize;
        while !self.is_at_end() {
            match self.peek().punctuation_id() {
                Some(PunctuationId::LParen) if angle == 0 => return,
                Some(PunctuationId::Semicolon | PunctuationId::LBrace | PunctuationId::RBrace) => return,
                Some(PunctuationId::Lt) if self.is_identifier_at(self.pos.wrapping_sub(1)) => angle += 1,
                Some(PunctuationId::Gt) if angle > 0 => angle -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    /// A function declarator; the current token is the parameter list's `(`.
    fn function(
        &mut self,
        start: usize,
        head_start: usize,
        operator_at: Option<usize>,
        template: Option<TemplateHeader>,
        ctx: &ScopeCtx,
    ) -> Statement {
        let lparen = self.pos;

        // `int (*callback)(int);` declares a field of function-pointer type.
        if operator_at.is_none()
            && (self.check_punct_at(1, PunctuationId::Star)
                || self.check_punct_at(1, PunctuationId::Amp)
                || self.check_punct_at(1, PunctuationId::Caret))
        {
            return self.function_pointer_field(start, head_start, template, ctx);
        }

        let (name, name_start, is_destructor) = match operator_at {
            Some(at) => {
                let symbol = self.normalize(at + 1, lparen);
                let spaced = symbol.starts_with(|c: char| c.is_alphanumeric() || c == '_');
                let name = if spaced {
                    format!("operator {symbol}")
                } else {
                    format!("operator{symbol}")
                };
                (name, at, false)
            }
            None => {
                let Some(at) = lparen.checked_sub(1).filter(|&at| at >= head_start && self.token_at(at).kind.is_word())
                else {
                    return self.opaque(start, "parenthesized expression");
                };
                let word = self.text_at(at);
                if at > head_start && self.token_at(at - 1).kind.is_punctuation(PunctuationId::Tilde) {
                    (format!("~{word}"), at - 1, true)
                } else {
                    (word.to_string(), at, false)
                }
            }
        };

        // `Outer::Inner::name` qualification in front of the name.
        let mut qual_start = name_start;
        while qual_start >= head_start + 2
            && self.token_at(qual_start - 1).kind.is_punctuation(PunctuationId::ColonColon)
            && self.token_at(qual_start - 2).kind.is_word()
        {
            qual_start -= 2;
        }
        let qualifier = (qual_start < name_start).then(|| self.normalize(qual_start, name_start));

        let specifiers = self.leading_specifiers(head_start, qual_start);
        let mut return_type =
            (specifiers.end < qual_start).then(|| self.normalize(specifiers.end, qual_start));

        let is_constructor = return_type.is_none()
            && !is_destructor
            && operator_at.is_none()
            && (ctx.class_name.as_deref() == Some(name.as_str())
                || qualifier
                    .as_deref()
                    .and_then(|q| q.trim_end_matches("::").rsplit("::").next())
                    .is_some_and(|owner| owner == name));

        if return_type.is_none() && operator_at.is_none() && !is_destructor && !is_constructor {
            // A call with no return type that does not name the class: a macro invocation.
            tracing::debug!(name = %name, "skipping call-like statement");
            self.skip_group();
            self.match_punct(PunctuationId::Semicolon);
            return Statement::Opaque;
        }

        if !self.skip_group() {
            return self.unparseable(start);
        }
        let params = self.params(lparen + 1, self.pos - 1);

        // Trailing qualifiers.
        let mut is_const = false;
        loop {
            if self.check_punct(PunctuationId::Amp) {
                self.advance();
                continue;
            }
            if self.check_punct(PunctuationId::LBracket) && self.check_punct_at(1, PunctuationId::LBracket) {
                self.skip_group();
                continue;
            }
            if self.match_punct(PunctuationId::Arrow) {
                let type_start = self.pos;
                self.skip_trailing_return();
                return_type = Some(self.normalize(type_start, self.pos));
                continue;
            }
            match self.keyword_at(self.pos) {
                Some(KeywordId::Const) => {
                    is_const = true;
                    self.advance();
                }
                Some(KeywordId::Volatile | KeywordId::Override | KeywordId::Final) => self.advance(),
                Some(KeywordId::Noexcept | KeywordId::Throw) => {
                    self.advance();
                    if self.check_punct(PunctuationId::LParen) {
                        self.skip_group();
                    }
                }
                None if self.peek().kind.is_word() && looks_like_macro(self.text_at(self.pos)) => {
                    self.advance();
                    if self.check_punct(PunctuationId::LParen) {
                        self.skip_group();
                    }
                }
                _ => break,
            }
        }
        if operator_at.is_some() && return_type.is_none() {
            // Conversion operator: the converted-to type is what it returns.
            return_type = name.strip_prefix("operator ").map(str::to_string);
        }

        let body = match self.peek().punctuation_id() {
            Some(PunctuationId::Semicolon) => {
                self.advance();
                FunctionBody::None
            }
            Some(PunctuationId::Eq) => {
                self.advance();
                let body = if self.text_at(self.pos) == "0" {
                    FunctionBody::PureVirtual
                } else if self.check_keyword(KeywordId::Default) {
                    FunctionBody::Defaulted
                } else if self.check_keyword(KeywordId::Delete) {
                    FunctionBody::Deleted
                } else {
                    FunctionBody::None
                };
                self.skip_to_statement_end();
                body
            }
            Some(PunctuationId::Colon) | Some(PunctuationId::LBrace) => {
                let body_start = self.pos;
                if self.check_punct(PunctuationId::Colon) && !self.skip_initializer_list() {
                    return self.unparseable(start);
                }
                if !self.skip_group() {
                    return Statement::Recovered(self.recover(RecoveryReason::UnterminatedBlock, start));
                }
                FunctionBody::Inline(self.range(body_start, self.pos))
            }
            Some(PunctuationId::Comma) => {
                self.skip_to_statement_end();
                FunctionBody::None
            }
            // Missing `;` (or something the builder does not model); keep the declaration, leave the rest.
            _ => FunctionBody::None,
        };

        let function = FunctionDecl {
            name,
            qualifier,
            return_type,
            params,
            is_const,
            is_virtual: specifiers.is_virtual,
            is_static: specifiers.is_static,
            body,
        };
        let decl = if operator_at.is_some() {
            Declaration::Operator(function)
        } else if is_destructor {
            Declaration::Destructor(function)
        } else if is_constructor {
            Declaration::Constructor(function)
        } else {
            Declaration::Method(function)
        };
        Statement::Decl(self.node(decl, ctx, template, start))
    }

    /// Skip a trailing return type (`-> std::vector<int>`), stopping before the body, `;`, or `= 0`.
    fn skip_trailing_return(&mut self) {
        while !self.is_at_end() {
            match self.peek().punctuation_id() {
                Some(
                    PunctuationId::LBrace | PunctuationId::Semicolon | PunctuationId::Eq | PunctuationId::RBrace,
                ) => return,
                Some(PunctuationId::Lt) => {
                    if !self.skip_angle_group() {
                        return;
                    }
                }
                Some(PunctuationId::LParen) => {
                    self.skip_group();
                }
                _ if self.check_keyword(KeywordId::Override) || self.check_keyword(KeywordId::Final) => return,
                _ => self.advance(),
            }
        }
    }

    /// Skip a constructor initializer list; the current token is its `:`. Stops before the body's `{`.
    fn skip_initializer_list(&mut self) -> bool {
        self.advance(); // :
        loop {
            // Member or base name, possibly qualified or templated.
            while !self.is_at_end()
                && !self.check_punct(PunctuationId::LParen)
                && !self.check_punct(PunctuationId::LBrace)
            {
                if self.check_punct(PunctuationId::Semicolon) || self.check_punct(PunctuationId::RBrace) {
                    return false;
                }
                if self.check_punct(PunctuationId::Lt) {
                    if !self.skip_angle_group() {
                        return false;
                    }
                    continue;
                }
                self.advance();
            }
            if self.is_at_end() || !self.skip_group() {
                return false;
            }
            self.match_punct(PunctuationId::Ellipsis);
            if !self.match_punct(PunctuationId::Comma) {
                return self.check_punct(PunctuationId::LBrace);
            }
        }
    }

    /// A field whose declarator is parenthesized (`void (*handler)(int);`); the current token is that `(`.
    fn function_pointer_field(
        &mut self,
        start: usize,
        head_start: usize,
        template: Option<TemplateHeader>,
        ctx: &ScopeCtx,
    ) -> Statement {
        let declarator = self.pos;
        if !self.skip_group() {
            return self.unparseable(start);
        }
        let name = (declarator..self.pos)
            .find(|&i| self.is_identifier_at(i) && !self.check_punct_at_index(i + 1, PunctuationId::ColonColon))
            .map(|i| self.text_at(i).to_string());
        let specifiers = self.leading_specifiers(head_start, declarator);
        if !self.skip_to_statement_end() {
            return self.unparseable(start);
        }
        let Some(name) = name else {
            return Statement::Opaque;
        };
        // The type is the whole declarator, e.g. `void (*)(int)` spelled with its name.
        let end = self.pos - 1;
        let decl = Declaration::Field(FieldDecl {
            name,
            ty: self.normalize(specifiers.end, end),
            is_static: specifiers.is_static,
        });
        Statement::Decl(self.node(decl, ctx, template, start))
    }

    /// A non-function member; the current token is the declarator terminator (or an access marker).
    fn field(&mut self, start: usize, head_start: usize, template: Option<TemplateHeader>, ctx: &ScopeCtx) -> Statement {
        let end = self.pos;
        let terminated = matches!(
            self.peek().punctuation_id(),
            Some(
                PunctuationId::Semicolon
                    | PunctuationId::Eq
                    | PunctuationId::Comma
                    | PunctuationId::Colon
                    | PunctuationId::LBracket
                    | PunctuationId::LBrace
            )
        );

        let specifiers = self.leading_specifiers(head_start, end);
        let named = end
            .checked_sub(1)
            .filter(|&last| last > specifiers.end && self.is_declarator_name_at(last))
            .filter(|&last| !self.token_at(last - 1).kind.is_punctuation(PunctuationId::ColonColon));

        if !terminated {
            // Ran into `}` or an access marker without a `;`.
            if end == head_start {
                return self.unparseable(start);
            }
            return match named {
                Some(_) => self.unparseable(start),
                None => {
                    tracing::debug!(offset = self.token_at(head_start).span.start, "skipping unterminated macro");
                    Statement::Opaque
                }
            };
        }

        let Some(last) = named else {
            return self.opaque(start, "statement without a declarator");
        };
        if !self.skip_to_statement_end() {
            return self.unparseable(start);
        }

        let decl = Declaration::Field(FieldDecl {
            name: self.text_at(last).to_string(),
            ty: self.normalize(specifiers.end, last),
            is_static: specifiers.is_static,
        });
        Statement::Decl(self.node(decl, ctx, template, start))
    }

    fn check_punct_at_index(&self, index: usize, id: PunctuationId) -> bool {
        self.token_at(index).kind.is_punctuation(id)
    }
}
