/// Scope bodies and statement dispatch.
///
/// A scope is the file, a namespace body, a class body, or a transparent `extern "C"` block. Each statement in it
/// becomes a node, an opaque skip, or a recovered span.
impl<'a> Parser<'a> {
    /// Fill one scope until its closing `}` (`braced`) or end of input.
    ///
    /// ## Notes
    /// - At file scope a stray `}` is recorded as [`RecoveryReason::UnmatchedClosingBrace`] and skipped.
    /// - Visibility markers are only meaningful inside classes; they update `ctx` for later siblings.
    fn scope_body(&mut self, ctx: &mut ScopeCtx, braced: bool) -> ScopeBody {
        let mut body = ScopeBody::default();
        loop {
            if self.is_at_end() {
                return body;
            }
            if self.check_punct(PunctuationId::RBrace) {
                if braced {
                    self.advance();
                    body.closed = true;
                    return body;
                }
                let start = self.pos;
                self.advance();
                body.recovered
                    .push(self.recover(RecoveryReason::UnmatchedClosingBrace, start));
                continue;
            }
            if self.match_punct(PunctuationId::Semicolon) {
                continue;
            }
            if let Some(visibility) = self.access_marker().filter(|_| ctx.in_class) {
                ctx.visibility = visibility;
                self.advance();
                self.advance();
                continue;
            }

            let start = self.pos;
            match self.statement(ctx) {
                Statement::Decl(node) => body.members.push(node),
                Statement::Transparent(inner) => {
                    body.members.extend(inner.members);
                    body.recovered.extend(inner.recovered);
                }
                Statement::Opaque => {}
                Statement::Recovered(recovered) => body.recovered.push(recovered),
            }
            if self.pos == start {
                // Every statement form consumes at least one token; this is a backstop.
                body.recovered
                    .push(self.recover(RecoveryReason::UnparseableStatement, start));
            }
        }
    }

    /// Classify and consume one statement.
    fn statement(&mut self, ctx: &ScopeCtx) -> Statement {
        let start = self.pos;

        let template = if self.check_keyword(KeywordId::Template) {
            if !self.check_punct_at(1, PunctuationId::Lt) {
                // Explicit instantiation: `template class Foo<int>;`
                return self.opaque(start, "explicit instantiation");
            }
            match self.template_header() {
                Some(header) => Some(header),
                None => return Statement::Recovered(self.recover(RecoveryReason::UnparseableStatement, start)),
            }
        } else {
            None
        };

        self.skip_attributes();

        if self.check_keyword(KeywordId::Extern) {
            if self.check_keyword_at(1, KeywordId::Template) {
                return self.opaque(start, "extern template");
            }
            if template.is_none()
                && self.peek_at(1).kind == TokenKind::StringLiteral
                && self.check_punct_at(2, PunctuationId::LBrace)
            {
                return self.linkage_block(start, ctx);
            }
        }

        match self.keyword_at(self.pos) {
            Some(KeywordId::Typedef | KeywordId::Using | KeywordId::Friend | KeywordId::StaticAssert) => {
                self.opaque(start, self.text_at(self.pos))
            }
            Some(KeywordId::Namespace) => self.namespace(start, ctx),
            Some(KeywordId::Inline) if self.check_keyword_at(1, KeywordId::Namespace) => self.namespace(start, ctx),
            Some(KeywordId::Class | KeywordId::Struct | KeywordId::Union) => self.class_like(start, template, ctx),
            Some(KeywordId::Enum) => self.enum_decl(start, template, ctx),
            _ => self.member(start, template, ctx),
        }
    }

    /// Skip a statement the tree does not model.
    fn opaque(&mut self, start: usize, what: &str) -> Statement {
        tracing::debug!(what, offset = self.peek().span.start, "skipping opaque statement");
        if self.skip_to_statement_end() {
            Statement::Opaque
        } else {
            Statement::Recovered(self.recover(RecoveryReason::UnparseableStatement, start))
        }
    }

    /// A statement that ran into end of input or an enclosing `}` before it could be classified.
    fn unparseable(&mut self, start: usize) -> Statement {
        Statement::Recovered(self.recover(RecoveryReason::UnparseableStatement, start))
    }

    /// `template <...>` header(s) in front of a declaration.
    ///
    /// Consecutive headers (`template <class T> template <class U>`) are merged; the last one names the parameters.
    fn template_header(&mut self) -> Option<TemplateHeader> {
        let start = self.pos;
        let mut header = None;
        while self.check_keyword(KeywordId::Template) && self.check_punct_at(1, PunctuationId::Lt) {
            self.advance();
            let open = self.pos;
            if !self.skip_angle_group() {
                return None;
            }
            let close = self.pos - 1;
            header = Some((open + 1, close));
        }
        let (first, last) = header?;
        Some(TemplateHeader {
            params: self.template_params(first, last),
            text: self.normalize(first, last),
            tokens: self.range(start, self.pos),
        })
    }

    /// `extern "C" { ... }`: members join the enclosing scope.
    fn linkage_block(&mut self, start: usize, ctx: &ScopeCtx) -> Statement {
        self.advance(); // extern
        self.advance(); // "C"
        self.advance(); // {
        let mut inner = ctx.clone();
        let mut body = self.scope_body(&mut inner, true);
        if !body.closed {
            body.recovered
                .push(self.recover(RecoveryReason::UnterminatedBlock, start));
        }
        Statement::Transparent(body)
    }

    /// `[inline] namespace [a[::b]] { ... }`, or an opaque namespace alias.
    fn namespace(&mut self, start: usize, ctx: &ScopeCtx) -> Statement {
        let is_inline = self.match_keyword(KeywordId::Inline);
        self.advance(); // namespace
        self.skip_attributes();

        let mut parts: Vec<&str> = Vec::new();
        loop {
            if self.match_keyword(KeywordId::Inline) {
                continue;
            }
            if self.is_identifier_at(self.pos) {
                parts.push(self.text_at(self.pos));
                self.advance();
                if self.match_punct(PunctuationId::ColonColon) {
                    continue;
                }
            }
            break;
        }
        let name = (!parts.is_empty()).then(|| parts.join("::"));

        if self.check_punct(PunctuationId::Eq) {
            return self.opaque(start, "namespace alias");
        }
        if !self.check_punct(PunctuationId::LBrace) {
            return self.opaque(start, "namespace without a body");
        }
        if self.depth >= MAX_NESTING_DEPTH {
            return self.too_deep(start);
        }

        self.advance(); // {
        self.depth += 1;
        let mut inner = ScopeCtx::namespace();
        let body = self.scope_body(&mut inner, true);
        self.depth -= 1;

        let mut recovered = body.recovered;
        if !body.closed {
            recovered.push(self.recover(RecoveryReason::UnterminatedBlock, start));
        }
        let decl = Declaration::Namespace(NamespaceDecl {
            name,
            is_inline,
            members: body.members,
            recovered,
        });
        // Namespace-scope declarations are public regardless of where the namespace sits.
        Statement::Decl(self.node(decl, &ScopeCtx { visibility: Visibility::Public, ..ctx.clone() }, None, start))
    }

    /// Skip a block the builder refuses to recurse into; the current token is its opening `{`.
    fn too_deep(&mut self, start: usize) -> Statement {
        self.skip_group();
        if self.check_punct(PunctuationId::Semicolon) {
            self.advance();
        }
        Statement::Recovered(self.recover(RecoveryReason::NestingTooDeep, start))
    }
}
