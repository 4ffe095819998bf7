/// Builder core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its top-level `parse()` entrypoint, and the small internal types shared
/// across the other builder chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all builder methods in a
///   single module while avoiding a single “god file”.

/// Deepest container nesting the builder recurses into; anything deeper is kept as a recovered span.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Output of the builder: the tree plus a warning for every recovered span in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub tree: DeclarationTree,
    pub diagnostics: Vec<StructuralRecovery>,
}

/// Running state of the scope being filled.
#[derive(Debug, Clone)]
struct ScopeCtx {
    /// Name of the enclosing class, used to recognize constructors.
    class_name: Option<Ident>,
    in_class: bool,
    /// Current section visibility; always public at namespace scope.
    visibility: Visibility,
}

impl ScopeCtx {
    fn namespace() -> Self {
        Self {
            class_name: None,
            in_class: false,
            visibility: Visibility::Public,
        }
    }

    fn class(name: Option<Ident>, key: ClassKey) -> Self {
        Self {
            class_name: name,
            in_class: true,
            visibility: key.default_visibility(),
        }
    }
}

/// Members and recovered spans collected for one scope.
#[derive(Debug, Default)]
struct ScopeBody {
    members: Vec<DeclNode>,
    recovered: Vec<Recovered>,
    /// The closing `}` was found (always `false` for the file scope).
    closed: bool,
}

/// What a single statement contributed to its scope.
enum Statement {
    Decl(DeclNode),
    /// Members of a linkage block, hoisted into the enclosing scope.
    Transparent(ScopeBody),
    Opaque,
    Recovered(Recovered),
}

/// Builder state.
///
/// ## Notes
/// - The builder is single-pass and total: malformed input is recorded as [`Recovered`] spans and never aborts.
/// - Positions (`pos`, statement starts) index the *significant* tokens only; trivia is skipped up front and
///   mapped back to stream indices when ranges are recorded.
pub struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    /// Stream indices of every non-trivia, non-`Eof` token.
    significant: Vec<usize>,
    eof: Token,
    pos: usize,
    depth: usize,
    diagnostics: Vec<StructuralRecovery>,
}

impl<'a> Parser<'a> {
    /// Create a new builder for a token stream.
    ///
    /// ## Parameters
    /// - `source`: The text the tokens were produced from.
    /// - `tokens`: Token stream produced by `fgen_syntax::lexer`.
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
            .map(|(i, _)| i)
            .collect();
        Self {
            source,
            tokens,
            significant,
            eof: Token::new(TokenKind::Eof, Span::new(source.len(), source.len())),
            pos: 0,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Build the declaration tree for the whole token stream.
    pub fn parse(mut self) -> Parsed {
        let mut ctx = ScopeCtx::namespace();
        let body = self.scope_body(&mut ctx, false);
        Parsed {
            tree: DeclarationTree {
                declarations: body.members,
                recovered: body.recovered,
            },
            diagnostics: self.diagnostics,
        }
    }
}
