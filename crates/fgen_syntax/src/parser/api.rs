/// Build the declaration tree for a token stream.
///
/// This is the main public entrypoint for the builder. It is total: structural damage is recorded in the tree as
/// [`Recovered`] spans and reported through [`Parsed::diagnostics`].
///
/// ## Parameters
/// - `source`: The text the tokens were produced from.
/// - `tokens`: Token stream produced by `fgen_syntax::lexer`.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(source: &str, tokens: &[Token]) -> Parsed {
    Parser::new(source, tokens).parse()
}
