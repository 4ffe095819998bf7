//! Documentation pass: insert a placeholder comment block before every declaration.
//!
//! The output is the input with blocks spliced in; nothing else is touched. A block is placed right before the
//! first token of the declaration (its template header, if any), indented like the declaration's line, using the
//! input's line ending:
//!
//! ```text
//! /// <summary>
//! /// </summary>
//! /// <param name="other"></param>
//! /// <returns></returns>
//! ```
//!
//! Namespaces are not annotated. A declaration that does not start its line is moved onto a fresh line.

use std::ops::Range;

use fgen_core::conventions::{DOC_COMMENT_OPENERS, DOC_RETURNS, DOC_SUMMARY_CLOSE, DOC_SUMMARY_OPEN, doc_param};
use fgen_syntax::ast::{DeclKind, DeclNode, DeclarationTree};
use fgen_syntax::lexer::{Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocOptions {
    /// Leave declarations alone when a documentation comment already sits right above them.
    pub skip_documented: bool,
}

/// The annotated header plus where the blocks went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocArtifact {
    pub text: String,
    /// Byte ranges of the inserted text, in output coordinates.
    inserted: Vec<Range<usize>>,
}

/// Removing the inserted blocks did not give back the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("annotated output does not reduce to its input (first difference at byte {offset})")]
pub struct LosslessMismatch {
    pub offset: usize,
}

impl DocArtifact {
    pub fn block_count(&self) -> usize {
        self.inserted.len()
    }

    pub fn inserted(&self) -> &[Range<usize>] {
        &self.inserted
    }

    /// The output with every inserted block removed.
    pub fn strip(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for range in &self.inserted {
            out.push_str(&self.text[cursor..range.start]);
            cursor = range.end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }

    /// Check that stripping the blocks reproduces `source` exactly.
    pub fn verify(&self, source: &str) -> Result<(), LosslessMismatch> {
        let stripped = self.strip();
        if stripped == source {
            return Ok(());
        }
        let offset = stripped
            .bytes()
            .zip(source.bytes())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| stripped.len().min(source.len()));
        Err(LosslessMismatch { offset })
    }
}

/// Annotate `source`.
pub fn render_doc(source: &str, tokens: &[Token], tree: &DeclarationTree, options: DocOptions) -> DocArtifact {
    let eol = line_ending(source);
    let mut insertions: Vec<(usize, String)> = tree
        .walk()
        .filter(|node| node.kind() != DeclKind::Namespace)
        .filter(|node| !(options.skip_documented && is_documented(source, tokens, node)))
        .map(|node| (node.span.start, block_text(source, node, eol)))
        .collect();
    insertions.sort_by_key(|(at, _)| *at);

    let extra: usize = insertions.iter().map(|(_, block)| block.len()).sum();
    let mut text = String::with_capacity(source.len() + extra);
    let mut inserted = Vec::with_capacity(insertions.len());
    let mut cursor = 0;
    for (at, block) in insertions {
        text.push_str(&source[cursor..at]);
        let start = text.len();
        text.push_str(&block);
        inserted.push(start..text.len());
        cursor = at;
    }
    text.push_str(&source[cursor..]);

    tracing::debug!(blocks = inserted.len(), "documentation blocks inserted");
    DocArtifact { text, inserted }
}

/// Placeholder lines for one declaration.
pub fn block_lines(node: &DeclNode) -> Vec<String> {
    let mut lines = vec![DOC_SUMMARY_OPEN.to_string(), DOC_SUMMARY_CLOSE.to_string()];
    if let Some(function) = node.as_function() {
        lines.extend(function.params.iter().filter_map(|p| p.name.as_deref()).map(doc_param));
        // Constructors and destructors have no return type to document.
        if function.returns_value() && matches!(node.kind(), DeclKind::Method | DeclKind::Operator) {
            lines.push(DOC_RETURNS.to_string());
        }
    }
    lines
}

/// The exact text inserted at `node.span.start`.
fn block_text(source: &str, node: &DeclNode, eol: &str) -> String {
    let at = node.span.start;
    let line_start = source[..at].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &source[line_start..at];
    let rest = prefix.trim_start_matches([' ', '\t']);
    let indent = &prefix[..prefix.len() - rest.len()];

    let mut text = String::new();
    if !rest.is_empty() {
        // Something precedes the declaration on its line.
        text.push_str(eol);
        text.push_str(indent);
    }
    for line in block_lines(node) {
        text.push_str(&line);
        text.push_str(eol);
        text.push_str(indent);
    }
    text
}

/// `\r\n` when the first line break of `source` is one, else `\n`.
fn line_ending(source: &str) -> &'static str {
    match source.find('\n') {
        Some(i) if source[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// A documentation comment ends right above the declaration (no blank line in between).
fn is_documented(source: &str, tokens: &[Token], node: &DeclNode) -> bool {
    let mut newlines = 0;
    for token in tokens[..node.tokens.start.min(tokens.len())].iter().rev() {
        let text = token.text(source);
        match token.kind {
            TokenKind::Whitespace => {
                newlines += text.matches('\n').count();
                if newlines > 1 {
                    return false;
                }
            }
            TokenKind::Comment(_) => {
                return text != "/**/" && DOC_COMMENT_OPENERS.iter().any(|opener| text.starts_with(opener));
            }
            _ => return false,
        }
    }
    false
}
