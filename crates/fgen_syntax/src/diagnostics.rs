//! Builder warnings with source context.
//!
//! The builder never fails; when it has to give up on part of a header it records a [`crate::ast::Recovered`] span
//! in the tree and a [`StructuralRecovery`] warning here. Callers attach the source text when reporting:
//!
//! ```rust
//! use fgen_syntax::{lexer, parser};
//!
//! let source = "class Broken {\n  void f();\n";
//! let tokens = lexer::lex(source);
//! let parsed = parser::parse(source, &tokens);
//! let report = miette::Report::new(parsed.diagnostics[0].clone())
//!     .with_source_code(miette::NamedSource::new("broken.h", source.to_string()));
//! assert!(report.to_string().contains("unterminated block"));
//! ```

use crate::ast::{Recovered, RecoveryReason, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Warning emitted whenever the builder falls back to an opaque span.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{reason}; kept as opaque text")]
#[diagnostic(
    code(fgen::structural_recovery),
    severity(Warning),
    help("declarations inside this region are not documented or tested")
)]
pub struct StructuralRecovery {
    pub reason: RecoveryReason,
    pub span: Span,
    #[label("{reason}")]
    at: SourceSpan,
}

impl StructuralRecovery {
    pub fn new(reason: RecoveryReason, span: Span) -> Self {
        Self {
            reason,
            span,
            at: SourceSpan::new(span.start.into(), span.len()),
        }
    }
}

impl From<&Recovered> for StructuralRecovery {
    fn from(recovered: &Recovered) -> Self {
        Self::new(recovered.reason, recovered.span)
    }
}
