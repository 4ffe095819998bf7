//! Artifact renderer
//!
//! A header is scanned once into a [`ScannedHeader`] (source, tokens, declaration tree, builder warnings); each pass
//! then reads it without modifying it:
//!
//! - [`doc`]: the header with documentation placeholders inserted,
//! - [`unittest`]: a CppUnit test source with one fixture per selected type,
//! - [`source`]: an out-of-line definition skeleton.
//!
//! [`render`] runs one pass for a [`RenderRequest`], filling the file prologue scaffold first so that a missing
//! marker aborts the artifact before any rendering work is done.

pub mod doc;
pub mod selection;
pub mod source;
pub mod unittest;

use fgen_syntax::ast::DeclarationTree;
use fgen_syntax::diagnostics::StructuralRecovery;
use fgen_syntax::lexer::{self, Token};
use fgen_syntax::parser;
use thiserror::Error;

use crate::encoding::SourceEncoding;
use crate::template::{Scaffold, Scaffolds, Substitutions, TemplateError};
use doc::{DocOptions, LosslessMismatch};
use selection::{Selection, SelectionMiss};

pub use doc::render_doc;
pub use source::render_source;
pub use unittest::render_unittest;

/// Errors that abort a single artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Selection(#[from] SelectionMiss),

    #[error("internal error: {0}")]
    Lossless(#[from] LosslessMismatch),
}

/// One header, segmented and built.
#[derive(Debug, Clone)]
pub struct ScannedHeader {
    /// Name used in `#include` lines of generated sources.
    pub file_name: String,
    pub source: String,
    pub tokens: Vec<Token>,
    pub tree: DeclarationTree,
    pub diagnostics: Vec<StructuralRecovery>,
    /// Encoding the header was read in; artifacts are written in the same one.
    pub encoding: SourceEncoding,
}

impl ScannedHeader {
    pub fn scan(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let tokens = lexer::lex(&source);
        let parsed = parser::parse(&source, &tokens);
        Self {
            file_name: file_name.into(),
            source,
            tokens,
            tree: parsed.tree,
            diagnostics: parsed.diagnostics,
            encoding: SourceEncoding::Utf8,
        }
    }

    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Which artifact to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Documentation,
    TestStub,
    SourceSkeleton,
}

/// Everything one pass needs.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub header: &'a ScannedHeader,
    pub mode: RenderMode,
    pub scaffolds: &'a Scaffolds,
    pub values: Substitutions,
    pub selection: Selection,
    pub doc: DocOptions,
}

impl<'a> RenderRequest<'a> {
    pub fn new(header: &'a ScannedHeader, mode: RenderMode, scaffolds: &'a Scaffolds) -> Self {
        Self {
            header,
            mode,
            scaffolds,
            values: Substitutions::new(),
            selection: Selection::default(),
            doc: DocOptions::default(),
        }
    }

    pub fn with_values(mut self, values: Substitutions) -> Self {
        self.values = values;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_doc_options(mut self, options: DocOptions) -> Self {
        self.doc = options;
        self
    }
}

/// Render the requested artifact.
///
/// ## Errors
/// - [`RenderError::Template`] when the prologue has a marker without a value.
/// - [`RenderError::Selection`] when a requested type is not declared.
/// - [`RenderError::Lossless`] when the documentation output does not reduce to the input.
#[tracing::instrument(skip_all, fields(header = %request.header.file_name, mode = ?request.mode))]
pub fn render(request: &RenderRequest<'_>) -> Result<String, RenderError> {
    let header = request.header;
    match request.mode {
        RenderMode::Documentation => {
            let artifact = render_doc(&header.source, &header.tokens, &header.tree, request.doc);
            artifact.verify(&header.source)?;
            Ok(artifact.text)
        }
        RenderMode::TestStub => {
            let prologue = request.scaffolds.fill(Scaffold::FilePrologue, &request.values)?;
            let fixtures = unittest::fixtures(&header.tree, &request.selection)?;
            let namespaces = unittest::namespaces(&header.tree);
            Ok(render_unittest(&header.file_name, &namespaces, &fixtures, &prologue))
        }
        RenderMode::SourceSkeleton => {
            let prologue = request.scaffolds.fill(Scaffold::FilePrologue, &request.values)?;
            Ok(render_source(&header.file_name, &header.tree, &prologue))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Substitutions {
        Substitutions::new().with("author", "Kevin Wan").with("date", "2006-10-25")
    }

    #[test]
    fn test_missing_author_aborts_test_stub() {
        let header = ScannedHeader::scan("a.h", "struct A { void f(); };");
        let scaffolds = Scaffolds::builtin();
        let request = RenderRequest::new(&header, RenderMode::TestStub, &scaffolds)
            .with_values(Substitutions::new().with("date", "2006-10-25"));
        match render(&request) {
            Err(RenderError::Template(TemplateError::MissingSubstitution { missing })) => {
                assert_eq!(missing, vec!["author"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_selection_miss_aborts_test_stub() {
        let header = ScannedHeader::scan("a.h", "struct A { void f(); };");
        let scaffolds = Scaffolds::builtin();
        let request = RenderRequest::new(&header, RenderMode::TestStub, &scaffolds)
            .with_values(values())
            .with_selection(Selection::Named(vec!["B".into()]));
        assert!(matches!(render(&request), Err(RenderError::Selection(_))));
    }

    #[test]
    fn test_documentation_needs_no_values() {
        let header = ScannedHeader::scan("a.h", "void f();\n");
        let scaffolds = Scaffolds::builtin();
        let request = RenderRequest::new(&header, RenderMode::Documentation, &scaffolds);
        assert_eq!(render(&request).unwrap(), "/// <summary>\n/// </summary>\nvoid f();\n");
    }

    #[test]
    fn test_source_skeleton_starts_with_prologue() {
        let header = ScannedHeader::scan("a.h", "void f();\n");
        let scaffolds = Scaffolds::builtin();
        let request = RenderRequest::new(&header, RenderMode::SourceSkeleton, &scaffolds).with_values(values());
        let out = render(&request).unwrap();
        assert!(out.starts_with("// $Id$\n\n/**\n * @author Kevin Wan\n * @date   2006-10-25\n */\n#include \"a.h\"\n\n"));
        assert!(out.ends_with("void f()\n{\n}\n\n"));
    }

    #[test]
    fn test_scan_keeps_builder_warnings() {
        let header = ScannedHeader::scan("broken.h", "class Broken {\n  void f();\n");
        assert_eq!(header.diagnostics.len(), 1);
        assert_eq!(header.tree.all_recovered().len(), 1);
    }
}
