//! Declaration tree builder for C++ headers
//!
//! Consumes the segmenter's token stream and recognizes a bounded declaration grammar: namespaces, class-likes
//! (with nested types), enums, template headers, constructors/destructors, operators, member and free functions,
//! fields, and visibility-section markers. Everything else (macros, typedefs, function bodies, ...) is skipped as
//! opaque text.
//!
//! ## Examples
//!
//! ```rust
//! use fgen_syntax::ast::DeclKind;
//! use fgen_syntax::{lexer, parser};
//!
//! let source = "class Sample {\npublic:\n    Sample();\n    ~Sample();\n};\n";
//! let tokens = lexer::lex(source);
//! let parsed = parser::parse(source, &tokens);
//! let kinds: Vec<_> = parsed.tree.declarations[0].children().iter().map(|n| n.kind()).collect();
//! assert_eq!(kinds, vec![DeclKind::Constructor, DeclKind::Destructor]);
//! ```

use crate::ast::*;
use crate::diagnostics::StructuralRecovery;
use crate::lexer::{Token, TokenKind};
use fgen_core::lang::keywords::{self, KeywordCategory, KeywordId};
use fgen_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all builder
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/scope.rs");
include!("parser/decl.rs");
include!("parser/members.rs");
include!("parser/params.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
