//! Shared syntax frontend for fgen: a lossless segmenter and a bounded C++ declaration tree builder.
//!
//! The crate is dependency-light and intended for reuse by every renderer pass.
//!
//! ## Notes
//! - This crate is intentionally “declaration-only”: it does not evaluate the preprocessor, instantiate templates,
//!   resolve names, or type-check anything. Constructs outside the recognized grammar are kept as opaque spans.
//! - Both entry points are total: [`lexer::lex`] never rejects input and [`parser::parse`] recovers from structural
//!   damage instead of failing (see [`diagnostics::StructuralRecovery`]).
//!
//! ## Examples
//! ```rust
//! use fgen_syntax::{lexer, parser};
//!
//! let source = "namespace demo { struct Point { int x() const; }; }\n";
//! let tokens = lexer::lex(source);
//! let parsed = parser::parse(source, &tokens);
//! assert_eq!(parsed.tree.declarations.len(), 1);
//! assert!(parsed.diagnostics.is_empty());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
