#![forbid(unsafe_code)]
//! fgen: documentation and CppUnit scaffolding for C++ headers
//!
//! A header is segmented losslessly, built into a declaration tree, and rendered into one of several artifacts:
//! the header with documentation placeholders, a CppUnit test source, or an out-of-line definition skeleton. Fixed
//! scaffolds (runner main, file prologue, header skeleton, makefiles) are filled from `${name}` markers.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: registry metadata lookups in `fgen_core` use `.expect(...)`; the registry guardrail tests
//!   keep every id covered.
//!
//! - **Malformed headers**: never a panic and never an error. The builder keeps what it cannot parse as opaque
//!   text and reports a warning; bytes that are not UTF-8 are read as Latin-1.

pub mod cli;
pub mod config;
pub mod depot;
pub mod encoding;
pub mod generate;
pub mod render;
pub mod template;

pub use fgen_syntax::ast;
pub use fgen_syntax::diagnostics;
pub use fgen_syntax::lexer;
pub use fgen_syntax::parser;

pub use config::GenConfig;
pub use render::{RenderError, RenderMode, RenderRequest, ScannedHeader, render};
pub use template::{Scaffold, Scaffolds, Substitutions, TemplateError, fill};
