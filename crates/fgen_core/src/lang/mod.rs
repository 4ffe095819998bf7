//! C++ vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `PunctuationId`) instead of comparing raw strings all over the
//! scanner, and look up spellings/metadata via the registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no syntax-tree types, no IO, no side effects.
//! - Only the reserved words the declaration builder cares about are registered. Every other identifier (including
//!   keywords such as `if` or `return`) is an ordinary word to the scanner.
//!
//! ## Examples
//! ```rust
//! use fgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("namespace"), Some(KeywordId::Namespace));
//! assert_eq!(keywords::as_str(KeywordId::Namespace), "namespace");
//! ```

pub mod keywords;
pub mod punctuation;
pub mod registry;
