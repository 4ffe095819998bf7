//! Provide the canonical C++ vocabulary and naming conventions shared by the fgen scanner and renderers.
//!
//! This crate is intentionally small and dependency-free. It contains:
//! - the reserved-word and punctuation registries the segmenter and declaration builder match against, and
//! - the naming conventions the renderers use for fixtures, test cases, and documentation placeholders.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no syntax-tree types.
//! - The scanner enforces the (bounded) grammar; registries only answer “what is this spelling?”.

pub mod conventions;
pub mod lang;
