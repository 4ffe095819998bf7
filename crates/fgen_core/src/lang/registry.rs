//! Shareable metadata for `fgen_core::lang` registries.
//!
//! This submodule provides the small, dependency-free metadata types reused by every registry.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata steers the builder; the scanner remains the source of truth for syntax.

/// Whether a spelling is reserved everywhere or only meaningful in certain positions.
///
/// ## Notes
/// - `override` and `final` are *identifiers with special meaning*: they may legally name a variable. The builder
///   only treats them specially after a declarator.
///
/// ## Examples
/// ```rust
/// use fgen_core::lang::keywords::{self, KeywordId};
/// use fgen_core::lang::registry::Reservation;
///
/// assert_eq!(keywords::info_for(KeywordId::Final).reservation, Reservation::Contextual);
/// assert!(keywords::is_contextual(KeywordId::Override));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reservation {
    Reserved,
    Contextual,
}
