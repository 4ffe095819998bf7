//! Define the reserved-word vocabulary the declaration builder recognizes.
//!
//! This module is the single source of truth for the C++ words that steer scanning: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records spellings, categories, and whether each word is
//! reserved everywhere or only in certain positions.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (C++ is).
//! - The segmenter does not classify words; the builder asks this registry when it needs to.
//!
//! ## Examples
//! ```rust
//! use fgen_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("virtual"), Some(KeywordId::Virtual));
//! assert_eq!(keywords::category(KeywordId::Virtual), KeywordCategory::Specifier);
//! assert_eq!(keywords::from_str("Virtual"), None);
//! ```

use super::registry::Reservation;

/// Stable identifier for every registered word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Scopes / type definitions
    Namespace,
    Class,
    Struct,
    Union,
    Enum,
    Template,
    Typename,

    // Access
    Public,
    Protected,
    Private,

    // Function / declaration specifiers
    Virtual,
    Static,
    Inline,
    Explicit,
    Constexpr,
    Consteval,
    Extern,
    Mutable,
    Friend,

    // Qualifiers
    Const,
    Volatile,
    Noexcept,
    Override,
    Final,

    // Opaque statements
    Typedef,
    Using,
    StaticAssert,

    // Fundamental types
    Void,
    Bool,
    Char,
    WcharT,
    Short,
    Int,
    Long,
    Signed,
    Unsigned,
    Float,
    Double,
    Auto,

    // Special
    Operator,
    Default,
    Delete,
    Throw,
}

/// High-level grouping used by the builder and by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Introduces a scope or a type definition (`namespace`, `class`, `enum`, `template`).
    Scope,
    /// Visibility-section markers (`public:`).
    Access,
    /// Leading declaration specifiers that are not part of a type (`virtual`, `static`).
    Specifier,
    /// Trailing or cv-qualifiers (`const`, `noexcept`, `override`).
    Qualifier,
    /// Statements the builder treats as opaque (`typedef`, `using`).
    Statement,
    /// Fundamental type spellings (`void`, `unsigned`, `int`).
    FundamentalType,
    /// Everything else with special meaning (`operator`, `= default`).
    Special,
}

/// Metadata for a registered word.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub reservation: Reservation,
}

/// Registry of all words the builder recognizes.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Scopes / type definitions
    info(KeywordId::Namespace, "namespace", KeywordCategory::Scope),
    info(KeywordId::Class, "class", KeywordCategory::Scope),
    info(KeywordId::Struct, "struct", KeywordCategory::Scope),
    info(KeywordId::Union, "union", KeywordCategory::Scope),
    info(KeywordId::Enum, "enum", KeywordCategory::Scope),
    info(KeywordId::Template, "template", KeywordCategory::Scope),
    info(KeywordId::Typename, "typename", KeywordCategory::Scope),
    // Access
    info(KeywordId::Public, "public", KeywordCategory::Access),
    info(KeywordId::Protected, "protected", KeywordCategory::Access),
    info(KeywordId::Private, "private", KeywordCategory::Access),
    // Specifiers
    info(KeywordId::Virtual, "virtual", KeywordCategory::Specifier),
    info(KeywordId::Static, "static", KeywordCategory::Specifier),
    info(KeywordId::Inline, "inline", KeywordCategory::Specifier),
    info(KeywordId::Explicit, "explicit", KeywordCategory::Specifier),
    info(KeywordId::Constexpr, "constexpr", KeywordCategory::Specifier),
    info(KeywordId::Consteval, "consteval", KeywordCategory::Specifier),
    info(KeywordId::Extern, "extern", KeywordCategory::Specifier),
    info(KeywordId::Mutable, "mutable", KeywordCategory::Specifier),
    info(KeywordId::Friend, "friend", KeywordCategory::Statement),
    // Qualifiers
    info(KeywordId::Const, "const", KeywordCategory::Qualifier),
    info(KeywordId::Volatile, "volatile", KeywordCategory::Qualifier),
    info(KeywordId::Noexcept, "noexcept", KeywordCategory::Qualifier),
    contextual(KeywordId::Override, "override", KeywordCategory::Qualifier),
    contextual(KeywordId::Final, "final", KeywordCategory::Qualifier),
    // Opaque statements
    info(KeywordId::Typedef, "typedef", KeywordCategory::Statement),
    info(KeywordId::Using, "using", KeywordCategory::Statement),
    info(KeywordId::StaticAssert, "static_assert", KeywordCategory::Statement),
    // Fundamental types
    info(KeywordId::Void, "void", KeywordCategory::FundamentalType),
    info(KeywordId::Bool, "bool", KeywordCategory::FundamentalType),
    info(KeywordId::Char, "char", KeywordCategory::FundamentalType),
    info(KeywordId::WcharT, "wchar_t", KeywordCategory::FundamentalType),
    info(KeywordId::Short, "short", KeywordCategory::FundamentalType),
    info(KeywordId::Int, "int", KeywordCategory::FundamentalType),
    info(KeywordId::Long, "long", KeywordCategory::FundamentalType),
    info(KeywordId::Signed, "signed", KeywordCategory::FundamentalType),
    info(KeywordId::Unsigned, "unsigned", KeywordCategory::FundamentalType),
    info(KeywordId::Float, "float", KeywordCategory::FundamentalType),
    info(KeywordId::Double, "double", KeywordCategory::FundamentalType),
    info(KeywordId::Auto, "auto", KeywordCategory::FundamentalType),
    // Special
    info(KeywordId::Operator, "operator", KeywordCategory::Special),
    info(KeywordId::Default, "default", KeywordCategory::Special),
    info(KeywordId::Delete, "delete", KeywordCategory::Special),
    info(KeywordId::Throw, "throw", KeywordCategory::Special),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if the word is a fundamental type spelling (`int`, `unsigned`, ...).
pub fn is_fundamental_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::FundamentalType
}

/// Return `true` if the word only has special meaning in certain positions and may otherwise name a variable.
pub fn is_contextual(id: KeywordId) -> bool {
    info_for(id).reservation == Reservation::Contextual
}

/// Full metadata for an id.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is registered.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        reservation: Reservation::Reserved,
    }
}

const fn contextual(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        reservation: Reservation::Contextual,
    }
}
