//! Declaration tree definitions for fgen
//!
//! The tree only models what the renderers need: containers (namespaces, classes, enums) and the members they
//! declare. Everything else in a header is kept as text and reproduced from the token stream.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Half-open range of indices into the token stream (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Identifier as written in the header.
pub type Ident = String;

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// The keyword that introduced a class-like definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKey {
    Class,
    Struct,
    Union,
}

impl ClassKey {
    /// Visibility of members declared before the first section marker.
    pub fn default_visibility(self) -> Visibility {
        match self {
            ClassKey::Class => Visibility::Private,
            ClassKey::Struct | ClassKey::Union => Visibility::Public,
        }
    }
}

/// Flat classification of a node, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Namespace,
    ClassOrStruct,
    NestedClassOrStruct,
    Enum,
    Constructor,
    Destructor,
    Operator,
    Method,
    Field,
}

/// A parsed header: top-level declarations plus whatever could not be parsed at file scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationTree {
    pub declarations: Vec<DeclNode>,
    pub recovered: Vec<Recovered>,
}

impl DeclarationTree {
    /// Depth-first, source-ordered walk over every node in the tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.declarations.iter().rev().collect(),
        }
    }

    /// Every recovered span in the tree, root first, then in walk order.
    pub fn all_recovered(&self) -> Vec<&Recovered> {
        let mut out: Vec<&Recovered> = self.recovered.iter().collect();
        for node in self.walk() {
            match &node.decl {
                Declaration::Namespace(ns) => out.extend(ns.recovered.iter()),
                Declaration::Class(class) => out.extend(class.recovered.iter()),
                _ => {}
            }
        }
        out
    }
}

/// Iterator returned by [`DeclarationTree::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a DeclNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DeclNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// A declaration together with the attributes every kind shares.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclNode {
    pub decl: Declaration,
    /// Access level at the point of declaration (namespace-scope declarations are public).
    pub visibility: Visibility,
    /// `template <...>` header immediately preceding the declaration.
    pub template: Option<TemplateHeader>,
    /// Tokens covered by the declaration, including leading specifiers and the template header.
    pub tokens: TokenRange,
    pub span: Span,
}

impl DeclNode {
    pub fn kind(&self) -> DeclKind {
        match &self.decl {
            Declaration::Namespace(_) => DeclKind::Namespace,
            Declaration::Class(c) if c.nested => DeclKind::NestedClassOrStruct,
            Declaration::Class(_) => DeclKind::ClassOrStruct,
            Declaration::Enum(_) => DeclKind::Enum,
            Declaration::Constructor(_) => DeclKind::Constructor,
            Declaration::Destructor(_) => DeclKind::Destructor,
            Declaration::Operator(_) => DeclKind::Operator,
            Declaration::Method(_) => DeclKind::Method,
            Declaration::Field(_) => DeclKind::Field,
        }
    }

    /// Declared name, if the declaration has one (anonymous namespaces, classes, and enums do not).
    pub fn name(&self) -> Option<&str> {
        match &self.decl {
            Declaration::Namespace(ns) => ns.name.as_deref(),
            Declaration::Class(c) => c.name.as_deref(),
            Declaration::Enum(e) => e.name.as_deref(),
            Declaration::Constructor(f)
            | Declaration::Destructor(f)
            | Declaration::Operator(f)
            | Declaration::Method(f) => Some(&f.name),
            Declaration::Field(f) => Some(&f.name),
        }
    }

    /// Ordered children (empty for non-container kinds).
    pub fn children(&self) -> &[DeclNode] {
        match &self.decl {
            Declaration::Namespace(ns) => &ns.members,
            Declaration::Class(c) => &c.members,
            _ => &[],
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.decl {
            Declaration::Constructor(f)
            | Declaration::Destructor(f)
            | Declaration::Operator(f)
            | Declaration::Method(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.decl {
            Declaration::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_template(&self) -> bool {
        self.template.is_some()
    }
}

/// Closed set of recognized declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Constructor(FunctionDecl),
    Destructor(FunctionDecl),
    Operator(FunctionDecl),
    Method(FunctionDecl),
    Field(FieldDecl),
}

// ============================================================================
// Containers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    /// `None` for anonymous namespaces; nested names are joined with `::` (`a::b`).
    pub name: Option<Ident>,
    pub is_inline: bool,
    pub members: Vec<DeclNode>,
    pub recovered: Vec<Recovered>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub key: ClassKey,
    pub name: Option<Ident>,
    /// Declared inside another class.
    pub nested: bool,
    pub is_final: bool,
    /// Base-clause entries as written (`public Base<int>`).
    pub bases: Vec<String>,
    pub members: Vec<DeclNode>,
    pub recovered: Vec<Recovered>,
    /// The `{ ... }` body.
    pub body: TokenRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Option<Ident>,
    /// `enum class` / `enum struct`.
    pub scoped: bool,
    pub underlying: Option<String>,
    /// The `{ ... }` enumerator list, kept opaque.
    pub body: TokenRange,
}

// ============================================================================
// Members
// ============================================================================

/// A function-like declaration (constructor, destructor, operator, or method).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Unqualified name; operators are spelled `operator==`, `operator int`, ...
    pub name: Ident,
    /// Enclosing-scope qualification written in front of the name (`Outer::Inner::` for out-of-line definitions).
    pub qualifier: Option<String>,
    /// Return type with leading specifiers stripped; `None` for constructors and destructors.
    pub return_type: Option<String>,
    pub params: Vec<Param>,
    pub is_const: bool,
    pub is_virtual: bool,
    pub is_static: bool,
    pub body: FunctionBody,
}

impl FunctionDecl {
    /// `true` when the function returns something other than `void`.
    pub fn returns_value(&self) -> bool {
        self.return_type.as_deref().is_some_and(|ty| ty != "void")
    }

    /// `true` for conversion operators (`operator int`), whose return type is spelled in the name.
    pub fn is_conversion(&self) -> bool {
        self.name
            .strip_prefix("operator ")
            .is_some_and(|ty| self.return_type.as_deref() == Some(ty))
    }
}

/// What follows a function's parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionBody {
    /// Declaration only (`;`).
    None,
    /// Inline definition; the range covers the braces (and any constructor initializer list).
    Inline(TokenRange),
    /// `= 0`
    PureVirtual,
    /// `= default`
    Defaulted,
    /// `= delete`
    Deleted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter declaration text with the default argument removed (`const Sample& other`).
    pub decl: String,
    pub name: Option<Ident>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: Ident,
    /// Type text with storage specifiers stripped.
    pub ty: String,
    pub is_static: bool,
}

/// `template <...>` header.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateHeader {
    /// Parameter names in declared order (`T`, `N`, ...); unnamed parameters are omitted.
    pub params: Vec<Ident>,
    /// The full parameter list text, normalized (`typename T, int N = 3`).
    pub text: String,
    pub tokens: TokenRange,
}

// ============================================================================
// Recovery
// ============================================================================

/// A stretch of source the builder could not make sense of, kept as opaque text.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub tokens: TokenRange,
    pub span: Span,
    pub reason: RecoveryReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryReason {
    /// A `}` with no block to close.
    UnmatchedClosingBrace,
    /// A block still open at end of input.
    UnterminatedBlock,
    /// A statement that ended (end of input or enclosing `}`) before it could be classified.
    UnparseableStatement,
    /// A block nested deeper than the builder is willing to recurse.
    NestingTooDeep,
}

impl fmt::Display for RecoveryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryReason::UnmatchedClosingBrace => write!(f, "unmatched closing brace"),
            RecoveryReason::UnterminatedBlock => write!(f, "unterminated block"),
            RecoveryReason::UnparseableStatement => write!(f, "unparseable statement"),
            RecoveryReason::NestingTooDeep => write!(f, "nesting too deep"),
        }
    }
}
