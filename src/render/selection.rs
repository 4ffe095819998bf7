//! Which types get a test fixture.

use fgen_syntax::ast::{DeclKind, DeclNode, DeclarationTree};
use thiserror::Error;

/// Type selection for the test-stub pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every named class or struct declared at namespace scope.
    #[default]
    TopLevel,
    /// Types named by simple (`Sample`) or qualified (`keggle::Sample::Inner`) name; nested types allowed.
    Named(Vec<String>),
}

impl Selection {
    /// An empty list selects the top-level types.
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Selection::TopLevel
        } else {
            Selection::Named(names)
        }
    }
}

/// Requested types that are not declared in the header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type(s) not declared in the header: {}", .missing.join(", "))]
pub struct SelectionMiss {
    pub missing: Vec<String>,
}

/// A class-like node together with its `::`-qualified name.
#[derive(Debug, Clone, Copy)]
pub struct SelectedType<'t> {
    pub node: &'t DeclNode,
    pub name: &'t str,
}

/// Resolve `selection` against `tree`, in source order. A type matched by several names is selected once.
///
/// ## Errors
/// [`SelectionMiss`] listing every name that matched nothing.
pub fn select<'t>(tree: &'t DeclarationTree, selection: &Selection) -> Result<Vec<SelectedType<'t>>, SelectionMiss> {
    let mut types = Vec::new();
    collect(&tree.declarations, "", &mut types);

    let Selection::Named(names) = selection else {
        return Ok(types
            .iter()
            .filter(|(_, node)| node.kind() == DeclKind::ClassOrStruct)
            .filter_map(|&(_, node)| selected(node))
            .collect());
    };

    let wanted: Vec<&str> = names.iter().map(|n| n.trim().trim_start_matches("::")).collect();
    let missing: Vec<String> = wanted
        .iter()
        .filter(|name| !types.iter().any(|(qualified, _)| matches(qualified, name)))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SelectionMiss { missing });
    }

    Ok(types
        .iter()
        .filter(|(qualified, _)| wanted.iter().any(|name| matches(qualified, name)))
        .filter_map(|&(_, node)| selected(node))
        .collect())
}

fn selected(node: &DeclNode) -> Option<SelectedType<'_>> {
    Some(SelectedType { node, name: node.name()? })
}

/// `qualified` equals `name` or ends with `::name`.
fn matches(qualified: &str, name: &str) -> bool {
    !name.is_empty()
        && qualified
            .strip_suffix(name)
            .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with("::"))
}

/// Every named class-like node, paired with its qualified name, in source order.
fn collect<'t>(nodes: &'t [DeclNode], prefix: &str, out: &mut Vec<(String, &'t DeclNode)>) {
    for node in nodes {
        match node.kind() {
            DeclKind::Namespace => {
                let inner = match node.name() {
                    Some(name) => qualify(prefix, name),
                    None => prefix.to_string(),
                };
                collect(node.children(), &inner, out);
            }
            DeclKind::ClassOrStruct | DeclKind::NestedClassOrStruct => {
                // Anonymous classes cannot be named, and neither can anything inside them.
                let Some(name) = node.name() else {
                    continue;
                };
                let qualified = qualify(prefix, name);
                out.push((qualified.clone(), node));
                collect(node.children(), &qualified, out);
            }
            _ => {}
        }
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}::{name}")
    }
}
