//! Source-skeleton pass: empty out-of-line definitions for every function the header declares without a body.

use fgen_syntax::ast::{DeclKind, DeclNode, DeclarationTree, FunctionBody, FunctionDecl};

/// Render the `.cc` skeleton for `header_name`.
///
/// ## Notes
/// - Pure virtual, defaulted, deleted, and inline-defined functions are skipped.
/// - Members of template classes (at any depth) are skipped; member templates of ordinary classes are kept.
/// - Namespaces are reopened around their definitions; namespaces with nothing to define are left out.
pub fn render_source(header_name: &str, tree: &DeclarationTree, prologue: &str) -> String {
    let mut out = String::from(prologue);
    out.push_str(&format!("#include \"{header_name}\"\n\n"));
    render_scope(&mut out, &tree.declarations, "");
    out
}

fn render_scope(out: &mut String, nodes: &[DeclNode], scope: &str) {
    for node in nodes {
        match node.kind() {
            DeclKind::Namespace => {
                let mut inner = String::new();
                render_scope(&mut inner, node.children(), "");
                if inner.is_empty() {
                    continue;
                }
                match node.name() {
                    Some(name) => out.push_str(&format!("namespace {name}\n{{\n\n")),
                    None => out.push_str("namespace\n{\n\n"),
                }
                out.push_str(&inner);
                out.push_str("}\n\n");
            }
            DeclKind::ClassOrStruct | DeclKind::NestedClassOrStruct => {
                if node.is_template() {
                    continue;
                }
                let Some(name) = node.name() else {
                    continue;
                };
                render_scope(out, node.children(), &format!("{scope}{name}::"));
            }
            _ => {
                if let Some(function) = node.as_function() {
                    if function.body == FunctionBody::None {
                        render_definition(out, node, function, scope);
                    }
                }
            }
        }
    }
}

fn render_definition(out: &mut String, node: &DeclNode, function: &FunctionDecl, scope: &str) {
    if let Some(template) = &node.template {
        out.push_str(&format!("template <{}>\n", template.text));
    }
    if let Some(ty) = function.return_type.as_deref() {
        if !function.is_conversion() {
            out.push_str(ty);
            out.push(' ');
        }
    }
    out.push_str(scope);
    if let Some(qualifier) = &function.qualifier {
        out.push_str(qualifier);
    }
    out.push_str(&function.name);
    let params: Vec<&str> = function.params.iter().map(|p| p.decl.as_str()).collect();
    out.push_str(&format!("({})", params.join(", ")));
    if function.is_const {
        out.push_str(" const");
    }
    out.push_str("\n{\n}\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgen_syntax::{lexer, parser};

    fn skeleton(source: &str) -> String {
        let tokens = lexer::lex(source);
        let parsed = parser::parse(source, &tokens);
        render_source("sample.h", &parsed.tree, "// prologue\n\n")
    }

    #[test]
    fn test_sample_header_skeleton() {
        let source = include_str!("../../tests/fixtures/sample.h");
        insta::assert_snapshot!(skeleton(source), @r#"
        // prologue

        #include "sample.h"

        namespace keggle
        {

        void SampleStruct::printStruct(const string& s) const
        {
        }

        unsigned int SampleStruct::getPrivate() const
        {
        }

        Sample::Sample()
        {
        }

        template <typename T>
        void Sample::print()
        {
        }

        Sample::operator int()
        {
        }

        ostream& Sample::operator<<()
        {
        }

        Sample& Sample::operator++()
        {
        }

        bool Sample::operator==(const Sample& other) const
        {
        }

        }
        "#);
    }

    #[test]
    fn test_defaults_and_specifiers_are_dropped() {
        let source = "struct Widget { static int count(int base = 0); virtual void draw() = 0; Widget() = default; };";
        assert_eq!(
            skeleton(source),
            "// prologue\n\n#include \"sample.h\"\n\nint Widget::count(int base)\n{\n}\n\n"
        );
    }

    #[test]
    fn test_nested_scope_chain_and_free_functions() {
        let source = "int helper(int);\nclass Outer { class Inner { ~Inner(); }; };\n";
        assert_eq!(
            skeleton(source),
            "// prologue\n\n#include \"sample.h\"\n\nint helper(int)\n{\n}\n\nOuter::Inner::~Inner()\n{\n}\n\n"
        );
    }

    #[test]
    fn test_template_classes_and_empty_namespaces_are_skipped() {
        let source = "namespace empty { template <typename T> struct Box { T get() const; }; }\n";
        assert_eq!(skeleton(source), "// prologue\n\n#include \"sample.h\"\n\n");
    }
}
