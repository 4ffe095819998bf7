//! Test-stub pass: one CppUnit fixture per selected type.
//!
//! A fixture gets one failing stub per public constructor or method of its type, in declaration order.
//! Destructors and operators never get stubs, and members of nested types stay with the nested type.

use fgen_core::conventions::{CONSTRUCTOR_TEST_NAME, NOT_IMPLEMENTED_MSG, fixture_name, method_test_name};
use fgen_syntax::ast::{DeclKind, DeclNode, DeclarationTree, Visibility};

use super::selection::{Selection, SelectionMiss, select};

/// Test cases planned for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Simple name of the tested type.
    pub class_name: String,
    pub test_cases: Vec<String>,
}

impl Fixture {
    /// Build the fixture for a class-like node.
    pub fn for_class(class_name: &str, class: &DeclNode) -> Self {
        Self {
            class_name: class_name.to_string(),
            test_cases: test_cases(class),
        }
    }

    /// `<ClassName>Test`
    pub fn name(&self) -> String {
        fixture_name(&self.class_name)
    }
}

/// Test-case names for the direct members of `class`.
///
/// ## Notes
/// - Eligible: public constructors and methods. Template methods count as ordinary methods.
/// - Overloads collapse into the first occurrence's test case.
pub fn test_cases(class: &DeclNode) -> Vec<String> {
    let mut cases: Vec<String> = Vec::new();
    for member in class.children() {
        if member.visibility != Visibility::Public {
            continue;
        }
        let case = match (member.kind(), member.name()) {
            (DeclKind::Constructor, _) => CONSTRUCTOR_TEST_NAME.to_string(),
            (DeclKind::Method, Some(name)) => method_test_name(name),
            _ => continue,
        };
        if !cases.contains(&case) {
            cases.push(case);
        }
    }
    cases
}

/// Plan the fixtures for `tree`.
pub fn fixtures(tree: &DeclarationTree, selection: &Selection) -> Result<Vec<Fixture>, SelectionMiss> {
    Ok(select(tree, selection)?
        .into_iter()
        .map(|selected| Fixture::for_class(selected.name, selected.node))
        .collect())
}

/// `::`-joined paths of every named namespace, in order of first appearance.
pub fn namespaces(tree: &DeclarationTree) -> Vec<String> {
    fn visit(nodes: &[DeclNode], prefix: &str, out: &mut Vec<String>) {
        for node in nodes.iter().filter(|n| n.kind() == DeclKind::Namespace) {
            let path = match node.name() {
                Some(name) if prefix.is_empty() => name.to_string(),
                Some(name) => format!("{prefix}::{name}"),
                None => prefix.to_string(),
            };
            if !path.is_empty() && !out.contains(&path) {
                out.push(path.clone());
            }
            visit(node.children(), &path, out);
        }
    }

    let mut out = Vec::new();
    visit(&tree.declarations, "", &mut out);
    out
}

/// Assemble the test source: prologue, includes, `using namespace` lines, then the fixtures.
pub fn render_unittest(header_name: &str, namespaces: &[String], fixtures: &[Fixture], prologue: &str) -> String {
    let mut out = String::from(prologue);
    out.push_str("#include <cppunit/extensions/HelperMacros.h>\n");
    out.push_str(&format!("#include \"{header_name}\"\n\n"));
    for namespace in namespaces {
        out.push_str(&format!("using namespace {namespace};\n\n"));
    }
    for fixture in fixtures {
        render_fixture(&mut out, fixture);
    }
    out
}

fn render_fixture(out: &mut String, fixture: &Fixture) {
    let name = fixture.name();

    out.push_str(&format!("class {name} : public CppUnit::TestFixture\n{{\n"));
    out.push_str(&format!("    CPPUNIT_TEST_SUITE({name});\n"));
    for case in &fixture.test_cases {
        out.push_str(&format!("    CPPUNIT_TEST({case});\n"));
    }
    out.push_str("    CPPUNIT_TEST_SUITE_END();\n\n");
    out.push_str("public:\n    void setUp();\n    void tearDown();\n\n");
    for case in &fixture.test_cases {
        out.push_str(&format!("    void {case}();\n"));
    }
    out.push_str("};\n\n");
    out.push_str(&format!("CPPUNIT_TEST_SUITE_REGISTRATION({name});\n\n"));

    out.push_str(&format!("void {name}::setUp()\n{{\n}}\n\n"));
    out.push_str(&format!("void {name}::tearDown()\n{{\n}}\n\n"));
    for case in &fixture.test_cases {
        out.push_str(&format!(
            "void {name}::{case}()\n{{\n    CPPUNIT_FAIL(\"{NOT_IMPLEMENTED_MSG}\");\n}}\n\n"
        ));
    }
}
