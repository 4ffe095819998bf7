//! Shared generator conventions (well-known names and placeholder spellings).

/// Suffix appended to a class name to name its fixture (`Sample` → `SampleTest`).
pub const FIXTURE_SUFFIX: &str = "Test";

/// Prefix of every generated test-case method.
pub const TEST_CASE_PREFIX: &str = "test";

/// Test-case name used for every public constructor (overloads collapse into it).
pub const CONSTRUCTOR_TEST_NAME: &str = "testConstructor";

/// Message every generated stub fails with.
pub const NOT_IMPLEMENTED_MSG: &str = "not implemented";

/// Documentation placeholder lines.
pub const DOC_SUMMARY_OPEN: &str = "/// <summary>";
pub const DOC_SUMMARY_CLOSE: &str = "/// </summary>";
pub const DOC_RETURNS: &str = "/// <returns></returns>";

/// Comment openers that mark an existing documentation comment.
pub const DOC_COMMENT_OPENERS: &[&str] = &["///", "//!", "/**", "/*!"];

/// Fixture name for a class.
///
/// ## Examples
/// ```rust
/// use fgen_core::conventions::fixture_name;
///
/// assert_eq!(fixture_name("Sample"), "SampleTest");
/// ```
pub fn fixture_name(class_name: &str) -> String {
    format!("{class_name}{FIXTURE_SUFFIX}")
}

/// Test-case name for a regular method: `test` + the member name with its first character upper-cased.
///
/// ## Examples
/// ```rust
/// use fgen_core::conventions::method_test_name;
///
/// assert_eq!(method_test_name("printStruct"), "testPrintStruct");
/// assert_eq!(method_test_name("_x"), "test_x");
/// ```
pub fn method_test_name(member: &str) -> String {
    let mut chars = member.chars();
    match chars.next() {
        Some(first) => format!("{TEST_CASE_PREFIX}{}{}", first.to_uppercase(), chars.as_str()),
        None => TEST_CASE_PREFIX.to_string(),
    }
}

/// Parameter placeholder line.
pub fn doc_param(name: &str) -> String {
    format!("/// <param name=\"{name}\"></param>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_test_name_keeps_rest_of_name() {
        assert_eq!(method_test_name("nothingToGen"), "testNothingToGen");
        assert_eq!(method_test_name("print"), "testPrint");
        assert_eq!(method_test_name("URL"), "testURL");
    }

    #[test]
    fn test_doc_param() {
        assert_eq!(doc_param("other"), "/// <param name=\"other\"></param>");
    }
}
