//! Placeholder template filler
//!
//! Scaffolds are plain text with `${name}` markers. Filling is a pure function of the scaffold text and a
//! [`Substitutions`] map: markers are matched case-insensitively, and anything that is not a well-formed marker
//! (including RCS keywords such as `$Id$`) passes through untouched.
//!
//! ## Built-in scaffolds
//!
//! | Scaffold                       | File               | Markers                                        |
//! |--------------------------------|--------------------|------------------------------------------------|
//! | [`Scaffold::RunnerMain`]       | `unittestmain.cpp` | `author`, `date`                               |
//! | [`Scaffold::FilePrologue`]     | `template.cpp`     | `author`, `date`                               |
//! | [`Scaffold::HeaderSkeleton`]   | `template.h`       | `author`, `date`, `wrapper`                    |
//! | [`Scaffold::Makefile`]         | `makefile`         | `author`, `date`, `cpp_suffix`                 |
//! | [`Scaffold::UnitTestMakefile`] | `makefile.test`    | the above plus `project_root`, `project_sources` |
//!
//! Each one can be replaced by a file of the same name in the configured template directory.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const RUNNER_MAIN: &str = include_str!("../assets/templates/unittestmain.cpp");
const FILE_PROLOGUE: &str = include_str!("../assets/templates/template.cpp");
const HEADER_SKELETON: &str = include_str!("../assets/templates/template.h");
const MAKEFILE: &str = include_str!("../assets/templates/makefile");
const UNIT_TEST_MAKEFILE: &str = include_str!("../assets/templates/makefile.test");

/// Errors produced while loading or filling a scaffold.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// At least one marker had no value. Lists every missing marker once, in order of first use.
    #[error("no value for template marker(s): {}", .missing.join(", "))]
    MissingSubstitution { missing: Vec<String> },

    #[error("cannot read template '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// Substitutions
// ============================================================================

/// Marker values, keyed by lower-cased marker name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    values: BTreeMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a marker value; a later value for the same (case-insensitive) name wins.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Replace every `${name}` marker in `template`.
///
/// ## Errors
/// [`TemplateError::MissingSubstitution`] when any marker has no value; no partial text is returned.
///
/// ## Examples
/// ```rust
/// use fgen::template::{fill, Substitutions};
///
/// let values = Substitutions::new().with("author", "kevin wan");
/// assert_eq!(fill("// $Id$ by ${AUTHOR}", &values).unwrap(), "// $Id$ by kevin wan");
/// assert!(fill("${date}", &values).is_err());
/// ```
pub fn fill(template: &str, values: &Substitutions) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut missing: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(at) = rest.find("${") {
        out.push_str(&rest[..at]);
        let after = &rest[at + 2..];
        let Some(name) = marker_name(after) else {
            out.push_str("${");
            rest = after;
            continue;
        };
        match values.get(name) {
            Some(value) => out.push_str(value),
            None => {
                let key = name.to_lowercase();
                if !missing.contains(&key) {
                    missing.push(key);
                }
            }
        }
        rest = &after[name.len() + 1..];
    }
    out.push_str(rest);

    if missing.is_empty() {
        Ok(out)
    } else {
        Err(TemplateError::MissingSubstitution { missing })
    }
}

/// Name of the well-formed marker at the start of `text` (the part right after `${`).
fn marker_name(text: &str) -> Option<&str> {
    let end = text.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    (end > 0 && text[end..].starts_with('}')).then(|| &text[..end])
}

// ============================================================================
// Scaffolds
// ============================================================================

/// The fixed scaffolds the generator fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scaffold {
    /// CppUnit runner entry point (`main`).
    RunnerMain,
    /// Comment block that starts every generated source file.
    FilePrologue,
    /// New header with include guards.
    HeaderSkeleton,
    /// Project makefile building every source in its directory.
    Makefile,
    /// Makefile for the unit-test directory; links the project sources with the fixtures.
    UnitTestMakefile,
}

impl Scaffold {
    pub const ALL: [Scaffold; 5] = [
        Scaffold::RunnerMain,
        Scaffold::FilePrologue,
        Scaffold::HeaderSkeleton,
        Scaffold::Makefile,
        Scaffold::UnitTestMakefile,
    ];

    /// File name looked up in the template directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Scaffold::RunnerMain => "unittestmain.cpp",
            Scaffold::FilePrologue => "template.cpp",
            Scaffold::HeaderSkeleton => "template.h",
            Scaffold::Makefile => "makefile",
            Scaffold::UnitTestMakefile => "makefile.test",
        }
    }

    pub fn builtin(self) -> &'static str {
        match self {
            Scaffold::RunnerMain => RUNNER_MAIN,
            Scaffold::FilePrologue => FILE_PROLOGUE,
            Scaffold::HeaderSkeleton => HEADER_SKELETON,
            Scaffold::Makefile => MAKEFILE,
            Scaffold::UnitTestMakefile => UNIT_TEST_MAKEFILE,
        }
    }
}

/// Scaffold texts for one run: built-ins, with any overrides from the template directory applied.
#[derive(Debug, Clone)]
pub struct Scaffolds {
    runner_main: Cow<'static, str>,
    file_prologue: Cow<'static, str>,
    header_skeleton: Cow<'static, str>,
    makefile: Cow<'static, str>,
    unit_test_makefile: Cow<'static, str>,
}

impl Default for Scaffolds {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Scaffolds {
    pub fn builtin() -> Self {
        Self {
            runner_main: Cow::Borrowed(RUNNER_MAIN),
            file_prologue: Cow::Borrowed(FILE_PROLOGUE),
            header_skeleton: Cow::Borrowed(HEADER_SKELETON),
            makefile: Cow::Borrowed(MAKEFILE),
            unit_test_makefile: Cow::Borrowed(UNIT_TEST_MAKEFILE),
        }
    }

    /// Load the scaffolds, preferring `template_dir/<file name>` where such a file exists.
    pub fn load(template_dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut scaffolds = Self::builtin();
        let Some(dir) = template_dir else {
            return Ok(scaffolds);
        };
        for scaffold in Scaffold::ALL {
            let path = dir.join(scaffold.file_name());
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "using scaffold override");
            *scaffolds.slot(scaffold) = Cow::Owned(text);
        }
        Ok(scaffolds)
    }

    pub fn text(&self, scaffold: Scaffold) -> &str {
        match scaffold {
            Scaffold::RunnerMain => &self.runner_main,
            Scaffold::FilePrologue => &self.file_prologue,
            Scaffold::HeaderSkeleton => &self.header_skeleton,
            Scaffold::Makefile => &self.makefile,
            Scaffold::UnitTestMakefile => &self.unit_test_makefile,
        }
    }

    /// Fill one scaffold with `values`.
    pub fn fill(&self, scaffold: Scaffold, values: &Substitutions) -> Result<String, TemplateError> {
        fill(self.text(scaffold), values)
    }

    fn slot(&mut self, scaffold: Scaffold) -> &mut Cow<'static, str> {
        match scaffold {
            Scaffold::RunnerMain => &mut self.runner_main,
            Scaffold::FilePrologue => &mut self.file_prologue,
            Scaffold::HeaderSkeleton => &mut self.header_skeleton,
            Scaffold::Makefile => &mut self.makefile,
            Scaffold::UnitTestMakefile => &mut self.unit_test_makefile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Substitutions {
        Substitutions::new()
            .with("author", "Kevin Wan <wanjunfeng@gmail.com>")
            .with("date", "2006-10-25")
    }

    #[test]
    fn test_fill_replaces_every_marker() {
        let out = fill("${author} / ${date} / ${author}", &values()).unwrap();
        assert_eq!(out, "Kevin Wan <wanjunfeng@gmail.com> / 2006-10-25 / Kevin Wan <wanjunfeng@gmail.com>");
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let out = fill("${Author} ${DATE}", &values()).unwrap();
        assert_eq!(out, "Kevin Wan <wanjunfeng@gmail.com> 2006-10-25");
    }

    #[test]
    fn test_non_markers_pass_through() {
        let text = "// $Id$\n$ {author} ${} ${not closed\nprice: $5 ${a-b}";
        assert_eq!(fill(text, &Substitutions::new()).unwrap(), text);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let values = Substitutions::new().with("author", "${date}");
        assert_eq!(fill("${author}", &values).unwrap(), "${date}");
    }

    #[test]
    fn test_missing_markers_are_all_reported() {
        let err = fill("${author} ${date} ${Author} ${wrapper}", &Substitutions::new()).unwrap_err();
        match err {
            TemplateError::MissingSubstitution { missing } => {
                assert_eq!(missing, vec!["author", "date", "wrapper"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_message_lists_names() {
        let err = fill("${author}${date}", &Substitutions::new()).unwrap_err();
        assert_eq!(err.to_string(), "no value for template marker(s): author, date");
    }

    #[test]
    fn test_builtin_prologue() {
        let out = Scaffolds::builtin().fill(Scaffold::FilePrologue, &values()).unwrap();
        assert_eq!(
            out,
            "// $Id$\n\n/**\n * @author Kevin Wan <wanjunfeng@gmail.com>\n * @date   2006-10-25\n */\n"
        );
    }

    #[test]
    fn test_header_skeleton_needs_wrapper() {
        let scaffolds = Scaffolds::builtin();
        assert!(scaffolds.fill(Scaffold::HeaderSkeleton, &values()).is_err());
        let out = scaffolds
            .fill(Scaffold::HeaderSkeleton, &values().with("wrapper", "SAMPLE_H"))
            .unwrap();
        assert!(out.contains("#ifndef SAMPLE_H\n#define SAMPLE_H\n\n#endif // SAMPLE_H\n"));
    }

    #[test]
    fn test_runner_main_reports_through_exit_code() {
        let out = Scaffolds::builtin().fill(Scaffold::RunnerMain, &values()).unwrap();
        assert!(out.contains("TestFactoryRegistry::getRegistry().makeTest()"));
        assert!(out.contains("return result.wasSuccessful() ? 0 : 1;"));
    }

    #[test]
    fn test_makefiles_keep_make_variables() {
        let values = values()
            .with("cpp_suffix", ".cc")
            .with("project_root", "..")
            .with("project_sources", "$(wildcard ../*.cc)");
        let scaffolds = Scaffolds::builtin();

        let project = scaffolds.fill(Scaffold::Makefile, &values).unwrap();
        assert!(project.contains("SRC      = $(wildcard *.cc)\nOBJ      = $(SRC:.cc=.o)\n"));
        assert!(project.contains("%.o: %.cc\n\t$(CXX) $(CXXFLAGS) -MMD -MP -c -o $@ $<\n"));

        let tests = scaffolds.fill(Scaffold::UnitTestMakefile, &values).unwrap();
        assert!(tests.contains("CXXFLAGS += -Wall -g -I..\n"));
        assert!(tests.contains("SRC     += $(wildcard ../*.cc)\n"));
        assert!(tests.contains("LIBS     += -lcppunit\n"));
    }

    #[test]
    fn test_template_dir_overrides_only_present_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("template.cpp"), "// by ${author}\n").unwrap();
        let scaffolds = Scaffolds::load(Some(dir.path())).unwrap();
        assert_eq!(scaffolds.text(Scaffold::FilePrologue), "// by ${author}\n");
        assert_eq!(scaffolds.text(Scaffold::RunnerMain), Scaffold::RunnerMain.builtin());
    }
}
