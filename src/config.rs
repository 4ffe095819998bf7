//! Generator configuration (`fgen.toml`)
//!
//! ```toml
//! author = "Kevin Wan <wanjunfeng@gmail.com>"
//! date = "today"              # or a literal such as "2006-10-25"
//! cpp_suffix = ".cc"
//! unit_test_dir = "unittest"
//! wrapper_prefix = ""
//! template_dir = "templates"  # relative to this file
//!
//! [vars]
//! company = "keggle"
//!
//! [unittest]
//! select = ["Sample"]
//! main = "app.cc"            # left out of the unit-test makefile
//!
//! [doc]
//! skip_documented = false
//! ```
//!
//! ## Lookup order
//!
//! 1. An explicit `--config PATH`
//! 2. `$FGEN_HOME/fgen.toml`
//! 3. `$HOME/.fgen/fgen.toml`
//! 4. Built-in defaults

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::template::Substitutions;

/// Name of the configuration file inside a config directory.
pub const CONFIG_FILE_NAME: &str = "fgen.toml";

/// `date` value that resolves to the local date at run time.
pub const TODAY: &str = "today";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    /// `${author}`; no default, so scaffolds fail without one.
    pub author: Option<String>,
    /// `${date}`; `"today"` is resolved at fill time.
    pub date: Option<String>,
    /// Extension of generated C++ sources.
    pub cpp_suffix: String,
    /// Where test fixtures and the runner go.
    pub unit_test_dir: PathBuf,
    /// Prepended to generated include-guard names.
    pub wrapper_prefix: String,
    /// Directory holding scaffold overrides.
    pub template_dir: Option<PathBuf>,
    /// Additional `${name}` values.
    pub vars: BTreeMap<String, String>,
    pub unittest: UnitTestConfig,
    pub doc: DocConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitTestConfig {
    /// Types to generate fixtures for; empty selects every top-level class.
    pub select: Vec<String>,
    /// Project source defining `main`, excluded from the unit-test build.
    pub main: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocConfig {
    /// Leave declarations that already carry a documentation comment alone.
    pub skip_documented: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            author: None,
            date: Some(TODAY.to_string()),
            cpp_suffix: ".cc".to_string(),
            unit_test_dir: PathBuf::from("unittest"),
            wrapper_prefix: String::new(),
            template_dir: None,
            vars: BTreeMap::new(),
            unittest: UnitTestConfig::default(),
            doc: DocConfig::default(),
        }
    }
}

impl GenConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_cpp_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.cpp_suffix = suffix.into();
        self
    }

    pub fn with_unit_test_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.unit_test_dir = dir.into();
        self
    }

    pub fn with_wrapper_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.wrapper_prefix = prefix.into();
        self
    }

    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_selection(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.unittest.select = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_documented(mut self, skip: bool) -> Self {
        self.doc.skip_documented = skip;
        self
    }

    /// Parse a TOML document; `origin` is only used in error messages.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read a config file. A relative `template_dir` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text, path)?;
        if let Some(dir) = config.template_dir.as_mut() {
            if dir.is_relative() {
                if let Some(base) = path.parent() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(config)
    }

    /// Resolve and load the configuration following the lookup order.
    ///
    /// Returns the config and the file it came from (`None` for built-in defaults).
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match locate(explicit, |name| std::env::var_os(name).map(PathBuf::from)) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Ok((Self::from_file(&path)?, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// The `date` value with `"today"` resolved to the local ISO date.
    pub fn resolved_date(&self) -> Option<String> {
        self.date.as_deref().map(|date| {
            if date.eq_ignore_ascii_case(TODAY) {
                chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
            } else {
                date.to_string()
            }
        })
    }

    /// Marker values for scaffold filling: `[vars]`, then `author`, `date`, and `cpp_suffix`.
    pub fn substitutions(&self) -> Substitutions {
        let mut values = Substitutions::new();
        for (name, value) in &self.vars {
            values.insert(name, value.as_str());
        }
        if let Some(author) = &self.author {
            values.insert("author", author.as_str());
        }
        if let Some(date) = self.resolved_date() {
            values.insert("date", date);
        }
        values.insert("cpp_suffix", self.cpp_suffix.as_str());
        values
    }

    /// Include-guard name for a header path: prefix + upper-cased stem + `_` + upper-cased extension.
    ///
    /// ## Examples
    /// ```rust
    /// use std::path::Path;
    /// use fgen::config::GenConfig;
    ///
    /// assert_eq!(GenConfig::new().wrapper_for(Path::new("src/sample.h")), "SAMPLE_H");
    /// assert_eq!(GenConfig::new().with_wrapper_prefix("KEGGLE_").wrapper_for(Path::new("my-io.hpp")), "KEGGLE_MY_IO_HPP");
    /// ```
    pub fn wrapper_for(&self, header: &Path) -> String {
        let name = header.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let guard: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{}", self.wrapper_prefix, guard)
    }
}

/// First existing config file in lookup order. An explicit path is returned even if missing, so reading it reports
/// the error.
fn locate(explicit: Option<&Path>, env: impl Fn(&str) -> Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidates = [
        env("FGEN_HOME").map(|home| home.join(CONFIG_FILE_NAME)),
        env("HOME").map(|home| home.join(".fgen").join(CONFIG_FILE_NAME)),
    ];
    candidates.into_iter().flatten().find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Defaults and builders
    // ========================================

    #[test]
    fn test_defaults() {
        let config = GenConfig::default();
        assert_eq!(config.cpp_suffix, ".cc");
        assert_eq!(config.unit_test_dir, PathBuf::from("unittest"));
        assert_eq!(config.author, None);
        assert_eq!(config.date.as_deref(), Some(TODAY));
        assert!(!config.doc.skip_documented);
        assert!(config.unittest.select.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let config = GenConfig::new()
            .with_author("kevin wan")
            .with_date("2006-10-25")
            .with_cpp_suffix(".cpp")
            .with_selection(["Sample"])
            .with_var("company", "keggle");
        assert_eq!(config.author.as_deref(), Some("kevin wan"));
        assert_eq!(config.cpp_suffix, ".cpp");
        assert_eq!(config.unittest.select, vec!["Sample"]);
        assert_eq!(config.vars.get("company").map(String::as_str), Some("keggle"));
    }

    // ========================================
    // TOML
    // ========================================

    #[test]
    fn test_parse_full_document() {
        let text = r#"
author = "Kevin Wan"
date = "2006-10-25"
cpp_suffix = ".cpp"
unit_test_dir = "tests/unit"
wrapper_prefix = "KEGGLE_"

[vars]
company = "keggle"

[unittest]
select = ["Sample", "keggle::SampleStruct"]
main = "app.cc"

[doc]
skip_documented = true
"#;
        let config = GenConfig::from_toml(text, Path::new("fgen.toml")).unwrap();
        assert_eq!(config.author.as_deref(), Some("Kevin Wan"));
        assert_eq!(config.unit_test_dir, PathBuf::from("tests/unit"));
        assert_eq!(config.unittest.select.len(), 2);
        assert_eq!(config.unittest.main.as_deref(), Some("app.cc"));
        assert!(config.doc.skip_documented);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = GenConfig::from_toml("author = \"a\"\n", Path::new("fgen.toml")).unwrap();
        assert_eq!(config.cpp_suffix, ".cc");
        assert_eq!(config.date.as_deref(), Some(TODAY));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = GenConfig::from_toml("athor = \"typo\"\n", Path::new("fgen.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config 'fgen.toml'"));
    }

    #[test]
    fn test_relative_template_dir_is_resolved_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "template_dir = \"templates\"\n").unwrap();
        let config = GenConfig::from_file(&path).unwrap();
        assert_eq!(config.template_dir, Some(dir.path().join("templates")));
    }

    // ========================================
    // Lookup
    // ========================================

    #[test]
    fn test_explicit_path_wins() {
        let found = locate(Some(Path::new("custom.toml")), |_| None);
        assert_eq!(found, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_fgen_home_before_home() {
        let fgen_home = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        fs::write(fgen_home.path().join(CONFIG_FILE_NAME), "").unwrap();
        fs::create_dir(home.path().join(".fgen")).unwrap();
        fs::write(home.path().join(".fgen").join(CONFIG_FILE_NAME), "").unwrap();

        let env = |name: &str| match name {
            "FGEN_HOME" => Some(fgen_home.path().to_path_buf()),
            "HOME" => Some(home.path().to_path_buf()),
            _ => None,
        };
        assert_eq!(locate(None, env), Some(fgen_home.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_home_fallback_and_defaults() {
        let home = tempfile::tempdir().unwrap();
        let env = |name: &str| (name == "HOME").then(|| home.path().to_path_buf());
        assert_eq!(locate(None, &env), None);

        fs::create_dir(home.path().join(".fgen")).unwrap();
        fs::write(home.path().join(".fgen").join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(locate(None, &env), Some(home.path().join(".fgen").join(CONFIG_FILE_NAME)));
    }

    // ========================================
    // Substitutions
    // ========================================

    #[test]
    fn test_today_resolves_to_iso_date() {
        let date = GenConfig::new().resolved_date().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok(), "got {date}");
    }

    #[test]
    fn test_substitutions_skip_unset_author() {
        let values = GenConfig::new().with_date("2006-10-25").substitutions();
        assert_eq!(values.get("date"), Some("2006-10-25"));
        assert_eq!(values.get("author"), None);
        assert_eq!(values.get("cpp_suffix"), Some(".cc"));
    }

    #[test]
    fn test_builtin_markers_override_vars() {
        let values = GenConfig::new()
            .with_var("Author", "from vars")
            .with_author("from config")
            .substitutions();
        assert_eq!(values.get("author"), Some("from config"));
    }

    #[test]
    fn test_wrapper_for() {
        let config = GenConfig::new();
        assert_eq!(config.wrapper_for(Path::new("sample.h")), "SAMPLE_H");
        assert_eq!(config.wrapper_for(Path::new("dir/Widget.hpp")), "WIDGET_HPP");
    }
}
