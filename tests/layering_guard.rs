//! Layering guardrails for the workspace crates.
//!
//! `fgen_core` is the vocabulary crate and must stay dependency-free; `fgen_syntax` may only depend on
//! `fgen_core` among the workspace crates (never on the `fgen` driver).

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn vocabulary_crate_has_no_dependencies() {
    let deps = dependencies(include_str!("../crates/fgen_core/Cargo.toml"));
    assert!(deps.is_empty(), "fgen_core must stay dependency-free, found: {deps:?}");
}

#[test]
fn syntax_crate_does_not_depend_on_driver() {
    let deps = dependencies(include_str!("../crates/fgen_syntax/Cargo.toml"));
    assert!(deps.contains(&"fgen_core".to_string()));
    assert!(
        !deps.iter().any(|d| d == "fgen"),
        "`fgen` must not appear in fgen_syntax's [dependencies]"
    );
}
