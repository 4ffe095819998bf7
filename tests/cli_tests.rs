//! End-to-end tests for the `fgen` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SAMPLE: &str = include_str!("fixtures/sample.h");
const SAMPLE_DOC: &str = include_str!("fixtures/sample_doc_standard.h");
const SAMPLE_TEST: &str = include_str!("fixtures/sampleTest_standard.cc");

const AUTHOR: &str = "Kevin Wan <wanjunfeng@gmail.com>";
const DATE: &str = "2006-10-25";

/// Run `fgen` in `dir` with no user configuration in reach.
fn fgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fgen"))
        .args(args)
        .current_dir(dir)
        .env("FGEN_HOME", dir)
        .env("HOME", dir)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn with_identity<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut all = args.to_vec();
    all.extend(["--author", AUTHOR, "--date", DATE]);
    all
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn unittest_writes_fixture_and_runner() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &with_identity(&["unittest", "sample.h"]));
    assert!(output.status.success(), "{}", stderr(&output));

    let fixture = fs::read_to_string(dir.path().join("unittest/sampleTest.cc")).unwrap();
    assert_eq!(fixture, SAMPLE_TEST.replace("&date", DATE));
    let runner = fs::read_to_string(dir.path().join("unittest/main.cc")).unwrap();
    assert!(runner.contains(AUTHOR));
    assert!(!runner.contains("${"));
    let makefile = fs::read_to_string(dir.path().join("unittest/makefile")).unwrap();
    assert!(makefile.contains("SRC     += $(wildcard ../*.cc)\n"));
    assert!(!makefile.contains("${"));
}

#[test]
fn unittest_makefile_leaves_out_project_main() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &with_identity(&["unittest", "sample.h", "--main", "app.cc"]));
    assert!(output.status.success(), "{}", stderr(&output));
    let makefile = fs::read_to_string(dir.path().join("unittest/makefile")).unwrap();
    assert!(makefile.contains("SRC     += $(filter-out ../app.cc, $(wildcard ../*.cc))\n"));
}

#[test]
fn no_runner_without_a_fixture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.h"), "struct Alpha { void run(); };\n").unwrap();

    let output = fgen(dir.path(), &with_identity(&["unittest", "a.h", "-s", "Missing"]));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Missing"));
    assert!(!dir.path().join("unittest").exists());
}

#[test]
fn makefile_command_writes_project_makefile() {
    let dir = tempfile::tempdir().unwrap();

    let output = fgen(dir.path(), &with_identity(&["makefile"]));
    assert!(output.status.success(), "{}", stderr(&output));
    let makefile = fs::read_to_string(dir.path().join("makefile")).unwrap();
    assert!(makefile.contains(&format!("# @author {AUTHOR}\n")));
    assert!(makefile.contains("SRC      = $(wildcard *.cc)\n"));
    assert!(makefile.contains("\t$(CXX) $(LDFLAGS) -o $@ $^ $(LIBS)\n"));

    let again = fgen(dir.path(), &with_identity(&["makefile", "-o", "build/Makefile"]));
    assert!(again.status.success(), "{}", stderr(&again));
    assert!(dir.path().join("build/Makefile").exists());
}

#[test]
fn existing_outputs_need_force() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();
    let args = with_identity(&["unittest", "sample.h"]);

    assert!(fgen(dir.path(), &args).status.success());
    let again = fgen(dir.path(), &args);
    assert_eq!(again.status.code(), Some(1));
    assert!(stderr(&again).contains("already exists"));

    let mut forced = args.clone();
    forced.push("--force");
    assert!(fgen(dir.path(), &forced).status.success());
}

#[test]
fn doc_annotates_in_place_and_keeps_backup() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &["doc", "sample.h"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(dir.path().join("sample.h")).unwrap(), SAMPLE_DOC);
    assert_eq!(fs::read_to_string(dir.path().join(".sample.h")).unwrap(), SAMPLE);
}

#[test]
fn latin1_header_keeps_its_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let original: &[u8] = b"// Autor: J\xfcrgen\nclass Legacy\n{\npublic:\n    void run();\n};\n";
    fs::write(dir.path().join("legacy.h"), original).unwrap();

    let output = fgen(dir.path(), &["doc", "legacy.h"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let annotated = fs::read(dir.path().join("legacy.h")).unwrap();
    let expected: &[u8] = b"// Autor: J\xfcrgen\n/// <summary>\n/// </summary>\nclass Legacy\n{\npublic:\n    \
        /// <summary>\n    /// </summary>\n    void run();\n};\n";
    assert_eq!(annotated, expected);
    assert_eq!(fs::read(dir.path().join(".legacy.h")).unwrap(), original);
}

#[test]
fn doc_to_output_file_leaves_header_alone() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &["doc", "sample.h", "-o", "out/sample.h"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(fs::read_to_string(dir.path().join("out/sample.h")).unwrap(), SAMPLE_DOC);
    assert_eq!(fs::read_to_string(dir.path().join("sample.h")).unwrap(), SAMPLE);
    assert!(!dir.path().join(".sample.h").exists());
}

#[test]
fn missing_author_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &["unittest", "sample.h", "--date", DATE]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("author"));
    assert!(!dir.path().join("unittest").exists());
}

#[test]
fn selection_miss_fails_only_that_header() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.h"), "struct Alpha { void run(); };\n").unwrap();
    fs::write(dir.path().join("b.h"), "struct Beta { void run(); };\n").unwrap();

    let output = fgen(dir.path(), &with_identity(&["unittest", "a.h", "b.h", "-s", "Beta"]));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Beta"));
    assert!(!dir.path().join("unittest/aTest.cc").exists());
    assert!(dir.path().join("unittest/bTest.cc").exists());
}

#[test]
fn output_flag_rejects_several_headers() {
    let dir = tempfile::tempdir().unwrap();
    let output = fgen(dir.path(), &["doc", "a.h", "b.h", "-o", "out.h"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("single header"));
}

#[test]
fn source_and_header_skeletons() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &with_identity(&["source", "sample.h"]));
    assert!(output.status.success(), "{}", stderr(&output));
    let source = fs::read_to_string(dir.path().join("sample.cc")).unwrap();
    assert!(source.contains("#include \"sample.h\"\n"));
    assert!(source.contains("bool Sample::operator==(const Sample& other) const\n{\n}\n"));

    let output = fgen(dir.path(), &with_identity(&["header", "widget.hpp"]));
    assert!(output.status.success(), "{}", stderr(&output));
    let header = fs::read_to_string(dir.path().join("widget.hpp")).unwrap();
    assert!(header.contains("#ifndef WIDGET_HPP\n#define WIDGET_HPP\n"));
    assert!(header.contains("#endif // WIDGET_HPP"));
}

#[test]
fn config_file_supplies_values() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("fgen.toml"),
        "author = \"Config Author\"\ndate = \"2001-02-03\"\ncpp_suffix = \".cpp\"\nunit_test_dir = \"tests\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("sample.h"), SAMPLE).unwrap();

    let output = fgen(dir.path(), &["unittest", "sample.h"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let fixture = fs::read_to_string(dir.path().join("tests/sampleTest.cpp")).unwrap();
    assert!(fixture.contains("@author Config Author"));
    assert!(fixture.contains("@date   2001-02-03"));
    assert!(dir.path().join("tests/main.cpp").exists());
}

#[test]
fn lex_debug_flag_prints_tokens() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tiny.h"), "int x;\n").unwrap();

    let output = fgen(dir.path(), &["--lex", "tiny.h"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Word"));
    assert!(stdout.contains("\"int\""));
}
