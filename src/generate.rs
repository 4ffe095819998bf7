//! Batch generation
//!
//! The driver side of the renderer: read headers, render one artifact per header on a worker pool, then write the
//! results on the calling thread through an [`OutputDepot`]. Rendering never touches the filesystem, so a failed
//! artifact leaves nothing behind; writing is where rollback applies.
//!
//! ## Failure policy
//! - Read, render, and `OutputExists` failures abort only the affected artifact; the batch continues.
//! - An I/O failure while writing rolls back every file the run wrote and stops the batch.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use miette::{NamedSource, Report};
use rayon::prelude::*;
use thiserror::Error;

use crate::config::{ConfigError, GenConfig};
use crate::depot::{DepotError, OutputDepot};
use crate::encoding::SourceEncoding;
use crate::render::doc::DocOptions;
use crate::render::selection::Selection;
use crate::render::{self, RenderError, RenderMode, RenderRequest, ScannedHeader};
use crate::template::{Scaffold, Scaffolds, Substitutions, TemplateError};

/// Headers larger than this are rejected before reading.
pub const MAX_HEADER_SIZE: u64 = 100 * 1024 * 1024;

/// Stack size for rendering workers; the declaration builder recurses once per nesting level.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is too large ({size} bytes, max {max} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Depot(#[from] DepotError),

    #[error("cannot start worker threads: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl GenError {
    /// Failures that should roll the whole run back rather than skip one artifact.
    pub fn is_io(&self) -> bool {
        matches!(self, GenError::Depot(DepotError::Io { .. }))
    }
}

/// How a rendered text reaches the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAction {
    /// Write a new file (existing files need `--force`).
    Create,
    /// Rewrite the input in place, first saving the original as `backup`.
    Rewrite { backup: PathBuf },
}

/// A rendered artifact waiting to be written.
#[derive(Debug, Clone)]
pub struct PlannedOutput {
    pub path: PathBuf,
    pub contents: String,
    pub action: WriteAction,
    pub encoding: SourceEncoding,
}

impl PlannedOutput {
    /// A new UTF-8 file at `path`.
    pub fn create(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
            action: WriteAction::Create,
            encoding: SourceEncoding::Utf8,
        }
    }
}

/// One header to render and where its artifact goes.
#[derive(Debug, Clone)]
pub struct HeaderJob {
    pub header: PathBuf,
    pub output: PathBuf,
}

/// Result of rendering one header, with the builder warnings already attached to their source.
#[derive(Debug)]
pub struct HeaderOutcome {
    pub header: PathBuf,
    pub result: Result<PlannedOutput, GenError>,
    pub warnings: Vec<Report>,
}

/// Everything a run needs besides the headers: configuration, scaffolds, and marker values.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GenConfig,
    scaffolds: Scaffolds,
    values: Substitutions,
}

impl Generator {
    /// Load the scaffolds named by `config`.
    pub fn new(config: GenConfig) -> Result<Self, GenError> {
        let scaffolds = Scaffolds::load(config.template_dir.as_deref())?;
        let values = config.substitutions();
        Ok(Self {
            config,
            scaffolds,
            values,
        })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// `<unit_test_dir>/<stem>Test<cpp_suffix>`
    pub fn unittest_output(&self, header: &Path) -> PathBuf {
        self.config
            .unit_test_dir
            .join(format!("{}Test{}", file_stem(header), self.config.cpp_suffix))
    }

    /// `<unit_test_dir>/main<cpp_suffix>`
    pub fn runner_output(&self) -> PathBuf {
        self.config.unit_test_dir.join(format!("main{}", self.config.cpp_suffix))
    }

    /// `<unit_test_dir>/makefile`
    pub fn unittest_makefile_output(&self) -> PathBuf {
        self.config.unit_test_dir.join("makefile")
    }

    /// `<stem><cpp_suffix>` next to the header.
    pub fn source_output(&self, header: &Path) -> PathBuf {
        header.with_file_name(format!("{}{}", file_stem(header), self.config.cpp_suffix))
    }

    /// Render `mode` for every job on a worker pool. Outcomes keep the order of `jobs`.
    #[tracing::instrument(skip_all, fields(jobs = jobs.len(), mode = ?mode))]
    pub fn render_all(
        &self,
        jobs: &[HeaderJob],
        mode: RenderMode,
        selection: &Selection,
    ) -> Result<Vec<HeaderOutcome>, GenError> {
        let pool = rayon::ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE).build()?;
        Ok(pool.install(|| jobs.par_iter().map(|job| self.render_one(job, mode, selection)).collect()))
    }

    fn render_one(&self, job: &HeaderJob, mode: RenderMode, selection: &Selection) -> HeaderOutcome {
        let header = match scan(&job.header) {
            Ok(header) => header,
            Err(err) => {
                return HeaderOutcome {
                    header: job.header.clone(),
                    result: Err(err),
                    warnings: Vec::new(),
                };
            }
        };
        let warnings = warnings(&job.header, &header);

        let request = RenderRequest::new(&header, mode, &self.scaffolds)
            .with_values(self.values.clone())
            .with_selection(selection.clone())
            .with_doc_options(DocOptions {
                skip_documented: self.config.doc.skip_documented,
            });
        let result = render::render(&request)
            .map(|contents| PlannedOutput {
                path: job.output.clone(),
                contents,
                action: if mode == RenderMode::Documentation && job.output == job.header {
                    WriteAction::Rewrite {
                        backup: backup_path(&job.header),
                    }
                } else {
                    WriteAction::Create
                },
                encoding: header.encoding,
            })
            .map_err(|source| GenError::Render {
                path: job.header.clone(),
                source,
            });

        HeaderOutcome {
            header: job.header.clone(),
            result,
            warnings,
        }
    }

    /// Fill a scaffold with the run's marker values.
    pub fn fill(&self, scaffold: Scaffold) -> Result<String, GenError> {
        Ok(self.scaffolds.fill(scaffold, &self.values)?)
    }

    /// Makefile for the unit-test directory.
    ///
    /// The project sources are the `cpp_suffix` files of the directory `unit_test_dir` is relative to, minus
    /// `main` (the project source that defines `main`), which would clash with the runner.
    pub fn unittest_makefile(&self, main: Option<&str>) -> Result<String, GenError> {
        let root = project_root(&self.config.unit_test_dir);
        let all = format!("$(wildcard {root}/*{})", self.config.cpp_suffix);
        let sources = match main {
            Some(main) => format!("$(filter-out {root}/{main}, {all})"),
            None => all,
        };
        let values = self
            .values
            .clone()
            .with("project_root", root)
            .with("project_sources", sources);
        Ok(self.scaffolds.fill(Scaffold::UnitTestMakefile, &values)?)
    }

    /// Header skeleton for `output`, with `${wrapper}` derived from its file name.
    pub fn header_skeleton(&self, output: &Path) -> Result<String, GenError> {
        let values = self.values.clone().with("wrapper", self.config.wrapper_for(output));
        Ok(self.scaffolds.fill(Scaffold::HeaderSkeleton, &values)?)
    }
}

/// Write `output` through `depot`.
///
/// An in-place rewrite first records the original as the backup file, so rollback removes the backup and restores
/// the header.
pub fn write_output(depot: &mut OutputDepot, output: &PlannedOutput) -> Result<(), GenError> {
    let contents = output.encoding.encode(&output.contents);
    match &output.action {
        WriteAction::Create => depot.create(&output.path, &contents)?,
        WriteAction::Rewrite { backup } => {
            let original = fs::read(&output.path).map_err(|source| GenError::Read {
                path: output.path.clone(),
                source,
            })?;
            depot.create(backup, &original)?;
            depot.replace(&output.path, &contents)?;
        }
    }
    Ok(())
}

/// Read and scan one header. Bytes that are not UTF-8 are read as Latin-1.
pub fn scan(path: &Path) -> Result<ScannedHeader, GenError> {
    let read_error = |source| GenError::Read {
        path: path.to_path_buf(),
        source,
    };
    let size = fs::metadata(path).map_err(read_error)?.len();
    if size > MAX_HEADER_SIZE {
        return Err(GenError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_HEADER_SIZE,
        });
    }
    let (source, encoding) = SourceEncoding::decode(fs::read(path).map_err(read_error)?);
    if encoding == SourceEncoding::Latin1 {
        tracing::debug!(path = %path.display(), "not UTF-8; reading as Latin-1");
    }
    Ok(ScannedHeader::scan(file_name(path), source).with_encoding(encoding))
}

/// Builder warnings rendered against the header text.
fn warnings(path: &Path, header: &ScannedHeader) -> Vec<Report> {
    header
        .diagnostics
        .iter()
        .map(|warning| {
            Report::new(warning.clone())
                .with_source_code(NamedSource::new(path.display().to_string(), header.source.clone()))
        })
        .collect()
}

/// Relative path from `unit_test_dir` back to the directory it is relative to (`tests/unit` gives `../..`).
fn project_root(unit_test_dir: &Path) -> String {
    let depth = unit_test_dir
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .count()
        .max(1);
    vec![".."; depth].join("/")
}

/// `dir/.name` for `dir/name`.
pub fn backup_path(header: &Path) -> PathBuf {
    header.with_file_name(format!(".{}", file_name(header)))
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(dir: &Path) -> Generator {
        let config = GenConfig::new()
            .with_author("Kevin Wan")
            .with_date("2006-10-25")
            .with_unit_test_dir(dir.join("unittest"));
        Generator::new(config).unwrap()
    }

    #[test]
    fn test_default_output_paths() {
        let driver = Generator::new(GenConfig::new().with_cpp_suffix(".cpp")).unwrap();
        let header = Path::new("include/sample.h");
        assert_eq!(driver.unittest_output(header), Path::new("unittest/sampleTest.cpp"));
        assert_eq!(driver.runner_output(), Path::new("unittest/main.cpp"));
        assert_eq!(driver.source_output(header), Path::new("include/sample.cpp"));
        assert_eq!(backup_path(header), Path::new("include/.sample.h"));
    }

    #[test]
    fn test_unittest_makefile_sources() {
        let driver = Generator::new(GenConfig::new().with_author("Kevin Wan").with_date("2006-10-25")).unwrap();
        let all = driver.unittest_makefile(None).unwrap();
        assert!(all.contains("CXXFLAGS += -Wall -g -I..\n"));
        assert!(all.contains("SRC     += $(wildcard ../*.cc)\n"));

        let without_main = driver.unittest_makefile(Some("app.cc")).unwrap();
        assert!(without_main.contains("SRC     += $(filter-out ../app.cc, $(wildcard ../*.cc))\n"));
    }

    #[test]
    fn test_project_root_follows_unit_test_depth() {
        assert_eq!(project_root(Path::new("unittest")), "..");
        assert_eq!(project_root(Path::new("tests/unit")), "../..");
        assert_eq!(project_root(Path::new("./unittest")), "..");
    }

    #[test]
    fn test_failed_header_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.h");
        fs::write(&good, "struct Good { void run(); };\n").unwrap();
        let missing = dir.path().join("missing.h");

        let driver = generator(dir.path());
        let jobs = vec![
            HeaderJob {
                header: missing.clone(),
                output: driver.unittest_output(&missing),
            },
            HeaderJob {
                header: good.clone(),
                output: driver.unittest_output(&good),
            },
        ];
        let outcomes = driver.render_all(&jobs, RenderMode::TestStub, &Selection::TopLevel).unwrap();
        assert!(matches!(outcomes[0].result, Err(GenError::Read { .. })));
        let planned = outcomes[1].result.as_ref().unwrap();
        assert!(planned.contents.contains("CPPUNIT_TEST(testRun);"));
        assert_eq!(planned.action, WriteAction::Create);
    }

    #[test]
    fn test_in_place_doc_keeps_backup_and_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("sample.h");
        fs::write(&header, "void f();\n").unwrap();

        let driver = generator(dir.path());
        let jobs = vec![HeaderJob {
            header: header.clone(),
            output: header.clone(),
        }];
        let mut outcomes = driver.render_all(&jobs, RenderMode::Documentation, &Selection::TopLevel).unwrap();
        let planned = outcomes.remove(0).result.unwrap();

        let mut depot = OutputDepot::new(false);
        write_output(&mut depot, &planned).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(".sample.h")).unwrap(), "void f();\n");
        assert!(fs::read_to_string(&header).unwrap().starts_with("/// <summary>"));

        depot.rollback();
        assert!(!dir.path().join(".sample.h").exists());
        assert_eq!(fs::read_to_string(&header).unwrap(), "void f();\n");
    }

    #[test]
    fn test_warnings_carry_source_context() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("broken.h");
        fs::write(&header, "class Broken {\n  void f();\n").unwrap();

        let driver = generator(dir.path());
        let jobs = vec![HeaderJob {
            header: header.clone(),
            output: dir.path().join("broken.doc.h"),
        }];
        let outcomes = driver.render_all(&jobs, RenderMode::Documentation, &Selection::TopLevel).unwrap();
        assert_eq!(outcomes[0].warnings.len(), 1);
        assert!(outcomes[0].warnings[0].to_string().contains("unterminated block"));
        assert!(outcomes[0].result.is_ok());
    }

    #[test]
    fn test_header_skeleton_wrapper() {
        let dir = tempfile::tempdir().unwrap();
        let driver = generator(dir.path());
        let text = driver.header_skeleton(Path::new("net/socket.hpp")).unwrap();
        assert!(text.contains("#ifndef SOCKET_HPP\n#define SOCKET_HPP\n"));
        assert!(text.contains("@author Kevin Wan"));
    }
}
