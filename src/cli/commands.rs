//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::{Path, PathBuf};

use crate::config::GenConfig;
use crate::depot::OutputDepot;
use crate::generate::{self, GenError, Generator, HeaderJob, PlannedOutput, write_output};
use crate::render::RenderMode;
use crate::render::selection::Selection;
use crate::template::Scaffold;

use super::{CliError, CliResult, ExitCode, GlobalOptions};

// ============================================================================
// Setup (shared by every generating command)
// ============================================================================

/// Resolve the configuration and apply command-line overrides.
fn load_config(options: &GlobalOptions) -> CliResult<GenConfig> {
    let (mut config, origin) =
        GenConfig::discover(options.config.as_deref()).map_err(|e| CliError::failure(format!("Error: {e}")))?;
    match origin {
        Some(path) => tracing::debug!(path = %path.display(), "configuration loaded"),
        None => tracing::debug!("no configuration file; using defaults"),
    }
    if let Some(author) = &options.author {
        config.author = Some(author.clone());
    }
    if let Some(date) = &options.date {
        config.date = Some(date.clone());
    }
    Ok(config)
}

fn load_generator(options: &GlobalOptions) -> CliResult<Generator> {
    Generator::new(load_config(options)?).map_err(failure)
}

fn failure(err: GenError) -> CliError {
    CliError::failure(format!("Error: {err}"))
}

// ============================================================================
// Writing
// ============================================================================

/// Writes planned outputs and tracks whether any artifact failed.
struct Batch {
    depot: OutputDepot,
    failed: bool,
}

impl Batch {
    fn new(force: bool) -> Self {
        Self {
            depot: OutputDepot::new(force),
            failed: false,
        }
    }

    /// Report an artifact-level failure; the batch continues.
    fn skip(&mut self, err: &GenError) {
        eprintln!("Error: {err}");
        self.failed = true;
    }

    /// Write one output and report whether it was written. I/O failures roll back the whole run.
    fn write(&mut self, output: &PlannedOutput) -> CliResult<bool> {
        match write_output(&mut self.depot, output) {
            Ok(()) => Ok(true),
            Err(err) if err.is_io() => {
                self.depot.rollback();
                Err(CliError::failure(format!("Error: {err}\nNo files were changed.")))
            }
            Err(err) => {
                self.skip(&err);
                Ok(false)
            }
        }
    }

    /// Write a filled scaffold, or record why it could not be filled.
    fn write_filled(&mut self, path: PathBuf, filled: Result<String, GenError>) -> CliResult<()> {
        match filled {
            Ok(contents) => {
                self.write(&PlannedOutput::create(path, contents))?;
            }
            Err(err) => self.skip(&err),
        }
        Ok(())
    }

    fn finish(self) -> CliResult<ExitCode> {
        let written = self.depot.len();
        self.depot.commit();
        tracing::debug!(written, failed = self.failed, "run finished");
        Ok(if self.failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }
}

/// Render `jobs` and write every successful artifact. Returns how many were written.
fn render_batch(
    generator: &Generator,
    jobs: &[HeaderJob],
    mode: RenderMode,
    selection: &Selection,
    batch: &mut Batch,
) -> CliResult<usize> {
    let outcomes = generator.render_all(jobs, mode, selection).map_err(failure)?;
    let mut written = 0;
    for outcome in outcomes {
        for warning in &outcome.warnings {
            eprintln!("{warning:?}");
        }
        match outcome.result {
            Ok(planned) => {
                if batch.write(&planned)? {
                    written += 1;
                }
            }
            Err(err) => batch.skip(&err),
        }
    }
    Ok(written)
}

// ============================================================================
// Commands
// ============================================================================

/// `fgen doc`
pub fn doc(options: &GlobalOptions, headers: &[PathBuf], output: Option<PathBuf>) -> CliResult<ExitCode> {
    let generator = load_generator(options)?;
    let jobs: Vec<HeaderJob> = headers
        .iter()
        .map(|header| HeaderJob {
            header: header.clone(),
            output: output.clone().unwrap_or_else(|| header.clone()),
        })
        .collect();

    let mut batch = Batch::new(options.force);
    render_batch(&generator, &jobs, RenderMode::Documentation, &Selection::TopLevel, &mut batch)?;
    batch.finish()
}

/// `fgen unittest`
///
/// Without `-o`, fixtures go to the unit-test directory. Once a fixture is written there, the runner main and the
/// unit-test makefile are added if they are missing.
pub fn unittest(
    options: &GlobalOptions,
    headers: &[PathBuf],
    output: Option<PathBuf>,
    select: Vec<String>,
    main: Option<String>,
) -> CliResult<ExitCode> {
    let generator = load_generator(options)?;
    let selection = if select.is_empty() {
        Selection::from_names(generator.config().unittest.select.clone())
    } else {
        Selection::from_names(select)
    };
    let main = main.or_else(|| generator.config().unittest.main.clone());
    let with_support = output.is_none();
    let jobs: Vec<HeaderJob> = headers
        .iter()
        .map(|header| HeaderJob {
            header: header.clone(),
            output: output.clone().unwrap_or_else(|| generator.unittest_output(header)),
        })
        .collect();

    let mut batch = Batch::new(options.force);
    let written = render_batch(&generator, &jobs, RenderMode::TestStub, &selection, &mut batch)?;

    if with_support && written > 0 {
        let runner = generator.runner_output();
        if !runner.exists() {
            batch.write_filled(runner, generator.fill(Scaffold::RunnerMain))?;
        }
        let makefile = generator.unittest_makefile_output();
        if !makefile.exists() {
            batch.write_filled(makefile, generator.unittest_makefile(main.as_deref()))?;
        }
    }
    batch.finish()
}

/// `fgen source`
pub fn source(options: &GlobalOptions, header: PathBuf, output: Option<PathBuf>) -> CliResult<ExitCode> {
    let generator = load_generator(options)?;
    let output = output.unwrap_or_else(|| generator.source_output(&header));
    let jobs = [HeaderJob { header, output }];

    let mut batch = Batch::new(options.force);
    render_batch(&generator, &jobs, RenderMode::SourceSkeleton, &Selection::TopLevel, &mut batch)?;
    batch.finish()
}

/// `fgen header`
pub fn header(options: &GlobalOptions, output: &Path) -> CliResult<ExitCode> {
    let generator = load_generator(options)?;
    let contents = generator.header_skeleton(output).map_err(failure)?;

    let mut batch = Batch::new(options.force);
    batch.write(&PlannedOutput::create(output, contents))?;
    batch.finish()
}

/// `fgen runner`
pub fn runner(options: &GlobalOptions, output: Option<PathBuf>) -> CliResult<ExitCode> {
    let generator = load_generator(options)?;
    let path = output.unwrap_or_else(|| generator.runner_output());
    let contents = generator.fill(Scaffold::RunnerMain).map_err(failure)?;

    let mut batch = Batch::new(options.force);
    batch.write(&PlannedOutput::create(path, contents))?;
    batch.finish()
}

/// `fgen makefile`
pub fn makefile(options: &GlobalOptions, output: Option<PathBuf>) -> CliResult<ExitCode> {
    let generator = load_generator(options)?;
    let path = output.unwrap_or_else(|| PathBuf::from("makefile"));
    let contents = generator.fill(Scaffold::Makefile).map_err(failure)?;

    let mut batch = Batch::new(options.force);
    batch.write(&PlannedOutput::create(path, contents))?;
    batch.finish()
}

// ============================================================================
// Debug commands
// ============================================================================

/// Tokenize and display tokens.
pub fn lex_file(path: &Path) -> CliResult<ExitCode> {
    let header = generate::scan(path).map_err(failure)?;
    for token in &header.tokens {
        println!(
            "{:>6}..{:<6} {:?} {:?}",
            token.span.start,
            token.span.end,
            token.kind,
            token.text(&header.source)
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Build and display the declaration tree.
pub fn parse_file(path: &Path) -> CliResult<ExitCode> {
    let header = generate::scan(path).map_err(failure)?;
    println!("{:#?}", header.tree);
    for warning in header.diagnostics {
        let report = miette::Report::new(warning)
            .with_source_code(miette::NamedSource::new(path.display().to_string(), header.source.clone()));
        eprintln!("{report:?}");
    }
    Ok(ExitCode::SUCCESS)
}
