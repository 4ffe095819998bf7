//! Output depot
//!
//! Every file a run creates (or rewrites in place) goes through an [`OutputDepot`]. When a later write fails the
//! driver calls [`OutputDepot::rollback`], which deletes the files the run created and restores the ones it
//! rewrote, so a failed run leaves the tree as it found it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepotError {
    /// The target exists and the run was not asked to overwrite.
    #[error("'{}' already exists (use --force to overwrite)", .path.display())]
    OutputExists { path: PathBuf },

    #[error("cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What rollback has to undo for one path.
#[derive(Debug)]
enum Entry {
    Created(PathBuf),
    CreatedDir(PathBuf),
    Replaced { path: PathBuf, original: Vec<u8> },
}

/// Registry of the files written by one run.
#[derive(Debug, Default)]
pub struct OutputDepot {
    force: bool,
    entries: Vec<Entry>,
}

impl OutputDepot {
    /// `force` allows [`create`](Self::create) to overwrite existing files.
    pub fn new(force: bool) -> Self {
        Self {
            force,
            entries: Vec::new(),
        }
    }

    /// Fail early if `path` exists and may not be overwritten.
    pub fn check_new(&self, path: &Path) -> Result<(), DepotError> {
        if !self.force && path.exists() {
            return Err(DepotError::OutputExists {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Write a new file, creating missing parent directories.
    pub fn create(&mut self, path: &Path, contents: &[u8]) -> Result<(), DepotError> {
        self.check_new(path)?;
        if path.exists() {
            // --force: overwriting is undone like an in-place rewrite.
            return self.replace(path, contents);
        }
        self.create_parents(path)?;
        fs::write(path, contents).map_err(|source| DepotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.entries.push(Entry::Created(path.to_path_buf()));
        tracing::info!(path = %path.display(), "wrote");
        Ok(())
    }

    /// Rewrite an existing file; rollback restores the previous contents.
    pub fn replace(&mut self, path: &Path, contents: &[u8]) -> Result<(), DepotError> {
        let io_error = |source| DepotError::Io {
            path: path.to_path_buf(),
            source,
        };
        let original = fs::read(path).map_err(io_error)?;
        fs::write(path, contents).map_err(io_error)?;
        self.entries.push(Entry::Replaced {
            path: path.to_path_buf(),
            original,
        });
        tracing::info!(path = %path.display(), "rewrote");
        Ok(())
    }

    /// Number of paths the run touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Undo every write, newest first. Failures are logged; rollback keeps going.
    pub fn rollback(&mut self) {
        while let Some(entry) = self.entries.pop() {
            let (path, result) = match &entry {
                Entry::Created(path) => (path, fs::remove_file(path)),
                Entry::CreatedDir(path) => (path, fs::remove_dir(path)),
                Entry::Replaced { path, original } => (path, fs::write(path, original)),
            };
            match result {
                Ok(()) => tracing::info!(path = %path.display(), "rolled back"),
                Err(err) => tracing::warn!(path = %path.display(), error = %err, "rollback failed"),
            }
        }
    }

    /// Keep everything written so far.
    pub fn commit(mut self) {
        self.entries.clear();
    }

    fn create_parents(&mut self, path: &Path) -> Result<(), DepotError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        // Outermost missing directory first, so rollback (newest first) removes the innermost first.
        let missing: Vec<&Path> = parent
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .collect();
        for dir in missing.into_iter().rev() {
            fs::create_dir(dir).map_err(|source| DepotError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            self.entries.push(Entry::CreatedDir(dir.to_path_buf()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cc");
        fs::write(&path, "keep").unwrap();

        let mut depot = OutputDepot::new(false);
        let err = depot.create(&path, b"new").unwrap_err();
        assert!(matches!(err, DepotError::OutputExists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");
        assert!(depot.is_empty());
    }

    #[test]
    fn test_force_overwrites_and_rollback_restores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cc");
        fs::write(&path, "keep").unwrap();

        let mut depot = OutputDepot::new(true);
        depot.create(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        depot.rollback();
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");
    }

    #[test]
    fn test_rollback_removes_created_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("sample.h");
        fs::write(&header, "original").unwrap();
        let nested = dir.path().join("unittest").join("deep").join("sampleTest.cc");

        let mut depot = OutputDepot::new(false);
        depot.create(&nested, b"fixture").unwrap();
        depot.replace(&header, b"annotated").unwrap();
        assert_eq!(depot.len(), 4);

        depot.rollback();
        assert!(!dir.path().join("unittest").exists());
        assert_eq!(fs::read_to_string(&header).unwrap(), "original");
        assert!(depot.is_empty());
    }

    #[test]
    fn test_commit_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.cc");
        let mut depot = OutputDepot::new(false);
        depot.create(&path, b"int main() {}").unwrap();
        depot.commit();
        assert!(path.exists());
    }
}
