//! File writer for generated sources.
//!
//! Writes generated `.g.cs` files under the output directory, with support
//! for dry-run mode and an up-to-date check.

use crate::error::{CliResult, WriteError};
use crate::generator::OutputFile;
use std::path::{Path, PathBuf};

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run, content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// Why an existing file does not match what would be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Missing(PathBuf),
    Changed(PathBuf),
}

impl Staleness {
    pub fn path(&self) -> &Path {
        match self {
            Staleness::Missing(path) | Staleness::Changed(path) => path,
        }
    }
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write content to a file.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    /// Write every generated file below `dir`.
    pub fn write_all(&self, dir: &Path, files: &[OutputFile]) -> CliResult<Vec<WriteResult>> {
        files
            .iter()
            .map(|file| self.write(&dir.join(&file.relative_path), &file.content))
            .collect()
    }
}

/// Compare generated files with what is on disk below `dir`.
pub fn find_stale(dir: &Path, files: &[OutputFile]) -> CliResult<Vec<Staleness>> {
    let mut stale = Vec::new();
    for file in files {
        let path = dir.join(&file.relative_path);
        if !path.exists() {
            stale.push(Staleness::Missing(path));
            continue;
        }
        if std::fs::read_to_string(&path)? != file.content {
            stale.push(Staleness::Changed(path));
        }
    }
    Ok(stale)
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write was successful (not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Get the number of bytes written (0 for dry-run).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}
