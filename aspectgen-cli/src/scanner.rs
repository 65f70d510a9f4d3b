//! Descriptor file discovery.
//!
//! Walks the input directory for `*.json` descriptor files, respecting
//! `.gitignore` patterns and an optional glob filter. A single file given
//! as input is taken as is.

use crate::error::{CliError, CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Extension of descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = "json";

/// A discovered descriptor file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    /// File content.
    pub content: String,
}

/// Scanner for discovering descriptor files.
#[derive(Debug)]
pub struct SourceScanner {
    /// Directory or single file to scan.
    root: PathBuf,

    /// Optional glob filter pattern.
    filter: Option<glob::Pattern>,
}

impl SourceScanner {
    /// Create a new scanner for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: None,
        }
    }

    /// Only include files whose path relative to the root matches `pattern`.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    /// Scan the input and return all descriptor files, sorted by path.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let mut files = if self.root.is_file() {
            vec![self.read(&self.root, PathBuf::from(self.file_name(&self.root)))?]
        } else {
            self.walk()?
        };

        if files.is_empty() {
            return Err(ScanError::no_descriptors(self.root.clone()).into());
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    /// Scan without failing on empty results.
    pub fn scan_allow_empty(&self) -> CliResult<Vec<SourceFile>> {
        match self.scan() {
            Ok(files) => Ok(files),
            Err(CliError::Scan(ScanError::NoDescriptors { .. })) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn walk(&self) -> CliResult<Vec<SourceFile>> {
        let walker = WalkBuilder::new(&self.root).hidden(false).build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !path.is_file() || !is_descriptor(path) {
                continue;
            }

            let relative = self.relative_path(path);
            if let Some(ref pattern) = self.filter {
                if !pattern.matches_path(&relative) {
                    trace!(path = %relative.display(), "filtered out");
                    continue;
                }
            }

            files.push(self.read(path, relative)?);
        }
        Ok(files)
    }

    fn read(&self, path: &Path, relative_path: PathBuf) -> CliResult<SourceFile> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(SourceFile {
            path: path.to_path_buf(),
            relative_path,
            content,
        })
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    fn file_name<'a>(&self, path: &'a Path) -> &'a std::ffi::OsStr {
        path.file_name().unwrap_or(path.as_os_str())
    }
}

fn is_descriptor(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DESCRIPTOR_EXTENSION))
}
