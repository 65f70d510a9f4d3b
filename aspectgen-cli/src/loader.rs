//! Descriptor loading.
//!
//! A descriptor file holds either one type descriptor object or an array
//! of them.

use crate::error::LoadError;
use crate::scanner::SourceFile;
use aspectgen::TypeDescriptor;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A type descriptor together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedType {
    pub descriptor: TypeDescriptor,
    pub source: PathBuf,
}

/// Reads type descriptors from JSON.
#[derive(Debug, Default)]
pub struct DescriptorLoader;

impl DescriptorLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse one descriptor file.
    pub fn load_file(&self, source: &SourceFile) -> Result<Vec<LoadedType>, LoadError> {
        self.load_source(&source.content, &source.path)
    }

    /// Parse descriptor text; `file` labels errors and results.
    pub fn load_source(&self, content: &str, file: &Path) -> Result<Vec<LoadedType>, LoadError> {
        let descriptors: Vec<TypeDescriptor> = if content.trim_start().starts_with('[') {
            serde_json::from_str(content)
        } else {
            serde_json::from_str(content).map(|descriptor| vec![descriptor])
        }
        .map_err(|e| LoadError::json(file.to_path_buf(), &e))?;

        debug!(file = %file.display(), count = descriptors.len(), "loaded descriptors");
        Ok(descriptors
            .into_iter()
            .map(|descriptor| LoadedType {
                descriptor,
                source: file.to_path_buf(),
            })
            .collect())
    }

    /// Parse many files, collecting errors instead of stopping at the first.
    ///
    /// A type declared a second time is reported and the later declaration
    /// dropped.
    pub fn load_files(&self, sources: &[SourceFile]) -> (Vec<LoadedType>, Vec<LoadError>) {
        let mut types = Vec::new();
        let mut errors = Vec::new();
        let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

        for source in sources {
            match self.load_file(source) {
                Ok(loaded) => {
                    for ty in loaded {
                        if let Some(first) = seen.get(&ty.descriptor.full_name) {
                            errors.push(LoadError::DuplicateType {
                                type_name: ty.descriptor.full_name.clone(),
                                first: first.clone(),
                                second: ty.source.clone(),
                            });
                            continue;
                        }
                        seen.insert(ty.descriptor.full_name.clone(), ty.source.clone());
                        types.push(ty);
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        (types, errors)
    }
}
