//! JSON file implementation of [`DomainStore`].
//!
//! `save` serializes the whole dataset into a temporary file next to the
//! target and renames it into place, so a crash mid-write never leaves a
//! truncated document behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use elearn_core::model::Dataset;
use elearn_core::{DomainStore, StorageError};

/// A dataset persisted as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    fn write_error(&self, err: impl std::fmt::Display) -> StorageError {
        StorageError::Write {
            path: self.display(),
            message: err.to_string(),
        }
    }
}

impl DomainStore for JsonFileStore {
    fn load(&self) -> Result<Dataset, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.display()))
            }
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.display(),
                    message: e.to_string(),
                })
            }
        };

        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|e| StorageError::Malformed {
                path: self.display(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            "loaded {} course(s), {} student(s) from {}",
            dataset.courses().len(),
            dataset.students().len(),
            self.path.display()
        );
        Ok(dataset)
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(dataset).map_err(|e| self.write_error(e))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.write_error(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_error(e.error))?;

        tracing::debug!("saved dataset to {}", self.path.display());
        Ok(())
    }
}
