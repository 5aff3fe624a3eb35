//! Plain-text task store, one record per line.
//!
//! # Responsibility
//! - Load and save ordered record strings against a single UTF-8 file.
//!
//! # Invariants
//! - A missing file is the not-found signal (`Ok(None)`), never an error.
//! - Saving replaces the whole file; the store is single-writer by contract.

use crate::storage::StoreResult;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Store contract for ordered task records.
///
/// `load` returns `None` when no store exists yet; `save` writes the full
/// record list in order. Tests substitute in-memory implementations.
pub trait TaskStore {
    fn load(&self) -> StoreResult<Option<Vec<String>>>;
    fn save(&self, records: &[String]) -> StoreResult<()>;
}

/// Newline-separated record file on local disk.
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TaskStore for FileTaskStore {
    fn load(&self) -> StoreResult<Option<Vec<String>>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(
                text.lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, records: &[String]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut text = records.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}
