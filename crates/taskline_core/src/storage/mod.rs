//! Persistence boundary for task records.
//!
//! # Responsibility
//! - Define the store contract: ordered records out, ordered records in,
//!   with an explicit not-found signal.
//! - Keep file I/O mechanics behind the [`file_store::TaskStore`] seam; the
//!   domain never touches storage media directly.
//!
//! # Invariants
//! - Stores move opaque record strings; encoding/decoding tasks is the
//!   model's job.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod file_store;

pub use file_store::{FileTaskStore, TaskStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure at the persistence boundary.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
