//! Image archive: bytes on the filesystem, locations in SQLite.
//!
//! # Responsibility
//! - Define the `ImageLocator` seam used by the HTTP layer.
//! - Provide the filesystem-backed implementation.
//!
//! # Invariants
//! - An id returned by `save` always points at a file written before the
//!   row was committed.

use crate::model::car::RowId;
use crate::repo::RepoError;
use thiserror::Error;

mod service;
mod store;

pub use service::FileLocationService;
pub use store::{sanitize_file_name, FileSystemStore};

pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{0}")]
    Repo(#[from] RepoError),
    #[error("image file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image archive connection is poisoned")]
    ConnectionPoisoned,
}

/// Stores uploaded images and finds them again by id.
pub trait ImageLocator: Send + Sync {
    /// Stores `bytes` under the uploader-supplied `name`; returns the new id.
    fn save(&self, bytes: &[u8], name: &str) -> ArchiveResult<RowId>;
    /// Returns the stored bytes, or `None` for an unknown id.
    fn find(&self, id: RowId) -> ArchiveResult<Option<Vec<u8>>>;
}
