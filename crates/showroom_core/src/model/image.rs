//! Image archive metadata record.

use super::car::RowId;
use serde::{Deserialize, Serialize};

/// Location of one archived image on the filesystem.
///
/// The bytes live in the file at `location`; storage only keeps the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: RowId,
    /// Original file name supplied by the uploader.
    pub name: String,
    pub location: String,
}
