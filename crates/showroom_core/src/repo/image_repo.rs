//! Image location repository.
//!
//! # Invariants
//! - Only the file location is stored; bytes stay on the filesystem.

use crate::model::car::RowId;
use crate::model::image::ImageRecord;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub trait ImageRepository {
    /// Records where an image was written and returns its id.
    fn insert(&self, name: &str, location: &str) -> RepoResult<RowId>;
    fn find_by_id(&self, id: RowId) -> RepoResult<Option<ImageRecord>>;
}

pub struct SqliteImageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteImageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ImageRepository for SqliteImageRepository<'_> {
    fn insert(&self, name: &str, location: &str) -> RepoResult<RowId> {
        self.conn.execute(
            "INSERT INTO image (name, location) VALUES (?1, ?2);",
            params![name, location],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: RowId) -> RepoResult<Option<ImageRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, name, location FROM image WHERE id = ?1;",
                [id],
                parse_image_row,
            )
            .optional()?;
        Ok(record)
    }
}

fn parse_image_row(row: &Row<'_>) -> rusqlite::Result<ImageRecord> {
    Ok(ImageRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
    })
}
