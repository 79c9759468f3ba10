//! Car maker repository contract and SQLite implementation.

use crate::model::car::{CarMaker, RowId};
use crate::repo::mapper::map_maker_row;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Persistence operations for `car_maker` rows.
pub trait CarMakerRepository {
    /// Inserts the maker row (models are not touched) and returns its id.
    fn insert(&self, maker: &CarMaker) -> RepoResult<RowId>;
    fn find_by_id(&self, id: RowId) -> RepoResult<Option<CarMaker>>;
    /// Lists all makers ordered by id, with empty model vectors.
    fn find_all(&self) -> RepoResult<Vec<CarMaker>>;
}

/// SQLite-backed maker repository.
///
/// Accepts a plain connection or a transaction (through deref).
pub struct SqliteCarMakerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCarMakerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CarMakerRepository for SqliteCarMakerRepository<'_> {
    fn insert(&self, maker: &CarMaker) -> RepoResult<RowId> {
        self.conn.execute(
            "INSERT INTO car_maker (name) VALUES (?1);",
            params![maker.name.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: RowId) -> RepoResult<Option<CarMaker>> {
        let maker = self
            .conn
            .query_row(
                "SELECT id, name FROM car_maker WHERE id = ?1;",
                [id],
                map_maker_row,
            )
            .optional()?;
        Ok(maker)
    }

    fn find_all(&self) -> RepoResult<Vec<CarMaker>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM car_maker ORDER BY id ASC;")?;
        let makers = stmt
            .query_map([], map_maker_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(makers)
    }
}
