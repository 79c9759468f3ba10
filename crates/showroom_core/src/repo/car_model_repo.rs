//! Car model repository contract and SQLite implementation.

use crate::model::car::{CarModel, RowId};
use crate::repo::mapper::map_model_row;
use crate::repo::RepoResult;
use rusqlite::{params, Connection};

/// Persistence operations for `car_model` rows.
pub trait CarModelRepository {
    /// Inserts one model row as-is and returns its generated id.
    ///
    /// `model.id` is ignored; a missing `maker_id` is left for storage to
    /// reject.
    fn insert(&self, model: &CarModel) -> RepoResult<RowId>;
    /// Lists models owned by one maker, ordered by id.
    fn find_by_maker(&self, maker_id: RowId) -> RepoResult<Vec<CarModel>>;
}

pub struct SqliteCarModelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCarModelRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CarModelRepository for SqliteCarModelRepository<'_> {
    fn insert(&self, model: &CarModel) -> RepoResult<RowId> {
        self.conn.execute(
            "INSERT INTO car_model (maker_fk, name, sku, year) VALUES (?1, ?2, ?3, ?4);",
            params![
                model.maker_id,
                model.name.as_str(),
                model.sku.as_deref(),
                model.year,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_maker(&self, maker_id: RowId) -> RepoResult<Vec<CarModel>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, maker_fk, name, sku, year
             FROM car_model
             WHERE maker_fk = ?1
             ORDER BY id ASC;",
        )?;
        let models = stmt
            .query_map([maker_id], map_model_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(models)
    }
}
