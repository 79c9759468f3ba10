//! Generic CRUD repository over single-table entities.
//!
//! # Responsibility
//! - Provide create/read/update/delete for any type implementing `Entity`.
//! - Keep per-entity code down to column lists and explicit row mapping.
//!
//! # Invariants
//! - Every entity table has an `INTEGER PRIMARY KEY` column named `id`.
//! - `Entity::values` returns values in `Entity::COLUMNS` order.
//! - `save` inserts when `id` is `None`, updates otherwise.
//! - Nothing here begins a transaction; multi-row writes use savepoints so
//!   repositories can sit on a connection or a `Transaction`.

use crate::model::car::RowId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::marker::PhantomData;

const SAVE_ALL_SAVEPOINT: &str = "crud_save_all";

/// Explicit table mapping for one record type.
pub trait Entity: Sized {
    /// Human-readable name used in `NotFound` errors.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Non-id columns, in bind order.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<RowId>;
    fn set_id(&mut self, id: Option<RowId>);
    fn values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Standard CRUD operations with no extra query logic.
pub trait CrudRepository<E: Entity> {
    /// Inserts or updates; sets the generated id on insert.
    fn save(&self, entity: &mut E) -> RepoResult<RowId>;
    /// Saves every entity atomically.
    ///
    /// Runs under a savepoint, so it works on a bare connection and inside
    /// an open transaction alike. On failure nothing is written and every
    /// entity keeps the id it arrived with.
    fn save_all(&self, entities: &mut [E]) -> RepoResult<usize>;
    fn find_by_id(&self, id: RowId) -> RepoResult<Option<E>>;
    /// Lists all rows ordered by id.
    fn find_all(&self) -> RepoResult<Vec<E>>;
    fn exists_by_id(&self, id: RowId) -> RepoResult<bool>;
    fn count(&self) -> RepoResult<u64>;
    fn delete_by_id(&self, id: RowId) -> RepoResult<()>;
    /// Deletes every row and returns how many were removed.
    fn delete_all(&self) -> RepoResult<usize>;
}

/// SQLite implementation shared by all entities.
pub struct SqliteCrudRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<E>,
}

impl<'conn, E: Entity> SqliteCrudRepository<'conn, E> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn insert(&self, entity: &mut E) -> RepoResult<RowId> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );
        self.conn.execute(&sql, params_from_iter(entity.values()))?;

        let id = self.conn.last_insert_rowid();
        entity.set_id(Some(id));
        Ok(id)
    }

    fn update(&self, id: RowId, entity: &E) -> RepoResult<RowId> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            E::TABLE,
            E::COLUMNS.len() + 1
        );
        let mut values = entity.values();
        values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::NAME,
                id,
            });
        }
        Ok(id)
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }
}

impl<E: Entity> CrudRepository<E> for SqliteCrudRepository<'_, E> {
    fn save(&self, entity: &mut E) -> RepoResult<RowId> {
        match entity.id() {
            None => self.insert(entity),
            Some(id) => self.update(id, entity),
        }
    }

    fn save_all(&self, entities: &mut [E]) -> RepoResult<usize> {
        let incoming: Vec<Option<RowId>> = entities.iter().map(Entity::id).collect();

        self.conn.execute_batch(&format!("SAVEPOINT {SAVE_ALL_SAVEPOINT};"))?;
        let saved = entities
            .iter_mut()
            .try_for_each(|entity| self.save(entity).map(|_| ()));

        match saved {
            Ok(()) => {
                self.conn
                    .execute_batch(&format!("RELEASE {SAVE_ALL_SAVEPOINT};"))?;
                Ok(entities.len())
            }
            Err(err) => {
                for (entity, id) in entities.iter_mut().zip(incoming) {
                    entity.set_id(id);
                }
                self.conn.execute_batch(&format!(
                    "ROLLBACK TO {SAVE_ALL_SAVEPOINT}; RELEASE {SAVE_ALL_SAVEPOINT};"
                ))?;
                Err(err)
            }
        }
    }

    fn find_by_id(&self, id: RowId) -> RepoResult<Option<E>> {
        let sql = format!("{} WHERE id = ?1;", Self::select_sql());
        let entity = self.conn.query_row(&sql, [id], E::from_row).optional()?;
        Ok(entity)
    }

    fn find_all(&self) -> RepoResult<Vec<E>> {
        let sql = format!("{} ORDER BY id ASC;", Self::select_sql());
        let mut stmt = self.conn.prepare(&sql)?;
        let entities = stmt
            .query_map([], E::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entities)
    }

    fn exists_by_id(&self, id: RowId) -> RepoResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", E::TABLE);
        let exists: i64 = self.conn.query_row(&sql, [id], |row| row.get(0))?;
        Ok(exists == 1)
    }

    fn count(&self) -> RepoResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {};", E::TABLE);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count} in {}", E::TABLE)))
    }

    fn delete_by_id(&self, id: RowId) -> RepoResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1;", E::TABLE);
        let changed = self.conn.execute(&sql, [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::NAME,
                id,
            });
        }
        Ok(())
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let sql = format!("DELETE FROM {};", E::TABLE);
        Ok(self.conn.execute(&sql, [])?)
    }
}
