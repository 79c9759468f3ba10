//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Map rows into domain records through explicit functions.
//!
//! # Invariants
//! - Repositories borrow a connection (or transaction) and never own one.
//! - Storage errors are surfaced unchanged as `RepoError::Db`.

use crate::db::DbError;
use crate::model::car::RowId;
use rusqlite::ErrorCode;
use thiserror::Error;

pub mod book_repo;
pub mod car_maker_repo;
pub mod car_model_repo;
pub mod crud;
pub mod customer_repo;
pub mod image_repo;
pub mod mapper;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error shared by all repositories and the services built on them.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: RowId },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Returns whether storage rejected the write on a constraint
    /// (unique, not-null, foreign key).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == ErrorCode::ConstraintViolation
        )
    }
}
