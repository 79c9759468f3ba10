//! Showroom schema migrations.
//!
//! Schema set, in apply order:
//! 1. `car_maker` / `car_model` (models reference makers via `maker_fk`,
//!    `sku` unique) for the bulk-insert service.
//! 2. `book` / `customer` for the generic CRUD repositories.
//! 3. `image` holding archived file locations.
//!
//! # Invariants
//! - Versions strictly increase; the database version lives in
//!   `PRAGMA user_version`.
//! - All pending steps commit together or not at all.
//! - A database newer than this binary is refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "car_makers",
        sql: include_str!("0001_car_makers.sql"),
    },
    Migration {
        version: 2,
        name: "books_customers",
        sql: include_str!("0002_books_customers.sql"),
    },
    Migration {
        version: 3,
        name: "images",
        sql: include_str!("0003_images.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        debug!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={latest}"
    );
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, MIGRATIONS};

    #[test]
    fn versions_strictly_increase_from_one() {
        let versions: Vec<u32> = MIGRATIONS.iter().map(|m| m.version).collect();
        let expected: Vec<u32> = (1..=latest_version()).collect();
        assert_eq!(versions, expected);
    }

    #[test]
    fn every_migration_is_named_and_non_empty() {
        for migration in MIGRATIONS {
            assert!(!migration.name.is_empty());
            assert!(migration.sql.contains("CREATE TABLE"), "{}", migration.name);
        }
    }
}
