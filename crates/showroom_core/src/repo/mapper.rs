//! Explicit row-to-record mapping for car makers and models.
//!
//! # Invariants
//! - Makers come back with an empty `models` vector; assembling models is
//!   the caller's job.
//! - Column names, not positions, are used so `SELECT` order can change.

use crate::model::car::{CarMaker, CarModel};
use rusqlite::Row;

/// Maps one `car_maker` row (`id`, `name`) to a detached-model maker.
pub fn map_maker_row(row: &Row<'_>) -> rusqlite::Result<CarMaker> {
    Ok(CarMaker {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        models: Vec::new(),
    })
}

/// Maps one `car_model` row to a model.
pub fn map_model_row(row: &Row<'_>) -> rusqlite::Result<CarModel> {
    Ok(CarModel {
        id: Some(row.get("id")?),
        maker_id: Some(row.get("maker_fk")?),
        name: row.get("name")?,
        sku: row.get("sku")?,
        year: row.get("year")?,
    })
}
