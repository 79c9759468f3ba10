//! Car maker / car model records.
//!
//! # Invariants
//! - `CarMaker::id` is `None` until the first bulk insert, then stable.
//! - After a bulk insert every attached `CarModel::maker_id` equals the
//!   owning maker's id.

use serde::{Deserialize, Serialize};

/// Storage-assigned row identifier.
pub type RowId = i64;

/// Vehicle manufacturer together with the models attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarMaker {
    #[serde(default)]
    pub id: Option<RowId>,
    pub name: String,
    /// Ordered; not populated by row mapping.
    #[serde(default)]
    pub models: Vec<CarModel>,
}

impl CarMaker {
    /// Creates a detached maker with no models.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            models: Vec::new(),
        }
    }

    /// Attaches a model, builder style.
    pub fn with_model(mut self, model: CarModel) -> Self {
        self.models.push(model);
        self
    }

    /// Returns whether the maker already has a storage identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Vehicle model owned by exactly one maker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarModel {
    #[serde(default)]
    pub id: Option<RowId>,
    /// Overwritten by the bulk insert; incoming values are not trusted.
    #[serde(default)]
    pub maker_id: Option<RowId>,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl CarModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
