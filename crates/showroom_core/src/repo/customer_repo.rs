//! Customer CRUD repository.

use crate::model::car::RowId;
use crate::model::customer::Customer;
use crate::repo::crud::{Entity, SqliteCrudRepository};
use rusqlite::types::Value;
use rusqlite::Row;

pub type CustomerRepository<'conn> = SqliteCrudRepository<'conn, Customer>;

impl Entity for Customer {
    const NAME: &'static str = "customer";
    const TABLE: &'static str = "customer";
    const COLUMNS: &'static [&'static str] = &["name", "email"];

    fn id(&self) -> Option<RowId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RowId>) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.email.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            email: row.get("email")?,
        })
    }
}
