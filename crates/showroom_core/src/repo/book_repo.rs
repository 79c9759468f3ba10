//! Book CRUD repository.

use crate::model::book::Book;
use crate::model::car::RowId;
use crate::repo::crud::{Entity, SqliteCrudRepository};
use rusqlite::types::Value;
use rusqlite::Row;

pub type BookRepository<'conn> = SqliteCrudRepository<'conn, Book>;

impl Entity for Book {
    const NAME: &'static str = "book";
    const TABLE: &'static str = "book";
    const COLUMNS: &'static [&'static str] = &["title", "author"];

    fn id(&self) -> Option<RowId> {
        self.id
    }

    fn set_id(&mut self, id: Option<RowId>) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.title.clone()),
            Value::Text(self.author.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            title: row.get("title")?,
            author: row.get("author")?,
        })
    }
}
