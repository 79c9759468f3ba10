use super::{ArchiveError, ArchiveResult, FileSystemStore, ImageLocator};
use crate::model::car::RowId;
use crate::repo::image_repo::{ImageRepository, SqliteImageRepository};
use log::{error, info};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// `ImageLocator` backed by a file store plus an `image` location table.
#[derive(Clone)]
pub struct FileLocationService {
    conn: Arc<Mutex<Connection>>,
    store: FileSystemStore,
}

impl FileLocationService {
    pub fn new(conn: Arc<Mutex<Connection>>, store: FileSystemStore) -> Self {
        Self { conn, store }
    }

    fn lock(&self) -> ArchiveResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ArchiveError::ConnectionPoisoned)
    }
}

impl ImageLocator for FileLocationService {
    fn save(&self, bytes: &[u8], name: &str) -> ArchiveResult<RowId> {
        let path = self.store.write(bytes, name)?;
        let location = path.to_string_lossy();

        let inserted = {
            let conn = self.lock()?;
            SqliteImageRepository::new(&conn).insert(name, &location)
        };

        match inserted {
            Ok(id) => {
                info!(
                    "event=image_save module=archive status=ok image_id={id} bytes={}",
                    bytes.len()
                );
                Ok(id)
            }
            Err(err) => {
                self.store.remove(&path);
                error!("event=image_save module=archive status=error error={err}");
                Err(err.into())
            }
        }
    }

    fn find(&self, id: RowId) -> ArchiveResult<Option<Vec<u8>>> {
        let record = {
            let conn = self.lock()?;
            SqliteImageRepository::new(&conn).find_by_id(id)?
        };

        match record {
            Some(record) => Ok(Some(self.store.read(&record.location)?)),
            None => {
                info!("event=image_find module=archive status=miss image_id={id}");
                Ok(None)
            }
        }
    }
}
