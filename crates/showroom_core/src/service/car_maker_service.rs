//! Car maker bulk-insert service.
//!
//! # Responsibility
//! - Persist a maker (when new) and all of its models atomically.
//! - Assemble makers with their models for read paths.
//!
//! # Invariants
//! - All inserts of one `bulk_insert` call share a single transaction;
//!   nothing is visible unless every insert succeeded.
//! - Every model's `maker_id` is overwritten with the maker's id before
//!   insert, whatever value it arrived with.
//! - Models are inserted on every call, including models that already carry
//!   an id. Repeating a call duplicates model rows.
//! - On failure the caller's record is restored to its incoming ids.

use crate::model::car::{CarMaker, RowId};
use crate::repo::car_maker_repo::{CarMakerRepository, SqliteCarMakerRepository};
use crate::repo::car_model_repo::{CarModelRepository, SqliteCarModelRepository};
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::time::Instant;

/// Bulk-insert facade over an injected connection.
pub struct CarMakerService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> CarMakerService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Inserts `maker` (when it has no id) and every attached model.
    ///
    /// Returns the number of models processed.
    ///
    /// # Side effects
    /// - Sets `maker.id` on first insert.
    /// - Sets `maker_id` and `id` on every model.
    ///
    /// # Errors
    /// - Any storage error (constraint violation, missing maker row) aborts
    ///   the whole call and is returned untranslated.
    pub fn bulk_insert(&mut self, maker: &mut CarMaker) -> RepoResult<usize> {
        let started_at = Instant::now();
        let incoming = IncomingIds::capture(maker);

        match self.bulk_insert_in_tx(maker) {
            Ok(count) => {
                info!(
                    "event=bulk_insert module=service status=ok maker_id={} maker_inserted={} models={} duration_ms={}",
                    maker.id.unwrap_or_default(),
                    incoming.maker_id.is_none(),
                    count,
                    started_at.elapsed().as_millis()
                );
                Ok(count)
            }
            Err(err) => {
                incoming.restore(maker);
                error!(
                    "event=bulk_insert module=service status=error models={} duration_ms={} error={}",
                    maker.models.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Loads one maker with its models assembled, ordered by model id.
    pub fn find_maker(&self, id: RowId) -> RepoResult<Option<CarMaker>> {
        let makers = SqliteCarMakerRepository::new(&*self.conn);
        let Some(mut maker) = makers.find_by_id(id)? else {
            return Ok(None);
        };
        maker.models = SqliteCarModelRepository::new(&*self.conn).find_by_maker(id)?;
        Ok(Some(maker))
    }

    /// Lists makers without their models.
    pub fn list_makers(&self) -> RepoResult<Vec<CarMaker>> {
        SqliteCarMakerRepository::new(&*self.conn).find_all()
    }

    fn bulk_insert_in_tx(&mut self, maker: &mut CarMaker) -> RepoResult<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let makers = SqliteCarMakerRepository::new(&tx);
            let models = SqliteCarModelRepository::new(&tx);

            if maker.id.is_none() {
                maker.id = Some(makers.insert(maker)?);
            }

            let maker_id = maker.id;
            for model in maker.models.iter_mut() {
                model.maker_id = maker_id;
                model.id = Some(models.insert(model)?);
            }
        }
        tx.commit()?;

        Ok(maker.models.len())
    }
}

/// Ids carried by a maker before the call, used to undo in-memory writes
/// when the transaction rolls back.
struct IncomingIds {
    maker_id: Option<RowId>,
    models: Vec<(Option<RowId>, Option<RowId>)>,
}

impl IncomingIds {
    fn capture(maker: &CarMaker) -> Self {
        Self {
            maker_id: maker.id,
            models: maker
                .models
                .iter()
                .map(|model| (model.id, model.maker_id))
                .collect(),
        }
    }

    fn restore(self, maker: &mut CarMaker) {
        maker.id = self.maker_id;
        for (model, (id, maker_id)) in maker.models.iter_mut().zip(self.models) {
            model.id = id;
            model.maker_id = maker_id;
        }
    }
}
