//! Storage-backed showroom demos: car maker bulk insert, generic CRUD
//! repositories, and a filesystem image archive.

pub mod archive;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use archive::{ArchiveError, ArchiveResult, FileLocationService, FileSystemStore, ImageLocator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::Book;
pub use model::car::{CarMaker, CarModel, RowId};
pub use model::customer::Customer;
pub use model::image::ImageRecord;
pub use repo::book_repo::BookRepository;
pub use repo::crud::{CrudRepository, Entity, SqliteCrudRepository};
pub use repo::customer_repo::CustomerRepository;
pub use repo::{RepoError, RepoResult};
pub use service::car_maker_service::CarMakerService;

/// Minimal health-check API used to confirm the crate is linked.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
