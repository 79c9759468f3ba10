//! Route handlers

pub mod health;
pub mod images;

pub use health::health_check;
pub use images::{download_image, upload_image};
