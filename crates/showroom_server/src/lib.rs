//! HTTP surface for the showroom image archive.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_router, run_server, ServerArgs};
pub use state::AppState;
