//! Domain records persisted by showroom repositories.
//!
//! # Invariants
//! - Identifiers are assigned by storage; `None` means "not persisted yet".
//! - Records carry no behavior beyond small lifecycle helpers.

pub mod book;
pub mod car;
pub mod customer;
pub mod image;
