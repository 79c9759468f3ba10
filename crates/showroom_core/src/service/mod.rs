//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own transaction scope; repositories never begin or commit on their own
//!   behalf here.

pub mod car_maker_service;
