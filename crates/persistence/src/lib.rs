//! Persistence layer for the realm authentication database.
//!
//! This crate contains:
//! - Database connection management and embedded migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - The [`AuthDatabase`] façade used by the rest of the server

pub mod auth_database;
pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod migrations;
pub mod repositories;

pub use auth_database::{AuthDatabase, MutatorFuture};
pub use db::DatabaseConfig;
pub use error::AuthDbError;
