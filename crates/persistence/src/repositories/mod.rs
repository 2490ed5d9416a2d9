//! Repository implementations for database operations.

pub mod account;
pub mod server;

pub use account::{AccountCollections, AccountRepository};
pub use server::ServerRepository;
