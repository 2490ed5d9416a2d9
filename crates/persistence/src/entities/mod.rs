//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod account;
pub mod server;

pub use account::{
    AccountCostumeUnlockEntity, AccountCurrencyEntity, AccountEntitlementEntity, AccountEntity,
    AccountGenericUnlockEntity, AccountKeybindingEntity,
};
pub use server::{ServerEntity, ServerMessageEntity};
