//! Domain models for the realm authentication database.

pub mod account;
pub mod server;

pub use account::{
    Account, AccountCostumeUnlock, AccountCurrency, AccountDetails, AccountEntitlement,
    AccountGenericUnlock, AccountKeybinding, KeybindingSlot, NewAccount, KEYBINDING_SLOTS,
};
pub use server::{Server, ServerMessage, ServerType};
