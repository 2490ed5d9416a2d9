//! Account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of binding slots per input action.
pub const KEYBINDING_SLOTS: usize = 3;

/// Represents an account in the authentication database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// SRP6 salt, hex encoded.
    #[serde(skip_serializing)]
    pub salt: String,
    /// SRP6 verifier, hex encoded.
    #[serde(skip_serializing)]
    pub verifier: String,
    #[serde(skip_serializing)]
    pub game_token: String,
    /// Upper-case hex of the session key bytes.
    #[serde(skip_serializing)]
    pub session_key: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether the account has completed an SRP6 exchange since the key was last cleared.
    pub fn has_session(&self) -> bool {
        !self.session_key.is_empty()
    }
}

/// An account together with its eagerly loaded child collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub account: Account,
    pub costume_unlocks: Vec<AccountCostumeUnlock>,
    pub currencies: Vec<AccountCurrency>,
    pub generic_unlocks: Vec<AccountGenericUnlock>,
    pub keybindings: Vec<AccountKeybinding>,
    pub entitlements: Vec<AccountEntitlement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCostumeUnlock {
    pub item_id: i32,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCurrency {
    pub currency_id: i16,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGenericUnlock {
    pub entry: i32,
    pub unlocked_at: DateTime<Utc>,
}

/// One physical binding of an input action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeybindingSlot {
    pub device_enum: i32,
    pub code: i32,
    pub meta_keys: i32,
    pub event_type_enum: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeybinding {
    pub input_action_id: i32,
    pub slots: [KeybindingSlot; KEYBINDING_SLOTS],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntitlement {
    pub entitlement_id: i16,
    pub amount: i32,
}

/// Input for creating an account from pre-computed SRP6 parameters.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 128, message = "Email is too long"))]
    pub email: String,

    #[validate(length(max = 64, message = "Salt is too long"))]
    #[validate(custom(function = "shared::validation::validate_hex"))]
    pub salt: String,

    #[validate(length(max = 512, message = "Verifier is too long"))]
    #[validate(custom(function = "shared::validation::validate_hex"))]
    pub verifier: String,
}
