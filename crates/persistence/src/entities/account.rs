//! Account entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{
    Account, AccountCostumeUnlock, AccountCurrency, AccountEntitlement, AccountGenericUnlock,
    AccountKeybinding, KeybindingSlot,
};
use sqlx::FromRow;

/// Database row mapping for the accounts table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntity {
    pub id: i64,
    pub email: String,
    pub s: String,
    pub v: String,
    pub game_token: String,
    pub session_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<AccountEntity> for Account {
    fn from(entity: AccountEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            salt: entity.s,
            verifier: entity.v,
            game_token: entity.game_token,
            session_key: entity.session_key,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the account_costume_unlocks table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountCostumeUnlockEntity {
    pub account_id: i64,
    pub item_id: i32,
    pub unlocked_at: DateTime<Utc>,
}

impl From<AccountCostumeUnlockEntity> for AccountCostumeUnlock {
    fn from(entity: AccountCostumeUnlockEntity) -> Self {
        Self {
            item_id: entity.item_id,
            unlocked_at: entity.unlocked_at,
        }
    }
}

/// Database row mapping for the account_currencies table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountCurrencyEntity {
    pub account_id: i64,
    pub currency_id: i16,
    pub amount: i64,
}

impl From<AccountCurrencyEntity> for AccountCurrency {
    fn from(entity: AccountCurrencyEntity) -> Self {
        Self {
            currency_id: entity.currency_id,
            amount: entity.amount,
        }
    }
}

/// Database row mapping for the account_generic_unlocks table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountGenericUnlockEntity {
    pub account_id: i64,
    pub entry: i32,
    pub unlocked_at: DateTime<Utc>,
}

impl From<AccountGenericUnlockEntity> for AccountGenericUnlock {
    fn from(entity: AccountGenericUnlockEntity) -> Self {
        Self {
            entry: entity.entry,
            unlocked_at: entity.unlocked_at,
        }
    }
}

/// Database row mapping for the account_keybindings table.
///
/// Columns are flattened per slot (`_00`, `_01`, `_02`).
#[derive(Debug, Clone, FromRow)]
pub struct AccountKeybindingEntity {
    pub account_id: i64,
    pub input_action_id: i32,
    pub device_enum_00: i32,
    pub device_enum_01: i32,
    pub device_enum_02: i32,
    pub code_00: i32,
    pub code_01: i32,
    pub code_02: i32,
    pub meta_keys_00: i32,
    pub meta_keys_01: i32,
    pub meta_keys_02: i32,
    pub event_type_enum_00: i32,
    pub event_type_enum_01: i32,
    pub event_type_enum_02: i32,
}

impl From<AccountKeybindingEntity> for AccountKeybinding {
    fn from(entity: AccountKeybindingEntity) -> Self {
        Self {
            input_action_id: entity.input_action_id,
            slots: [
                KeybindingSlot {
                    device_enum: entity.device_enum_00,
                    code: entity.code_00,
                    meta_keys: entity.meta_keys_00,
                    event_type_enum: entity.event_type_enum_00,
                },
                KeybindingSlot {
                    device_enum: entity.device_enum_01,
                    code: entity.code_01,
                    meta_keys: entity.meta_keys_01,
                    event_type_enum: entity.event_type_enum_01,
                },
                KeybindingSlot {
                    device_enum: entity.device_enum_02,
                    code: entity.code_02,
                    meta_keys: entity.meta_keys_02,
                    event_type_enum: entity.event_type_enum_02,
                },
            ],
        }
    }
}

/// Database row mapping for the account_entitlements table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntitlementEntity {
    pub account_id: i64,
    pub entitlement_id: i16,
    pub amount: i32,
}

impl From<AccountEntitlementEntity> for AccountEntitlement {
    fn from(entity: AccountEntitlementEntity) -> Self {
        Self {
            entitlement_id: entity.entitlement_id,
            amount: entity.amount,
        }
    }
}
