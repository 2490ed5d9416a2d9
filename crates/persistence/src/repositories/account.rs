//! Account repository for database operations.

use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::entities::{
    AccountCostumeUnlockEntity, AccountCurrencyEntity, AccountEntitlementEntity, AccountEntity,
    AccountGenericUnlockEntity, AccountKeybindingEntity,
};
use crate::error::{single_or_none, AuthDbError};
use crate::metrics::QueryTimer;

const ACCOUNT_COLUMNS: &str = "id, email, s, v, game_token, session_key, created_at";

/// Child collections of a single account.
#[derive(Debug, Clone, Default)]
pub struct AccountCollections {
    pub costume_unlocks: Vec<AccountCostumeUnlockEntity>,
    pub currencies: Vec<AccountCurrencyEntity>,
    pub generic_unlocks: Vec<AccountGenericUnlockEntity>,
    pub keybindings: Vec<AccountKeybindingEntity>,
    pub entitlements: Vec<AccountEntitlementEntity>,
}

/// Repository for account-related database operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Creates a new AccountRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AccountEntity>, AuthDbError> {
        let timer = QueryTimer::new("find_account_by_email");
        let rows = sqlx::query_as::<_, AccountEntity>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        single_or_none("accounts", rows?)
    }

    /// Find an account by email and game token.
    pub async fn find_by_email_and_game_token(
        &self,
        email: &str,
        game_token: &str,
    ) -> Result<Option<AccountEntity>, AuthDbError> {
        let timer = QueryTimer::new("find_account_by_game_token");
        let rows = sqlx::query_as::<_, AccountEntity>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE lower(email) = lower($1) AND game_token = $2"
        ))
        .bind(email)
        .bind(game_token)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        single_or_none("accounts", rows?)
    }

    /// Find an account by email and hex-encoded session key together with its
    /// child collections.
    ///
    /// All reads run in one repeatable-read transaction so the account and its
    /// collections come from the same snapshot.
    pub async fn find_details_by_email_and_session_key(
        &self,
        email: &str,
        session_key_hex: &str,
    ) -> Result<Option<(AccountEntity, AccountCollections)>, AuthDbError> {
        let timer = QueryTimer::new("find_account_details_by_session_key");
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, AccountEntity>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE lower(email) = lower($1) AND session_key = $2"
        ))
        .bind(email)
        .bind(session_key_hex)
        .fetch_all(&mut *tx)
        .await?;

        let Some(account) = single_or_none("accounts", rows)? else {
            tx.commit().await?;
            timer.record();
            return Ok(None);
        };

        let collections = load_collections(&mut *tx, account.id).await?;
        tx.commit().await?;
        timer.record();
        Ok(Some((account, collections)))
    }

    /// Create a new account.
    pub async fn create(
        &self,
        email: &str,
        salt: &str,
        verifier: &str,
    ) -> Result<AccountEntity, AuthDbError> {
        let timer = QueryTimer::new("create_account");
        let result = sqlx::query_as::<_, AccountEntity>(&format!(
            r#"
            INSERT INTO accounts (email, s, v)
            VALUES ($1, $2, $3)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(salt)
        .bind(verifier)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        let account = result?;
        debug!(account_id = account.id, email, "Account created");
        Ok(account)
    }

    /// Delete an account by email. Returns whether a row was removed.
    pub async fn delete_by_email(&self, email: &str) -> Result<bool, AuthDbError> {
        let timer = QueryTimer::new("delete_account_by_email");
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Update only the game token column of an account.
    pub async fn update_game_token(
        &self,
        account_id: i64,
        game_token: &str,
    ) -> Result<(), AuthDbError> {
        let timer = QueryTimer::new("update_account_game_token");
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET game_token = $1
            WHERE id = $2
            "#,
        )
        .bind(game_token)
        .bind(account_id)
        .execute(&self.pool)
        .await;
        timer.record();
        ensure_updated(account_id, result?.rows_affected())
    }

    /// Update only the session key column of an account.
    pub async fn update_session_key(
        &self,
        account_id: i64,
        session_key_hex: &str,
    ) -> Result<(), AuthDbError> {
        let timer = QueryTimer::new("update_account_session_key");
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET session_key = $1
            WHERE id = $2
            "#,
        )
        .bind(session_key_hex)
        .bind(account_id)
        .execute(&self.pool)
        .await;
        timer.record();
        ensure_updated(account_id, result?.rows_affected())
    }
}

/// Load every child collection of an account on `conn`.
async fn load_collections(
    conn: &mut PgConnection,
    account_id: i64,
) -> Result<AccountCollections, AuthDbError> {
    let costume_unlocks = sqlx::query_as::<_, AccountCostumeUnlockEntity>(
        r#"
        SELECT account_id, item_id, unlocked_at
        FROM account_costume_unlocks
        WHERE account_id = $1
        ORDER BY item_id
        "#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;

    let currencies = sqlx::query_as::<_, AccountCurrencyEntity>(
        r#"
        SELECT account_id, currency_id, amount
        FROM account_currencies
        WHERE account_id = $1
        ORDER BY currency_id
        "#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;

    let generic_unlocks = sqlx::query_as::<_, AccountGenericUnlockEntity>(
        r#"
        SELECT account_id, entry, unlocked_at
        FROM account_generic_unlocks
        WHERE account_id = $1
        ORDER BY entry
        "#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;

    let keybindings = sqlx::query_as::<_, AccountKeybindingEntity>(
        r#"
        SELECT account_id, input_action_id,
               device_enum_00, device_enum_01, device_enum_02,
               code_00, code_01, code_02,
               meta_keys_00, meta_keys_01, meta_keys_02,
               event_type_enum_00, event_type_enum_01, event_type_enum_02
        FROM account_keybindings
        WHERE account_id = $1
        ORDER BY input_action_id
        "#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;

    let entitlements = sqlx::query_as::<_, AccountEntitlementEntity>(
        r#"
        SELECT account_id, entitlement_id, amount
        FROM account_entitlements
        WHERE account_id = $1
        ORDER BY entitlement_id
        "#,
    )
    .bind(account_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(AccountCollections {
        costume_unlocks,
        currencies,
        generic_unlocks,
        keybindings,
        entitlements,
    })
}

fn ensure_updated(account_id: i64, rows_affected: u64) -> Result<(), AuthDbError> {
    if rows_affected == 0 {
        Err(AuthDbError::AccountNotFound { id: account_id })
    } else {
        Ok(())
    }
}
