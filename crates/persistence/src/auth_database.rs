//! Authentication database façade.
//!
//! Every operation acquires its own connection from the pool, runs one query
//! (or one transaction) and releases the connection before returning.

use domain::models::{Account, AccountDetails, Server, ServerMessage};
use sqlx::{PgConnection, PgPool};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

use crate::db::{create_pool, DatabaseConfig};
use crate::error::AuthDbError;
use crate::migrations;
use crate::repositories::{AccountRepository, ServerRepository};

/// Future returned by a [`AuthDatabase::save`] mutator.
pub type MutatorFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, sqlx::Error>> + Send + 'c>>;

/// Data access for accounts, the realm server list and schema migrations.
#[derive(Debug, Clone)]
pub struct AuthDatabase {
    pool: PgPool,
    accounts: AccountRepository,
    servers: ServerRepository,
}

impl AuthDatabase {
    /// Creates a façade over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            servers: ServerRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connects a new pool using `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AuthDbError> {
        let pool = create_pool(config).await?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies any pending schema migrations in order.
    pub async fn migrate(&self) -> Result<usize, AuthDbError> {
        migrations::run_migrations(&self.pool).await
    }

    /// Runs `mutator` inside a transaction and commits its changes.
    ///
    /// The transaction is rolled back if the mutator returns an error.
    ///
    /// ```ignore
    /// db.save(|conn| {
    ///     Box::pin(async move {
    ///         sqlx::query("DELETE FROM account_currencies WHERE account_id = $1")
    ///             .bind(account_id)
    ///             .execute(&mut *conn)
    ///             .await?;
    ///         Ok(())
    ///     })
    /// })
    /// .await?;
    /// ```
    pub async fn save<F, T>(&self, mutator: F) -> Result<T, AuthDbError>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> MutatorFuture<'c, T>,
    {
        let mut tx = self.pool.begin().await?;
        let value = mutator(&mut *tx).await?;
        tx.commit().await?;
        Ok(value)
    }

    /// Looks up an account by email.
    pub async fn get_account(&self, email: &str) -> Result<Option<Account>, AuthDbError> {
        debug!(email, "Looking up account");
        Ok(self.accounts.find_by_email(email).await?.map(Into::into))
    }

    /// Looks up an account by email and game token.
    pub async fn get_account_by_game_token(
        &self,
        email: &str,
        game_token: &str,
    ) -> Result<Option<Account>, AuthDbError> {
        debug!(email, "Looking up account by game token");
        Ok(self
            .accounts
            .find_by_email_and_game_token(email, game_token)
            .await?
            .map(Into::into))
    }

    /// Looks up an account by email and session key, loading all child collections.
    pub async fn get_account_by_session_key(
        &self,
        email: &str,
        session_key: &[u8],
    ) -> Result<Option<AccountDetails>, AuthDbError> {
        debug!(email, "Looking up account by session key");
        // Accounts without a session store an empty key.
        if session_key.is_empty() {
            return Ok(None);
        }
        let session_key_hex = shared::crypto::session_key_hex(session_key);
        let Some((account, collections)) = self
            .accounts
            .find_details_by_email_and_session_key(email, &session_key_hex)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(AccountDetails {
            account: account.into(),
            costume_unlocks: collections.costume_unlocks.into_iter().map(Into::into).collect(),
            currencies: collections.currencies.into_iter().map(Into::into).collect(),
            generic_unlocks: collections.generic_unlocks.into_iter().map(Into::into).collect(),
            keybindings: collections.keybindings.into_iter().map(Into::into).collect(),
            entitlements: collections.entitlements.into_iter().map(Into::into).collect(),
        }))
    }

    /// Creates an account from pre-computed SRP6 salt and verifier.
    pub async fn create_account(
        &self,
        email: &str,
        salt: &str,
        verifier: &str,
    ) -> Result<Account, AuthDbError> {
        Ok(self.accounts.create(email, salt, verifier).await?.into())
    }

    /// Deletes an account by email. Returns whether an account was removed.
    pub async fn delete_account(&self, email: &str) -> Result<bool, AuthDbError> {
        let deleted = self.accounts.delete_by_email(email).await?;
        debug!(email, deleted, "Account delete");
        Ok(deleted)
    }

    /// Stores a new game token, writing only that column.
    pub async fn update_account_game_token(
        &self,
        account: &mut Account,
        game_token: &str,
    ) -> Result<(), AuthDbError> {
        self.accounts
            .update_game_token(account.id, game_token)
            .await?;
        account.game_token = game_token.to_string();
        debug!(account_id = account.id, "Game token updated");
        Ok(())
    }

    /// Stores a new session key, writing only that column.
    pub async fn update_account_session_key(
        &self,
        account: &mut Account,
        session_key: &[u8],
    ) -> Result<(), AuthDbError> {
        let session_key_hex = shared::crypto::session_key_hex(session_key);
        self.accounts
            .update_session_key(account.id, &session_key_hex)
            .await?;
        account.session_key = session_key_hex;
        debug!(account_id = account.id, "Session key updated");
        Ok(())
    }

    /// Returns a snapshot of the realm server list.
    pub async fn get_servers(&self) -> Result<Vec<Server>, AuthDbError> {
        let servers = self.servers.list_servers().await?;
        Ok(servers.into_iter().map(Into::into).collect())
    }

    /// Returns a snapshot of all server messages.
    pub async fn get_server_messages(&self) -> Result<Vec<ServerMessage>, AuthDbError> {
        let messages = self.servers.list_server_messages().await?;
        Ok(messages.into_iter().map(Into::into).collect())
    }
}
