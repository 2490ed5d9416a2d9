//! Integration tests for the authentication database façade.
//!
//! These tests require a running PostgreSQL instance. `TEST_DATABASE_URL`
//! overrides the default `realm_auth_test` database on localhost.

mod common;

use common::{test_database, test_srp_params, unique_email};
use persistence::AuthDbError;
use shared::crypto::{generate_session_key, session_key_hex};

// ============================================================================
// Migrations
// ============================================================================

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let db = test_database().await;

    assert_eq!(db.migrate().await.unwrap(), 0);
    assert!(persistence::migrations::pending_migrations(db.pool())
        .await
        .unwrap()
        .is_empty());
}

// ============================================================================
// Account lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_then_get_account() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();

    let created = db.create_account(&email, &salt, &verifier).await.unwrap();
    assert_eq!(created.email, email);
    assert!(created.game_token.is_empty());
    assert!(!created.has_session());

    let fetched = db.get_account(&email).await.unwrap().expect("account exists");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.salt, salt);
    assert_eq!(fetched.verifier, verifier);

    db.delete_account(&email).await.unwrap();
}

#[tokio::test]
async fn test_get_missing_account_returns_none() {
    let db = test_database().await;

    assert!(db.get_account(&unique_email()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_duplicate_email_fails() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();

    db.create_account(&email, &salt, &verifier).await.unwrap();
    let err = db.create_account(&email, &salt, &verifier).await.unwrap_err();
    assert!(matches!(err, AuthDbError::Database(_)));

    db.delete_account(&email).await.unwrap();
}

#[tokio::test]
async fn test_email_lookup_ignores_case() {
    let db = test_database().await;
    let email = unique_email();
    let shouted = email.to_uppercase();
    let (salt, verifier) = test_srp_params();

    let created = db.create_account(&email, &salt, &verifier).await.unwrap();

    let fetched = db.get_account(&shouted).await.unwrap().expect("account exists");
    assert_eq!(fetched.id, created.id);

    let err = db.create_account(&shouted, &salt, &verifier).await.unwrap_err();
    assert!(matches!(err, AuthDbError::Database(_)));

    assert!(db.delete_account(&shouted).await.unwrap());
    assert!(db.get_account(&email).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_account() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    db.create_account(&email, &salt, &verifier).await.unwrap();

    assert!(db.delete_account(&email).await.unwrap());
    assert!(db.get_account(&email).await.unwrap().is_none());
    assert!(!db.delete_account(&email).await.unwrap());
}

#[tokio::test]
async fn test_delete_nonexistent_account_returns_false() {
    let db = test_database().await;

    assert!(!db.delete_account(&unique_email()).await.unwrap());
}

// ============================================================================
// Game token and session key
// ============================================================================

#[tokio::test]
async fn test_get_account_by_game_token() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    let mut account = db.create_account(&email, &salt, &verifier).await.unwrap();

    db.update_account_game_token(&mut account, "ABCDEF0123456789")
        .await
        .unwrap();
    assert_eq!(account.game_token, "ABCDEF0123456789");

    let found = db
        .get_account_by_game_token(&email, "ABCDEF0123456789")
        .await
        .unwrap()
        .expect("token matches");
    assert_eq!(found.id, account.id);

    assert!(db
        .get_account_by_game_token(&email, "0000")
        .await
        .unwrap()
        .is_none());

    db.delete_account(&email).await.unwrap();
}

#[tokio::test]
async fn test_update_session_key_only_touches_session_key() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    let mut fresh = db.create_account(&email, &salt, &verifier).await.unwrap();
    let mut stale = fresh.clone();

    db.update_account_game_token(&mut fresh, "11112222333344445555666677778888")
        .await
        .unwrap();

    // The stale copy still carries an empty game token.
    let key = generate_session_key();
    db.update_account_session_key(&mut stale, &key).await.unwrap();
    assert_eq!(stale.session_key, session_key_hex(&key));

    let stored = db.get_account(&email).await.unwrap().expect("account exists");
    assert_eq!(stored.session_key, session_key_hex(&key));
    assert_eq!(stored.game_token, "11112222333344445555666677778888");
    assert_eq!(stored.salt, salt);
    assert_eq!(stored.verifier, verifier);

    db.delete_account(&email).await.unwrap();
}

#[tokio::test]
async fn test_update_deleted_account_reports_not_found() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    let mut account = db.create_account(&email, &salt, &verifier).await.unwrap();
    db.delete_account(&email).await.unwrap();

    let err = db
        .update_account_session_key(&mut account, &[1, 2, 3])
        .await
        .unwrap_err();
    assert!(matches!(err, AuthDbError::AccountNotFound { id } if id == account.id));
    assert!(!account.has_session());
}

#[tokio::test]
async fn test_empty_session_key_never_matches() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    db.create_account(&email, &salt, &verifier).await.unwrap();

    assert!(db
        .get_account_by_session_key(&email, &[])
        .await
        .unwrap()
        .is_none());

    db.delete_account(&email).await.unwrap();
}

#[tokio::test]
async fn test_get_account_by_session_key_loads_collections() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    let mut account = db.create_account(&email, &salt, &verifier).await.unwrap();
    let key = generate_session_key();
    db.update_account_session_key(&mut account, &key).await.unwrap();

    let account_id = account.id;
    db.save(|conn| {
        Box::pin(async move {
            sqlx::query("INSERT INTO account_costume_unlocks (account_id, item_id) VALUES ($1, 5001)")
                .bind(account_id)
                .execute(&mut *conn)
                .await?;
            sqlx::query(
                "INSERT INTO account_currencies (account_id, currency_id, amount) VALUES ($1, 2, 750), ($1, 1, 20)",
            )
            .bind(account_id)
            .execute(&mut *conn)
            .await?;
            sqlx::query("INSERT INTO account_generic_unlocks (account_id, entry) VALUES ($1, 44)")
                .bind(account_id)
                .execute(&mut *conn)
                .await?;
            sqlx::query(
                "INSERT INTO account_keybindings (account_id, input_action_id, device_enum_00, code_00) VALUES ($1, 9, 1, 87)",
            )
            .bind(account_id)
            .execute(&mut *conn)
            .await?;
            sqlx::query(
                "INSERT INTO account_entitlements (account_id, entitlement_id, amount) VALUES ($1, 12, 1)",
            )
            .bind(account_id)
            .execute(&mut *conn)
            .await?;
            Ok(())
        })
    })
    .await
    .unwrap();

    let details = db
        .get_account_by_session_key(&email, &key)
        .await
        .unwrap()
        .expect("session key matches");
    assert_eq!(details.account.id, account_id);
    assert_eq!(details.costume_unlocks.len(), 1);
    assert_eq!(details.costume_unlocks[0].item_id, 5001);
    assert_eq!(details.currencies.len(), 2);
    assert_eq!(details.currencies[0].currency_id, 1);
    assert_eq!(details.currencies[1].amount, 750);
    assert_eq!(details.generic_unlocks[0].entry, 44);
    assert_eq!(details.keybindings[0].input_action_id, 9);
    assert_eq!(details.keybindings[0].slots[0].code, 87);
    assert_eq!(details.keybindings[0].slots[1].code, 0);
    assert_eq!(details.entitlements[0].entitlement_id, 12);

    assert!(db
        .get_account_by_session_key(&email, &[0xAA; 40])
        .await
        .unwrap()
        .is_none());

    // Child rows are removed with the account.
    assert!(db.delete_account(&email).await.unwrap());
    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM account_currencies WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(remaining, 0);
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
async fn test_save_rolls_back_on_error() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    let account = db.create_account(&email, &salt, &verifier).await.unwrap();
    let account_id = account.id;

    let result: Result<(), AuthDbError> = db
        .save(|conn| {
            Box::pin(async move {
                sqlx::query(
                    "INSERT INTO account_currencies (account_id, currency_id, amount) VALUES ($1, 3, 99)",
                )
                .bind(account_id)
                .execute(&mut *conn)
                .await?;
                Err(sqlx::Error::RowNotFound)
            })
        })
        .await;
    assert!(matches!(result, Err(AuthDbError::Database(sqlx::Error::RowNotFound))));

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM account_currencies WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(count, 0);

    db.delete_account(&email).await.unwrap();
}

#[tokio::test]
async fn test_save_returns_mutator_value() {
    let db = test_database().await;
    let email = unique_email();
    let (salt, verifier) = test_srp_params();
    db.create_account(&email, &salt, &verifier).await.unwrap();

    let lookup = email.clone();
    let id: i64 = db
        .save(|conn| {
            Box::pin(async move {
                sqlx::query_scalar("SELECT id FROM accounts WHERE email = $1")
                    .bind(lookup)
                    .fetch_one(&mut *conn)
                    .await
            })
        })
        .await
        .unwrap();

    let account = db.get_account(&email).await.unwrap().expect("account exists");
    assert_eq!(id, account.id);

    db.delete_account(&email).await.unwrap();
}

// ============================================================================
// Server list
// ============================================================================

#[tokio::test]
async fn test_get_servers_contains_seeded_realm() {
    let db = test_database().await;

    let servers = db.get_servers().await.unwrap();
    let realm = servers
        .iter()
        .find(|server| server.name == "Local Realm")
        .expect("seeded server exists");
    assert_eq!(realm.host, "127.0.0.1");
    assert_eq!(realm.port, 24000);
    assert!(servers.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[tokio::test]
async fn test_get_server_messages_contains_seeded_message() {
    let db = test_database().await;

    let messages = db.get_server_messages().await.unwrap();
    assert!(messages
        .iter()
        .any(|message| message.index == 0 && message.language == 0));
}
