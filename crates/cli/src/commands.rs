//! Command dispatch.

use anyhow::{anyhow, bail, Context, Result};
use domain::models::{Account, NewAccount, Server};
use persistence::AuthDatabase;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::cli::{AccountCommand, Command};

/// Runs a parsed command against the database.
pub async fn run(db: &AuthDatabase, command: Command) -> Result<()> {
    match command {
        Command::Migrate => {
            let applied = db.migrate().await.context("migration failed")?;
            print_json(&json!({ "applied": applied }))
        }
        Command::Account(command) => run_account(db, command).await,
        Command::Servers { messages } => {
            let servers: Vec<_> = db.get_servers().await?.iter().map(server_listing).collect();
            if messages {
                let messages = db.get_server_messages().await?;
                print_json(&json!({ "servers": servers, "messages": messages }))
            } else {
                print_json(&json!({ "servers": servers }))
            }
        }
    }
}

async fn run_account(db: &AuthDatabase, command: AccountCommand) -> Result<()> {
    match command {
        AccountCommand::Create {
            email,
            salt,
            verifier,
        } => {
            let input = new_account(email, salt, verifier)?;
            let account = db
                .create_account(&input.email, &input.salt, &input.verifier)
                .await?;
            info!(account_id = account.id, "Account created");
            print_json(&account)
        }
        AccountCommand::Show { email } => {
            let account = require_account(db, &email).await?;
            print_json(&account)
        }
        AccountCommand::Delete { email } => {
            let deleted = db.delete_account(&email).await?;
            print_json(&json!({ "email": email, "deleted": deleted }))
        }
        AccountCommand::IssueToken { email } => {
            let mut account = require_account(db, &email).await?;
            let game_token = shared::crypto::generate_game_token();
            db.update_account_game_token(&mut account, &game_token)
                .await?;
            print_json(&json!({ "email": account.email, "gameToken": account.game_token }))
        }
        AccountCommand::RotateSession { email } => {
            let mut account = require_account(db, &email).await?;
            let session_key = shared::crypto::generate_session_key();
            db.update_account_session_key(&mut account, &session_key)
                .await?;
            print_json(&json!({ "email": account.email, "sessionKey": account.session_key }))
        }
    }
}

/// Builds and validates account creation input.
pub fn new_account(email: String, salt: String, verifier: String) -> Result<NewAccount> {
    let input = NewAccount {
        email,
        salt,
        verifier,
    };
    input
        .validate()
        .map_err(|errors| anyhow!("invalid account input: {errors}"))?;
    Ok(input)
}

async fn require_account(db: &AuthDatabase, email: &str) -> Result<Account> {
    match db.get_account(email).await? {
        Some(account) => Ok(account),
        None => bail!("account {email} not found"),
    }
}

/// Flattens a server into the row printed by `realm-auth servers`.
pub fn server_listing(server: &Server) -> serde_json::Value {
    json!({
        "id": server.id,
        "name": server.name,
        "address": server.address(),
        "type": server.server_type.to_string(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
