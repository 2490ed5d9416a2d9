//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Operator tool for the realm authentication database.
#[derive(Debug, Parser)]
#[command(name = "realm-auth", version, about)]
pub struct Cli {
    /// Configuration file (defaults to config/default.toml + config/local.toml).
    #[arg(long, short, env = "REALM_AUTH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations.
    Migrate,

    /// Manage accounts.
    #[command(subcommand)]
    Account(AccountCommand),

    /// Print the realm server list.
    Servers {
        /// Include server messages.
        #[arg(long)]
        messages: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Create an account from a pre-computed SRP6 salt and verifier.
    Create {
        #[arg(long)]
        email: String,
        /// Hex-encoded SRP6 salt.
        #[arg(long)]
        salt: String,
        /// Hex-encoded SRP6 verifier.
        #[arg(long)]
        verifier: String,
    },

    /// Show an account.
    Show {
        #[arg(long)]
        email: String,
    },

    /// Delete an account and all of its unlocks.
    Delete {
        #[arg(long)]
        email: String,
    },

    /// Issue a fresh game token.
    IssueToken {
        #[arg(long)]
        email: String,
    },

    /// Replace the session key, invalidating the current session.
    RotateSession {
        #[arg(long)]
        email: String,
    },
}
