//! Error type returned by the authentication database.

use thiserror::Error;

/// Errors surfaced by [`crate::AuthDatabase`] and its repositories.
///
/// Database and migration failures are passed through untouched.
#[derive(Debug, Error)]
pub enum AuthDbError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A lookup on a unique key matched more than one row.
    #[error("expected at most one row in {table}, found {count}")]
    MultipleRows { table: &'static str, count: usize },

    /// A single-column update targeted an account id that no longer exists.
    #[error("account {id} not found")]
    AccountNotFound { id: i64 },
}

/// Returns the only element of `rows`, `None` when empty, or
/// [`AuthDbError::MultipleRows`] when the uniqueness assumption is broken.
pub(crate) fn single_or_none<T>(
    table: &'static str,
    mut rows: Vec<T>,
) -> Result<Option<T>, AuthDbError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        count => Err(AuthDbError::MultipleRows { table, count }),
    }
}
