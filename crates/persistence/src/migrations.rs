//! Embedded schema migrations.
//!
//! SQL files under `src/migrations` are embedded at compile time and tracked
//! by sqlx in the `_sqlx_migrations` table.

use sqlx::migrate::{Migrate, Migration, Migrator};
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::info;

use crate::error::AuthDbError;

/// All migrations for the authentication database, in version order.
pub static MIGRATOR: Migrator = sqlx::migrate!("src/migrations");

/// Returns the migrations that have not been applied yet, in the order they will run.
pub async fn pending_migrations(pool: &PgPool) -> Result<Vec<&'static Migration>, AuthDbError> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;

    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|migration| migration.version)
        .collect();

    Ok(MIGRATOR
        .iter()
        .filter(|migration| !migration.migration_type.is_down_migration())
        .filter(|migration| !applied.contains(&migration.version))
        .collect())
}

/// Applies all pending migrations, logging each one. Returns how many were applied.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, AuthDbError> {
    let pending = pending_migrations(pool).await?;
    if pending.is_empty() {
        info!("Database schema is up to date");
        return Ok(0);
    }

    for migration in &pending {
        info!(
            version = migration.version,
            description = %migration.description,
            "Applying migration"
        );
    }

    MIGRATOR.run(pool).await?;
    info!(applied = pending.len(), "Migrations completed");
    Ok(pending.len())
}
