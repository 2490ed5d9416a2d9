//! Server list repository for database operations.

use sqlx::PgPool;

use crate::entities::{ServerEntity, ServerMessageEntity};
use crate::error::AuthDbError;
use crate::metrics::QueryTimer;

/// Repository for the realm server list and its messages.
#[derive(Debug, Clone)]
pub struct ServerRepository {
    pool: PgPool,
}

impl ServerRepository {
    /// Creates a new ServerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all servers ordered by id.
    pub async fn list_servers(&self) -> Result<Vec<ServerEntity>, AuthDbError> {
        let timer = QueryTimer::new("list_servers");
        let result = sqlx::query_as::<_, ServerEntity>(
            r#"
            SELECT id, name, host, port, server_type
            FROM servers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// List all server messages ordered by index and language.
    pub async fn list_server_messages(&self) -> Result<Vec<ServerMessageEntity>, AuthDbError> {
        let timer = QueryTimer::new("list_server_messages");
        let result = sqlx::query_as::<_, ServerMessageEntity>(
            r#"
            SELECT message_index, language, message
            FROM server_messages
            ORDER BY message_index, language
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }
}
