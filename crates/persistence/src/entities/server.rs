//! Server list entities (database row mappings).

use domain::models::{Server, ServerMessage, ServerType};
use sqlx::FromRow;

/// Database row mapping for the servers table.
#[derive(Debug, Clone, FromRow)]
pub struct ServerEntity {
    pub id: i16,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub server_type: i16,
}

impl From<ServerEntity> for Server {
    fn from(entity: ServerEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            host: entity.host,
            // Range is enforced by a CHECK constraint on the column.
            port: u16::try_from(entity.port).unwrap_or_default(),
            server_type: ServerType::from_db(entity.server_type).unwrap_or(ServerType::Normal), // Default fallback
        }
    }
}

/// Database row mapping for the server_messages table.
#[derive(Debug, Clone, FromRow)]
pub struct ServerMessageEntity {
    pub message_index: i16,
    pub language: i16,
    pub message: String,
}

impl From<ServerMessageEntity> for ServerMessage {
    fn from(entity: ServerMessageEntity) -> Self {
        Self {
            index: entity.message_index,
            language: entity.language,
            message: entity.message,
        }
    }
}
