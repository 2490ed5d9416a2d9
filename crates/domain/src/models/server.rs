//! Realm server list domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ruleset a realm server runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Normal,
    Pvp,
}

impl ServerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerType::Normal => "normal",
            ServerType::Pvp => "pvp",
        }
    }

    /// Maps the stored numeric value back to a server type.
    pub fn from_db(value: i16) -> Option<Self> {
        match value {
            0 => Some(ServerType::Normal),
            1 => Some(ServerType::Pvp),
            _ => None,
        }
    }
}

impl fmt::Display for ServerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A connectable realm server advertised to clients after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: i16,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub server_type: ServerType,
}

impl Server {
    /// Address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A localised message shown alongside the server list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    pub index: i16,
    pub language: i16,
    pub message: String,
}
