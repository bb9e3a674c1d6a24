//! Store connection configuration
//!
//! An explicit, caller-owned value passed to a client's `open`; the
//! surrounding application creates and closes handles, never implicit
//! process-global state.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "localhost".into()
}

fn default_port() -> u16 {
    5984
}

/// Connection settings for a document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Target database name
    pub database: String,
    /// Store host
    #[serde(default = "default_host")]
    pub host: String,
    /// Store port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional basic-auth username
    #[serde(default)]
    pub username: Option<String>,
    /// Optional basic-auth password
    #[serde(default)]
    pub password: Option<String>,
}

impl StoreConfig {
    /// Configuration for a database with default host and port
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            host: default_host(),
            port: default_port(),
            username: None,
            password: None,
        }
    }

    /// Base URL of the target database
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/{}", self.host, self.port, self.database)
    }
}
