use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Directory holding per-user data (`<root>/<user>/...`).
    pub data_root: PathBuf,
    /// Base URL embedded in generated share links.
    pub public_base_url: String,
    /// Maximum accepted request body size (bounds PDF uploads).
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7007".parse().unwrap(),
            data_root: PathBuf::from("user_data"),
            public_base_url: "http://127.0.0.1:7007".to_string(),
            max_upload_size: 32 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&data).map_err(|e| ServerError::Config(e.to_string()))
    }
}
