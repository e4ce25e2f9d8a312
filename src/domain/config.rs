use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Runtime configuration for the recipe server.
///
/// The file format follows the extension of the file being loaded: `.toml`
/// files are read as TOML, anything else as JSON. Keys that are missing
/// fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The address to listen on.
    ///
    /// Either a full socket address (`127.0.0.1:8080`), a bare port prefixed
    /// with a colon (`:8080`) or a bare port number (`8080`). The latter two
    /// bind all interfaces.
    pub server_port: String,

    /// Directory holding the recipe JSON files.
    pub recipes_path: PathBuf,

    /// Optional directory of static files (recipe illustrations) served for
    /// any path that is not an API route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: ":8080".to_string(),
            recipes_path: PathBuf::from("data/recipes"),
            static_path: None,
        }
    }
}

/// Errors that can occur while loading a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid JSON for this configuration.
    #[error("failed to parse config file {}: {source}", path.display())]
    Json {
        /// The config file.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The file is not valid TOML for this configuration.
    #[error("failed to parse config file {}: {source}", path.display())]
    Toml {
        /// The config file.
        path: PathBuf,
        /// The underlying parse error.
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads the configuration from the file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if its content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Returns the address to bind, suitable for
    /// [`tokio::net::TcpListener::bind`].
    ///
    /// `":8080"` and `"8080"` both become `"0.0.0.0:8080"`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        let address = self.server_port.trim();
        let port = address.strip_prefix(':').unwrap_or(address);
        if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
            format!("0.0.0.0:{port}")
        } else {
            address.to_string()
        }
    }
}
