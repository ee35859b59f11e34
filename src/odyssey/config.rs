use crate::error::{OdysseyError, Result};
use crate::store::CorruptStorePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "odyssey.json";
const DEFAULT_DATA_FILE: &str = "data/cards.json";
const DEFAULT_BIND: &str = "127.0.0.1:3001";
const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// Keys accepted by `get` / `set`, in display order.
pub const CONFIG_KEYS: [&str; 4] = ["data-file", "bind", "server-url", "corrupt-store"];

/// Configuration for odyssey, stored in odyssey.json at the working root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OdysseyConfig {
    /// Card store document, relative to the working root unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Address the persistence service listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Base URL the submission form posts to
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default)]
    pub corrupt_store: CorruptStorePolicy,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for OdysseyConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            bind: default_bind(),
            server_url: default_server_url(),
            corrupt_store: CorruptStorePolicy::default(),
        }
    }
}

impl OdysseyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(OdysseyError::Io)?;
        let config: OdysseyConfig =
            serde_json::from_str(&content).map_err(OdysseyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(OdysseyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(OdysseyError::Serialization)?;
        fs::write(config_path, content).map_err(OdysseyError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.display().to_string()),
            "bind" => Some(self.bind.clone()),
            "server-url" => Some(self.server_url.clone()),
            "corrupt-store" => Some(self.corrupt_store.as_str().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "data-file" => {
                if value.trim().is_empty() {
                    return Err("data-file cannot be empty".to_string());
                }
                self.data_file = PathBuf::from(value);
            }
            "bind" => {
                value
                    .parse::<std::net::SocketAddr>()
                    .map_err(|_| format!("Invalid bind address: {}", value))?;
                self.bind = value.to_string();
            }
            "server-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!("Invalid server url: {}", value));
                }
                self.server_url = value.trim_end_matches('/').to_string();
            }
            "corrupt-store" => {
                self.corrupt_store = CorruptStorePolicy::parse(value).ok_or_else(|| {
                    format!(
                        "Invalid corrupt-store policy: {} (expected reject or treat-as-empty)",
                        value
                    )
                })?;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Every key with its current value, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}
