use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_WEB_APP_URL: &str = "https://crypto-coffee.netlify.app";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// The only user allowed to run `/add_coins`. Unset means nobody is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    /// Link behind the "open game" button.
    pub web_app_url: String,
}

impl BotConfig {
    /// Reads a TOML config file. Missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e.message())))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid listen address: {e}")))
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("cafebot.db")
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            admin_id: None,
            web_app_url: DEFAULT_WEB_APP_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cafebot.toml");
        fs::write(&path, "port = 9000\nadmin_id = 12345\n").unwrap();

        let config = BotConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.web_app_url, DEFAULT_WEB_APP_URL);
        assert_eq!(config.admin_id, Some(12345));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cafebot.toml");
        fs::write(&path, "port = \"not a number\"").unwrap();

        assert!(matches!(BotConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_no_admin_by_default() {
        let config = BotConfig::default();
        assert!(config.admin_id.is_none());
        assert_eq!(config.db_path(), PathBuf::from("./data/cafebot.db"));
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }
}
