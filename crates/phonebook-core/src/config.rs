//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/phonebook/config.toml)
//! 3. Environment variables (PHONEBOOK_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "PHONEBOOK";

/// Default server listening port
const DEFAULT_PORT: u16 = 3001;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (SQLite database)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Port the REST API server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL the client talks to
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Optional log file for TUI mode (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            port: DEFAULT_PORT,
            server_url: default_server_url(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (PHONEBOOK_DATA_DIR, PHONEBOOK_PORT, PHONEBOOK_SERVER_URL)
    /// 2. Config file (~/.config/phonebook/config.toml or PHONEBOOK_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // PHONEBOOK_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // PHONEBOOK_PORT
        if let Ok(val) = std::env::var(format!("{}_PORT", ENV_PREFIX)) {
            if let Ok(port) = val.parse() {
                self.port = port;
            }
        }

        // PHONEBOOK_SERVER_URL
        if let Ok(val) = std::env::var(format!("{}_SERVER_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.server_url = val;
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with PHONEBOOK_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("phonebook")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("phonebook.db")
    }

    /// Get the socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("phonebook")
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_server_url() -> String {
    format!("http://127.0.0.1:{}", DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "PHONEBOOK_DATA_DIR",
        "PHONEBOOK_PORT",
        "PHONEBOOK_SERVER_URL",
    ];

    #[test]
    fn test_default_config() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.server_url, "http://127.0.0.1:3001");
        assert!(config.data_dir.ends_with("phonebook"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config::default();

        let db_path = config.sqlite_path();
        assert!(db_path.ends_with("phonebook.db"));
    }

    #[test]
    fn test_bind_addr() {
        let mut config = Config::default();
        config.port = 8080;
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("PHONEBOOK_DATA_DIR", "/tmp/phonebook-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/phonebook-test"));
    }

    #[test]
    fn test_env_override_port() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert_eq!(config.port, 3001);

        env::set_var("PHONEBOOK_PORT", "4000");
        config.apply_env_overrides();
        assert_eq!(config.port, 4000);

        // Unparseable values leave the port untouched
        env::set_var("PHONEBOOK_PORT", "not-a-port");
        config.apply_env_overrides();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_env_override_server_url() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("PHONEBOOK_SERVER_URL", "http://example.com:9000");
        config.apply_env_overrides();
        assert_eq!(config.server_url, "http://example.com:9000");

        // Empty string keeps the previous value
        env::set_var("PHONEBOOK_SERVER_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.server_url, "http://example.com:9000");
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/phonebook"),
            port: 3005,
            server_url: "http://phonebook.example.com".to_string(),
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("port"));
        assert!(toml_str.contains("server_url"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.server_url, config.server_url);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            port = 4040
            server_url = "http://localhost:4040"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.port, 4040);
        assert_eq!(config.server_url, "http://localhost:4040");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::TempDir::new().unwrap();
        env::set_var("PHONEBOOK_DATA_DIR", dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert_eq!(config.port, 3001);
    }
}
