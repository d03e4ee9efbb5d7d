//! Configuration management.

use std::path::{Path, PathBuf};

use addrpush::DEFAULT_MAX_REQUEST_LEN;
use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "ADDRPUSH_CONFIG";

/// Keys accepted by `config set`, with a short description each.
pub const KEYS: &[(&str, &str)] = &[
    ("host", "Default device address (IP or FQDN)"),
    ("username", "Default administrator username"),
    ("verify_tls", "Verify the device certificate (true/false)"),
    ("max_request_len", "Longest request URL in characters"),
    ("auth_attempts", "Login attempts before giving up"),
    ("timeout_secs", "Per-request timeout in seconds"),
];

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device to connect to when `--host` is not given.
    pub host: Option<String>,

    /// Username offered at the login prompt.
    pub username: Option<String>,

    /// Verify the device certificate. Most devices ship self-signed ones.
    pub verify_tls: bool,

    pub max_request_len: usize,

    pub auth_attempts: u32,

    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            verify_tls: false,
            max_request_len: DEFAULT_MAX_REQUEST_LEN,
            auth_attempts: 3,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Get the config file path. `ADDRPUSH_CONFIG` overrides the default.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("net", "addrpush", "addrpush")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "host" => self.host = optional(value),
            "username" | "user" => self.username = optional(value),
            "verify_tls" => self.verify_tls = value.parse()?,
            "max_request_len" => self.max_request_len = parse_positive(value)?,
            "auth_attempts" => {
                self.auth_attempts = u32::try_from(parse_positive(value)?)
                    .context("auth_attempts is too large")?;
            }
            "timeout_secs" => self.timeout_secs = u64::try_from(parse_positive(value)?)?,
            _ => {
                let available: String = KEYS
                    .iter()
                    .map(|(k, desc)| format!("\n  {k:<16} - {desc}"))
                    .collect();
                anyhow::bail!("Unknown config key: {key}\n\nAvailable keys:{available}");
            }
        }
        Ok(())
    }
}

fn parse_positive(value: &str) -> Result<usize> {
    let n: usize = value
        .parse()
        .with_context(|| format!("'{value}' is not a number"))?;
    anyhow::ensure!(n > 0, "value must be greater than zero");
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_request_len, 5000);
        assert!(!config.verify_tls);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("host", "fw1.example.net").unwrap();
        config.set("verify_tls", "true").unwrap();
        config.set("max_request_len", "2048").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.host.as_deref(), Some("fw1.example.net"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "username = \"admin\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.auth_attempts, 3);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("max_request_len", "0").is_err());
        assert!(config.set("verify_tls", "maybe").is_err());
        let err = config.set("colour", "red").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_set_empty_clears() {
        let mut config = Config::default();
        config.set("host", "fw1").unwrap();
        config.set("host", "").unwrap();
        assert!(config.host.is_none());
    }
}
