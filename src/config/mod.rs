//! Configuration loading and management

use crate::core::model::{CompanyInfo, Settings};
use crate::storage::DEFAULT_DATA_DIR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the YAML config file
pub const CONFIG_ENV: &str = "INVOICER_CONFIG";

const BIND_ADDR_ENV: &str = "INVOICER_BIND_ADDR";
const DATA_DIR_ENV: &str = "INVOICER_DATA_DIR";
const STATIC_DIR_ENV: &str = "INVOICER_STATIC_DIR";

/// Process-level configuration
///
/// Everything here is fixed for the lifetime of the server. The company
/// block only seeds the settings record until the user saves their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// Directory holding invoices.json, customers.json and meta.json
    pub data_dir: String,

    /// Directory of the browser frontend
    pub static_dir: String,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Issuer shown on invoices until settings are saved
    pub company: CompanyInfo,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            static_dir: "static".to_string(),
            log_filter: "info".to_string(),
            company: CompanyInfo {
                name: "Your Company".to_string(),
                ..Default::default()
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Resolve the config for the process
    ///
    /// `path` (usually the first CLI argument) wins over `INVOICER_CONFIG`.
    /// A path that does not exist yields the defaults. Environment overrides
    /// are applied last.
    pub fn load(path: Option<String>) -> Result<Self> {
        let path = path.or_else(|| std::env::var(CONFIG_ENV).ok());

        let config = match path {
            Some(path) if Path::new(&path).exists() => Self::from_yaml_file(&path)?,
            Some(path) => {
                tracing::warn!(path = %path, "config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `INVOICER_*` overrides obtained through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(addr) = non_empty(BIND_ADDR_ENV) {
            self.bind_addr = addr;
        }
        if let Some(dir) = non_empty(DATA_DIR_ENV) {
            self.data_dir = dir;
        }
        if let Some(dir) = non_empty(STATIC_DIR_ENV) {
            self.static_dir = dir;
        }
        self
    }

    /// Settings the ledger falls back to when none are stored
    pub fn default_settings(&self) -> Settings {
        Settings {
            company: self.company.clone(),
            data_directory: self.data_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.log_filter, "info");
        assert!(!config.company.name.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
bind_addr: "127.0.0.1:3000"
company:
  name: Example Studio
  email: billing@example.com
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.company.name, "Example Studio");
        assert_eq!(config.company.email, "billing@example.com");
        assert_eq!(config.company.phone, "");
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("INVOICER_BIND_ADDR", "127.0.0.1:9000"),
            ("INVOICER_DATA_DIR", "/var/lib/invoicer"),
            ("INVOICER_STATIC_DIR", ""),
        ]);
        let config =
            AppConfig::default().with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.data_dir, "/var/lib/invoicer");
        // Empty values are ignored
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoicer.yaml");
        std::fs::write(&path, "data_dir: ./records\nlog_filter: debug\n").unwrap();

        let config = AppConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.data_dir, "./records");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(AppConfig::from_yaml_str("bind_addr: [unclosed").is_err());
    }

    #[test]
    fn test_default_settings() {
        let config = AppConfig {
            data_dir: "records".to_string(),
            ..Default::default()
        };
        let settings = config.default_settings();

        assert_eq!(settings.company, config.company);
        assert_eq!(settings.data_directory, "records");
    }
}
