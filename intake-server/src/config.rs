use clinical_nlp::NlpConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use intake_store::{BOTS_FILE, CALLS_FILE, PATIENTS_FILE};

/// Environment variable prefix; nested keys use `__`, e.g. `INTAKE__SERVER__PORT`
pub const ENV_PREFIX: &str = "INTAKE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub nlp: NlpConfig,
    pub vendor: VendorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `development` enables human-readable logs on a terminal
    pub environment: String,
    /// Allowed CORS origins; empty disables cross-origin access
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StorageConfig {
    pub fn calls_path(&self) -> PathBuf {
        self.data_dir.join(CALLS_FILE)
    }

    pub fn bots_path(&self) -> PathBuf {
        self.data_dir.join(BOTS_FILE)
    }

    pub fn patients_path(&self) -> PathBuf {
        self.data_dir.join(PATIENTS_FILE)
    }
}

/// Voice-AI vendor bot-management API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openmic.ai/v1".to_string(),
            api_key: None,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Force JSON log lines even in development
    pub json: bool,
}

impl IntakeConfig {
    /// Layer the optional config file and `INTAKE__*` environment variables
    /// over the built-in defaults, then validate.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("nlp.name_denylist")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?;

        let config: IntakeConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        if self.nlp.max_input_bytes == 0 {
            return Err(ConfigError::Invalid(
                "nlp.max_input_bytes must be greater than zero".to_string(),
            ));
        }
        if self.vendor.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "vendor.timeout_secs must be greater than zero".to_string(),
            ));
        }
        match reqwest::Url::parse(&self.vendor.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::Invalid(format!(
                "vendor.base_url is not an http(s) URL: {}",
                self.vendor.base_url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = IntakeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.calls_path(), PathBuf::from("data").join("calls.json"));
        assert!(config.vendor.api_key.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 9001

            [nlp]
            name_denylist = ["Priya"]

            [vendor]
            api_key = "test-key"
            "#,
        )
        .unwrap();

        let config = IntakeConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.nlp.name_denylist, vec!["Priya"]);
        assert_eq!(config.vendor.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = IntakeConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_vendor_url_rejected() {
        let mut config = IntakeConfig::default();
        config.vendor.base_url = "ftp://vendor".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_input_limit_rejected() {
        let mut config = IntakeConfig::default();
        config.nlp.max_input_bytes = 0;
        assert!(config.validate().is_err());
    }
}
