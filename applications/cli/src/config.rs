//! CLI configuration
use crate::error::{CliError, Result};
use roster_client::{ClientConfig, Session, DEFAULT_TOKEN_HEADER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_token_header")]
    pub token_header: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Where the auth token is kept between invocations
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `roster.toml` in the working
    /// directory is used when present. `ROSTER_*` environment variables
    /// override file values, with `__` between nested keys
    /// (e.g. `ROSTER_API__BASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ROSTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "API base URL must start with http:// or https:// (got {:?}, set ROSTER_API__BASE_URL)",
                self.api.base_url
            )));
        }

        if self.api.token_header.trim().is_empty() {
            return Err(CliError::Config("Token header name cannot be empty".to_string()));
        }

        if self.api.timeout_secs == 0 {
            return Err(CliError::Config("Request timeout must be positive".to_string()));
        }

        if self.session.token_file.as_os_str().is_empty() {
            return Err(CliError::Config("Token file path cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.trim())
            .with_token_header(self.api.token_header.trim())
            .with_timeouts(
                Duration::from_secs(self.api.timeout_secs),
                Duration::from_secs(self.api.connect_timeout_secs),
            )
    }

    /// Session persisted in the configured token file.
    pub fn session(&self) -> Session {
        Session::file(&self.session.token_file)
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        token_header: default_token_header(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_token_header() -> String {
    DEFAULT_TOKEN_HEADER.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_session() -> SessionSettings {
    SessionSettings {
        token_file: default_token_file(),
    }
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".roster/token")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
        }
    }
}
