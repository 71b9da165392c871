use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "organimo.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Store wiring. `url` is optional on purpose: when it is absent the
/// service runs in fallback mode instead of refusing to start.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<SecretString>,
    pub name: Option<String>,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Programmatic overrides, applied after file and environment values.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 8000 },
            database: DatabaseConfig { url: None, name: None, max_connections: 5, timeout_secs: 30 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path(&options)? {
            config.apply_file(&path)?;
        }
        config.apply_env_overrides()?;
        config.apply_overrides(&options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        let file: FileConfig = toml::from_str(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })?;

        if let Some(value) = file.server.bind_address {
            self.server.bind_address = value;
        }
        if let Some(value) = file.server.port {
            self.server.port = value;
        }
        if let Some(value) = file.database.url {
            self.database.url = Some(value.into());
        }
        if let Some(value) = file.database.name {
            self.database.name = Some(value);
        }
        if let Some(value) = file.database.max_connections {
            self.database.max_connections = value;
        }
        if let Some(value) = file.database.timeout_secs {
            self.database.timeout_secs = value;
        }
        if let Some(value) = file.logging.level {
            self.logging.level = value;
        }
        if let Some(value) = file.logging.format {
            self.logging.format = value;
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("DATABASE_URL") {
            self.database.url = Some(value.into());
        }
        if let Some(value) = read_env("DATABASE_NAME") {
            self.database.name = Some(value);
        }
        if let Some(value) = read_env("PORT") {
            self.server.port = parse_u16("PORT", &value)?;
        }
        if let Some(value) = read_env("ORGANIMO_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("ORGANIMO_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                parse_u32("ORGANIMO_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("ORGANIMO_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("ORGANIMO_DATABASE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("ORGANIMO_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("ORGANIMO_LOG_FORMAT") {
            self.logging.format = parse_log_format("ORGANIMO_LOG_FORMAT", &value)?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(value) = &overrides.database_url {
            self.database.url = Some(value.clone().into());
        }
        if let Some(value) = &overrides.database_name {
            self.database.name = Some(value.clone());
        }
        if let Some(value) = &overrides.bind_address {
            self.server.bind_address = value.clone();
        }
        if let Some(value) = overrides.port {
            self.server.port = value;
        }
        if let Some(value) = &overrides.log_level {
            self.logging.level = value.clone();
        }
        if let Some(value) = overrides.log_format {
            self.logging.format = value;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            return Err(ConfigError::Validation(format!(
                "logging.level `{}` is not a valid level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: FileServerConfig,
    #[serde(default)]
    database: FileDatabaseConfig,
    #[serde(default)]
    logging: FileLoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
struct FileServerConfig {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct FileDatabaseConfig {
    url: Option<String>,
    name: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLoggingConfig {
    level: Option<String>,
    format: Option<LogFormat>,
}

fn resolve_config_path(options: &LoadOptions) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = &options.config_path {
        if !path.exists() {
            if options.require_file {
                return Err(ConfigError::MissingConfigFile(path.clone()));
            }
            return Ok(None);
        }
        return Ok(Some(path.clone()));
    }

    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default.exists() {
        return Ok(Some(default));
    }
    if options.require_file {
        return Err(ConfigError::MissingConfigFile(default));
    }
    Ok(None)
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride { key: key.into(), value: value.into() })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride { key: key.into(), value: value.into() })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride { key: key.into(), value: value.into() })
}

fn parse_log_format(key: &str, value: &str) -> Result<LogFormat, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "compact" => Ok(LogFormat::Compact),
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        _ => Err(ConfigError::InvalidEnvOverride { key: key.into(), value: value.into() }),
    }
}
