use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILENAME: &str = "uid2phone_api.log";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub converter: ConverterSettings,
}

impl Settings {
    /// Defaults, then the optional `{config_dir}/{RUN_MODE}.toml`, then `APP_*` env vars.
    pub fn load(config_dir: &str) -> Result<Self, SettingsError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        println!("Loading configuration for RUN_MODE: {}", &run_mode);

        let s = Config::builder()
            .set_default("server.bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.log_level", DEFAULT_LOG_LEVEL)?
            .set_default("logging.directory", DEFAULT_LOG_DIRECTORY)?
            .set_default("logging.filename", DEFAULT_LOG_FILENAME)?
            // Load environment-specific file (e.g., development.toml, production.toml)
            .add_source(
                File::with_name(&format!("{}/{}", config_dir, run_mode))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            // Add environment variables (e.g., APP_SERVER__PORT=8000)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(SettingsError::Invalid {
                message: "server.port must not be 0".to_string(),
            });
        }
        if self.server.workers == Some(0) {
            return Err(SettingsError::Invalid {
                message: "server.workers must be at least 1".to_string(),
            });
        }
        if self.logging.directory.trim().is_empty() {
            return Err(SettingsError::Invalid {
                message: "logging.directory must not be empty".to_string(),
            });
        }
        if self.logging.filename.trim().is_empty() {
            return Err(SettingsError::Invalid {
                message: "logging.filename must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                bind_address: DEFAULT_BIND_ADDRESS.to_string(),
                port: DEFAULT_PORT,
                log_level: DEFAULT_LOG_LEVEL.to_string(),
                workers: None,
                metrics_auth_token: None,
            },
            logging: LoggingSettings {
                directory: DEFAULT_LOG_DIRECTORY.to_string(),
                filename: DEFAULT_LOG_FILENAME.to_string(),
            },
            converter: ConverterSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
    /// actix worker 수. 없으면 CPU 코어 수.
    pub workers: Option<usize>,
    pub metrics_auth_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConverterSettings {
    /// Replaces the built-in special mapping table when set.
    #[serde(default)]
    pub special_mappings: Option<HashMap<String, String>>,
}
