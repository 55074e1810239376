use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    pub path: String,
    /// Single-byte CSV delimiter, `,` when unset
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_distance_m")]
    pub default_max_distance_m: f64,
    #[serde(default = "default_max_distance_limit_m")]
    pub max_distance_limit_m: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_max_distance_m: default_max_distance_m(),
            max_distance_limit_m: default_max_distance_limit_m(),
            max_results: default_max_results(),
        }
    }
}

fn default_max_distance_m() -> f64 { 1_000.0 }
fn default_max_distance_limit_m() -> f64 { 2_000.0 }
fn default_max_results() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SANIMAP_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SANIMAP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SANIMAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SANIMAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("dataset.path", "data_toilette.csv")
    }

    /// CSV delimiter as a byte, rejecting multi-byte characters
    pub fn dataset_delimiter(&self) -> Result<u8, ConfigError> {
        match self.dataset.delimiter {
            None => Ok(b','),
            Some(c) if c.is_ascii() => Ok(c as u8),
            Some(c) => Err(ConfigError::Message(format!("dataset.delimiter must be ASCII, got {:?}", c))),
        }
    }
}

/// Apply well-known environment variables on top of the layered config
///
/// `DATASET_PATH` wins over `SANIMAP__DATASET__PATH` and the config files.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("DATASET_PATH") {
        builder = builder.set_override("dataset.path", path)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
