//! Application configuration.
//!
//! Values are layered: built-in defaults, then the TOML config file, then
//! `QUALITY_AIR_*` environment variables (`__` separates nested keys, e.g.
//! `QUALITY_AIR_SERVER__PORT=9090`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "quality-air";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "QUALITY_AIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flag is given.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file. Defaults to `<data dir>/quality-air.db`.
    pub path: Option<String>,
}

/// Startup seeding of the default admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    /// Skip the admin insert when an `admin` nickname already exists.
    /// Off by default, so every boot inserts another admin row.
    pub skip_if_present: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            skip_if_present: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Answer `GET /user/{id}` for a missing id with `200 null` instead of `404`.
    pub missing_user_as_null: bool,
}

/// Load configuration from `path` (if it exists) and the environment.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    load_config_with_env(path, ENV_PREFIX)
}

fn load_config_with_env(path: &Path, env_prefix: &str) -> Result<AppConfig> {
    load_config_from(path, env_source(env_prefix))
}

fn env_source(env_prefix: &str) -> Environment {
    Environment::with_prefix(env_prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_config_from(path: &Path, env: Environment) -> Result<AppConfig> {
    let built = Config::builder()
        .add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(env)
        .build()
        .with_context(|| format!("loading config from {}", path.display()))?;

    built
        .try_deserialize()
        .context("deserializing configuration")
}

/// Write the default configuration, with a short header, to `path`.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .context("serializing default config to TOML")?;
    let mut body = default_config_header(path);
    body.push_str(&toml);
    fs::write(path, body).with_context(|| format!("writing config file to {}", path.display()))
}

fn default_config_header(path: &Path) -> String {
    format!(
        "# Configuration for {APP_NAME}\n# File: {}\n# Environment overrides: {ENV_PREFIX}_<SECTION>__<KEY>\n\n",
        path.display()
    )
}

/// Expand `~` and environment variables in a configured path.
pub fn expand_str_path(text: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(text).context("expanding path")?;
    Ok(PathBuf::from(expanded.to_string()))
}
