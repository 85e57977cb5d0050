//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.luma/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_NUM_RESULTS};
use crate::core::reveal::DEFAULT_SPEED;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LumaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub num_results: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RevealConfig {
    /// Milliseconds per revealed character.
    pub speed_ms: Option<u64>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub num_results: Option<u32>,
    pub speed_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub num_results: u32,
    pub typing_speed: Duration,
    pub log_level: LevelFilter,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.luma/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".luma").join("config.toml"))
}

/// Load config from `~/.luma/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LumaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LumaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LumaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LumaConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LumaConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LumaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Luma Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                      # "error", "warn", "info", "debug", "trace", "off"

# [api]
# base_url = "http://localhost:8000/api"   # Or set LUMA_BASE_URL
# num_results = 5                          # Or set LUMA_NUM_RESULTS

# [reveal]
# speed_ms = 15                            # Or set LUMA_TYPING_SPEED_MS
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LumaConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment lookup injected, so tests don't have to
/// mutate process-wide env vars.
fn resolve_with_env(
    config: &LumaConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("LUMA_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let num_results = cli
        .num_results
        .or_else(|| parse_env(&env, "LUMA_NUM_RESULTS"))
        .or(config.api.num_results)
        .unwrap_or(DEFAULT_NUM_RESULTS);

    let typing_speed = cli
        .speed_ms
        .or_else(|| parse_env(&env, "LUMA_TYPING_SPEED_MS"))
        .or(config.reveal.speed_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SPEED);

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => LevelFilter::from_str(level).unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using debug", level);
            LevelFilter::Debug
        }),
        None => LevelFilter::Debug,
    };

    ResolvedConfig {
        base_url,
        num_results,
        typing_speed,
        log_level,
    }
}

fn parse_env<T: FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}
