// Configuration loading and validation (config/pickwatch.toml).

use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "pickwatch.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// pickwatch.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataPaths,
    pub feed: FeedConfig,
    pub lottery: LotteryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Standings CSV: team, record, projected_pick.
    pub standings: String,
    /// Traded pick ledger (TOML `[[picks]]` tables).
    pub picks: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LotteryConfig {
    pub runs: usize,
    /// Fixed seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: String,
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "pickwatch=info,warn".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/pickwatch.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/pickwatch.toml` from `defaults/` on first run.
///
/// Returns the path written, or `None` when a config is already in place.
/// An existing config is never replaced.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(copy_error(format!(
            "no {CONFIG_FILE} in config/ or defaults/ under {}; run from the project root",
            base_dir.display()
        )));
    }
    let text = std::fs::read(&source)
        .map_err(|e| copy_error(format!("failed to read {}: {e}", source.display())))?;

    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create {}: {e}", config_dir.display())))?;

    // create_new: a config written since the check above wins.
    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(copy_error(format!(
                "failed to create {}: {e}",
                target.display()
            )))
        }
    };
    file.write_all(&text)
        .map_err(|e| copy_error(format!("failed to write {}: {e}", target.display())))?;

    Ok(Some(target))
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.feed.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "feed.cache_ttl_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.lottery.runs == 0 {
        return Err(ConfigError::ValidationError {
            field: "lottery.runs".into(),
            message: "must be greater than 0".into(),
        });
    }

    let paths: &[(&str, &str)] = &[
        ("data.standings", config.data.standings.as_str()),
        ("data.picks", config.data.picks.as_str()),
        ("logging.dir", config.logging.dir.as_str()),
    ];
    for (name, val) in paths {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
