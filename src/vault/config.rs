use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{VaultError, VaultResult};

pub const VAULT_PATH_VAR: &str = "OBSIDIAN_VAULT_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    pub vault_path: PathBuf,
    pub daily_logs_dir: String,
    pub tracker_file: String,
    pub logger_file: String,
    /// Where opportunity files live; the vault root when unset.
    pub opportunities_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct PartialVaultConfig {
    vault_path: Option<PathBuf>,
    daily_logs_dir: Option<String>,
    tracker_file: Option<String>,
    logger_file: Option<String>,
    opportunities_dir: Option<PathBuf>,
}

fn default_daily_logs_dir() -> String {
    "DailyLogs".to_string()
}

fn default_tracker_file() -> String {
    "00 Tracker.md".to_string()
}

fn default_logger_file() -> String {
    "01 Logger.md".to_string()
}

fn env_non_empty(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Strip one layer of matching quotes, the way hand-written `.env` values often carry them.
fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Some(custom) = env_non_empty("DAYLOG_CONFIG_PATH") {
        return Some(PathBuf::from(custom));
    }

    let base = dirs::config_dir()?;
    Some(base.join("daylog").join("config.toml"))
}

fn read_file_config() -> VaultResult<PartialVaultConfig> {
    let Some(path) = resolve_config_path() else {
        return Ok(PartialVaultConfig::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(PartialVaultConfig::default());
    }

    let raw = fs::read_to_string(&path)
        .map_err(|err| VaultError::InvalidConfig(format!("{}: {err}", path.display())))?;
    toml::from_str(&raw)
        .map_err(|err| VaultError::InvalidConfig(format!("{}: {err}", path.display())))
}

fn merge_env(base: &mut PartialVaultConfig) {
    if let Some(v) = env_non_empty(VAULT_PATH_VAR) {
        base.vault_path = Some(PathBuf::from(unquote(&v)));
    }
    if let Some(v) = env_non_empty("DAYLOG_DAILY_LOGS_DIR") {
        base.daily_logs_dir = Some(unquote(&v).to_string());
    }
    if let Some(v) = env_non_empty("DAYLOG_TRACKER_FILE") {
        base.tracker_file = Some(unquote(&v).to_string());
    }
    if let Some(v) = env_non_empty("DAYLOG_LOGGER_FILE") {
        base.logger_file = Some(unquote(&v).to_string());
    }
    if let Some(v) = env_non_empty("DAYLOG_OPPORTUNITIES_DIR") {
        base.opportunities_dir = Some(PathBuf::from(unquote(&v)));
    }
}

fn finalize(partial: PartialVaultConfig) -> VaultResult<VaultConfig> {
    let vault_path = partial
        .vault_path
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| VaultError::ConfigurationMissing(VAULT_PATH_VAR.to_string()))?;

    let cfg = VaultConfig {
        vault_path,
        daily_logs_dir: partial.daily_logs_dir.unwrap_or_else(default_daily_logs_dir),
        tracker_file: partial.tracker_file.unwrap_or_else(default_tracker_file),
        logger_file: partial.logger_file.unwrap_or_else(default_logger_file),
        opportunities_dir: partial.opportunities_dir,
    };
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &VaultConfig) -> VaultResult<()> {
    for (name, value) in [
        ("daily_logs_dir", &cfg.daily_logs_dir),
        ("tracker_file", &cfg.tracker_file),
        ("logger_file", &cfg.logger_file),
    ] {
        if value.trim().is_empty() {
            return Err(VaultError::InvalidConfig(format!("{name} cannot be empty")));
        }
    }
    if cfg.tracker_file == cfg.logger_file {
        return Err(VaultError::InvalidConfig(
            "tracker_file and logger_file must differ".to_string(),
        ));
    }
    Ok(())
}

/// Resolve the vault configuration: defaults, then the TOML file, then the environment.
pub fn load_config() -> VaultResult<VaultConfig> {
    let mut partial = read_file_config()?;
    merge_env(&mut partial);
    let cfg = finalize(partial)?;

    if !cfg.vault_path.exists() {
        warn!(path = %cfg.vault_path.display(), "vault path does not exist");
    }
    Ok(cfg)
}
