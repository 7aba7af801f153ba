use anyhow::Result;
use std::env;

use crate::commands::CommandReport;
use crate::vault::config::load_config;
use crate::vault::daily::daily_files;
use crate::vault::paths::{VaultPaths, resolve_paths};

include!(concat!(env!("OUT_DIR"), "/daylog_env_allowlist.rs"));

const ENV_PREFIX: &str = "DAYLOG_";

fn unknown_env_keys<I>(keys: I, allowlist: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = keys
        .into_iter()
        .filter(|key| key.starts_with(ENV_PREFIX))
        .filter(|key| !allowlist.contains(&key.as_str()))
        .collect();
    out.sort();
    out
}

pub fn run() -> Result<CommandReport> {
    let cfg = load_config()?;
    let mut report = run_with(&resolve_paths(&cfg));

    let keys = env::vars_os().filter_map(|(key, _)| key.into_string().ok());
    for key in unknown_env_keys(keys, GENERATED_DAYLOG_ENV_ALLOWLIST) {
        report.issue(format!("unknown environment variable {key} (typo?)"));
    }
    Ok(report)
}

pub fn run_with(paths: &VaultPaths) -> CommandReport {
    let mut report = CommandReport::new("status");

    report.detail(format!("vault_root={}", paths.vault_root.display()));
    report.detail(format!("daily_logs_dir={}", paths.daily_logs_dir.display()));
    report.detail(format!("tracker_file={}", paths.tracker_file.display()));
    report.detail(format!("logger_file={}", paths.logger_file.display()));
    report.detail(format!(
        "opportunities_dir={}",
        paths.opportunities_dir.display()
    ));

    if !paths.vault_root.is_dir() {
        report.issue("missing vault root (OBSIDIAN_VAULT_PATH)");
    }
    if !paths.opportunities_dir.is_dir() {
        report.issue("missing opportunities dir");
    }
    if !paths.tracker_file.exists() {
        report.detail("tracker file not created yet");
    }
    if !paths.logger_file.exists() {
        report.detail("logger file not created yet");
    }

    match daily_files(&paths.daily_logs_dir) {
        Ok(files) => {
            report.detail(format!("daily_files={}", files.len()));
            if let Some(latest) = files.first() {
                report.detail(format!("latest_daily_file={}", latest.file_name()));
            }
        }
        Err(err) => report.issue(err.to_string()),
    }

    report
}
