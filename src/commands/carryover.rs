use anyhow::Result;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::commands::{CommandReport, record_failure};
use crate::error::VaultError;
use crate::vault::config::load_config;
use crate::vault::daily::{latest_daily_file, today_date};
use crate::vault::migrate::carryover;
use crate::vault::paths::{VaultPaths, resolve_paths};
use crate::vault::writer::read_to_string;

#[derive(Debug, Clone, Default)]
pub struct CarryoverOptions {
    pub assume_yes: bool,
}

pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

/// Asks on stdout and reads one answer line from stdin; only `y` confirms.
pub struct StdinPrompt;

impl OverwritePrompt for StdinPrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        print!("Today's file ({name}) already exists. Overwrite? (y/n): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }
}

pub fn run(opts: &CarryoverOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    let paths = resolve_paths(&cfg);
    run_with(&paths, opts, &today_date(), &mut StdinPrompt)
}

pub fn run_with(
    paths: &VaultPaths,
    opts: &CarryoverOptions,
    today: &str,
    prompt: &mut dyn OverwritePrompt,
) -> Result<CommandReport> {
    let mut report = CommandReport::new("carryover");
    report.detail(format!("daily_logs_dir={}", paths.daily_logs_dir.display()));

    let latest = match latest_daily_file(&paths.daily_logs_dir) {
        Ok(latest) => latest,
        Err(err) => {
            record_failure(&mut report, err)?;
            return Ok(report);
        }
    };
    report.detail(format!("source={}", latest.file_name()));

    let content = match read_to_string(&latest.path) {
        Ok(content) => content,
        Err(err) => {
            record_failure(&mut report, err)?;
            return Ok(report);
        }
    };

    let plan = carryover(&content);
    info!(
        source = %latest.file_name(),
        total = plan.total_lines,
        removed = plan.removed_lines,
        "filtered completed tasks"
    );
    report.detail(format!("original_lines={}", plan.total_lines));
    report.detail(format!("removed_completed_lines={}", plan.removed_lines));
    report.detail(format!("remaining_lines={}", plan.remaining_lines()));

    if plan.remaining_lines() == 0 {
        report.detail("no tasks remaining after filtering completed tasks; nothing written");
        return Ok(report);
    }

    let target = paths.daily_logs_dir.join(format!("{today}.md"));
    if target.exists() && !opts.assume_yes && !prompt.confirm_overwrite(&target)? {
        report.detail(format!(
            "aborted: {today}.md already exists and was not overwritten"
        ));
        return Ok(report);
    }

    if let Err(err) = fs::write(&target, &plan.content) {
        record_failure(&mut report, VaultError::write(&target, err))?;
        return Ok(report);
    }
    report.detail(format!("created={}", target.display()));
    Ok(report)
}
