use anyhow::Result;
use tracing::info;

use crate::commands::{CommandReport, record_failure};
use crate::error::VaultError;
use crate::vault::config::load_config;
use crate::vault::migrate::split_tracker;
use crate::vault::paths::{VaultPaths, resolve_paths};
use crate::vault::writer::{append_logger_records, read_optional, write_atomic};

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub dry_run: bool,
}

pub fn run(opts: &LogOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    run_with(&resolve_paths(&cfg), opts)
}

/// Move `- [x] <text> - <date>` tracker lines into the logger as `<date> - <text>`.
///
/// The logger is appended before the tracker is rewritten, so a failure in
/// between can only duplicate a record on re-run, never lose one.
pub fn run_with(paths: &VaultPaths, opts: &LogOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("log");
    report.detail(format!("tracker={}", paths.tracker_file.display()));

    let content = match read_optional(&paths.tracker_file) {
        Ok(Some(content)) => content,
        Ok(None) => {
            record_failure(
                &mut report,
                VaultError::MissingSourceFile(paths.tracker_file.clone()),
            )?;
            return Ok(report);
        }
        Err(err) => {
            record_failure(&mut report, err)?;
            return Ok(report);
        }
    };

    let split = split_tracker(&content);
    if split.logged.is_empty() {
        report.detail("no checked items found in tracker");
        return Ok(report);
    }

    info!(count = split.logged.len(), "found checked tracker items");
    report.detail(format!("checked_items={}", split.logged.len()));
    for record in &split.logged {
        report.detail(format!("item: {record}"));
    }

    if opts.dry_run {
        report.detail("dry-run: tracker and logger not modified");
        return Ok(report);
    }

    if let Err(err) = append_logger_records(&paths.logger_file, &split.logged) {
        record_failure(&mut report, err)?;
        return Ok(report);
    }
    report.detail(format!(
        "appended {} items to {}",
        split.logged.len(),
        paths.logger_file.display()
    ));

    if let Err(err) = write_atomic(&paths.tracker_file, &split.remaining) {
        record_failure(&mut report, err)?;
        return Ok(report);
    }
    report.detail("removed checked items from tracker");

    Ok(report)
}
