use anyhow::Result;
use tracing::info;

use crate::commands::{CommandReport, record_failure};
use crate::vault::config::load_config;
use crate::vault::daily::latest_daily_file;
use crate::vault::hierarchy::parse_completed_items;
use crate::vault::migrate::tracker_record;
use crate::vault::paths::{VaultPaths, resolve_paths};
use crate::vault::writer::{append_tracker_records, read_to_string};

#[derive(Debug, Clone, Default)]
pub struct TrackOptions {
    pub dry_run: bool,
}

pub fn run(opts: &TrackOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    run_with(&resolve_paths(&cfg), opts)
}

/// Copy completed items of the newest daily file into the tracker. The daily
/// file itself is never modified.
pub fn run_with(paths: &VaultPaths, opts: &TrackOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("track");

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

    let items = parse_completed_items(&content);
    if items.is_empty() {
        report.detail("no checked items found");
        return Ok(report);
    }

    info!(source = %latest.file_name(), count = items.len(), "found checked items");
    report.detail(format!("checked_items={}", items.len()));
    let records: Vec<String> = items
        .iter()
        .map(|item| tracker_record(item, &latest.date))
        .collect();
    for record in &records {
        report.detail(format!("item: {record}"));
    }

    if opts.dry_run {
        report.detail("dry-run: tracker not modified");
        return Ok(report);
    }

    match append_tracker_records(&paths.tracker_file, &records) {
        Ok(created) => {
            if created {
                report.detail(format!("created={}", paths.tracker_file.display()));
            }
            report.detail(format!(
                "appended {} items to {}",
                records.len(),
                paths.tracker_file.display()
            ));
        }
        Err(err) => record_failure(&mut report, err)?,
    }

    Ok(report)
}
