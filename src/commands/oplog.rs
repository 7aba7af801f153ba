use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::commands::{CommandReport, record_failure};
use crate::vault::config::load_config;
use crate::vault::daily::{DailyFile, daily_files};
use crate::vault::migrate::filter_new_activities;
use crate::vault::opportunity::{OpportunityActivities, parse_opportunity_activities};
use crate::vault::paths::{VaultPaths, resolve_paths};
use crate::vault::writer::{
    activity_section, append_activity_section, read_optional, read_to_string,
    resolve_opportunity_file,
};

const LISTED_FILES: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct OplogOptions {
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct OpportunityTally {
    added: usize,
    skipped: usize,
}

pub fn run(opts: &OplogOptions) -> Result<CommandReport> {
    let cfg = load_config()?;
    run_with(&resolve_paths(&cfg), opts)
}

/// Route completed activities under `[[Name]]` tasks of every daily file into
/// the opportunity's own file, newest daily file first.
pub fn run_with(paths: &VaultPaths, opts: &OplogOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("oplog");

    let files = match daily_files(&paths.daily_logs_dir) {
        Ok(files) => files,
        Err(err) => {
            record_failure(&mut report, err)?;
            return Ok(report);
        }
    };
    if files.is_empty() {
        report.detail("no daily files found in the daily logs directory");
        return Ok(report);
    }

    report.detail(format!("daily_files={}", files.len()));
    for file in files.iter().take(LISTED_FILES) {
        report.detail(format!("daily_file: {}", file.file_name()));
    }
    if files.len() > LISTED_FILES {
        report.detail(format!("... and {} more files", files.len() - LISTED_FILES));
    }

    // Parse everything before the first write.
    let mut parsed: Vec<(DailyFile, OpportunityActivities)> = Vec::with_capacity(files.len());
    for file in files {
        let content = match read_to_string(&file.path) {
            Ok(content) => content,
            Err(err) => {
                record_failure(&mut report, err)?;
                return Ok(report);
            }
        };
        let activities = parse_opportunity_activities(&content);
        debug!(file = %file.file_name(), opportunities = activities.len(), "parsed daily file");
        parsed.push((file, activities));
    }

    // Destination content as the duplicate check must see it, including earlier appends.
    let mut destinations: HashMap<PathBuf, String> = HashMap::new();
    let mut tallies: BTreeMap<String, OpportunityTally> = BTreeMap::new();

    for (file, opportunities) in &parsed {
        for (name, activities) in opportunities {
            if activities.is_empty() {
                continue;
            }

            let target = resolve_opportunity_file(&paths.opportunities_dir, name);
            if !destinations.contains_key(&target) {
                match read_optional(&target) {
                    Ok(existing) => {
                        destinations.insert(target.clone(), existing.unwrap_or_default());
                    }
                    Err(err) => {
                        record_failure(&mut report, err)?;
                        return Ok(report);
                    }
                }
            }
            let existing = destinations.entry(target.clone()).or_default();

            let filter = filter_new_activities(existing.as_str(), activities);
            let tally = tallies.entry(name.clone()).or_default();
            tally.skipped += filter.skipped.len();

            if filter.fresh.is_empty() {
                report.detail(format!(
                    "{}: all activities for {name} already exist",
                    file.date
                ));
                continue;
            }

            if !opts.dry_run
                && let Err(err) =
                    append_activity_section(&target, existing.as_str(), &file.date, &filter.fresh)
            {
                record_failure(&mut report, err)?;
                return Ok(report);
            }
            let section = activity_section(existing.as_str(), &file.date, &filter.fresh);
            existing.push_str(&section);
            tally.added += filter.fresh.len();

            info!(
                opportunity = %name,
                date = %file.date,
                added = filter.fresh.len(),
                "logged opportunity activities"
            );
            for activity in &filter.fresh {
                report.detail(format!("{}: {name} <- {activity}", file.date));
            }
        }
    }

    if tallies.is_empty() {
        report.detail("no completed activities found under opportunity records");
        return Ok(report);
    }

    if opts.dry_run {
        report.detail("dry-run: opportunity files not modified");
    }
    report.detail(format!("opportunities={}", tallies.len()));
    for (name, tally) in &tallies {
        report.detail(format!(
            "summary: {name} added={} skipped={}",
            tally.added, tally.skipped
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{OplogOptions, run_with};
    use crate::vault::config::VaultConfig;
    use crate::vault::paths::{VaultPaths, resolve_paths};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn vault() -> (TempDir, VaultPaths) {
        let tmp = tempdir().expect("tempdir");
        let paths = resolve_paths(&VaultConfig {
            vault_path: tmp.path().to_path_buf(),
            daily_logs_dir: "DailyLogs".to_string(),
            tracker_file: "00 Tracker.md".to_string(),
            logger_file: "01 Logger.md".to_string(),
            opportunities_dir: None,
        });
        fs::create_dir_all(&paths.daily_logs_dir).expect("mkdir");
        (tmp, paths)
    }

    #[test]
    fn activities_land_in_opportunity_file() {
        let (tmp, paths) = vault();
        fs::write(
            paths.daily_logs_dir.join("2024-01-05.md"),
            "- [ ] [[Proj X]]\n\t- [x] Did thing\n\t- [ ] Not yet\n",
        )
        .expect("seed");

        let report = run_with(&paths, &OplogOptions::default()).expect("run");
        assert!(report.ok);

        let raw = fs::read_to_string(tmp.path().join("Proj X.md")).expect("opportunity");
        assert_eq!(
            raw,
            "\n## Completed Activities - 2024-01-05\n- [ ] Did thing\n\n"
        );
    }

    #[test]
    fn second_run_appends_nothing() {
        let (tmp, paths) = vault();
        fs::write(
            paths.daily_logs_dir.join("2024-01-05.md"),
            "- [ ] [[Acme]]\n\t- [x] Sent quote\n\t- [x] Booked demo\n",
        )
        .expect("seed");
        fs::write(tmp.path().join("Acme.md"), "# Acme").expect("seed");

        run_with(&paths, &OplogOptions::default()).expect("first run");
        let after_first = fs::read_to_string(tmp.path().join("Acme.md")).expect("read");
        assert_eq!(
            after_first,
            "# Acme\n\n## Completed Activities - 2024-01-05\n- [ ] Sent quote\n- [ ] Booked demo\n\n"
        );

        let report = run_with(&paths, &OplogOptions::default()).expect("second run");
        assert!(report.ok);
        let after_second = fs::read_to_string(tmp.path().join("Acme.md")).expect("read");
        assert_eq!(after_second, after_first);
        assert!(report.details.iter().any(|d| d == "summary: Acme added=0 skipped=2"));
    }

    #[test]
    fn same_activity_on_two_days_is_logged_once() {
        let (tmp, paths) = vault();
        fs::write(
            paths.daily_logs_dir.join("2024-01-05.md"),
            "- [ ] [[Acme]]\n\t- [x] Follow up\n",
        )
        .expect("seed");
        fs::write(
            paths.daily_logs_dir.join("2024-01-06.md"),
            "- [ ] [[Acme]]\n\t- [x] Follow up\n\t- [x] Signed\n",
        )
        .expect("seed");

        run_with(&paths, &OplogOptions::default()).expect("run");
        let raw = fs::read_to_string(tmp.path().join("Acme.md")).expect("read");
        assert_eq!(
            raw,
            "\n## Completed Activities - 2024-01-06\n- [ ] Follow up\n- [ ] Signed\n\n"
        );
    }

    #[test]
    fn overlapping_activities_of_one_day_are_all_written() {
        let (tmp, paths) = vault();
        fs::write(
            paths.daily_logs_dir.join("2024-01-05.md"),
            "- [ ] [[Acme]]\n\t- [x] Call Bob\n\t- [x] Call\n",
        )
        .expect("seed");
        fs::write(tmp.path().join("Acme.md"), "").expect("seed");

        let report = run_with(&paths, &OplogOptions::default()).expect("run");
        assert!(report.ok);
        let raw = fs::read_to_string(tmp.path().join("Acme.md")).expect("read");
        assert_eq!(
            raw,
            "\n## Completed Activities - 2024-01-05\n- [ ] Call Bob\n- [ ] Call\n\n"
        );
        assert!(report.details.iter().any(|d| d == "summary: Acme added=2 skipped=0"));
    }

    #[test]
    fn existing_underscore_file_is_reused() {
        let (tmp, paths) = vault();
        fs::write(
            paths.daily_logs_dir.join("2024-01-05.md"),
            "- [ ] [[Big Deal]]\n\t- [x] Kickoff\n",
        )
        .expect("seed");
        fs::write(tmp.path().join("Big_Deal.md"), "# Big Deal\n").expect("seed");

        run_with(&paths, &OplogOptions::default()).expect("run");
        assert!(!tmp.path().join("Big Deal.md").exists());
        let raw = fs::read_to_string(tmp.path().join("Big_Deal.md")).expect("read");
        assert!(raw.contains("- [ ] Kickoff"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (tmp, paths) = vault();
        fs::write(
            paths.daily_logs_dir.join("2024-01-05.md"),
            "- [ ] [[Acme]]\n\t- [x] Sent quote\n",
        )
        .expect("seed");

        let report = run_with(&paths, &OplogOptions { dry_run: true }).expect("run");
        assert!(report.ok);
        assert!(!tmp.path().join("Acme.md").exists());
        assert!(report.details.iter().any(|d| d == "summary: Acme added=1 skipped=0"));
    }

    #[test]
    fn no_opportunities_reports_empty_result() {
        let (_tmp, paths) = vault();
        fs::write(paths.daily_logs_dir.join("2024-01-05.md"), "- [x] solo\n").expect("seed");
        let report = run_with(&paths, &OplogOptions::default()).expect("run");
        assert!(report.ok);
        assert!(
            report
                .details
                .iter()
                .any(|d| d == "no completed activities found under opportunity records")
        );
    }
}
