use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};

pub const TRACKER_HEADER: &str = "# Task Tracker";

fn append_text(path: &Path, text: &str) -> VaultResult<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| VaultError::write(path, err))?;
    file.write_all(text.as_bytes())
        .map_err(|err| VaultError::write(path, err))
}

pub fn read_to_string(path: &Path) -> VaultResult<String> {
    fs::read_to_string(path).map_err(|err| VaultError::read(path, err))
}

/// Contents of `path`, or `None` when it does not exist yet.
pub fn read_optional(path: &Path) -> VaultResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(VaultError::read(path, err)),
    }
}

/// Replace `path` through a sibling temp file so readers never see a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> VaultResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|err| VaultError::write(path, err))?;
    tmp.write_all(content.as_bytes())
        .map_err(|err| VaultError::write(path, err))?;
    tmp.persist(path)
        .map_err(|err| VaultError::write(path, err.error))?;
    Ok(())
}

/// Append a batch of tracker records, creating the tracker with its header first.
pub fn append_tracker_records(path: &Path, records: &[String]) -> VaultResult<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let created = !path.exists();
    let mut text = String::new();
    if created {
        text.push_str(TRACKER_HEADER);
        text.push_str("\n\n");
    }
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    text.push('\n');

    append_text(path, &text)?;
    Ok(created)
}

pub fn append_logger_records(path: &Path, records: &[String]) -> VaultResult<()> {
    let mut text = String::new();
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    // Touch the logger even with nothing to add so it exists after the first run.
    append_text(path, &text)
}

/// Candidate file names for an opportunity: as written, then `_` and `-` for spaces.
pub fn opportunity_file_candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(3);
    for variant in [
        name.to_string(),
        name.replace(' ', "_"),
        name.replace(' ', "-"),
    ] {
        let path = dir.join(format!("{variant}.md"));
        if !out.contains(&path) {
            out.push(path);
        }
    }
    out
}

/// The first existing candidate, else the space-named file to be created.
pub fn resolve_opportunity_file(dir: &Path, name: &str) -> PathBuf {
    let candidates = opportunity_file_candidates(dir, name);
    candidates
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .unwrap_or_else(|| dir.join(format!("{name}.md")))
}

pub fn activity_section(existing: &str, date: &str, activities: &[String]) -> String {
    let mut text = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&format!("\n## Completed Activities - {date}\n"));
    for activity in activities {
        text.push_str(&format!("- [ ] {activity}\n"));
    }
    text.push('\n');
    text
}

pub fn append_activity_section(
    path: &Path,
    existing: &str,
    date: &str,
    activities: &[String],
) -> VaultResult<()> {
    if activities.is_empty() {
        return Ok(());
    }
    append_text(path, &activity_section(existing, date, activities))
}
