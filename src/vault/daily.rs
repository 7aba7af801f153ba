use chrono::Local;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{VaultError, VaultResult};

static DAILY_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}\.md$").expect("regex"));

/// A `YYYY-MM-DD.md` file; the stem doubles as the source date of its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyFile {
    pub path: PathBuf,
    pub date: String,
}

impl DailyFile {
    fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if !DAILY_FILE_RE.is_match(name) {
            return None;
        }
        let date = name.strip_suffix(".md")?.to_string();
        Some(Self { path, date })
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.date)
    }
}

/// All dated daily files in `dir`, newest first.
pub fn daily_files(dir: &Path) -> VaultResult<Vec<DailyFile>> {
    if !dir.is_dir() {
        return Err(VaultError::MissingDirectory(dir.to_path_buf()));
    }

    let read_dir = fs::read_dir(dir).map_err(|err| VaultError::read(dir, err))?;
    let mut out = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|err| VaultError::read(dir, err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(daily) = DailyFile::from_path(path) {
            out.push(daily);
        }
    }

    // Zero-padded ISO dates sort lexically.
    out.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(out)
}

pub fn latest_daily_file(dir: &Path) -> VaultResult<DailyFile> {
    daily_files(dir)?
        .into_iter()
        .next()
        .ok_or_else(|| VaultError::MissingSourceFile(dir.to_path_buf()))
}

pub fn today_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
