//! Line-level transforms behind each migration scenario. Nothing here touches
//! the filesystem; commands read, call these, then hand the result to the writer.

use regex::Regex;
use std::sync::LazyLock;

static COMPLETED_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[x\]").expect("regex"));
static CHECKED_TRACKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- \[x\] (.+) - (\d{4}-\d{2}-\d{2})$").expect("regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carryover {
    pub content: String,
    pub total_lines: usize,
    pub removed_lines: usize,
}

impl Carryover {
    pub fn remaining_lines(&self) -> usize {
        self.total_lines - self.removed_lines
    }
}

/// Drop every line whose content starts with `- [x]`, at any indentation.
///
/// This is a literal filter: children of a dropped line are kept as-is.
pub fn carryover(content: &str) -> Carryover {
    let mut out = String::with_capacity(content.len());
    let mut total_lines = 0usize;
    let mut removed_lines = 0usize;

    for line in content.split_inclusive('\n') {
        total_lines += 1;
        if COMPLETED_PREFIX_RE.is_match(line.trim_start()) {
            removed_lines += 1;
            continue;
        }
        out.push_str(line);
    }

    Carryover {
        content: out,
        total_lines,
        removed_lines,
    }
}

pub fn tracker_record(item: &str, source_date: &str) -> String {
    format!("- [ ] {item} - {source_date}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerSplit {
    /// `<date> - <text>` lines for the logger, in tracker order.
    pub logged: Vec<String>,
    /// Tracker content with the logged lines removed, otherwise byte-for-byte.
    pub remaining: String,
}

pub fn logger_record(line: &str) -> Option<String> {
    let caps = CHECKED_TRACKER_RE.captures(line.trim_end())?;
    Some(format!("{} - {}", &caps[2], &caps[1]))
}

pub fn split_tracker(content: &str) -> TrackerSplit {
    let mut split = TrackerSplit::default();
    for line in content.split_inclusive('\n') {
        match logger_record(line) {
            Some(record) => split.logged.push(record),
            None => split.remaining.push_str(line),
        }
    }
    split
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub fresh: Vec<String>,
    pub skipped: Vec<String>,
}

/// Keep activities whose text does not already appear anywhere in `existing`,
/// compared case-insensitively as a plain substring. Activities of the same
/// batch are not checked against each other.
pub fn filter_new_activities(existing: &str, activities: &[String]) -> ActivityFilter {
    let haystack = existing.to_lowercase();
    let mut filter = ActivityFilter::default();
    for activity in activities {
        if haystack.contains(&activity.to_lowercase()) {
            filter.skipped.push(activity.clone());
        } else {
            filter.fresh.push(activity.clone());
        }
    }

    filter
}
