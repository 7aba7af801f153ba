//! Checklist line classification shared by every parser variant.
//!
//! A line is classified on three independent facts: its indentation depth,
//! its checkbox state and its payload text. Blank lines classify as
//! [`Checkbox::None`] with an empty payload; callers decide whether to skip them.

use regex::Regex;
use std::sync::LazyLock;

static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[([ x])\] (.+)$").expect("regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
    Unchecked,
    Checked,
    None,
}

impl Checkbox {
    pub fn is_task(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub raw: &'a str,
    pub depth: usize,
    pub checkbox: Checkbox,
    pub payload: &'a str,
}

impl LogLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

pub trait LineClassifier {
    fn depth(&self, line: &str) -> usize;
    fn checkbox(&self, line: &str) -> Checkbox;
    fn payload<'a>(&self, line: &'a str) -> &'a str;

    fn classify<'a>(&self, line: &'a str) -> LogLine<'a> {
        LogLine {
            raw: line,
            depth: self.depth(line),
            checkbox: self.checkbox(line),
            payload: self.payload(line),
        }
    }
}

/// The `- [ ]` / `- [x]` grammar with mixed tab/space indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownClassifier;

impl MarkdownClassifier {
    fn content(line: &str) -> &str {
        line.trim()
    }

    fn captures(line: &str) -> Option<regex::Captures<'_>> {
        CHECKBOX_RE.captures(Self::content(line))
    }
}

impl LineClassifier for MarkdownClassifier {
    fn depth(&self, line: &str) -> usize {
        let tabs = line.chars().take_while(|c| *c == '\t').count();
        if tabs > 0 {
            return tabs;
        }

        // Single spaces count one level each; this is inconsistent with the
        // 2- and 4-space rules and is kept that way for existing vault files.
        let spaces = line.chars().take_while(|c| *c == ' ').count();
        if spaces >= 4 {
            spaces / 4
        } else if spaces >= 2 {
            spaces / 2
        } else {
            spaces
        }
    }

    fn checkbox(&self, line: &str) -> Checkbox {
        match Self::captures(line) {
            Some(caps) if &caps[1] == "x" => Checkbox::Checked,
            Some(_) => Checkbox::Unchecked,
            None => Checkbox::None,
        }
    }

    fn payload<'a>(&self, line: &'a str) -> &'a str {
        match Self::captures(line).and_then(|caps| caps.get(2)) {
            Some(m) => m.as_str().trim(),
            None => Self::content(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Checkbox, LineClassifier, MarkdownClassifier};

    #[test]
    fn tab_depth_counts_leading_tabs() {
        let c = MarkdownClassifier;
        assert_eq!(c.depth("- [ ] a"), 0);
        assert_eq!(c.depth("\t- [ ] a"), 1);
        assert_eq!(c.depth("\t\t\t- [x] a"), 3);
    }

    #[test]
    fn space_depth_follows_four_two_one_rule() {
        let c = MarkdownClassifier;
        assert_eq!(c.depth(" - [ ] a"), 1);
        assert_eq!(c.depth("  - [ ] a"), 1);
        assert_eq!(c.depth("   - [ ] a"), 1);
        assert_eq!(c.depth("    - [ ] a"), 1);
        assert_eq!(c.depth("        - [ ] a"), 2);
        assert_eq!(c.depth("            - [ ] a"), 3);
    }

    #[test]
    fn checkbox_requires_space_after_marker() {
        let c = MarkdownClassifier;
        assert_eq!(c.checkbox("- [x] done"), Checkbox::Checked);
        assert_eq!(c.checkbox("\t- [ ] open"), Checkbox::Unchecked);
        assert_eq!(c.checkbox("- [x]done"), Checkbox::None);
        assert_eq!(c.checkbox("- [X] upper"), Checkbox::None);
        assert_eq!(c.checkbox("* [x] star"), Checkbox::None);
        assert_eq!(c.checkbox("plain text"), Checkbox::None);
        assert_eq!(c.checkbox("- [x] "), Checkbox::None);
    }

    #[test]
    fn payload_is_text_after_marker() {
        let c = MarkdownClassifier;
        assert_eq!(c.payload("    - [x] Call Bob  \r"), "Call Bob");
        assert_eq!(c.payload("## Heading"), "## Heading");
    }

    #[test]
    fn classify_combines_facts() {
        let line = MarkdownClassifier.classify("\t- [ ] [[Proj X]] kickoff");
        assert_eq!(line.depth, 1);
        assert_eq!(line.checkbox, Checkbox::Unchecked);
        assert!(line.checkbox.is_task());
        assert_eq!(line.payload, "[[Proj X]] kickoff");
        assert!(!line.is_blank());
        assert!(MarkdownClassifier.classify("   \t").is_blank());
    }
}
