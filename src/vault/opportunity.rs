use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::vault::classify::{Checkbox, LineClassifier, MarkdownClassifier};
use crate::vault::hierarchy::HierarchyStack;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("regex"));

/// Activities per opportunity name. Every linked opportunity gets an entry,
/// even when nothing under it was completed.
pub type OpportunityActivities = BTreeMap<String, Vec<String>>;

pub fn opportunity_link(text: &str) -> Option<&str> {
    LINK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Completed descendants of `[[Name]]` top-level tasks, grouped by name.
///
/// The opportunity line itself is left out of each activity's chain. A
/// non-indented plain line ends the current opportunity. Every task line,
/// checked or not, becomes the ancestor for deeper lines; checked items seen
/// while no opportunity is current update the stack but are not recorded.
pub fn parse_activities<'a, C, I>(classifier: &C, lines: I) -> OpportunityActivities
where
    C: LineClassifier,
    I: IntoIterator<Item = &'a str>,
{
    let mut stack = HierarchyStack::new();
    let mut current: Option<String> = None;
    let mut out = OpportunityActivities::new();

    for raw in lines {
        let line = classifier.classify(raw);
        if line.is_blank() {
            continue;
        }

        if !line.checkbox.is_task() {
            if line.depth == 0 {
                current = None;
            }
            continue;
        }

        stack.enter(line.depth);

        if line.depth == 0
            && let Some(name) = opportunity_link(line.payload)
        {
            out.entry(name.to_string()).or_default();
            current = Some(name.to_string());
        }

        if line.checkbox == Checkbox::Checked
            && line.depth > 0
            && let Some(name) = &current
        {
            let activity = stack.synthesize(1, line.payload);
            out.entry(name.clone()).or_default().push(activity);
        }
        stack.open(line.depth, line.payload);
    }

    out
}

pub fn parse_opportunity_activities(content: &str) -> OpportunityActivities {
    parse_activities(&MarkdownClassifier, content.lines())
}
