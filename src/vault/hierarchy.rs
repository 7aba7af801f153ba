//! Flattening of completed checklist items with their open ancestors.

use std::collections::BTreeMap;

use crate::vault::classify::{Checkbox, LineClassifier, MarkdownClassifier};

pub const CHAIN_SEPARATOR: &str = " - ";

/// Open (unchecked) task text per depth for the duration of one scan.
///
/// Never holds a depth greater than the last task line seen: every task line
/// calls [`HierarchyStack::enter`] first, which drops the stale deeper entries.
#[derive(Debug, Default, Clone)]
pub struct HierarchyStack {
    open: BTreeMap<usize, String>,
}

impl HierarchyStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry at `depth` or deeper.
    pub fn enter(&mut self, depth: usize) {
        self.open.retain(|open_depth, _| *open_depth < depth);
    }

    pub fn open(&mut self, depth: usize, text: &str) {
        self.enter(depth);
        self.open.insert(depth, text.to_string());
    }

    /// Ancestors from `min_depth` upward, joined with the leaf.
    pub fn synthesize(&self, min_depth: usize, leaf: &str) -> String {
        let mut parts: Vec<&str> = self
            .open
            .range(min_depth..)
            .map(|(_, text)| text.as_str())
            .filter(|text| !text.trim().is_empty())
            .collect();
        parts.push(leaf);
        parts.join(CHAIN_SEPARATOR)
    }
}

/// Completed items of one file, in file order, each prefixed with its open ancestors.
pub fn parse_completed<'a, C, I>(classifier: &C, lines: I) -> Vec<String>
where
    C: LineClassifier,
    I: IntoIterator<Item = &'a str>,
{
    let mut stack = HierarchyStack::new();
    let mut out = Vec::new();

    for raw in lines {
        let line = classifier.classify(raw);
        if line.is_blank() || !line.checkbox.is_task() {
            continue;
        }

        stack.enter(line.depth);
        match line.checkbox {
            Checkbox::Checked => out.push(stack.synthesize(0, line.payload)),
            Checkbox::Unchecked => stack.open(line.depth, line.payload),
            Checkbox::None => {}
        }
    }

    out
}

pub fn parse_completed_items(content: &str) -> Vec<String> {
    parse_completed(&MarkdownClassifier, content.lines())
}
