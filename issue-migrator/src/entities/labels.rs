//! Label aggregation across converted issues.

use super::ids::IssueNumber;
use super::requests::LabelDescriptor;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One label and the issues that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryLabel {
    /// Label definition used when the label is first created in Clubhouse.
    pub label: LabelDescriptor,

    /// Source issues carrying the label, ascending.
    pub issue_numbers: BTreeSet<IssueNumber>,
}

/// Labels keyed by name, each with the set of issues to apply it to.
///
/// Keys are kept sorted so the aggregation serializes deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelAggregation {
    labels: BTreeMap<String, StoryLabel>,
}

impl LabelAggregation {
    /// Creates an empty aggregation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `number` carries `label`.
    ///
    /// The first descriptor seen for a name wins; later ones only add members.
    pub fn add(&mut self, label: LabelDescriptor, number: IssueNumber) {
        self.labels
            .entry(label.name.clone())
            .or_insert_with(|| StoryLabel {
                label,
                issue_numbers: BTreeSet::new(),
            })
            .issue_numbers
            .insert(number);
    }

    /// Records that `number` carries the label `name`, creating a bare label
    /// (no color or description) when none exists yet.
    pub fn attach(&mut self, name: &str, number: IssueNumber) {
        self.add(LabelDescriptor::bare(name), number);
    }

    /// Looks up a label by name.
    pub fn get(&self, name: &str) -> Option<&StoryLabel> {
        self.labels.get(name)
    }

    /// Iterates labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = &StoryLabel> {
        self.labels.values()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
