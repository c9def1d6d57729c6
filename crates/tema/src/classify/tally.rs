//! Per-label counts over a batch of classified comments.

use crate::classify::rules::TopicClassifier;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
    pub share: f64,
}

/// Counts for every label a classifier can produce, in priority order.
///
/// Labels nobody hit are kept with a zero count so reports always show the
/// full closed set.
#[derive(Debug, Clone, Serialize)]
pub struct LabelCounts {
    counts: Vec<(String, usize)>,
    total: usize,
}

impl LabelCounts {
    pub fn new(classifier: &TopicClassifier) -> Self {
        Self {
            counts: classifier
                .labels()
                .into_iter()
                .map(|label| (label.to_string(), 0))
                .collect(),
            total: 0,
        }
    }

    pub fn from_comments<I, S>(classifier: &TopicClassifier, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = Self::new(classifier);
        for comment in comments {
            counts.record(classifier.classify(comment.as_ref()));
        }
        counts
    }

    pub fn record(&mut self, label: &str) {
        match self.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label.to_string(), 1)),
        }
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn entries(&self) -> Vec<LabelCount> {
        self.counts
            .iter()
            .map(|(label, count)| LabelCount {
                label: label.clone(),
                count: *count,
                share: if self.total == 0 {
                    0.0
                } else {
                    *count as f64 / self.total as f64
                },
            })
            .collect()
    }
}
