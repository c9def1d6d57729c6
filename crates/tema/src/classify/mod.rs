pub mod rules;
pub mod tally;

pub use rules::{
    normalize, Classification, MatchMode, MatchReason, Rule, RuleSet, TopicClassifier,
    DEFAULT_FALLBACK_LABEL, DEFAULT_SHORT_COMMENT_THRESHOLD,
};
pub use tally::{LabelCount, LabelCounts};
