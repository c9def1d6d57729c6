//! Ordered keyword rules engine for comment topic classification.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s plus a fallback label. Each
//! rule holds a list of keyword alternatives; a rule fires when any of them
//! is found anywhere in the normalized comment. Rules are tried strictly in
//! declaration order and the first one that fires decides the label, so two
//! rules sharing a keyword resolve to whichever was declared first.
//!
//! A rule may also be flagged with `short_comments`, which makes it fire for
//! comments with fewer than `short_comment_threshold` words. This is how the
//! off-topic bucket absorbs empty and one-word comments without the fallback
//! label ever seeing them.

use crate::error::{Result, TemaError};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label returned when no rule matches.
pub const DEFAULT_FALLBACK_LABEL: &str = "Otros";

/// Comments with fewer words than this are considered too short to be meaningful.
pub const DEFAULT_SHORT_COMMENT_THRESHOLD: usize = 2;

/// A labelled set of keyword alternatives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    /// Label assigned when this rule fires
    pub label: String,
    /// Alternatives; any one found in the comment fires the rule
    #[serde(default)]
    pub keywords: Vec<String>,
    /// How keywords are interpreted
    #[serde(default)]
    pub mode: MatchMode,
    /// Also fire for comments shorter than the rule set's threshold
    #[serde(default)]
    pub short_comments: bool,
}

/// Interpretation of a rule's keywords.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Keywords are regular expressions (`az[uú]car`)
    #[default]
    Regex,
    /// Keywords are plain text and matched verbatim
    Literal,
}

impl Rule {
    pub fn new<L, I, K>(label: L, keywords: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            mode: MatchMode::Regex,
            short_comments: false,
        }
    }

    pub fn literal(mut self) -> Self {
        self.mode = MatchMode::Literal;
        self
    }

    pub fn with_short_comments(mut self) -> Self {
        self.short_comments = true;
        self
    }

    /// Compile the keyword alternatives into a single case-insensitive matcher.
    ///
    /// Returns `None` for a rule without keywords.
    fn compile(&self) -> Result<Option<Regex>> {
        if self.keywords.is_empty() {
            return Ok(None);
        }

        let mut alternatives = Vec::with_capacity(self.keywords.len());
        for keyword in &self.keywords {
            if keyword.is_empty() {
                return Err(TemaError::Config(format!(
                    "Rule '{}' has an empty keyword",
                    self.label
                )));
            }
            let pattern = match self.mode {
                MatchMode::Regex => keyword.clone(),
                MatchMode::Literal => regex::escape(keyword),
            };
            // Checked on its own so a stray ')' cannot leak into its neighbours.
            Regex::new(&pattern).map_err(|e| {
                TemaError::Config(format!(
                    "Invalid pattern '{}' in rule '{}': {}",
                    keyword, self.label, e
                ))
            })?;
            alternatives.push(format!("(?:{})", pattern));
        }

        let regex = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                TemaError::Config(format!("Failed to build matcher for rule '{}': {}", self.label, e))
            })?;
        Ok(Some(regex))
    }
}

fn default_fallback_label() -> String {
    DEFAULT_FALLBACK_LABEL.to_string()
}

fn default_short_comment_threshold() -> usize {
    DEFAULT_SHORT_COMMENT_THRESHOLD
}

/// Ordered rules plus fallback behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    /// Rules in priority order (first match wins)
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
    #[serde(default = "default_short_comment_threshold")]
    pub short_comment_threshold: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            fallback_label: default_fallback_label(),
            short_comment_threshold: default_short_comment_threshold(),
        }
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }

    pub fn with_short_comment_threshold(mut self, threshold: usize) -> Self {
        self.short_comment_threshold = threshold;
        self
    }

    /// Parse a bare rule set from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| TemaError::Config(format!("Failed to parse rule set TOML: {}", e)))
    }

    /// Check labels without compiling patterns.
    pub fn validate(&self) -> Result<()> {
        if self.fallback_label.trim().is_empty() {
            return Err(TemaError::Config("Fallback label cannot be empty".to_string()));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.label.trim().is_empty() {
                return Err(TemaError::Config(format!(
                    "Rule #{} has an empty label",
                    index + 1
                )));
            }
        }
        Ok(())
    }

    /// Every label this rule set can produce, in priority order, fallback last.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::with_capacity(self.rules.len() + 1);
        for label in self
            .rules
            .iter()
            .map(|r| r.label.as_str())
            .chain(std::iter::once(self.fallback_label.as_str()))
        {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

/// Why a comment received its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Keyword,
    ShortComment,
    Fallback,
}

impl MatchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::Keyword => "keyword",
            MatchReason::ShortComment => "short-comment",
            MatchReason::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub label: &'a str,
    /// Zero-based index of the rule that fired
    pub rule_index: Option<usize>,
    pub reason: MatchReason,
    /// Text matched by the keyword, as found in the normalized comment
    pub matched: Option<String>,
}

/// Lowercase and trim a comment the way every rule sees it.
pub fn normalize(comment: &str) -> String {
    comment.trim().to_lowercase()
}

fn is_short(normalized: &str, threshold: usize) -> bool {
    normalized.split_whitespace().take(threshold).count() < threshold
}

/// Compiled, immutable classifier for one rule set.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    rule_set: RuleSet,
    matchers: Vec<Option<Regex>>,
}

impl TopicClassifier {
    /// Validate and compile a rule set.
    pub fn new(rule_set: RuleSet) -> Result<Self> {
        rule_set.validate()?;

        let mut matchers = Vec::with_capacity(rule_set.rules.len());
        for rule in &rule_set.rules {
            let matcher = rule.compile()?;
            if matcher.is_none() && !rule.short_comments {
                log::warn!("Rule '{}' has no keywords and will never match", rule.label);
            }
            log::debug!(
                "Compiled rule '{}' ({} keywords, short_comments={})",
                rule.label,
                rule.keywords.len(),
                rule.short_comments
            );
            matchers.push(matcher);
        }

        Ok(Self { rule_set, matchers })
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn fallback_label(&self) -> &str {
        &self.rule_set.fallback_label
    }

    /// The closed set of labels `classify` can return.
    pub fn labels(&self) -> Vec<&str> {
        self.rule_set.labels()
    }

    /// Assign exactly one label to a comment.
    pub fn classify(&self, comment: &str) -> &str {
        self.classify_detailed(comment).label
    }

    /// Classify a possibly missing comment; `None` is treated as empty.
    pub fn classify_optional(&self, comment: Option<&str>) -> &str {
        self.classify(comment.unwrap_or(""))
    }

    /// Classify any displayable value through its string form.
    pub fn classify_value<T: fmt::Display + ?Sized>(&self, value: &T) -> &str {
        self.classify(&value.to_string())
    }

    /// Classify raw bytes, replacing invalid UTF-8 sequences.
    pub fn classify_bytes(&self, bytes: &[u8]) -> &str {
        self.classify(&String::from_utf8_lossy(bytes))
    }

    /// Classify many comments, preserving input order.
    pub fn classify_batch<I, S>(&self, comments: I) -> Vec<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        comments
            .into_iter()
            .map(|comment| self.classify(comment.as_ref()))
            .collect()
    }

    /// Classify and report which rule fired and why.
    pub fn classify_detailed(&self, comment: &str) -> Classification<'_> {
        let normalized = normalize(comment);
        let short = is_short(&normalized, self.rule_set.short_comment_threshold);

        for (index, (rule, matcher)) in self.rule_set.rules.iter().zip(&self.matchers).enumerate() {
            if let Some(found) = matcher.as_ref().and_then(|m| m.find(&normalized)) {
                return Classification {
                    label: &rule.label,
                    rule_index: Some(index),
                    reason: MatchReason::Keyword,
                    matched: Some(found.as_str().to_string()),
                };
            }
            if rule.short_comments && short {
                return Classification {
                    label: &rule.label,
                    rule_index: Some(index),
                    reason: MatchReason::ShortComment,
                    matched: None,
                };
            }
        }

        Classification {
            label: &self.rule_set.fallback_label,
            rule_index: None,
            reason: MatchReason::Fallback,
            matched: None,
        }
    }
}
