pub mod batch;
pub mod campaign;
pub mod classify;
pub mod config;
pub mod error;

pub use batch::{ClassifiedComment, InputFormat, OutputFormat};
pub use campaign::{Campaign, CampaignCatalog, CampaignMetadata, CampaignSource, CategoryIssue};
pub use classify::{
    Classification, LabelCount, LabelCounts, MatchMode, MatchReason, Rule, RuleSet,
    TopicClassifier,
};
pub use config::Config;
pub use error::{Result, TemaError};
