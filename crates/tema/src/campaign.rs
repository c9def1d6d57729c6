//! Campaign definitions: metadata plus one versioned rule set.
//!
//! Each campaign is a TOML document with a `[campaign]` metadata table and a
//! `[rule_set]` table whose `[[rule_set.rules]]` entries are kept in the
//! order they are written. Built-in campaigns are compiled into the binary;
//! user campaigns are discovered from a directory and shadow built-ins that
//! share the same id.

use crate::classify::{RuleSet, TopicClassifier};
use crate::error::{Result, TemaError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUILTIN_CAMPAIGNS: &[(&str, &str)] = &[
    (
        "back-to-school-v1",
        include_str!("../campaigns/back-to-school-v1.toml"),
    ),
    (
        "back-to-school-v2",
        include_str!("../campaigns/back-to-school-v2.toml"),
    ),
];

/// Campaign used when nothing else is selected.
pub const DEFAULT_CAMPAIGN: &str = "back-to-school-v2";

/// Descriptive record consumed by reporting; it never affects matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignMetadata {
    pub id: String,
    pub campaign_name: String,
    pub product: String,
    /// Labels analysts expect to see for this campaign
    #[serde(default)]
    pub categories: Vec<String>,
    pub version: String,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CampaignSource {
    #[default]
    BuiltIn,
    File(PathBuf),
}

impl fmt::Display for CampaignSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignSource::BuiltIn => f.write_str("built-in"),
            CampaignSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(rename = "campaign")]
    pub metadata: CampaignMetadata,
    #[serde(default)]
    pub rule_set: RuleSet,
    #[serde(skip)]
    pub source: CampaignSource,
}

/// Mismatch between a campaign's declared categories and its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryIssue {
    /// A rule (or the fallback) produces a label not listed in `categories`
    UndeclaredLabel(String),
    /// A listed category that no rule can produce
    UnreachableCategory(String),
}

impl fmt::Display for CategoryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryIssue::UndeclaredLabel(label) => {
                write!(f, "label '{}' is not listed in categories", label)
            }
            CategoryIssue::UnreachableCategory(category) => {
                write!(f, "category '{}' is not produced by any rule", category)
            }
        }
    }
}

impl Campaign {
    /// Parse a campaign from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let campaign: Campaign = toml::from_str(toml_str)
            .map_err(|e| TemaError::Config(format!("Failed to parse campaign TOML: {}", e)))?;
        campaign.validate()?;
        Ok(campaign)
    }

    /// Load a campaign from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TemaError::CampaignFileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut campaign = Self::from_toml(&content)
            .map_err(|e| TemaError::Config(format!("{}: {}", path.display(), e)))?;
        campaign.source = CampaignSource::File(path.to_path_buf());
        log::info!(
            "Loaded campaign '{}' from {}",
            campaign.metadata.id,
            path.display()
        );
        Ok(campaign)
    }

    /// Look up a campaign compiled into the binary.
    pub fn builtin(id: &str) -> Result<Self> {
        let (_, content) = BUILTIN_CAMPAIGNS
            .iter()
            .find(|(builtin_id, _)| *builtin_id == id)
            .ok_or_else(|| TemaError::CampaignNotFound(id.to_string()))?;
        Self::from_toml(content)
    }

    /// All campaigns compiled into the binary.
    pub fn builtins() -> Result<Vec<Self>> {
        BUILTIN_CAMPAIGNS
            .iter()
            .map(|(_, content)| Self::from_toml(content))
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("id", &self.metadata.id),
            ("campaign_name", &self.metadata.campaign_name),
            ("product", &self.metadata.product),
            ("version", &self.metadata.version),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(TemaError::Config(format!(
                    "Campaign {} cannot be empty",
                    field
                )));
            }
        }
        self.rule_set.validate()
    }

    /// Compile this campaign's rule set.
    pub fn classifier(&self) -> Result<TopicClassifier> {
        TopicClassifier::new(self.rule_set.clone())
    }

    /// Compare rule labels against the declared categories.
    ///
    /// An empty `categories` list means nothing was declared and yields no issues.
    pub fn category_issues(&self) -> Vec<CategoryIssue> {
        let categories = &self.metadata.categories;
        if categories.is_empty() {
            return Vec::new();
        }

        let labels = self.rule_set.labels();
        let mut issues: Vec<CategoryIssue> = labels
            .iter()
            .filter(|label| !categories.iter().any(|c| c == *label))
            .map(|label| CategoryIssue::UndeclaredLabel(label.to_string()))
            .collect();
        issues.extend(
            categories
                .iter()
                .filter(|category| !labels.contains(&category.as_str()))
                .map(|category| CategoryIssue::UnreachableCategory(category.clone())),
        );
        issues
    }
}

/// Built-in campaigns plus any user campaigns discovered on disk.
#[derive(Debug, Clone)]
pub struct CampaignCatalog {
    campaigns: Vec<Campaign>,
}

impl CampaignCatalog {
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            campaigns: Campaign::builtins()?,
        })
    }

    /// Add every `*.toml` campaign found under `dir`.
    ///
    /// Files that fail to parse are skipped with a warning. A campaign with the
    /// same id as an existing one replaces it.
    pub fn with_directory<P: AsRef<Path>>(mut self, dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Ok(self);
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        for path in paths {
            match Campaign::from_file(&path) {
                Ok(campaign) => self.insert(campaign),
                Err(e) => log::warn!("Skipping campaign file {}: {}", path.display(), e),
            }
        }

        Ok(self)
    }

    pub fn insert(&mut self, campaign: Campaign) {
        match self.campaigns.iter_mut().find(|c| c.id() == campaign.id()) {
            Some(existing) => {
                log::debug!("Campaign '{}' overridden by {}", campaign.id(), campaign.source);
                *existing = campaign;
            }
            None => self.campaigns.push(campaign),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Campaign> {
        self.campaigns
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| TemaError::CampaignNotFound(id.to_string()))
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [campaign]
        id = "kefir"
        campaign_name = "Alpina - Kéfir"
        product = "Kéfir Alpina"
        categories = ["Ingredientes y Salud", "Otros"]
        version = "1.0"
        last_updated = "2025-11-20"

        [[rule_set.rules]]
        label = "Ingredientes y Salud"
        keywords = ["az[uú]car"]
    "#;

    #[test]
    fn test_parse_minimal_campaign() {
        let campaign = Campaign::from_toml(MINIMAL).unwrap();
        assert_eq!(campaign.id(), "kefir");
        assert_eq!(campaign.metadata.product, "Kéfir Alpina");
        assert_eq!(
            campaign.metadata.last_updated,
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
        );
        assert_eq!(campaign.rule_set.fallback_label, "Otros");
        assert_eq!(campaign.source, CampaignSource::BuiltIn);
        assert!(campaign.category_issues().is_empty());
    }

    #[test]
    fn test_builtins_parse_and_compile() {
        let campaigns = Campaign::builtins().unwrap();
        assert_eq!(campaigns.len(), BUILTIN_CAMPAIGNS.len());
        for campaign in &campaigns {
            campaign.classifier().unwrap();
            assert!(campaign.category_issues().is_empty(), "{}", campaign.id());
        }
    }

    #[test]
    fn test_builtin_versions_differ() {
        let v1 = Campaign::builtin("back-to-school-v1").unwrap();
        let v2 = Campaign::builtin("back-to-school-v2").unwrap();
        assert_eq!(v1.rule_set.rules.len(), 5);
        assert_eq!(v2.rule_set.rules.len(), 6);
        assert_eq!(v1.rule_set.rules[0].label, "Situación de Planta y Laboral");
        assert_eq!(v2.rule_set.rules[0].label, "Crítica Corporativa / Laboral");
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(matches!(
            Campaign::builtin("nope"),
            Err(TemaError::CampaignNotFound(_))
        ));
    }

    #[test]
    fn test_blank_metadata_rejected() {
        let toml = MINIMAL.replace("product = \"Kéfir Alpina\"", "product = \" \"");
        assert!(matches!(Campaign::from_toml(&toml), Err(TemaError::Config(_))));
    }

    #[test]
    fn test_category_issues() {
        let toml = MINIMAL.replace(
            "categories = [\"Ingredientes y Salud\", \"Otros\"]",
            "categories = [\"Preguntas\", \"Otros\"]",
        );
        let campaign = Campaign::from_toml(&toml).unwrap();
        assert_eq!(
            campaign.category_issues(),
            vec![
                CategoryIssue::UndeclaredLabel("Ingredientes y Salud".to_string()),
                CategoryIssue::UnreachableCategory("Preguntas".to_string()),
            ]
        );
    }

    #[test]
    fn test_catalog_directory_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let override_toml = MINIMAL.replace("id = \"kefir\"", "id = \"back-to-school-v1\"");
        std::fs::write(dir.path().join("override.toml"), override_toml).unwrap();
        std::fs::write(dir.path().join("kefir.toml"), MINIMAL).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = CampaignCatalog::builtin()
            .unwrap()
            .with_directory(dir.path())
            .unwrap();

        assert_eq!(catalog.campaigns().len(), BUILTIN_CAMPAIGNS.len() + 1);
        let overridden = catalog.get("back-to-school-v1").unwrap();
        assert_eq!(overridden.rule_set.rules.len(), 1);
        assert!(matches!(overridden.source, CampaignSource::File(_)));
        assert!(catalog.get("kefir").is_ok());
    }

    #[test]
    fn test_missing_directory_is_ignored() {
        let catalog = CampaignCatalog::builtin()
            .unwrap()
            .with_directory("/nonexistent/tema/campaigns")
            .unwrap();
        assert_eq!(catalog.campaigns().len(), BUILTIN_CAMPAIGNS.len());
    }
}
