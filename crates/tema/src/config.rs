use crate::campaign::{Campaign, CampaignCatalog, DEFAULT_CAMPAIGN};
use crate::error::{Result, TemaError};
use std::path::PathBuf;
use xdg::BaseDirectories;

pub const CAMPAIGN_ENV_VAR: &str = "TEMA_CAMPAIGN";

pub struct Config {
    pub campaign_id: String,
    pub campaign_file: Option<PathBuf>,
    pub campaigns_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(campaign_override: Option<String>, file_override: Option<PathBuf>) -> Result<Self> {
        let campaign_id = if let Some(id) = campaign_override {
            id
        } else if let Ok(env_id) = std::env::var(CAMPAIGN_ENV_VAR) {
            env_id
        } else {
            DEFAULT_CAMPAIGN.to_string()
        };

        let campaigns_dir = BaseDirectories::with_prefix("tema")
            .ok()
            .map(|xdg| xdg.get_config_file("campaigns"))
            .filter(|dir| dir.is_dir());

        Ok(Self {
            campaign_id,
            campaign_file: file_override,
            campaigns_dir,
        })
    }

    /// Built-in campaigns merged with the user's campaign directory.
    pub fn catalog(&self) -> Result<CampaignCatalog> {
        let catalog = CampaignCatalog::builtin()?;
        match &self.campaigns_dir {
            Some(dir) => catalog.with_directory(dir),
            None => Ok(catalog),
        }
    }

    /// The campaign selected by `--config`, or by id from the catalog.
    pub fn load_campaign(&self) -> Result<Campaign> {
        if let Some(path) = &self.campaign_file {
            return Campaign::from_file(path);
        }

        let catalog = self.catalog()?;
        let campaign = catalog.get(&self.campaign_id).map_err(|e| match e {
            TemaError::CampaignNotFound(id) => TemaError::CampaignNotFound(format!(
                "{} (available: {})",
                id,
                catalog
                    .campaigns()
                    .iter()
                    .map(|c| c.id())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            other => other,
        })?;
        log::info!("Using campaign '{}' ({})", campaign.id(), campaign.source);
        Ok(campaign.clone())
    }
}
