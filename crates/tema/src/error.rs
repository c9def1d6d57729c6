use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    #[error("Campaign file not found: {0}")]
    CampaignFileNotFound(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TemaError>;
