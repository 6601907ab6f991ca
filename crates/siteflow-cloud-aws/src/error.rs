//! AWS declaration error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Site error: {0}")]
    SiteError(#[from] siteflow_core::SiteError),

    #[error("Cloud error: {0}")]
    CloudError(#[from] siteflow_cloud::CloudError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AwsError>;
