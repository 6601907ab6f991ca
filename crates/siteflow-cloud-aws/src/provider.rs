//! AWS provider configuration
//!
//! The provider node points every emulated service at one endpoint, so the whole
//! stack can be applied against LocalStack.

use serde::{Deserialize, Serialize};
use siteflow_cloud::{ResourceHandle, StackContext};
use siteflow_core::{DEFAULT_ENDPOINT, DEFAULT_REGION, EMULATED_SERVICES, ProviderSettings};
use std::collections::BTreeMap;

/// Resource type token of the AWS provider node
pub const PROVIDER_TYPE: &str = "pulumi:providers:aws";

/// AWS provider arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsProvider {
    pub region: String,
    pub access_key: String,
    pub secret_key: String,

    /// Path-style bucket addressing (required by the emulator)
    pub s3_force_path_style: bool,

    pub skip_credentials_validation: bool,
    pub skip_metadata_api_check: bool,
    pub skip_requesting_account_id: bool,

    /// Service name to endpoint URL
    pub endpoints: Vec<BTreeMap<String, String>>,
}

impl AwsProvider {
    /// Emulator defaults with every known service routed to `endpoint`
    pub fn localstack(region: impl Into<String>, endpoint: &str) -> Self {
        Self::with_services(region, endpoint, EMULATED_SERVICES.iter().copied())
    }

    /// Provider arguments from the project's provider settings
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let mut provider = Self::with_services(
            settings.region.as_str(),
            &settings.endpoint,
            settings.services.iter().map(String::as_str),
        );
        provider.access_key = settings.access_key.clone();
        provider.secret_key = settings.secret_key.clone();
        provider
    }

    fn with_services<'a>(
        region: impl Into<String>,
        endpoint: &str,
        services: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let endpoints = services
            .into_iter()
            .map(|service| (service.to_string(), endpoint.to_string()))
            .collect();

        Self {
            region: region.into(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            s3_force_path_style: true,
            skip_credentials_validation: true,
            skip_metadata_api_check: true,
            skip_requesting_account_id: true,
            endpoints: vec![endpoints],
        }
    }

    /// Endpoint URL configured for a service
    pub fn endpoint(&self, service: &str) -> Option<&str> {
        self.endpoints
            .iter()
            .find_map(|map| map.get(service))
            .map(String::as_str)
    }
}

impl Default for AwsProvider {
    fn default() -> Self {
        Self::localstack(DEFAULT_REGION, DEFAULT_ENDPOINT)
    }
}

/// Stack context bound to an AWS provider named `provider_name`
pub fn aws_context(project: &str, stack: &str, provider_name: &str) -> StackContext {
    StackContext::new(
        project,
        stack,
        ResourceHandle::new(PROVIDER_TYPE, provider_name),
    )
}
