//! provider ノードのパース

use super::{first_string, string_args};
use crate::error::{Result, SiteError};
use crate::model::ProviderSettings;
use kdl::KdlNode;
use tracing::debug;

/// provider ノードをパース
pub fn parse_provider(node: &KdlNode) -> Result<ProviderSettings> {
    let name = first_string(node)
        .ok_or_else(|| SiteError::InvalidConfig("provider requires a name".to_string()))?;

    let mut provider = ProviderSettings::with_name(name);

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "region" => {
                    if let Some(region) = first_string(child) {
                        provider.region = region;
                    }
                }
                "endpoint" => {
                    if let Some(endpoint) = first_string(child) {
                        provider.endpoint = endpoint;
                    }
                }
                "access_key" | "access-key" => {
                    if let Some(key) = first_string(child) {
                        provider.access_key = key;
                    }
                }
                "secret_key" | "secret-key" => {
                    if let Some(key) = first_string(child) {
                        provider.secret_key = key;
                    }
                }
                "services" => {
                    let services = string_args(child);
                    if services.is_empty() {
                        return Err(SiteError::InvalidConfig(
                            "provider services requires at least one service".to_string(),
                        ));
                    }
                    provider.services = services;
                }
                other => {
                    debug!(node = other, "Skipping unknown provider node");
                }
            }
        }
    }

    Ok(provider)
}
