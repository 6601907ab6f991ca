//! Provisioning engine seam

use crate::error::Result;
use crate::manifest::Manifest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// External provisioning engine abstraction
///
/// The engine owns dependency resolution, state diffing and apply. siteflow only
/// hands it the declared graph.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Returns the engine name (e.g., "manifest")
    fn name(&self) -> &str;

    /// Hand a manifest to the engine
    async fn submit(&self, manifest: &Manifest) -> Result<Receipt>;
}

/// Acknowledgement of a submitted manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Engine that accepted the manifest
    pub engine: String,

    /// Where the engine can find the manifest
    pub location: String,

    /// Number of resources handed off
    pub resources: usize,
}
