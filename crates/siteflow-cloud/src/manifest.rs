//! Manifest hand-off to the provisioning engine
//!
//! The declared graph is written to `.siteflow/<stack>.manifest.json`, which the
//! external provisioning engine reads. siteflow never applies the manifest itself.

use crate::engine::{Engine, Receipt};
use crate::error::{CloudError, Result};
use crate::resource::ResourceGraph;
use crate::stack::StackContext;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

const MANIFEST_VERSION: u32 = 1;
const MANIFEST_DIR: &str = ".siteflow";
const MANIFEST_SUFFIX: &str = "manifest.json";
const BACKUP_SUFFIX: &str = "manifest.json.backup";

/// Serialized resource graph for one stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,

    pub project: String,
    pub stack: String,
    pub env: String,

    pub generated_at: DateTime<Utc>,

    /// Declared resources in declaration order
    pub resources: ResourceGraph,
}

impl Manifest {
    pub fn new(context: &StackContext, resources: ResourceGraph) -> Self {
        Self {
            version: MANIFEST_VERSION,
            project: context.project.clone(),
            stack: context.stack.clone(),
            env: context.env.clone(),
            generated_at: Utc::now(),
            resources,
        }
    }
}

/// Reads and writes manifests under the project root
pub struct ManifestStore {
    /// Project root directory
    project_root: PathBuf,
}

impl ManifestStore {
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    /// Get the manifest directory path
    pub fn manifest_dir(&self) -> PathBuf {
        self.project_root.join(MANIFEST_DIR)
    }

    /// Get the manifest file path for a stack
    pub fn manifest_path(&self, stack: &str) -> PathBuf {
        self.manifest_dir()
            .join(format!("{}.{}", file_stem(stack), MANIFEST_SUFFIX))
    }

    fn backup_path(&self, stack: &str) -> PathBuf {
        self.manifest_dir()
            .join(format!("{}.{}", file_stem(stack), BACKUP_SUFFIX))
    }

    async fn ensure_manifest_dir(&self) -> Result<()> {
        let dir = self.manifest_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            tracing::debug!("Created manifest directory: {}", dir.display());
        }
        Ok(())
    }

    /// Load the manifest for a stack, if one was written
    pub async fn load(&self, stack: &str) -> Result<Option<Manifest>> {
        let path = self.manifest_path(stack);
        if !path.exists() {
            tracing::debug!("Manifest not found for stack {}", stack);
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let manifest: Manifest = serde_json::from_str(&content)?;

        if manifest.version > MANIFEST_VERSION {
            return Err(CloudError::ManifestError(format!(
                "Manifest version {} is newer than supported version {}",
                manifest.version, MANIFEST_VERSION
            )));
        }

        tracing::debug!("Loaded manifest with {} resources", manifest.resources.len());
        Ok(Some(manifest))
    }

    /// Save the manifest, keeping the previous one as a backup
    pub async fn save(&self, manifest: &Manifest) -> Result<PathBuf> {
        self.ensure_manifest_dir().await?;

        let path = self.manifest_path(&manifest.stack);
        let backup = self.backup_path(&manifest.stack);

        if path.exists() {
            if backup.exists() {
                fs::remove_file(&backup).await?;
            }
            fs::rename(&path, &backup).await?;
            tracing::debug!("Created manifest backup");
        }

        let content = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, content).await?;

        tracing::debug!("Saved manifest with {} resources", manifest.resources.len());
        Ok(path)
    }
}

#[async_trait]
impl Engine for ManifestStore {
    fn name(&self) -> &str {
        "manifest"
    }

    async fn submit(&self, manifest: &Manifest) -> Result<Receipt> {
        manifest.resources.validate()?;
        let path = self.save(manifest).await?;
        tracing::info!(
            stack = %manifest.stack,
            resources = manifest.resources.len(),
            "Manifest handed off to provisioning engine"
        );
        Ok(Receipt {
            engine: self.name().to_string(),
            location: path.display().to_string(),
            resources: manifest.resources.len(),
        })
    }
}

fn file_stem(stack: &str) -> String {
    stack
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ResourceConfig, ResourceHandle};
    use serde_json::json;
    use tempfile::tempdir;

    fn manifest(resource_ids: &[&str]) -> Manifest {
        let context = StackContext::new(
            "portal",
            "org.portal.dev",
            ResourceHandle::new("test:provider", "local"),
        );
        let mut graph = ResourceGraph::new();
        for id in resource_ids {
            graph
                .add(ResourceConfig::new("test:object", *id, None, json!({ "key": id })))
                .unwrap();
        }
        Manifest::new(&context, graph)
    }

    #[tokio::test]
    async fn test_manifest_save_load() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());

        let saved = manifest(&["index.html", "app.js"]);
        let path = store.save(&saved).await.unwrap();
        assert!(path.ends_with(".siteflow/org.portal.dev.manifest.json"));

        let loaded = store.load("org.portal.dev").await.unwrap().unwrap();
        assert_eq!(loaded.resources.len(), 2);
        assert_eq!(loaded.env, "dev");
        assert!(loaded.resources.get("test:object", "app.js").is_some());
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());

        assert!(store.load("org.portal.dev").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_save_keeps_backup() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());

        store.save(&manifest(&["a.html"])).await.unwrap();
        store.save(&manifest(&["a.html", "b.html"])).await.unwrap();

        let backup = store.backup_path("org.portal.dev");
        assert!(backup.exists());
        let content = std::fs::read_to_string(backup).unwrap();
        let previous: Manifest = serde_json::from_str(&content).unwrap();
        assert_eq!(previous.resources.len(), 1);
    }

    #[tokio::test]
    async fn test_newer_version_rejected() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());

        let mut future = manifest(&[]);
        future.version = MANIFEST_VERSION + 1;
        store.save(&future).await.unwrap();

        assert!(matches!(
            store.load("org.portal.dev").await,
            Err(CloudError::ManifestError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_duplicate_resource() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());
        store.save(&manifest(&["index.html"])).await.unwrap();

        // hand-edited manifest declaring the same key twice
        let path = store.manifest_path("org.portal.dev");
        let mut raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let duplicate = raw["resources"][0].clone();
        raw["resources"].as_array_mut().unwrap().push(duplicate);
        std::fs::write(&path, raw.to_string()).unwrap();

        assert!(matches!(
            store.load("org.portal.dev").await,
            Err(CloudError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_validates_graph() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());

        let mut dangling = manifest(&[]);
        let missing = ResourceHandle::new("test:bucket", "missing");
        dangling
            .resources
            .add(ResourceConfig::new(
                "test:object",
                "x",
                None,
                json!({ "bucket": serde_json::Value::from(missing.output("id")) }),
            ))
            .unwrap();

        assert!(matches!(
            store.submit(&dangling).await,
            Err(CloudError::DanglingReference { .. })
        ));
        assert!(!store.manifest_path("org.portal.dev").exists());
    }

    #[tokio::test]
    async fn test_submit_returns_receipt() {
        let temp_dir = tempdir().unwrap();
        let store = ManifestStore::new(temp_dir.path());

        let receipt = store.submit(&manifest(&["index.html"])).await.unwrap();
        assert_eq!(receipt.engine, "manifest");
        assert_eq!(receipt.resources, 1);
        assert!(receipt.location.ends_with("org.portal.dev.manifest.json"));
    }

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem("team/portal.dev"), "team_portal.dev");
    }
}
