use super::{ProviderSettings, SiteSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// プロジェクト全体の設定（site.kdl 1ファイル分）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub provider: ProviderSettings,
    pub site: SiteSettings,
    /// site.kdl のあるディレクトリ（相対パス解決の基準）
    pub root: Option<PathBuf>,
}

impl Project {
    /// content_dir を解決したパス
    pub fn content_dir(&self) -> PathBuf {
        let dir = Path::new(&self.site.content_dir);
        match &self.root {
            Some(root) if dir.is_relative() => root.join(dir),
            _ => dir.to_path_buf(),
        }
    }
}
