pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::debug;

/// プロジェクトファイルを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "SITEFLOW_CONFIG_PATH";

/// 検索するファイル名（優先順）
const CANDIDATES: [&str; 4] = ["site.local.kdl", ".site.local.kdl", "site.kdl", ".site.kdl"];

/// siteflowの設定ディレクトリを取得（なければ作成）
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("siteflow");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// カレントディレクトリを起点にプロジェクトファイルを探す
pub fn find_site_file() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    find_site_file_from(&current_dir)
}

/// 指定ディレクトリを起点にプロジェクトファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 SITEFLOW_CONFIG_PATH (直接パス指定)
/// 2. 起点ディレクトリ: site.local.kdl, .site.local.kdl, site.kdl, .site.kdl
/// 3. ./.siteflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/siteflow/site.kdl (グローバル設定)
pub fn find_site_file_from(start_dir: &Path) -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            debug!(path = %path.display(), "Using site file from environment");
            return Ok(path);
        }
    }

    // 2. 起点ディレクトリで検索
    if let Some(path) = first_existing(start_dir) {
        return Ok(path);
    }

    // 3. ./.siteflow/ ディレクトリで検索
    let site_dir = start_dir.join(".siteflow");
    if site_dir.is_dir() {
        if let Some(path) = first_existing(&site_dir) {
            return Ok(path);
        }
    }

    // 4. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("siteflow").join("site.kdl");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::SiteFileNotFound)
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|filename| dir.join(filename))
        .find(|path| path.exists())
}
