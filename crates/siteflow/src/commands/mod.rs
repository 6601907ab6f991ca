pub mod files;
pub mod synth;
pub mod validate;

use anyhow::Context;
use std::path::PathBuf;

/// プロジェクトファイル（site.kdl）を検索
pub fn locate_site_file() -> anyhow::Result<PathBuf> {
    siteflow_config::find_site_file().context(
        "site.kdl が存在するディレクトリで実行するか、SITEFLOW_CONFIG_PATH を指定してください",
    )
}
