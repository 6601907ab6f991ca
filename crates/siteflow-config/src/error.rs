use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "プロジェクトファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: site.local.kdl, .site.local.kdl, site.kdl, .site.kdl\n\
        - ./.siteflow/ ディレクトリ\n\
        - ~/.config/siteflow/site.kdl\n\
        または SITEFLOW_CONFIG_PATH 環境変数で直接指定できます"
    )]
    SiteFileNotFound,

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
