use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("ファイルシステムアクセスエラー: {path}\n理由: {message}")]
    FilesystemAccess { path: PathBuf, message: String },

    #[error("再帰の上限 {limit} を超えました: {path}")]
    RecursionLimitExceeded { limit: usize, path: PathBuf },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("無効なパターン '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

pub type Result<T> = std::result::Result<T, SiteError>;
