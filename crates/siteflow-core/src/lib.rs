//! siteflow Core
//!
//! 静的サイトのインフラ宣言で使う基盤機能:
//!
//! - [`path`]: パス区切りとS3プレフィックスの正規化
//! - [`files`]: ビルド成果物ディレクトリの走査とストレージキーへの対応付け
//! - [`model`] / [`parser`] / [`loader`]: site.kdl の読み込み

pub mod error;
pub mod files;
pub mod loader;
pub mod model;
pub mod parser;
pub mod path;

pub use error::{Result, SiteError};
pub use files::{
    FileEntry, FileListOptions, MAX_DEPTH, compile_pattern, folder_file_list, remap_path_to_s3,
    remap_path_to_s3_with,
};
pub use loader::{load_project, upload_options};
pub use model::*;
pub use parser::{parse_kdl_file, parse_kdl_string};
