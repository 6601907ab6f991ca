//! フォルダ走査
//!
//! ローカルのビルド成果物ディレクトリを走査してファイル一覧を作り、
//! 各ファイルをストレージキーへ対応付ける。

use crate::error::{Result, SiteError};
use crate::path::normalize_path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// 再帰の上限
pub const MAX_DEPTH: usize = 50;

/// ファイル一覧の取得オプション
#[derive(Debug, Clone)]
pub struct FileListOptions {
    /// サブディレクトリを再帰的に走査する
    pub recursive: bool,
    /// 結果をソートする（トップレベルで1回だけ）
    pub sort: bool,
    /// 指定時、マッチしたパスのみ含める
    pub include: Option<Regex>,
    /// 指定時、マッチしたパスを除外する（includeより優先）
    pub exclude: Option<Regex>,
}

impl Default for FileListOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            sort: true,
            include: None,
            exclude: None,
        }
    }
}

impl FileListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn include(mut self, pattern: Regex) -> Self {
        self.include = Some(pattern);
        self
    }

    pub fn exclude(mut self, pattern: Regex) -> Self {
        self.exclude = Some(pattern);
        self
    }
}

/// ローカルパスと対応するストレージキー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub key: String,
}

/// 正規表現パターンをコンパイル
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| SiteError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// `dir` 配下のファイル一覧を返す
///
/// ディレクトリ自体は結果に含まれない（`recursive` が false の場合を除く）。
/// 深さが [`MAX_DEPTH`] を超えると `RecursionLimitExceeded` で失敗し、
/// 途中までの結果は返さない。
#[instrument(skip(options), fields(recursive = options.recursive, sort = options.sort))]
pub fn folder_file_list(dir: &str, options: &FileListOptions) -> Result<Vec<String>> {
    let mut files = collect(dir, options, 0)?;

    // ソートはトップレベルで一度だけ（UTF-16コード単位順）
    if options.sort {
        files.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    }

    debug!(files = files.len(), "Listed folder");
    Ok(files)
}

fn collect(dir: &str, options: &FileListOptions, depth: usize) -> Result<Vec<String>> {
    if depth > MAX_DEPTH {
        return Err(SiteError::RecursionLimitExceeded {
            limit: MAX_DEPTH,
            path: PathBuf::from(dir),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| SiteError::FilesystemAccess {
        path: PathBuf::from(dir),
        message: format!("ディレクトリの読み込みに失敗: {}", e),
    })?;

    let mut outputs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SiteError::FilesystemAccess {
            path: PathBuf::from(dir),
            message: format!("ディレクトリエントリの読み込みに失敗: {}", e),
        })?;

        let joined = Path::new(dir).join(entry.file_name());
        let file_path = normalize_path(&joined.to_string_lossy());

        // excludeを先に判定する
        if let Some(exclude) = &options.exclude {
            if exclude.is_match(&file_path) {
                continue;
            }
        }
        if let Some(include) = &options.include {
            if !include.is_match(&file_path) {
                continue;
            }
        }

        if options.recursive && is_dir_no_follow(&file_path)? {
            outputs.extend(collect(&file_path, options, depth + 1)?);
            continue;
        }

        outputs.push(file_path);
    }

    Ok(outputs)
}

/// シンボリックリンクを辿らずにディレクトリか判定（lstat相当）
fn is_dir_no_follow(path: &str) -> Result<bool> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| SiteError::FilesystemAccess {
        path: PathBuf::from(path),
        message: format!("メタデータの取得に失敗: {}", e),
    })?;
    Ok(metadata.is_dir())
}

/// ローカルパスをストレージキーへ対応付ける
///
/// 各ファイルパス中で最初に現れる `dir_base` を `key_base` に置き換える。
/// パスセグメント単位ではなく文字列置換である点に注意。
pub fn remap_path_to_s3(dir_base: &str, key_base: &str) -> Result<Vec<FileEntry>> {
    remap_path_to_s3_with(dir_base, key_base, &FileListOptions::default())
}

/// 走査オプションを指定してストレージキーへ対応付ける
#[instrument(skip(options))]
pub fn remap_path_to_s3_with(
    dir_base: &str,
    key_base: &str,
    options: &FileListOptions,
) -> Result<Vec<FileEntry>> {
    let dir_base = normalize_path(dir_base);
    let entries = folder_file_list(&dir_base, options)?
        .iter()
        .map(|p| normalize_path(p))
        .map(|path| {
            let key = path.replacen(&dir_base, key_base, 1);
            FileEntry { path, key }
        })
        .collect::<Vec<_>>();

    debug!(entries = entries.len(), "Remapped folder to storage keys");
    Ok(entries)
}
