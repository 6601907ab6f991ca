//! KDLパーサー
//!
//! siteflow のプロジェクトファイル（site.kdl）をパースします。

mod provider;
mod site;

pub use provider::parse_provider;
pub use site::parse_site;

use crate::error::{Result, SiteError};
use crate::model::Project;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;

/// KDLファイルをパースしてProjectを生成
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<Project> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let root = path.parent().map(|p| p.to_path_buf());
    let name = root
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();

    let mut project = parse_kdl_string(&content, name)?;
    project.root = root;
    Ok(project)
}

/// KDL文字列をパース
pub fn parse_kdl_string(content: &str, default_name: String) -> Result<Project> {
    let doc: KdlDocument = content.parse()?;

    let mut project = Project {
        name: default_name,
        ..Default::default()
    };
    let mut provider_seen = false;
    let mut site_seen = false;

    for node in doc.nodes() {
        match node.name().value() {
            "project" => {
                if let Some(name) = first_string(node) {
                    project.name = name;
                }
            }
            "provider" => {
                if provider_seen {
                    return Err(SiteError::InvalidConfig(
                        "provider can only be declared once".to_string(),
                    ));
                }
                project.provider = parse_provider(node)?;
                provider_seen = true;
            }
            "site" => {
                if site_seen {
                    return Err(SiteError::InvalidConfig(
                        "site can only be declared once".to_string(),
                    ));
                }
                project.site = parse_site(node)?;
                site_seen = true;
            }
            _ => {
                // 不明なノードはスキップ
            }
        }
    }

    Ok(project)
}

/// 最初の引数を文字列として取得
pub(crate) fn first_string(node: &KdlNode) -> Option<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

/// 文字列引数をすべて取得
pub(crate) fn string_args(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter_map(|e| e.value().as_string().map(|s| s.to_string()))
        .collect()
}
