//! プロジェクトローダー
//!
//! site.kdl の読み込みと、ファイル走査オプションの組み立てを統合

use crate::error::{Result, SiteError};
use crate::files::{FileListOptions, compile_pattern};
use crate::model::Project;
use crate::parser::parse_kdl_file;
use std::path::Path;
use tracing::{info, instrument, warn};

/// プロジェクトファイルをロードしてProjectを生成
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_project(path: &Path) -> Result<Project> {
    if !path.is_file() {
        return Err(SiteError::InvalidConfig(format!(
            "プロジェクトファイルが見つかりません: {}",
            path.display()
        )));
    }

    let project = parse_kdl_file(path)?;

    let content_dir = project.content_dir();
    if !content_dir.is_dir() {
        warn!(content_dir = %content_dir.display(), "Content directory does not exist yet");
    }

    info!(
        project = %project.name,
        provider = %project.provider.name,
        domain = %project.site.domain,
        "Project loaded successfully"
    );
    Ok(project)
}

/// サイト設定の include/exclude からファイル一覧オプションを作る
pub fn upload_options(project: &Project) -> Result<FileListOptions> {
    let mut options = FileListOptions::default();
    if let Some(pattern) = &project.site.include {
        options = options.include(compile_pattern(pattern)?);
    }
    if let Some(pattern) = &project.site.exclude {
        options = options.exclude(compile_pattern(pattern)?);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("site.kdl");
        fs::write(
            &file,
            r#"
            project "portal"
            site {
                domain "dp.localhost.localstack.cloud"
            }
            "#,
        )
        .unwrap();

        let project = load_project(&file).unwrap();
        assert_eq!(project.name, "portal");
        assert_eq!(project.root.as_deref(), Some(temp_dir.path()));
    }

    #[test]
    fn test_load_project_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_project(&temp_dir.path().join("site.kdl"));
        assert!(matches!(result, Err(SiteError::InvalidConfig(_))));
    }

    #[test]
    fn test_upload_options_from_site() {
        let mut project = Project::default();
        project.site.include = Some(r"\.html$".to_string());
        project.site.exclude = Some(r"^drafts/".to_string());

        let options = upload_options(&project).unwrap();
        assert!(options.recursive);
        assert!(options.sort);
        assert!(options.include.unwrap().is_match("index.html"));
        assert!(options.exclude.unwrap().is_match("drafts/post.html"));
    }

    #[test]
    fn test_upload_options_default() {
        let options = upload_options(&Project::default()).unwrap();
        assert!(options.include.is_none());
        assert!(options.exclude.is_none());
    }
}
