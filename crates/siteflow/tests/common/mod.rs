use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SITE_KDL: &str = r#"
project "portal"

provider "localstack" {
    region "us-west-2"
    endpoint "http://localhost:4566"
}

site {
    domain "dp.localhost.localstack.cloud"
    content-dir "frontend"
    content-prefix "/frontend"
    exclude "\\.map$"
}
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_site_kdl(&self, content: &str) {
        let path = self.root.path().join("site.kdl");
        fs::write(path, content).unwrap();
    }

    pub fn write_content(&self, relative: &str) {
        let path = self.root.path().join("frontend").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "content").unwrap();
    }

    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクトルートで実行し、グローバル設定は参照しないコマンド
    pub fn command(&self) -> Command {
        isolated_command(self.root.path())
    }
}

pub fn isolated_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("siteflow").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("SITEFLOW_CONFIG_PATH")
        .env_remove("SITEFLOW_STACK");
    cmd
}
