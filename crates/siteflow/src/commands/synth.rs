use anyhow::Context;
use colored::Colorize;
use siteflow_cloud::{Engine, ManifestStore};
use std::path::PathBuf;

pub async fn handle(stack_name: &str, out: Option<PathBuf>) -> anyhow::Result<()> {
    let site_file = super::locate_site_file()?;
    println!(
        "{} {}",
        "📄 プロジェクトファイル:".blue(),
        site_file.display().to_string().cyan()
    );

    let project = siteflow_core::load_project(&site_file)?;
    let outputs = siteflow_cloud_aws::declare_site(&project, stack_name)
        .with_context(|| format!("スタック {} の宣言に失敗しました", stack_name))?;

    let manifest = outputs.stack.manifest();
    let out_dir = out
        .or_else(|| project.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let store = ManifestStore::new(&out_dir);
    let receipt = store.submit(&manifest).await?;

    println!();
    println!(
        "{} {} (env: {})",
        "✓ スタックを宣言しました:".green().bold(),
        manifest.stack.cyan(),
        manifest.env
    );
    println!("  リソース: {}", manifest.resources.summary());
    println!("  アップロード: {}ファイル", outputs.objects.len());
    println!(
        "  マニフェスト: {} ({})",
        receipt.location.cyan(),
        receipt.engine
    );

    Ok(())
}
