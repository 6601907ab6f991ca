use colored::Colorize;

pub fn handle() -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let site_file = match super::locate_site_file() {
        Ok(path) => path,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ プロジェクトファイルが見つかりません".red().bold());
            eprintln!("  {:#}", e);
            std::process::exit(1);
        }
    };
    println!(
        "プロジェクトファイル: {}",
        site_file.display().to_string().cyan()
    );

    let project = match siteflow_core::load_project(&site_file) {
        Ok(project) => project,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
    println!();
    println!("サマリー:");
    println!("  プロジェクト: {}", project.name.cyan());
    println!(
        "  プロバイダー: {} ({}, {})",
        project.provider.name.cyan(),
        project.provider.region,
        project.provider.endpoint
    );
    println!("    サービス: {}個", project.provider.services.len());
    println!("  ドメイン: {}", project.site.domain.cyan());
    for name in &project.site.alternative_names {
        println!("    - {}", name);
    }
    println!("  ホストゾーン: {}", project.site.hosted_zone);

    let content_dir = project.content_dir();
    if content_dir.is_dir() {
        let options = siteflow_core::upload_options(&project)?;
        let dir = siteflow_core::path::normalize_path(&content_dir.to_string_lossy());
        let files = siteflow_core::folder_file_list(&dir, &options)?;
        println!(
            "  コンテンツ: {} ({}ファイル → {})",
            content_dir.display().to_string().cyan(),
            files.len(),
            project.site.content_prefix
        );
    } else {
        println!(
            "  コンテンツ: {} {}",
            content_dir.display().to_string().cyan(),
            "(未作成)".yellow()
        );
    }

    Ok(())
}
