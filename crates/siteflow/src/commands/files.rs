use colored::Colorize;
use siteflow_core::{FileListOptions, compile_pattern, folder_file_list};

pub struct FilesArgs {
    pub dir: String,
    pub prefix: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub recursive: bool,
    pub sort: bool,
}

pub fn handle(args: FilesArgs) -> anyhow::Result<()> {
    let mut options = FileListOptions::new()
        .recursive(args.recursive)
        .sort(args.sort);
    if let Some(pattern) = &args.include {
        options = options.include(compile_pattern(pattern)?);
    }
    if let Some(pattern) = &args.exclude {
        options = options.exclude(compile_pattern(pattern)?);
    }

    match &args.prefix {
        Some(prefix) => {
            let entries = siteflow_cloud_aws::object_entries(&args.dir, prefix, &options)?;
            for entry in &entries {
                println!("{} {} {}", entry.path, "->".dimmed(), entry.key.cyan());
            }
            tracing::debug!(files = entries.len(), "Listed object keys");
        }
        None => {
            let dir = siteflow_core::path::normalize_path(&args.dir);
            let files = folder_file_list(&dir, &options)?;
            for file in &files {
                println!("{}", file);
            }
            tracing::debug!(files = files.len(), "Listed files");
        }
    }

    Ok(())
}
