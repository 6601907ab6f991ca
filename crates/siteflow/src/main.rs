mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "siteflow")]
#[command(about = "書けば、届く。静的サイトのインフラはKDLひとつで。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// サイトのリソースを宣言し、マニフェストを出力
    Synth {
        /// スタック名（例: org.portal.dev、末尾のセグメントが環境名）
        #[arg(short, long, env = "SITEFLOW_STACK", default_value = "dev")]
        stack: String,
        /// マニフェストの出力先（省略時はプロジェクトルート）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// アップロード対象のファイル一覧を表示
    Files {
        /// 走査するディレクトリ
        dir: String,
        /// ストレージキーのプレフィックス（指定時は path -> key 形式で表示）
        #[arg(short, long)]
        prefix: Option<String>,
        /// 含めるパスの正規表現
        #[arg(short, long)]
        include: Option<String>,
        /// 除外するパスの正規表現（includeより優先）
        #[arg(short, long)]
        exclude: Option<String>,
        /// サブディレクトリを走査しない
        #[arg(long)]
        no_recursive: bool,
        /// ソートしない（ディレクトリの列挙順）
        #[arg(long)]
        no_sort: bool,
    },
    /// 設定を検証
    Validate,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrへ（stdoutはコマンドの出力用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Synth { stack, out } => {
            commands::synth::handle(&stack, out).await?;
        }
        Commands::Files {
            dir,
            prefix,
            include,
            exclude,
            no_recursive,
            no_sort,
        } => {
            commands::files::handle(commands::files::FilesArgs {
                dir,
                prefix,
                include,
                exclude,
                recursive: !no_recursive,
                sort: !no_sort,
            })?;
        }
        Commands::Validate => {
            commands::validate::handle()?;
        }
        Commands::Version => {
            println!("siteflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
