mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use stackflow_config::Settings;
use stackflow_core::{Layout, Outcome, RunOptions, Target};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "stackflow", version)]
#[command(
    about = "サービスカタログから Pulumi のスタック設定を生成し、サービスごとに実行する",
    long_about = None
)]
#[command(after_help = "例:\n  \
    stackflow dev all                    全サービスを preview\n  \
    stackflow dev az-app1 up -- --yes    1 サービスを up（--yes は pulumi に渡す）\n  \
    stackflow prod all -g                設定ファイルの生成のみ\n  \
    stackflow --validate                 カタログの検証のみ")]
struct Cli {
    /// 環境名 (dev, stg, prod)。Pulumi のスタック名になる
    environment: Option<String>,
    /// サービス名、または all（全サービス）
    service: Option<String>,
    /// Pulumi コマンド (preview, up, destroy ...)。省略時は設定の default_command
    command: Option<String>,
    /// カタログの provider を上書き
    #[arg(long)]
    provider: Option<String>,
    /// 設定ファイルの生成のみ行い、Pulumi は実行しない
    #[arg(short = 'g', long)]
    generate_only: bool,
    /// カタログの検証のみ行う
    #[arg(long)]
    validate: bool,
    /// 詳細なログを出力
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// エラー以外の出力を抑制
    #[arg(short, long)]
    quiet: bool,
    /// プロジェクトルート（省略時は STACKFLOW_ROOT、またはカレントから catalog.yaml を探索）
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Pulumi にそのまま渡す引数（-- 以降）
    #[arg(last = true)]
    extra_args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 位置引数の検証はプロジェクトルートの探索より先に行う
    if !cli.validate && (cli.environment.is_none() || cli.service.is_none()) {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "<ENVIRONMENT> と <SERVICE> を指定してください（--validate を除く）",
            )
            .exit();
    }

    logging::init(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(Outcome::ConfigError.exit_code())
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let root = match cli.root {
        Some(root) => root,
        None => stackflow_config::find_project_root()?,
    };
    tracing::debug!(root = %root.display(), "Using project root");
    let layout = Layout::new(root);

    if cli.validate {
        return Ok(commands::validate::handle(&layout, cli.quiet));
    }

    let settings = Settings::load()?;

    // 上の検証で両方 Some であることは保証済み
    let (Some(environment), Some(service)) = (cli.environment, cli.service) else {
        anyhow::bail!("<ENVIRONMENT> と <SERVICE> を指定してください");
    };

    let options = RunOptions::new(environment, Target::parse(&service))
        .with_command(cli.command.unwrap_or_else(|| settings.default_command.clone()))
        .with_extra_args(cli.extra_args)
        .with_generate_only(cli.generate_only)
        .with_provider_override(cli.provider);

    Ok(commands::run::handle(layout, &settings, &options, cli.quiet).await)
}
