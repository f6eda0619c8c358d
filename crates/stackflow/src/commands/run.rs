use colored::Colorize;
use stackflow_config::Settings;
use stackflow_core::{Layout, Orchestrator, Outcome, RunOptions, RunOutcome, RunSummary};
use stackflow_pulumi::PulumiCli;

pub async fn handle(
    layout: Layout,
    settings: &Settings,
    options: &RunOptions,
    quiet: bool,
) -> Outcome {
    if !quiet {
        println!(
            "{} 環境: {} / 対象: {} / コマンド: {}",
            "▶".blue(),
            options.environment.cyan(),
            options.target.to_string().cyan(),
            if options.generate_only {
                "(生成のみ)".to_string()
            } else {
                options.command.clone()
            }
        );
    }

    let orchestrator = Orchestrator::new(layout, PulumiCli::new(&settings.pulumi_bin));
    let outcome = orchestrator.run(options).await;

    match &outcome {
        RunOutcome::CatalogInvalid(issues) => super::validate::print_issues(issues),
        RunOutcome::ServiceNotFound { name, available } => {
            eprintln!(
                "{} サービス '{}' がカタログにありません",
                "✗".red().bold(),
                name
            );
            eprintln!("利用可能なサービス: {}", available.join(", "));
        }
        RunOutcome::Completed(summary) => print_summary(summary, quiet),
    }

    outcome.outcome()
}

fn print_summary(summary: &RunSummary, quiet: bool) {
    let failed = summary.failed();

    if !quiet {
        println!();
        for result in summary.results() {
            if result.success {
                println!(
                    "  {} {}: {}",
                    "✓".green(),
                    result.service_name.cyan(),
                    result.message
                );
            } else {
                println!("  {} {}", "✗".red(), result.service_name.cyan());
            }
        }
        println!();
        println!(
            "サマリー: 成功 {}件, 失敗 {}件",
            summary.succeeded().len(),
            failed.len()
        );
    }

    if failed.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", "失敗したサービス:".red().bold());
    for result in failed {
        let kind = result
            .error_kind
            .map(|k| k.to_string())
            .unwrap_or_default();
        eprintln!("  - {} [{}]", result.service_name.cyan(), kind.yellow());
        for line in result.message.lines() {
            eprintln!("      {}", line);
        }
    }
}
