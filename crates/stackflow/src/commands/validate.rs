use colored::Colorize;
use stackflow_core::{CatalogIssue, Layout, Outcome, load_catalog};

pub fn handle(layout: &Layout, quiet: bool) -> Outcome {
    if !quiet {
        println!("{}", "カタログを検証中...".blue());
        println!(
            "カタログ: {}",
            layout.catalog_path().display().to_string().cyan()
        );
    }

    match load_catalog(layout) {
        Ok(services) => {
            if !quiet {
                println!("{}", "✓ カタログは正常です！".green().bold());
                println!();
                println!("サービス: {}個", services.len());
                for service in &services {
                    println!(
                        "  {} {} ({}/{}) - {}",
                        "✓".green(),
                        service.name.cyan(),
                        service.provider,
                        service.service_type,
                        service.description_or_default()
                    );
                }
            }
            Outcome::Success
        }
        Err(issues) => {
            print_issues(&issues);
            Outcome::ConfigError
        }
    }
}

/// カタログの問題を stderr に表示
pub fn print_issues(issues: &[CatalogIssue]) {
    eprintln!();
    eprintln!("{}", "✗ カタログエラー".red().bold());
    for issue in issues {
        eprintln!("  [{}] {}", issue.kind().to_string().yellow(), issue);
    }
}
