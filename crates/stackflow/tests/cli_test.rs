#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

mod common;

use assert_cmd::Command;
use common::TestRepo;
use predicates::prelude::*;

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("stackflow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pulumi"))
        .stdout(predicate::str::contains("--generate-only"))
        .stdout(predicate::str::contains("--validate"))
        .stdout(predicate::str::contains("--provider"));
}

/// 環境・サービス未指定は使い方エラー
#[test]
fn test_missing_positional_args() {
    let repo = TestRepo::with_services();
    repo.command()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<ENVIRONMENT>"));

    repo.command()
        .arg("dev")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SERVICE>"));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    let repo = TestRepo::with_services();
    repo.command()
        .args(["dev", "all", "-v", "-q"])
        .assert()
        .failure();
}

/// --validate はサービス一覧を表示する
#[test]
fn test_validate_ok() {
    let repo = TestRepo::with_services();
    repo.command()
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("az-app1"))
        .stdout(predicate::str::contains("(azure/stateless) - Web frontend"))
        .stdout(predicate::str::contains("(azure/stateful) - no description"));
}

#[test]
fn test_validate_invalid_catalog() {
    let repo = TestRepo::with_services();
    repo.write(
        "catalog.yaml",
        "services:\n  - name: az-app1\n    path: services/az-app1\n    type: invalid\n",
    );

    repo.command()
        .arg("--validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("SchemaError"))
        .stderr(predicate::str::contains("stateful, stateless"));
}

#[test]
fn test_validate_with_root_option() {
    let repo = TestRepo::with_services();
    let mut cmd = Command::cargo_bin("stackflow").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("STACKFLOW_ROOT")
        .arg("--validate")
        .arg("--root")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("az-db"));
}

/// catalog.yaml が見つからなければ設定エラー
#[test]
fn test_project_root_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("stackflow").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("STACKFLOW_ROOT")
        .args(["dev", "all"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("catalog.yaml"));
}

#[test]
fn test_generate_only_writes_stack_files() {
    let repo = TestRepo::with_services();
    repo.write(
        "services/az-db/Pulumi.dev.yaml",
        "encryptionsalt: v1:salt\n",
    );

    repo.command()
        .args(["dev", "all", "-g"])
        .assert()
        .success()
        .stdout(predicate::str::contains("成功 2件, 失敗 0件"));

    let app1 = repo.read("services/az-app1/Pulumi.dev.yaml");
    assert!(app1.starts_with("# AUTO-GENERATED by stackflow - DO NOT EDIT"));
    assert!(app1.contains("app1:location: eastus"));
    assert!(app1.contains("app1:resourceGroupName: rg-svc-az-app1-dev"));

    let db = repo.read("services/az-db/Pulumi.dev.yaml");
    assert!(db.contains("encryptionsalt: v1:salt"));
    assert!(db.contains("db:location: japaneast"));
    assert!(db.contains("owner: platform"));
}

#[test]
fn test_subdirectory_discovers_root() {
    let repo = TestRepo::with_services();
    repo.command()
        .current_dir(repo.path().join("services/az-app1"))
        .args(["dev", "az-app1", "--generate-only"])
        .assert()
        .success();

    assert!(repo.exists("services/az-app1/Pulumi.dev.yaml"));
    assert!(!repo.exists("services/az-db/Pulumi.dev.yaml"));
}

#[test]
fn test_unknown_service() {
    let repo = TestRepo::with_services();
    repo.command()
        .args(["dev", "ghost", "-g"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'ghost'"))
        .stderr(predicate::str::contains("az-app1, az-db"));
}

/// グローバル設定がない環境は各サービスの失敗になる
#[test]
fn test_missing_global_config() {
    let repo = TestRepo::with_services();
    repo.command()
        .args(["prod", "all", "-g"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("成功 0件, 失敗 2件"))
        .stderr(predicate::str::contains(
            "services/config/azure/Pulumi.prod.yaml",
        ))
        .stderr(predicate::str::contains("NotFoundError"));
}

#[test]
fn test_quiet_suppresses_summary() {
    let repo = TestRepo::with_services();
    repo.command()
        .args(["dev", "all", "-g", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_pulumi_passthrough_args() {
    let repo = TestRepo::with_services();
    let pulumi = repo.fake_pulumi(0);

    repo.command()
        .env("STACKFLOW_PULUMI_BIN", &pulumi)
        .args(["dev", "az-app1", "up", "--", "--yes", "--skip-preview"])
        .assert()
        .success();

    assert_eq!(
        repo.pulumi_calls(),
        vec!["stack select -s dev", "up -s dev --yes --skip-preview"]
    );
}

#[cfg(unix)]
#[test]
fn test_default_command_from_settings() {
    let repo = TestRepo::with_services();
    let pulumi = repo.fake_pulumi(0);
    repo.write(
        ".stackflow.yaml",
        &format!("pulumi_bin: {}\ndefault_command: refresh\n", pulumi.display()),
    );

    repo.command()
        .args(["dev", "az-db"])
        .assert()
        .success();

    assert_eq!(
        repo.pulumi_calls(),
        vec!["stack select -s dev", "refresh -s dev"]
    );
}

#[cfg(unix)]
#[test]
fn test_pulumi_failure_exit_code() {
    let repo = TestRepo::with_services();
    let pulumi = repo.fake_pulumi(1);

    repo.command()
        .env("STACKFLOW_PULUMI_BIN", &pulumi)
        .args(["dev", "all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ExecutionError"))
        .stderr(predicate::str::contains("終了コード 1"));

    // 1 サービスの失敗で残りは止まらない
    let runs: Vec<String> = repo
        .pulumi_calls()
        .into_iter()
        .filter(|c| c.starts_with("preview"))
        .collect();
    assert_eq!(runs.len(), 2);
}
