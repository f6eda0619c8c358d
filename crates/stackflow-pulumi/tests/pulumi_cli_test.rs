//! Runs `PulumiCli` against a fake `pulumi` shell script that records its
//! arguments.
#![cfg(unix)]

use serial_test::serial;
use stackflow_core::{ErrorKind, StackTool, ensure_stack};
use stackflow_pulumi::PulumiCli;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct FakePulumi {
    dir: TempDir,
}

impl FakePulumi {
    /// select / init / その他コマンドの終了コードを指定して作成
    fn new(select: i32, init: i32, command: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
case "$3 $4" in
  "stack select") exit {select} ;;
  "stack init") exit {init} ;;
esac
exit {command}
"#,
            log = log.display()
        );
        let bin = dir.path().join("pulumi");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    fn bin(&self) -> PathBuf {
        self.dir.path().join("pulumi")
    }

    fn cli(&self) -> PulumiCli {
        PulumiCli::new(self.bin().display().to_string())
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }
}

#[tokio::test]
#[serial]
async fn test_existing_stack_is_selected() {
    let fake = FakePulumi::new(0, 0, 0);
    let cli = fake.cli();
    let project = Path::new("/repo/services/app1");

    ensure_stack(&cli, project, "dev").await.unwrap();
    assert_eq!(fake.calls(), vec!["-C /repo/services/app1 stack select -s dev"]);
}

#[tokio::test]
#[serial]
async fn test_missing_stack_is_initialized() {
    let fake = FakePulumi::new(255, 0, 0);
    let cli = fake.cli();
    let project = Path::new("/repo/services/app1");

    ensure_stack(&cli, project, "dev").await.unwrap();
    assert_eq!(
        fake.calls(),
        vec![
            "-C /repo/services/app1 stack select -s dev",
            "-C /repo/services/app1 stack init dev",
        ]
    );
}

#[tokio::test]
#[serial]
async fn test_init_failure() {
    let fake = FakePulumi::new(1, 1, 0);
    let cli = fake.cli();

    let err = ensure_stack(&cli, Path::new("/repo/svc"), "prod")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StackInit);
}

#[tokio::test]
#[serial]
async fn test_run_returns_exit_code_and_passes_args() {
    let fake = FakePulumi::new(0, 0, 3);
    let cli = fake.cli();
    let extra = vec!["--yes".to_string(), "--diff".to_string()];

    let code = cli
        .run(Path::new("/repo/svc"), "dev", "up", &extra)
        .await
        .unwrap();
    assert_eq!(code, 3);
    assert_eq!(fake.calls(), vec!["-C /repo/svc up -s dev --yes --diff"]);
}
