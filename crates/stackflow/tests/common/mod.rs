use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const CATALOG: &str = r#"
services:
  - name: az-app1
    path: services/az-app1
    provider: azure
    type: stateless
    description: Web frontend
  - name: az-db
    path: services/az-db
    provider: azure
    type: stateful
"#;

/// テスト用のリポジトリ
pub struct TestRepo {
    pub root: TempDir,
}

#[allow(dead_code)]
impl TestRepo {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    /// 2 サービス + dev 用グローバル設定を持つリポジトリ
    pub fn with_services() -> Self {
        let repo = Self::new();
        repo.write("catalog.yaml", CATALOG);
        repo.write(
            "services/config/azure/Pulumi.dev.yaml",
            "location: japaneast\ntags:\n  owner: platform\n",
        );
        repo.write("services/az-app1/Pulumi.yaml", "name: app1\nruntime: python\n");
        repo.write("services/az-db/Pulumi.yaml", "name: db\nruntime: python\n");
        repo.write("services/az-app1/override.Pulumi.dev.yaml", "location: eastus\n");
        repo
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.path().join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root.path().join(relative).exists()
    }

    /// リポジトリをカレントにした stackflow コマンド
    ///
    /// ユーザー設定や環境変数の影響を受けないようにする。
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("stackflow").unwrap();
        cmd.current_dir(self.root.path())
            .env("STACKFLOW_CONFIG_PATH", self.root.path().join(".stackflow.yaml"))
            .env_remove("STACKFLOW_ROOT")
            .env_remove("STACKFLOW_PULUMI_BIN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// 引数を記録する偽の pulumi を配置し、そのパスを返す
    ///
    /// `<command>` の終了コードは `command_status`。stack select / init は常に成功。
    #[cfg(unix)]
    pub fn fake_pulumi(&self, command_status: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = self.root.path().join(".bin");
        fs::create_dir_all(&bin_dir).unwrap();
        let log = bin_dir.join("calls.log");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
if [ "$3" = "stack" ]; then
  exit 0
fi
exit {command_status}
"#,
            log = log.display()
        );
        let bin = bin_dir.join("pulumi");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        bin
    }

    /// 偽の pulumi が受け取った引数（-C <dir> を除く）
    pub fn pulumi_calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.path().join(".bin/calls.log"))
            .unwrap_or_default()
            .lines()
            .map(|line| line.splitn(3, ' ').nth(2).unwrap_or_default().to_string())
            .collect()
    }
}
