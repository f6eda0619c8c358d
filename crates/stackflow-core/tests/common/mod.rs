use async_trait::async_trait;
use stackflow_core::{Layout, StackTool};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// テスト用のリポジトリ
pub struct TestRepo {
    pub root: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.path())
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

    pub fn write_catalog(&self, content: &str) {
        self.write("catalog.yaml", content);
    }

    pub fn write_global(&self, provider: &str, environment: &str, content: &str) {
        self.write(
            &format!("services/config/{}/Pulumi.{}.yaml", provider, environment),
            content,
        );
    }

    /// サービスディレクトリと Pulumi.yaml を作成
    pub fn add_service(&self, relative: &str, project_name: &str) {
        self.write(
            &format!("{}/Pulumi.yaml", relative),
            &format!("name: {}\nruntime: python\n", project_name),
        );
    }
}

/// 呼び出しを記録する StackTool
#[derive(Default)]
pub struct FakeTool {
    calls: Mutex<Vec<String>>,
    select_status: i32,
    init_status: i32,
    run_status: HashMap<String, i32>,
}

#[allow(dead_code)]
impl FakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// stack select が失敗する（= スタック未作成）
    pub fn without_stacks(mut self) -> Self {
        self.select_status = 1;
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.select_status = 1;
        self.init_status = 1;
        self
    }

    /// 指定ディレクトリ名のサービスで run が code を返す
    pub fn failing_run(mut self, dir_name: &str, code: i32) -> Self {
        self.run_status.insert(dir_name.to_string(), code);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn dir_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[async_trait]
impl StackTool for FakeTool {
    fn name(&self) -> &str {
        "fake"
    }

    async fn select_stack(&self, project_dir: &Path, stack: &str) -> stackflow_core::Result<i32> {
        self.record(format!("select {} {}", dir_name(project_dir), stack));
        Ok(self.select_status)
    }

    async fn init_stack(&self, project_dir: &Path, stack: &str) -> stackflow_core::Result<i32> {
        self.record(format!("init {} {}", dir_name(project_dir), stack));
        Ok(self.init_status)
    }

    async fn run(
        &self,
        project_dir: &Path,
        stack: &str,
        command: &str,
        extra_args: &[String],
    ) -> stackflow_core::Result<i32> {
        let name = dir_name(project_dir);
        let mut call = format!("run {} {} {}", name, command, stack);
        for arg in extra_args {
            call.push(' ');
            call.push_str(arg);
        }
        self.record(call);
        Ok(self.run_status.get(&name).copied().unwrap_or(0))
    }
}
