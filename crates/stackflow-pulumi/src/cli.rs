//! pulumi CLI wrapper

use crate::error::{PulumiError, Result};
use async_trait::async_trait;
use stackflow_core::StackTool;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// pulumi CLI wrapper
#[derive(Debug, Clone)]
pub struct PulumiCli {
    binary: String,
}

impl PulumiCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// `-C <dir> stack select -s <stack>`
    pub fn select_args(project_dir: &Path, stack: &str) -> Vec<String> {
        let mut args = cwd_args(project_dir);
        args.extend(["stack", "select", "-s", stack].map(String::from));
        args
    }

    /// `-C <dir> stack init <stack>`
    pub fn init_args(project_dir: &Path, stack: &str) -> Vec<String> {
        let mut args = cwd_args(project_dir);
        args.extend(["stack", "init", stack].map(String::from));
        args
    }

    /// `-C <dir> <command> -s <stack> <extra_args...>`
    pub fn command_args(
        project_dir: &Path,
        stack: &str,
        command: &str,
        extra_args: &[String],
    ) -> Vec<String> {
        let mut args = cwd_args(project_dir);
        args.extend([command, "-s", stack].map(String::from));
        args.extend(extra_args.iter().cloned());
        args
    }

    /// Run with captured output, logging it at debug level
    async fn run_captured(&self, args: &[String]) -> Result<i32> {
        let output = self
            .command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(stdout = %stdout.trim(), stderr = %stderr.trim(), "pulumi output");

        Ok(exit_code(output.status))
    }

    /// Run with inherited stdio so the user sees pulumi's own output
    async fn run_inherited(&self, args: &[String]) -> Result<i32> {
        let status = self
            .command(args)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;
        Ok(exit_code(status))
    }

    fn command(&self, args: &[String]) -> Command {
        debug!("Running: {} {}", self.binary, args.join(" "));
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        cmd
    }

    fn spawn_error(&self, err: io::Error) -> PulumiError {
        if err.kind() == io::ErrorKind::NotFound {
            PulumiError::BinaryNotFound(self.binary.clone())
        } else {
            PulumiError::Spawn {
                binary: self.binary.clone(),
                source: err,
            }
        }
    }
}

impl Default for PulumiCli {
    fn default() -> Self {
        Self::new("pulumi")
    }
}

#[async_trait]
impl StackTool for PulumiCli {
    fn name(&self) -> &str {
        "pulumi"
    }

    async fn select_stack(&self, project_dir: &Path, stack: &str) -> stackflow_core::Result<i32> {
        let code = self
            .run_captured(&Self::select_args(project_dir, stack))
            .await?;
        Ok(code)
    }

    async fn init_stack(&self, project_dir: &Path, stack: &str) -> stackflow_core::Result<i32> {
        let code = self
            .run_inherited(&Self::init_args(project_dir, stack))
            .await?;
        Ok(code)
    }

    async fn run(
        &self,
        project_dir: &Path,
        stack: &str,
        command: &str,
        extra_args: &[String],
    ) -> stackflow_core::Result<i32> {
        let args = Self::command_args(project_dir, stack, command, extra_args);
        let code = self.run_inherited(&args).await?;
        Ok(code)
    }
}

fn cwd_args(project_dir: &Path) -> Vec<String> {
    vec!["-C".to_string(), project_dir.display().to_string()]
}

// Terminated by a signal
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
