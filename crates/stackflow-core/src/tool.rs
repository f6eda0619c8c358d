//! Provisioning tool abstraction
//!
//! The orchestrator only needs three operations from the external tool, each
//! returning the raw process exit status.

use crate::error::{Result, StackflowError};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

/// External provisioning tool (e.g. the `pulumi` CLI)
///
/// `Err` is reserved for failures to run the tool at all; a non-zero exit
/// status is returned as `Ok(code)`.
#[async_trait]
pub trait StackTool: Send + Sync {
    /// Returns the tool name (e.g., "pulumi")
    fn name(&self) -> &str;

    /// Select an existing stack in the project directory
    async fn select_stack(&self, project_dir: &Path, stack: &str) -> Result<i32>;

    /// Create a new stack in the project directory
    async fn init_stack(&self, project_dir: &Path, stack: &str) -> Result<i32>;

    /// Run a tool command against the stack, passing `extra_args` through
    async fn run(
        &self,
        project_dir: &Path,
        stack: &str,
        command: &str,
        extra_args: &[String],
    ) -> Result<i32>;
}

/// Make sure the stack exists: select it, or initialize it if selection fails
pub async fn ensure_stack(tool: &dyn StackTool, project_dir: &Path, stack: &str) -> Result<()> {
    if tool.select_stack(project_dir, stack).await? == 0 {
        debug!(stack, "Selected existing stack");
        return Ok(());
    }

    info!(stack, project_dir = %project_dir.display(), "Stack not found, initializing");
    if tool.init_stack(project_dir, stack).await? != 0 {
        return Err(StackflowError::StackInit {
            stack: stack.to_string(),
            project_dir: project_dir.to_path_buf(),
        });
    }
    Ok(())
}
