//! Pulumi backend error types

use stackflow_core::StackflowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulumiError {
    #[error("pulumi not found: {0}. Please install: https://www.pulumi.com/docs/install/")]
    BinaryNotFound(String),

    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<PulumiError> for StackflowError {
    fn from(err: PulumiError) -> Self {
        StackflowError::Tool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PulumiError>;
