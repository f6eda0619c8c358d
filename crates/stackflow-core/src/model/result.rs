//! サービス単位の処理結果

use crate::error::{ErrorKind, StackflowError};
use std::path::PathBuf;

/// 1 サービスの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub service_name: String,
    pub success: bool,
    pub message: String,
    /// 生成したスタックファイル（生成前に失敗した場合は None）
    pub generated_file: Option<PathBuf>,
    /// 失敗時のエラー分類
    pub error_kind: Option<ErrorKind>,
}

impl ProcessResult {
    pub fn succeeded(
        service_name: impl Into<String>,
        message: impl Into<String>,
        generated_file: Option<PathBuf>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            success: true,
            message: message.into(),
            generated_file,
            error_kind: None,
        }
    }

    pub fn failed(
        service_name: impl Into<String>,
        error: &StackflowError,
        generated_file: Option<PathBuf>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            success: false,
            message: error.to_string(),
            generated_file,
            error_kind: Some(error.kind()),
        }
    }
}
