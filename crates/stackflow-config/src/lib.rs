//! stackflow の実行環境に関する設定
//!
//! - プロジェクトルート（catalog.yaml のあるディレクトリ）の探索
//! - ユーザー設定 (`~/.config/stackflow/config.yaml`) の読み込み

pub mod error;
pub mod settings;

pub use error::*;
pub use settings::Settings;

use std::path::{Path, PathBuf};
use tracing::debug;

/// プロジェクトルートを示すファイル
pub const ROOT_MARKER: &str = "catalog.yaml";

/// プロジェクトルートを直接指定する環境変数
pub const ROOT_ENV: &str = "STACKFLOW_ROOT";

/// stackflow のユーザー設定ディレクトリ (`<config_dir>/stackflow`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stackflow"))
}

/// プロジェクトルートを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 STACKFLOW_ROOT（catalog.yaml を含む場合のみ）
/// 2. カレントディレクトリから親方向に catalog.yaml を探す
pub fn find_project_root() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(root) = std::env::var(ROOT_ENV) {
        let root = PathBuf::from(root);
        if root.join(ROOT_MARKER).is_file() {
            debug!(root = %root.display(), "Using project root from {}", ROOT_ENV);
            return Ok(root);
        }
        debug!(root = %root.display(), "{} has no {}, falling back to search", ROOT_ENV, ROOT_MARKER);
    }

    // 2. カレントディレクトリから上方向に検索
    let current_dir = std::env::current_dir()?;
    find_project_root_from(&current_dir)
}

/// `start` から親方向に catalog.yaml を含むディレクトリを探す
pub fn find_project_root_from(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        if dir.join(ROOT_MARKER).is_file() {
            debug!(root = %dir.display(), "Found project root");
            return Ok(dir.to_path_buf());
        }
    }
    Err(ConfigError::ProjectRootNotFound(start.to_path_buf()))
}
