//! ユーザー設定

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";

/// pulumi バイナリを上書きする環境変数
pub const PULUMI_BIN_ENV: &str = "STACKFLOW_PULUMI_BIN";

/// 設定ファイル名
pub const SETTINGS_FILE: &str = "config.yaml";

/// ~/.config/stackflow/config.yaml の内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// pulumi 実行ファイル
    pub pulumi_bin: String,
    /// COMMAND 省略時の Pulumi コマンド
    pub default_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pulumi_bin: "pulumi".to_string(),
            default_command: "preview".to_string(),
        }
    }
}

impl Settings {
    /// 設定を読み込み、環境変数による上書きを適用する
    ///
    /// 設定ファイルがなければ既定値を使う。
    pub fn load() -> Result<Self> {
        let settings = match settings_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(settings.with_env_overrides())
    }

    /// 指定パスから読み込む（存在しなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(bin) = std::env::var(PULUMI_BIN_ENV)
            && !bin.is_empty()
        {
            self.pulumi_bin = bin;
        }
        self
    }
}

/// 設定ファイルのパス
///
/// STACKFLOW_CONFIG_PATH が優先。
pub fn settings_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    crate::config_dir().map(|dir| dir.join(SETTINGS_FILE))
}
