//! リポジトリのファイル配置
//!
//! すべてのパスは明示的に渡されたルートディレクトリから導出する。
//!
//! ```text
//! <root>/
//! ├── catalog.yaml
//! ├── services/config/<provider>/Pulumi.<env>.yaml
//! └── <service path>/
//!     ├── Pulumi.yaml
//!     ├── override.Pulumi.<env>.yaml
//!     └── Pulumi.<env>.yaml            (生成物)
//! ```

use crate::model::ServiceEntry;
use std::path::{Path, PathBuf};

/// カタログファイル名
pub const CATALOG_FILE: &str = "catalog.yaml";

/// プロジェクト記述ファイル名
pub const PROJECT_FILE: &str = "Pulumi.yaml";

/// グローバル設定ディレクトリ（ルートからの相対）
pub const GLOBAL_CONFIG_DIR: &str = "services/config";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    /// サービスのプロジェクトディレクトリ
    pub fn service_dir(&self, service: &ServiceEntry) -> PathBuf {
        self.root.join(&service.path)
    }

    /// グローバル設定ファイルのパス
    pub fn global_config_path(&self, environment: &str, provider: &str) -> PathBuf {
        self.root.join(global_config_relative(environment, provider))
    }
}

/// グローバル設定ファイルのルートからの相対パス（表示・ヘッダー用）
pub fn global_config_relative(environment: &str, provider: &str) -> String {
    format!("{}/{}/{}", GLOBAL_CONFIG_DIR, provider, stack_file_name(environment))
}

/// 生成されるスタックファイル名 (Pulumi.<env>.yaml)
pub fn stack_file_name(environment: &str) -> String {
    format!("Pulumi.{}.yaml", environment)
}

/// サービス固有オーバーライドのファイル名 (override.Pulumi.<env>.yaml)
pub fn override_file_name(environment: &str) -> String {
    format!("override.{}", stack_file_name(environment))
}

pub fn stack_file_path(project_dir: &Path, environment: &str) -> PathBuf {
    project_dir.join(stack_file_name(environment))
}

pub fn override_path(project_dir: &Path, environment: &str) -> PathBuf {
    project_dir.join(override_file_name(environment))
}

pub fn project_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_FILE)
}
