//! サービス定義

use std::fmt;
use std::path::PathBuf;

/// provider 未指定時の既定値
pub const DEFAULT_PROVIDER: &str = "azure";

/// サービス種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// 状態を持たないサービス
    Stateless,
    /// データストアなど状態を持つサービス
    Stateful,
}

impl ServiceType {
    pub const ALL: [ServiceType; 2] = [ServiceType::Stateless, ServiceType::Stateful];

    /// 文字列からパース（完全一致）
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Stateless => "stateless",
            ServiceType::Stateful => "stateful",
        }
    }

    /// 有効な値の一覧（ソート済み、カンマ区切り）
    pub fn allowed() -> String {
        let mut names: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// カタログに登録された 1 サービス
///
/// catalog.yaml 形式：
/// ```yaml
/// services:
///   - name: az-app1
///     path: services/az-app1
///     provider: azure
///     type: stateless
///     description: Sample web app
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub name: String,
    /// ルートからの相対パス
    pub path: PathBuf,
    pub provider: String,
    /// catalog.yaml の `type`
    pub service_type: ServiceType,
    pub description: Option<String>,
}

impl ServiceEntry {
    /// 表示用の説明文
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("no description")
    }
}
