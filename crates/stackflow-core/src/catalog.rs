//! サービスカタログの読み込みと検証
//!
//! 検証は all-or-nothing: どこか 1 エントリでも不正ならカタログ全体を不正とし、
//! 見つかった問題はすべてまとめて報告する。

use crate::document;
use crate::error::ErrorKind;
use crate::layout::Layout;
use crate::model::{DEFAULT_PROVIDER, ServiceEntry, ServiceType};
use crate::value::scalar_string;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// カタログの問題
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    #[error("カタログが見つかりません: {0}")]
    Missing(PathBuf),

    #[error("カタログを読み込めません: {path}\n理由: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("カタログが空です（services が定義されていません）")]
    Empty,

    #[error("カタログエントリ {index}: マッピングではありません")]
    NotAMapping { index: usize },

    #[error("カタログエントリ {index}: 'name' がありません")]
    MissingName { index: usize },

    #[error("サービス '{service}': 'path' がありません")]
    MissingPath { service: String },

    #[error("サービス '{service}': 'provider' がありません")]
    MissingProvider { service: String },

    #[error("サービス '{service}': 'type' が不正です '{value}' (有効な値: {allowed})")]
    InvalidType {
        service: String,
        value: String,
        allowed: String,
    },

    #[error("サービス '{service}': path が見つかりません: {path}")]
    PathNotFound { service: String, path: String },

    #[error("サービス名 '{name}' が {count} 回定義されています")]
    DuplicateName { name: String, count: usize },
}

impl CatalogIssue {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogIssue::Missing(_) | CatalogIssue::PathNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Schema,
        }
    }
}

/// 検証前の生エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRecord {
    /// カタログ内の位置
    pub index: usize,
    pub name: String,
    pub path: String,
    pub provider: String,
    pub service_type: String,
    pub description: Option<String>,
}

impl ServiceRecord {
    /// マッピングから生エントリを組み立てる
    ///
    /// provider キーが存在しない場合のみ既定値を使う（明示的な null や空文字は不正）。
    pub fn from_mapping(index: usize, map: &Mapping) -> Self {
        let field = |key: &str| map.get(key).and_then(scalar_string).unwrap_or_default();

        let provider = match map.get("provider") {
            None => DEFAULT_PROVIDER.to_string(),
            Some(v) => scalar_string(v).unwrap_or_default(),
        };

        Self {
            index,
            name: field("name"),
            path: field("path"),
            provider,
            service_type: field("type"),
            description: map
                .get("description")
                .and_then(scalar_string)
                .filter(|d| !d.is_empty()),
        }
    }

    /// エントリ単体の構造チェック
    ///
    /// 名前の重複はここでは検出しない（カタログ全体のチェックで行う）。
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        if self.name.is_empty() {
            issues.push(CatalogIssue::MissingName { index: self.index });
        }
        if self.path.is_empty() {
            issues.push(CatalogIssue::MissingPath {
                service: self.name.clone(),
            });
        }
        if self.provider.is_empty() {
            issues.push(CatalogIssue::MissingProvider {
                service: self.name.clone(),
            });
        }
        if ServiceType::parse(&self.service_type).is_none() {
            issues.push(CatalogIssue::InvalidType {
                service: self.name.clone(),
                value: self.service_type.clone(),
                allowed: ServiceType::allowed(),
            });
        }

        issues
    }

    /// 構造チェックを通過したエントリを ServiceEntry に変換
    pub fn into_entry(self) -> Result<ServiceEntry, Vec<CatalogIssue>> {
        let issues = self.validate();
        match ServiceType::parse(&self.service_type) {
            Some(service_type) if issues.is_empty() => Ok(ServiceEntry {
                name: self.name,
                path: PathBuf::from(self.path),
                provider: self.provider,
                service_type,
                description: self.description,
            }),
            _ => Err(issues),
        }
    }
}

/// カタログファイルから services の生レコードを読み込む
pub fn load_records(path: &Path) -> Result<Vec<Value>, CatalogIssue> {
    if !path.exists() {
        return Err(CatalogIssue::Missing(path.to_path_buf()));
    }

    let doc = document::load_mapping(path).map_err(|e| CatalogIssue::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match doc.get("services") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(records)) => Ok(records.clone()),
        Some(_) => Err(CatalogIssue::Unreadable {
            path: path.to_path_buf(),
            message: "'services' はシーケンスである必要があります".to_string(),
        }),
    }
}

/// 生レコードを検証して ServiceEntry の一覧を返す
///
/// パスの存在確認は `root` からの相対で行う。
pub fn validate_records(
    records: &[Value],
    root: &Path,
) -> Result<Vec<ServiceEntry>, Vec<CatalogIssue>> {
    if records.is_empty() {
        return Err(vec![CatalogIssue::Empty]);
    }

    let mut services = Vec::with_capacity(records.len());
    let mut issues = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        let Some(map) = raw.as_mapping() else {
            issues.push(CatalogIssue::NotAMapping { index });
            continue;
        };

        let entry = match ServiceRecord::from_mapping(index, map).into_entry() {
            Ok(entry) => entry,
            Err(entry_issues) => {
                issues.extend(entry_issues);
                continue;
            }
        };

        if root.join(&entry.path).is_dir() {
            debug!(service = %entry.name, path = %entry.path.display(), "Catalog entry is valid");
            services.push(entry);
        } else {
            issues.push(CatalogIssue::PathNotFound {
                service: entry.name,
                path: entry.path.display().to_string(),
            });
        }
    }

    issues.extend(duplicate_names(&services));

    if issues.is_empty() {
        Ok(services)
    } else {
        Err(issues)
    }
}

/// カタログを読み込んで検証
#[instrument(skip(layout), fields(root = %layout.root().display()))]
pub fn load_catalog(layout: &Layout) -> Result<Vec<ServiceEntry>, Vec<CatalogIssue>> {
    let records = load_records(&layout.catalog_path()).map_err(|issue| vec![issue])?;
    let result = validate_records(&records, layout.root());

    match &result {
        Ok(services) => info!(services = services.len(), "Catalog loaded"),
        Err(issues) => warn!(issues = issues.len(), "Catalog validation failed"),
    }
    result
}

/// 名前の完全一致でサービスを探す
pub fn find_service<'a>(services: &'a [ServiceEntry], name: &str) -> Option<&'a ServiceEntry> {
    services.iter().find(|s| s.name == name)
}

// 出現順を保ったまま重複名を列挙
fn duplicate_names(services: &[ServiceEntry]) -> Vec<CatalogIssue> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for service in services {
        let count = counts.entry(service.name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(service.name.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|name| {
            let count = counts[name];
            (count > 1).then(|| CatalogIssue::DuplicateName {
                name: name.to_string(),
                count,
            })
        })
        .collect()
}
