//! 変数 → Pulumi config キーへの変換

use crate::provider::ProviderRegistry;
use crate::value::{is_truthy, scalar_string, sub_mapping, truthy};
use serde_yaml::{Mapping, Value};

/// リソースグループ名の既定プレフィックス
pub const DEFAULT_NAMING_PREFIX: &str = "svc";

/// Pulumi の config セクションに書き込むフラットな設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedConfig {
    project: String,
    entries: Mapping,
}

impl MappedConfig {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            entries: Mapping::new(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn entries(&self) -> &Mapping {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// プロジェクト名前空間のキー ("<project>:<name>")
    pub fn project_key(&self, name: &str) -> String {
        format!("{}:{}", self.project, name)
    }

    /// プロジェクト名前空間に値を設定
    pub fn set_project(&mut self, name: &str, value: Value) {
        let key = self.project_key(name);
        self.entries.insert(Value::String(key), value);
    }

    /// 空でない location を持つか
    pub fn has_location(&self) -> bool {
        self.get(&self.project_key("location"))
            .is_some_and(is_truthy)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter()
    }

    fn extend(&mut self, extra: Mapping) {
        for (key, value) in extra {
            self.entries.insert(key, value);
        }
    }
}

/// 命名規約からリソースグループ名を導出
///
/// `rg-<naming.prefix|svc>-<service>-<environment>`
pub fn derive_resource_group_name(service_name: &str, vars: &Mapping, environment: &str) -> String {
    let prefix = sub_mapping(vars, "naming")
        .and_then(|naming| truthy(naming, "prefix"))
        .and_then(scalar_string)
        .unwrap_or_else(|| DEFAULT_NAMING_PREFIX.to_string());
    format!("rg-{}-{}-{}", prefix, service_name, environment)
}

/// マージ済みの変数を Pulumi config に変換
pub fn map_vars(
    project: &str,
    service_name: &str,
    environment: &str,
    vars: &Mapping,
    provider: &str,
    providers: &ProviderRegistry,
) -> MappedConfig {
    let mut cfg = MappedConfig::new(project);

    if let Some(location) = truthy(vars, "location") {
        cfg.set_project("location", location.clone());
    }

    // 明示的な空マッピングも有効（null のみ除外）
    if let Some(tags) = vars.get("tags").filter(|v| !v.is_null()) {
        cfg.set_project("tags", tags.clone());
    }

    let resource_group = match truthy(vars, "resourceGroupName") {
        Some(name) => name.clone(),
        None => Value::String(derive_resource_group_name(service_name, vars, environment)),
    };
    cfg.set_project("resourceGroupName", resource_group);

    cfg.extend(providers.extra_config(provider, vars));
    cfg
}
