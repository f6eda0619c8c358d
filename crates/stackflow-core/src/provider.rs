//! プロバイダー固有の config キー
//!
//! プロバイダーごとに `ProviderMapping` を実装し、`ProviderRegistry` に登録する。
//! 新しいプロバイダーの追加で既存の実装を変更する必要はない。

use crate::value::{sub_mapping, truthy};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use tracing::debug;

/// 変数マッピングからプロバイダー固有のフラットな config キーを導出する
pub trait ProviderMapping: Send + Sync {
    /// プロバイダー識別子 (例: "azure")
    fn provider(&self) -> &str;

    /// 追加する config キー（プロジェクト名のプレフィックスなし）
    fn extra_config(&self, vars: &Mapping) -> Mapping;
}

/// Azure Native プロバイダー
///
/// ```yaml
/// azure:
///   tenantId: 00000000-0000-0000-0000-000000000000
///   subscriptionId: 11111111-1111-1111-1111-111111111111
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureNative;

impl AzureNative {
    const NAMESPACE: &'static str = "azure-native";
    const FIELDS: [&'static str; 2] = ["tenantId", "subscriptionId"];
}

impl ProviderMapping for AzureNative {
    fn provider(&self) -> &str {
        "azure"
    }

    fn extra_config(&self, vars: &Mapping) -> Mapping {
        let mut cfg = Mapping::new();
        let Some(azure) = sub_mapping(vars, "azure") else {
            return cfg;
        };

        for field in Self::FIELDS {
            if let Some(value) = truthy(azure, field) {
                cfg.insert(
                    Value::String(format!("{}:{}", Self::NAMESPACE, field)),
                    value.clone(),
                );
            }
        }
        cfg
    }
}

/// プロバイダー識別子 → マッピング戦略
pub struct ProviderRegistry {
    strategies: HashMap<String, Box<dyn ProviderMapping>>,
}

impl ProviderRegistry {
    /// 空のレジストリ
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// 組み込みプロバイダーを登録済みのレジストリ
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(AzureNative);
        registry
    }

    /// 戦略を登録（同じ識別子は置き換え）
    pub fn register(&mut self, strategy: impl ProviderMapping + 'static) {
        self.strategies
            .insert(strategy.provider().to_string(), Box::new(strategy));
    }

    pub fn get(&self, provider: &str) -> Option<&dyn ProviderMapping> {
        self.strategies.get(provider).map(|s| s.as_ref())
    }

    /// 登録済みの識別子（ソート済み）
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// プロバイダー固有キーを導出（未登録のプロバイダーは空）
    pub fn extra_config(&self, provider: &str, vars: &Mapping) -> Mapping {
        match self.get(provider) {
            Some(strategy) => strategy.extra_config(vars),
            None => {
                debug!(provider, "No provider-specific mapping registered");
                Mapping::new()
            }
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}
