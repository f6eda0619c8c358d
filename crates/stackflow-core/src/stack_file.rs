//! 生成スタックファイル (Pulumi.<env>.yaml)
//!
//! `config` セクションのみを更新し、`encryptionsalt` などその他のトップレベル
//! セクションはそのまま保持する。

use crate::document;
use crate::error::{Result, StackflowError};
use crate::layout::{global_config_relative, override_file_name};
use crate::mapper::MappedConfig;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

/// config セクション名
pub const CONFIG_SECTION: &str = "config";

/// 生成ファイルの先頭に付けるヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackHeader {
    lines: Vec<String>,
}

impl StackHeader {
    pub fn new(environment: &str, provider: &str) -> Self {
        Self {
            lines: vec![
                "AUTO-GENERATED by stackflow - DO NOT EDIT".to_string(),
                format!(
                    "Config inherited from: {}",
                    global_config_relative(environment, provider)
                ),
                format!("Service overrides: {}", override_file_name(environment)),
            ],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// スタックファイルの内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackState {
    document: Mapping,
}

impl StackState {
    /// 既存ファイルを読み込む（存在しなければ空）
    pub fn load(path: &Path) -> Result<Self> {
        let document = document::load_mapping(path)?;
        debug!(
            path = %path.display(),
            sections = document.len(),
            "Loaded existing stack file"
        );
        Ok(Self { document })
    }

    pub fn from_mapping(document: Mapping) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Mapping {
        &self.document
    }

    pub fn config(&self) -> Option<&Mapping> {
        self.document.get(CONFIG_SECTION).and_then(Value::as_mapping)
    }

    /// config セクションにマッピング済みの設定を上書きした新しい状態を返す
    pub fn apply(&self, mapped: &MappedConfig) -> Result<StackState> {
        let mut config = match self.document.get(CONFIG_SECTION) {
            None | Some(Value::Null) => Mapping::new(),
            Some(Value::Mapping(existing)) => existing.clone(),
            Some(_) => return Err(StackflowError::InvalidConfigSection),
        };

        for (key, value) in mapped.iter() {
            config.insert(key.clone(), value.clone());
        }

        let mut document = self.document.clone();
        document.insert(Value::String(CONFIG_SECTION.to_string()), Value::Mapping(config));
        Ok(StackState { document })
    }

    /// ヘッダー付きで書き出す
    pub fn write(&self, path: &Path, header: &StackHeader) -> Result<()> {
        document::write_with_header(path, header.lines(), &self.document)
    }
}
