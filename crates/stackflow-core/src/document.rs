//! YAML ドキュメントの読み書き
//!
//! 存在しないファイル・空ファイルは空のマッピングとして読み込む。

use crate::error::{Result, StackflowError};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

/// YAML ファイルをマッピングとして読み込む
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    if !path.exists() {
        debug!(path = %path.display(), "Document not found, using empty mapping");
        return Ok(Mapping::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| StackflowError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_mapping(&content, path)
}

/// YAML 文字列をマッピングとしてパース
///
/// `path` はエラーメッセージ用。
pub fn parse_mapping(content: &str, path: &Path) -> Result<Mapping> {
    if is_blank(content) {
        return Ok(Mapping::new());
    }

    let value: Value =
        serde_yaml::from_str(content).map_err(|e| StackflowError::DocumentParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(StackflowError::NotAMapping(path.to_path_buf())),
    }
}

/// ヘッダーコメント付きで YAML ファイルを書き出す
pub fn write_with_header(path: &Path, header: &[String], document: &Mapping) -> Result<()> {
    let body = serde_yaml::to_string(document).map_err(|e| StackflowError::DocumentWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut out = String::with_capacity(body.len() + header.len() * 64);
    for line in header {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&body);

    std::fs::write(path, out).map_err(|e| StackflowError::DocumentWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// コメントと空行のみ
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
