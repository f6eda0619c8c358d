//! プロジェクト記述ファイル (Pulumi.yaml)

use crate::document;
use crate::error::{Result, StackflowError};
use crate::layout::project_file_path;
use crate::value::{scalar_string, truthy};
use std::path::Path;

/// `<project_dir>/Pulumi.yaml` の `name` を読み込む
///
/// config キーの名前空間として使われる。
pub fn read_project_name(project_dir: &Path) -> Result<String> {
    let path = project_file_path(project_dir);
    if !path.exists() {
        return Err(StackflowError::ProjectDescriptorNotFound(path));
    }

    let doc = document::load_mapping(&path)?;
    truthy(&doc, "name")
        .and_then(scalar_string)
        .ok_or_else(|| StackflowError::ProjectNameMissing(project_dir.to_path_buf()))
}
