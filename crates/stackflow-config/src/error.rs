use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "プロジェクトルートが見つかりません（catalog.yaml がありません）: {0}\n\
        以下のいずれかで指定できます:\n\
        - catalog.yaml のあるディレクトリ、またはその配下で実行する\n\
        - --root オプション\n\
        - STACKFLOW_ROOT 環境変数"
    )]
    ProjectRootNotFound(PathBuf),

    #[error("設定ファイルのパースエラー: {path}\n理由: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
