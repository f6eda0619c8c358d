use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// エラーの分類
///
/// サービス単位の結果やカタログの問題は、すべてこのいずれかに分類される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// カタログエントリやドキュメントの構造が不正
    Schema,
    /// 必要なファイル・エントリが存在しない
    NotFound,
    /// 派生値の検証に失敗（location 未設定など）
    Validation,
    /// 外部ツールが非ゼロで終了、または起動できない
    Execution,
    /// スタックの選択・初期化に失敗
    StackInit,
    /// 想定外の IO エラー
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Schema => "SchemaError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Execution => "ExecutionError",
            ErrorKind::StackInit => "StackInitError",
            ErrorKind::Io => "IoError",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum StackflowError {
    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("YAML パースエラー: {path}\n理由: {message}")]
    DocumentParse { path: PathBuf, message: String },

    #[error("YAML 書き込みエラー: {path}\n理由: {message}")]
    DocumentWrite { path: PathBuf, message: String },

    #[error("ドキュメントのトップレベルがマッピングではありません: {0}")]
    NotAMapping(PathBuf),

    #[error("グローバル設定が見つかりません: {path}\nヒント: {hint} を作成してください")]
    GlobalConfigNotFound { path: PathBuf, hint: String },

    #[error("Pulumi.yaml が見つかりません: {0}")]
    ProjectDescriptorNotFound(PathBuf),

    #[error("Pulumi.yaml に 'name' がありません: {0}")]
    ProjectNameMissing(PathBuf),

    #[error("'location' がありません: {global} またはオーバーライドファイルに定義してください")]
    MissingLocation { global: PathBuf },

    #[error("スタックファイルの 'config' セクションがマッピングではありません")]
    InvalidConfigSection,

    #[error("スタック '{stack}' の選択/初期化に失敗しました: {project_dir}")]
    StackInit { stack: String, project_dir: PathBuf },

    #[error("コマンド '{command}' が終了コード {code} で失敗しました")]
    Execution { command: String, code: i32 },

    #[error("外部ツールの実行に失敗しました: {0}")]
    Tool(String),
}

impl StackflowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StackflowError::IoError { .. } | StackflowError::DocumentWrite { .. } => ErrorKind::Io,
            StackflowError::DocumentParse { .. }
            | StackflowError::NotAMapping(_)
            | StackflowError::InvalidConfigSection => ErrorKind::Schema,
            StackflowError::GlobalConfigNotFound { .. }
            | StackflowError::ProjectDescriptorNotFound(_) => ErrorKind::NotFound,
            StackflowError::ProjectNameMissing(_) | StackflowError::MissingLocation { .. } => {
                ErrorKind::Validation
            }
            StackflowError::StackInit { .. } => ErrorKind::StackInit,
            StackflowError::Execution { .. } | StackflowError::Tool(_) => ErrorKind::Execution,
        }
    }
}

pub type Result<T> = std::result::Result<T, StackflowError>;
