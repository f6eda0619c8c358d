//! モデル定義
//!
//! カタログのサービスエントリと、実行結果のモデルを定義します。

mod result;
mod run;
mod service;

// Re-exports
pub use result::*;
pub use run::*;
pub use service::*;
