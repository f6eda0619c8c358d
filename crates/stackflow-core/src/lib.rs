//! stackflow core
//!
//! サービスカタログ、レイヤー設定のマージ、Pulumi スタックファイルの生成、
//! そしてサービス単位の実行を束ねるオーケストレーターを提供します。
//!
//! # 設定の解決順序
//!
//! ```text
//! services/config/<provider>/Pulumi.<env>.yaml   (グローバル)
//!                 │
//!                 ▼  deep_merge
//! <service>/override.Pulumi.<env>.yaml           (サービス固有)
//!                 │
//!                 ▼  map_vars
//! <project>:location / <project>:tags / ...      (フラットな Pulumi config)
//!                 │
//!                 ▼  StackState::apply
//! <service>/Pulumi.<env>.yaml                    (生成物 - 編集禁止)
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod layout;
pub mod mapper;
pub mod merge;
pub mod model;
pub mod orchestrator;
pub mod project;
pub mod provider;
pub mod stack_file;
pub mod tool;
pub mod value;

// Re-exports
pub use catalog::{CatalogIssue, ServiceRecord, find_service, load_catalog, validate_records};
pub use error::{ErrorKind, Result, StackflowError};
pub use layout::Layout;
pub use mapper::{MappedConfig, derive_resource_group_name, map_vars};
pub use merge::deep_merge;
pub use model::*;
pub use orchestrator::{Orchestrator, RunOptions, Target};
pub use project::read_project_name;
pub use provider::{AzureNative, ProviderMapping, ProviderRegistry};
pub use stack_file::{StackHeader, StackState};
pub use tool::{StackTool, ensure_stack};
