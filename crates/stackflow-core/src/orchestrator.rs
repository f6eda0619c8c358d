//! サービスオーケストレーター
//!
//! 状態遷移:
//! ValidatingCatalog → ResolvingTargets → ProcessingService* → Aggregating → Done
//!
//! サービスはカタログ順に 1 つずつ処理する。1 サービスの失敗は結果に記録され、
//! 残りのサービスの処理は継続する。

use crate::catalog::{self, CatalogIssue, find_service};
use crate::document;
use crate::error::{Result, StackflowError};
use crate::layout::{Layout, global_config_relative, override_path, stack_file_path};
use crate::mapper::map_vars;
use crate::merge::deep_merge;
use crate::model::{ProcessResult, RunOutcome, RunSummary, ServiceEntry};
use crate::project::read_project_name;
use crate::provider::ProviderRegistry;
use crate::stack_file::{StackHeader, StackState};
use crate::tool::{StackTool, ensure_stack};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// 全サービスを対象にするキーワード
pub const ALL_TARGET: &str = "all";

/// コマンド省略時の既定（読み取り専用のプレビュー）
pub const DEFAULT_COMMAND: &str = "preview";

/// 処理対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// カタログの全サービス
    All,
    /// 名前が完全一致する 1 サービス
    Service(String),
}

impl Target {
    pub fn parse(s: &str) -> Self {
        if s == ALL_TARGET {
            Target::All
        } else {
            Target::Service(s.to_string())
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::All => f.write_str(ALL_TARGET),
            Target::Service(name) => f.write_str(name),
        }
    }
}

/// 1 回の実行の指定内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// 環境（Pulumi のスタック名）
    pub environment: String,
    pub target: Target,
    /// Pulumi のサブコマンド (preview, up, destroy ...)
    pub command: String,
    /// `--` 以降の引数（そのまま Pulumi に渡す）
    pub extra_args: Vec<String>,
    /// 設定ファイルの生成のみ行い、Pulumi は実行しない
    pub generate_only: bool,
    /// カタログの provider を上書き
    pub provider_override: Option<String>,
}

impl RunOptions {
    pub fn new(environment: impl Into<String>, target: Target) -> Self {
        Self {
            environment: environment.into(),
            target,
            command: DEFAULT_COMMAND.to_string(),
            extra_args: Vec::new(),
            generate_only: false,
            provider_override: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_extra_args(mut self, extra_args: Vec<String>) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn with_generate_only(mut self, generate_only: bool) -> Self {
        self.generate_only = generate_only;
        self
    }

    pub fn with_provider_override(mut self, provider: Option<String>) -> Self {
        self.provider_override = provider;
        self
    }
}

pub struct Orchestrator<T> {
    layout: Layout,
    providers: ProviderRegistry,
    tool: T,
}

impl<T: StackTool> Orchestrator<T> {
    pub fn new(layout: Layout, tool: T) -> Self {
        Self {
            layout,
            providers: ProviderRegistry::builtin(),
            tool,
        }
    }

    /// プロバイダーのマッピング戦略を差し替える
    pub fn with_providers(mut self, providers: ProviderRegistry) -> Self {
        self.providers = providers;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// カタログの検証のみ行う
    pub fn validate(&self) -> std::result::Result<Vec<ServiceEntry>, Vec<CatalogIssue>> {
        catalog::load_catalog(&self.layout)
    }

    /// カタログ検証 → 対象解決 → 各サービス処理 → 集計
    #[instrument(skip_all, fields(environment = %options.environment, target = %options.target))]
    pub async fn run(&self, options: &RunOptions) -> RunOutcome {
        let services = match self.validate() {
            Ok(services) => services,
            Err(issues) => {
                error!(issues = issues.len(), "Catalog validation failed");
                return RunOutcome::CatalogInvalid(issues);
            }
        };

        let targets: Vec<&ServiceEntry> = match &options.target {
            Target::All => services.iter().collect(),
            Target::Service(name) => match find_service(&services, name) {
                Some(service) => vec![service],
                None => {
                    warn!(service = %name, "Service not found in catalog");
                    return RunOutcome::ServiceNotFound {
                        name: name.clone(),
                        available: services.iter().map(|s| s.name.clone()).collect(),
                    };
                }
            },
        };

        let mut results = Vec::with_capacity(targets.len());
        for service in targets {
            results.push(self.process_service(service, options).await);
        }

        let summary = RunSummary::new(results);
        info!(
            succeeded = summary.succeeded().len(),
            failed = summary.failed().len(),
            "Run complete"
        );
        RunOutcome::Completed(summary)
    }

    /// 1 サービスを処理する（失敗はすべて ProcessResult に変換）
    #[instrument(skip_all, fields(service = %service.name))]
    pub async fn process_service(
        &self,
        service: &ServiceEntry,
        options: &RunOptions,
    ) -> ProcessResult {
        // 空の上書きは未指定と同じ扱い
        let provider = options
            .provider_override
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&service.provider);
        info!(
            description = service.description_or_default(),
            provider, "Processing service"
        );

        let output_path = match self.generate(service, provider, &options.environment) {
            Ok(path) => path,
            Err(e) => return failure(service, &e, None),
        };

        if options.generate_only {
            return ProcessResult::succeeded(
                &service.name,
                "設定を生成しました (--generate-only)",
                Some(output_path),
            );
        }

        let project_dir = self.layout.service_dir(service);
        match self.execute(&project_dir, options).await {
            Ok(()) => ProcessResult::succeeded(
                &service.name,
                format!("コマンド '{}' が成功しました", options.command),
                Some(output_path),
            ),
            Err(e) => failure(service, &e, Some(output_path)),
        }
    }

    /// グローバル設定とオーバーライドをマージしてスタックファイルの内容を作る
    ///
    /// 書き込みは行わない。戻り値は (出力先パス, 新しい内容)。
    pub fn generate_stack_state(
        &self,
        service: &ServiceEntry,
        provider: &str,
        environment: &str,
    ) -> Result<(PathBuf, StackState)> {
        let global_path = self.layout.global_config_path(environment, provider);
        if !global_path.exists() {
            return Err(StackflowError::GlobalConfigNotFound {
                path: global_path,
                hint: global_config_relative(environment, provider),
            });
        }

        let project_dir = self.layout.service_dir(service);
        let global_vars = document::load_mapping(&global_path)?;
        let override_vars = document::load_mapping(&override_path(&project_dir, environment))?;
        let merged = deep_merge(&global_vars, &override_vars);

        let project = read_project_name(&project_dir)?;
        let mapped = map_vars(
            &project,
            &service.name,
            environment,
            &merged,
            provider,
            &self.providers,
        );
        if !mapped.has_location() {
            return Err(StackflowError::MissingLocation {
                global: global_path,
            });
        }

        let output_path = stack_file_path(&project_dir, environment);
        let state = StackState::load(&output_path)?.apply(&mapped)?;
        Ok((output_path, state))
    }

    fn generate(&self, service: &ServiceEntry, provider: &str, environment: &str) -> Result<PathBuf> {
        let (output_path, state) = self.generate_stack_state(service, provider, environment)?;
        state.write(&output_path, &StackHeader::new(environment, provider))?;
        info!(path = %output_path.display(), "Generated stack file");
        Ok(output_path)
    }

    async fn execute(&self, project_dir: &Path, options: &RunOptions) -> Result<()> {
        ensure_stack(&self.tool, project_dir, &options.environment).await?;

        let code = self
            .tool
            .run(
                project_dir,
                &options.environment,
                &options.command,
                &options.extra_args,
            )
            .await?;
        if code != 0 {
            return Err(StackflowError::Execution {
                command: options.command.clone(),
                code,
            });
        }
        Ok(())
    }
}

fn failure(
    service: &ServiceEntry,
    error: &StackflowError,
    generated_file: Option<PathBuf>,
) -> ProcessResult {
    error!(service = %service.name, kind = %error.kind(), "Service failed: {}", error);
    ProcessResult::failed(&service.name, error, generated_file)
}
