//! 実行全体の結果と終了コード

use super::result::ProcessResult;
use crate::catalog::CatalogIssue;

/// 実行全体の結果区分
///
/// 優先順位: ConfigError > Failure > Success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 全サービスが成功
    Success,
    /// 1 つ以上のサービスが失敗
    Failure,
    /// カタログ・対象解決の段階で失敗（サービスは未処理）
    ConfigError,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
            Outcome::ConfigError => 2,
        }
    }
}

/// 処理したサービスの結果一覧
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    results: Vec<ProcessResult>,
}

impl RunSummary {
    pub fn new(results: Vec<ProcessResult>) -> Self {
        Self { results }
    }

    /// カタログ順の全結果
    pub fn results(&self) -> &[ProcessResult] {
        &self.results
    }

    pub fn succeeded(&self) -> Vec<&ProcessResult> {
        self.results.iter().filter(|r| r.success).collect()
    }

    pub fn failed(&self) -> Vec<&ProcessResult> {
        self.results.iter().filter(|r| !r.success).collect()
    }

    pub fn outcome(&self) -> Outcome {
        if self.results.iter().all(|r| r.success) {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// オーケストレーターの最終状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// カタログ検証に失敗
    CatalogInvalid(Vec<CatalogIssue>),
    /// 指定されたサービスがカタログに存在しない
    ServiceNotFound { name: String, available: Vec<String> },
    /// 対象サービスをすべて処理した
    Completed(RunSummary),
}

impl RunOutcome {
    pub fn outcome(&self) -> Outcome {
        match self {
            RunOutcome::CatalogInvalid(_) | RunOutcome::ServiceNotFound { .. } => {
                Outcome::ConfigError
            }
            RunOutcome::Completed(summary) => summary.outcome(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.outcome().exit_code()
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::Completed(summary) => Some(summary),
            _ => None,
        }
    }
}
