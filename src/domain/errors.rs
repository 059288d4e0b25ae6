//! 도메인 오류 타입.

use thiserror::Error;

/// 변경 목록 제공자(diff source) 오류.
#[derive(Debug, Error)]
pub enum ChangeSourceError {
    #[error("change source is unreachable: {0}")]
    Unreachable(String),
    #[error("change source returned malformed data: {0}")]
    Malformed(String),
}

/// 린터 실행 단계에서 run 전체를 중단시키는 오류.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to install style '{name}' ({status}): {stderr}")]
    StyleInstall {
        name: String,
        status: String,
        stderr: String,
    },
    #[error("linter exited with {status}: {stderr}")]
    LinterFailed { status: String, stderr: String },
    #[error("linter output is not a valid JSON report: {0}")]
    InvalidReport(String),
    #[error("{count} error-level finding(s) on modified lines")]
    ErrorFindings { count: usize },
}
