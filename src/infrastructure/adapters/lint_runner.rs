//! 린터 실행 포트 구현 어댑터.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{LintRunner, LinterSpec, ToolOutput};
use crate::infrastructure::config::command_exists;
use crate::infrastructure::linter;

/// tokio 프로세스 기반 린터 실행 어댑터.
pub struct LinterRunnerAdapter;

#[async_trait]
impl LintRunner for LinterRunnerAdapter {
    fn is_available(&self, spec: &LinterSpec) -> bool {
        command_exists(&spec.command)
    }

    async fn run(&self, spec: &LinterSpec, args: &[String], cwd: &Path) -> Result<ToolOutput> {
        linter::run_linter_command(spec, args, cwd).await
    }
}
