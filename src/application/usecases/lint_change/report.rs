//! 린터 본 실행과 결과 필터링/주석 출력 단계.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{AnnotationRenderer, LintRunner, LinterSpec, Reporter};
use crate::domain::errors::LintError;
use crate::domain::finding::{LintReport, filter_report, parse_report};
use crate::domain::run_config::RunConfig;
use crate::domain::scope::ScopeResult;

/// 본 실행 결과 묶음.
pub struct ReportOutcome {
    pub report: LintReport,
    pub annotations: Vec<String>,
}

/// 계산된 인자로 린터를 실행하고, 변경 라인 범위로 결과를 걸러 출력한다.
pub async fn run_and_report(
    runner: &dyn LintRunner,
    renderer: &dyn AnnotationRenderer,
    reporter: &dyn Reporter,
    spec: &LinterSpec,
    run_config: &RunConfig,
    scope: &ScopeResult,
    cwd: &Path,
) -> Result<ReportOutcome> {
    let output = runner
        .run(spec, &scope.tool_arguments, cwd)
        .await
        .context("failed to run linter")?;

    if run_config.debug && !output.stderr.trim().is_empty() {
        reporter.kv("Linter stderr", output.stderr.trim());
    }

    let report = match parse_report(&output.stdout) {
        Ok(report) => report,
        // --no-exit 상태에서 실패 코드는 설정 오류 등 런타임 오류를 뜻한다.
        Err(_) if !output.success => {
            return Err(LintError::LinterFailed {
                status: output.status_label(),
                stderr: output.stderr.trim().to_string(),
            }
            .into());
        }
        Err(err) => return Err(err.into()),
    };

    let total: usize = report.values().map(Vec::len).sum();
    let report = filter_report(
        report,
        &scope.line_index,
        run_config.filters_to_modified_lines(),
    );
    let kept: usize = report.values().map(Vec::len).sum();
    reporter.kv("Findings", &format!("{kept} reported / {total} total"));
    tracing::debug!(total, kept, "linter findings filtered");

    let annotations = renderer.render(&report);
    for line in &annotations {
        reporter.raw(line);
    }

    Ok(ReportOutcome {
        report,
        annotations,
    })
}
