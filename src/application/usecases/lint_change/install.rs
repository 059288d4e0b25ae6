//! 스타일 패키지 순차 설치 단계.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LintRunner, LinterSpec, Reporter};
use crate::domain::errors::LintError;
use crate::domain::linter::{config_flags, install_arguments};
use crate::domain::run_config::RunConfig;

/// 목록 순서대로 한 번에 하나씩 설치한다.
/// 실패 종료 코드가 나오면 남은 설치를 중단하고 stderr를 담아 반환한다.
pub async fn install_styles(
    runner: &dyn LintRunner,
    reporter: &dyn Reporter,
    spec: &LinterSpec,
    run_config: &RunConfig,
    cwd: &Path,
) -> Result<usize> {
    // 설치 단계도 본 실행과 같은 외부 설정을 따라야 설치 위치가 맞는다.
    let flags = config_flags(run_config.external_config_path.as_deref());
    let mut installed = 0;

    for style in &run_config.style_packages {
        reporter.status("Styles", &format!("installing {} ({})", style.name, style.source));
        let args = install_arguments(&flags, style);
        tracing::debug!(?args, "installing style package");

        let output = runner
            .run(spec, &args, cwd)
            .await
            .with_context(|| format!("failed to run install for style '{}'", style.name))?;

        if !output.success {
            return Err(LintError::StyleInstall {
                name: style.name.clone(),
                status: output.status_label(),
                stderr: output.stderr.trim().to_string(),
            }
            .into());
        }
        installed += 1;
    }

    Ok(installed)
}
