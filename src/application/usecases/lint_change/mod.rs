//! 변경 범위 린트 실행의 전체 오케스트레이션 유스케이스.
//!
//! 모든 외부 호출은 순서대로 하나씩 완료를 기다린 뒤 다음 단계로 넘어간다.

mod install;
mod report;
mod settings;

use anyhow::{Context, Result, bail};
use serde_json::json;

use crate::application::config::RunOptions;
use crate::application::ports::{
    AnnotationRenderer, ChangeSourceFactory, ConfigFetcher, ConfigRepository, LintRunner,
    LinterSpec, Reporter, WorkspaceFactory,
};
use crate::domain::errors::LintError;
use crate::domain::finding::{LintReport, count_errors};
use crate::domain::linter::{parse_version, version_arguments};
use crate::domain::run_config::RunConfig;
use crate::domain::scope::{ScopeResult, resolve_scope};

pub use install::install_styles;
pub use report::{ReportOutcome, run_and_report};
pub use settings::{ResolvedSettings, resolve_settings};

/// 한 번의 run 결과.
#[derive(Debug, Clone)]
pub struct LintOutcome {
    pub linter_version: Option<String>,
    pub run_config: RunConfig,
    pub scope: ScopeResult,
    /// 변경 라인 기준으로 걸러진 결과(dry-run이면 비어 있음)
    pub report: LintReport,
    pub annotations: Vec<String>,
    pub warnings: Vec<String>,
}

/// 설정 해석부터 스타일 설치, 범위 계산, 린터 실행, 결과 필터링까지 조율한다.
pub struct LintChangeUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub workspace_factory: &'a dyn WorkspaceFactory,
    pub change_source_factory: &'a dyn ChangeSourceFactory,
    pub config_fetcher: &'a dyn ConfigFetcher,
    pub runner: &'a dyn LintRunner,
    pub renderer: &'a dyn AnnotationRenderer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> LintChangeUseCase<'a> {
    /// 린트 본 실행 진입점.
    /// dry-run이면 범위 계산 결과만 출력하고 설치/본 실행은 건너뛴다.
    pub async fn execute(&self, options: RunOptions) -> Result<LintOutcome> {
        self.reporter.section("Load Config");
        let mut config = self
            .config_repo
            .load()
            .context("failed to load lintpilot config")?;
        config.merge_from(options.overrides.clone());

        let workspace = self.workspace_factory.open(&options.workspace_dir)?;
        let spec = LinterSpec {
            command: config.linter_command(),
            timeout: config.timeout(),
        };
        self.reporter
            .kv("Workspace", &workspace.root().display().to_string());
        self.reporter.kv("Linter", &spec.command);
        if options.dry_run {
            self.reporter.kv("Mode", "dry-run");
        }

        let linter_version = if options.dry_run {
            None
        } else {
            if !self.runner.is_available(&spec) {
                bail!(
                    "linter command not found: '{}'. Set defaults.linter_command or install it in PATH",
                    spec.command
                );
            }
            let probe = self
                .runner
                .run(&spec, &version_arguments(), workspace.root())
                .await
                .context("failed to probe linter version")?;
            let version = parse_version(&probe.stdout);
            self.reporter
                .kv("Version", version.as_deref().unwrap_or("unknown"));
            version
        };

        // 임시 설정 파일은 settings가 drop될 때(모든 종료 경로) 삭제된다.
        self.reporter.section("Resolve Inputs");
        let raw = config.raw_inputs();
        let settings = resolve_settings(
            self.config_fetcher,
            self.reporter,
            workspace.as_ref(),
            &raw,
        )
        .await;
        let run_config = settings.run_config.clone();
        self.reporter.kv("Files", run_config.selection.label());
        self.reporter
            .kv("Styles", &run_config.style_packages.len().to_string());
        if let Some(path) = &run_config.external_config_path {
            self.reporter.kv("Config", &path.display().to_string());
        }

        self.reporter.section("Load Changes");
        let kind = config.change_source_kind()?;
        let source = self
            .change_source_factory
            .build(&kind, workspace.root(), &config)?;
        let change_set = source.load().await.context("failed to load change set")?;
        self.reporter
            .kv("Changed", &format!("{} file(s)", change_set.len()));

        if !options.dry_run && !run_config.style_packages.is_empty() {
            self.reporter.section("Install Styles");
            install_styles(
                self.runner,
                self.reporter,
                &spec,
                &run_config,
                workspace.root(),
            )
            .await?;
        }

        self.reporter.section("Resolve Scope");
        let scope = resolve_scope(&change_set, &run_config, |path| workspace.exists(path));
        self.reporter.kv("Targets", &scope.targets.len().to_string());
        if run_config.debug {
            self.reporter.kv("Arguments", &scope.tool_arguments.join(" "));
        }
        tracing::debug!(args = ?scope.tool_arguments, "resolved linter arguments");

        if options.dry_run {
            let view = json!({ "run_config": run_config, "scope": scope });
            self.reporter.raw(&serde_json::to_string_pretty(&view)?);
            return Ok(LintOutcome {
                linter_version,
                run_config,
                scope,
                report: LintReport::new(),
                annotations: Vec::new(),
                warnings: settings.warnings,
            });
        }

        self.reporter.section("Lint");
        let ReportOutcome {
            report,
            annotations,
        } = run_and_report(
            self.runner,
            self.renderer,
            self.reporter,
            &spec,
            &run_config,
            &scope,
            workspace.root(),
        )
        .await?;

        if run_config.fail_on_error {
            let count = count_errors(&report);
            if count > 0 {
                return Err(LintError::ErrorFindings { count }.into());
            }
        }

        Ok(LintOutcome {
            linter_version,
            run_config,
            scope,
            report,
            annotations,
            warnings: settings.warnings,
        })
    }
}
