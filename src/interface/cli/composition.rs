//! 애플리케이션 조립(composition root) 모듈.

use crate::application::config::RunOptions;
use crate::application::ports::ConfigRepository;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::lint_change::LintChangeUseCase;
use crate::infrastructure::adapters::{
    ChangeSourceFactoryAdapter, ConsoleReporter, FsWorkspaceFactory, HttpConfigFetcher,
    JsonConfigRepository, LinterRunnerAdapter, WorkflowAnnotationRenderer,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    workspace_factory: FsWorkspaceFactory,
    change_source_factory: ChangeSourceFactoryAdapter,
    config_fetcher: HttpConfigFetcher,
    runner: LinterRunnerAdapter,
    renderer: WorkflowAnnotationRenderer,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            workspace_factory: FsWorkspaceFactory,
            change_source_factory: ChangeSourceFactoryAdapter,
            config_fetcher: HttpConfigFetcher::new(),
            runner: LinterRunnerAdapter,
            renderer: WorkflowAnnotationRenderer,
            reporter: ConsoleReporter::new(),
        }
    }
}

impl AppComposition {
    /// 설정 파일과 CLI 입력을 합친 debug 값. 설정을 읽지 못하면 CLI 값만 본다.
    pub fn debug_requested(&self, options: &RunOptions) -> bool {
        let base = self.config_repo.load().unwrap_or_default();
        options.debug_enabled(base)
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 변경 범위 린트 유스케이스를 생성한다.
    pub fn lint_usecase(&self) -> LintChangeUseCase<'_> {
        LintChangeUseCase {
            config_repo: &self.config_repo,
            workspace_factory: &self.workspace_factory,
            change_source_factory: &self.change_source_factory,
            config_fetcher: &self.config_fetcher,
            runner: &self.runner,
            renderer: &self.renderer,
            reporter: &self.reporter,
        }
    }
}
