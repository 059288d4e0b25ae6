//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod annotation_renderer;
mod change_source_factory;
mod config_repository;
mod lint_runner;
mod reporter;
mod workspace;

pub use crate::infrastructure::fetch::HttpConfigFetcher;
pub use annotation_renderer::WorkflowAnnotationRenderer;
pub use change_source_factory::ChangeSourceFactoryAdapter;
pub use config_repository::JsonConfigRepository;
pub use lint_runner::LinterRunnerAdapter;
pub use reporter::ConsoleReporter;
pub use workspace::{FsWorkspace, FsWorkspaceFactory};
