//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{ChangeSourceKind, Config};
use crate::domain::changeset::ChangeSet;
use crate::domain::errors::ChangeSourceError;
use crate::domain::finding::LintReport;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 파일 단위 변경 목록 제공자 포트.
#[async_trait]
pub trait ChangeSource: Send + Sync {
    async fn load(&self) -> Result<ChangeSet, ChangeSourceError>;
}

/// 설정에 맞는 변경 목록 제공자를 생성하는 팩토리 포트.
pub trait ChangeSourceFactory: Send + Sync {
    fn build(
        &self,
        kind: &ChangeSourceKind,
        workspace_dir: &Path,
        config: &Config,
    ) -> Result<Box<dyn ChangeSource>>;
}

/// 원격(URL) 또는 로컬 위치의 린터 설정 내용을 가져오는 포트.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<String>;
}

/// 린터 명령 1회 실행 결과.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub success: bool,
    /// 시그널 종료 등으로 코드가 없으면 None
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn status_label(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// 린터 실행 사양.
#[derive(Debug, Clone)]
pub struct LinterSpec {
    pub command: String,
    pub timeout: Option<Duration>,
}

/// 외부 린터 프로세스 실행 포트.
#[async_trait]
pub trait LintRunner: Send + Sync {
    fn is_available(&self, spec: &LinterSpec) -> bool;
    async fn run(&self, spec: &LinterSpec, args: &[String], cwd: &Path) -> Result<ToolOutput>;
}

/// 작업 공간 파일시스템 조회 포트.
pub trait Workspace: Send + Sync {
    fn root(&self) -> &Path;
    /// 작업 공간 기준 상대 경로가 존재하는지 확인한다.
    fn exists(&self, relative: &str) -> bool;
    fn resolve(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }
}

/// 작업 공간 경로를 받아 `Workspace`를 생성하는 팩토리 포트.
pub trait WorkspaceFactory: Send + Sync {
    fn open(&self, root: &Path) -> Result<Box<dyn Workspace>>;
}

/// 필터링된 결과를 CI 주석(annotation) 라인으로 렌더링하는 포트.
pub trait AnnotationRenderer: Send + Sync {
    fn render(&self, report: &LintReport) -> Vec<String>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn warn(&self, message: &str);
    fn raw(&self, line: &str);
}
