//! 외부 시스템(파일시스템, git, GitHub API, 린터 프로세스) 연동 계층.

pub mod adapters;
pub mod changes;
pub mod config;
pub mod fetch;
pub mod linter;
pub mod render;
