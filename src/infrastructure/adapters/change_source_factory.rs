//! 변경 목록 제공자 팩토리 포트 구현 어댑터.

use std::path::Path;

use anyhow::Result;

use crate::application::config::{ChangeSourceKind, Config};
use crate::application::ports::{ChangeSource, ChangeSourceFactory};
use crate::infrastructure::changes;

/// 설정된 출처(none/file/git/github)에 맞는 제공자를 만든다.
pub struct ChangeSourceFactoryAdapter;

impl ChangeSourceFactory for ChangeSourceFactoryAdapter {
    fn build(
        &self,
        kind: &ChangeSourceKind,
        workspace_dir: &Path,
        config: &Config,
    ) -> Result<Box<dyn ChangeSource>> {
        changes::build_change_source(kind, workspace_dir, config)
    }
}
