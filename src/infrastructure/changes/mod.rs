//! 변경 목록(ChangeSet) 제공자 구현.
//! none/file/git/github 출처를 공통 `ChangeSource` 포트로 묶는다.

pub mod git_diff;
pub mod github;
pub mod json_file;
pub mod patch;

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::config::{ChangeSourceKind, Config};
use crate::application::ports::ChangeSource;
use crate::domain::changeset::ChangeSet;
use crate::domain::errors::ChangeSourceError;
use crate::domain::target::PullRequestRef;
use crate::infrastructure::config::resolve_host_token;

/// 변경 목록이 없는 실행(전체/명시 경로 모드에서 주로 사용).
pub struct NoChanges;

#[async_trait]
impl ChangeSource for NoChanges {
    async fn load(&self) -> Result<ChangeSet, ChangeSourceError> {
        Ok(ChangeSet::default())
    }
}

pub fn build_change_source(
    kind: &ChangeSourceKind,
    workspace_dir: &Path,
    config: &Config,
) -> Result<Box<dyn ChangeSource>> {
    // 설정에서 결정된 출처에 맞는 구현체를 선택한다.
    match kind {
        ChangeSourceKind::None => Ok(Box::new(NoChanges)),
        ChangeSourceKind::File { path } => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                workspace_dir.join(path)
            };
            Ok(Box::new(json_file::JsonFileChanges::new(path)))
        }
        ChangeSourceKind::Git { base_ref } => Ok(Box::new(git_diff::GitDiffChanges::new(
            workspace_dir.to_path_buf(),
            base_ref.clone(),
        ))),
        ChangeSourceKind::GitHub { pr_url } => {
            let target = PullRequestRef::parse(pr_url)
                .with_context(|| format!("invalid changes.pr_url '{pr_url}'"))?;
            let host_cfg = config.host_config(&target.host);
            let token = resolve_host_token(host_cfg)?;
            if let Some(source) = &token.source {
                tracing::debug!(host = %target.host, source = %source, "using host token");
            }
            let api_base = host_cfg.and_then(|h| h.api_base.clone());
            Ok(Box::new(github::GitHubPullChanges::new(
                target,
                token.token,
                api_base,
            )))
        }
    }
}
