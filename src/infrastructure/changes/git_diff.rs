//! 로컬 git diff 기반 제공자.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::patch::parse_unified_diff;
use crate::application::ports::ChangeSource;
use crate::domain::changeset::ChangeSet;
use crate::domain::errors::ChangeSourceError;

pub struct GitDiffChanges {
    workspace_dir: PathBuf,
    base_ref: String,
}

impl GitDiffChanges {
    pub fn new(workspace_dir: PathBuf, base_ref: String) -> Self {
        Self {
            workspace_dir,
            base_ref,
        }
    }

    fn diff_arguments(&self) -> Vec<String> {
        // 비ASCII 경로를 8진 이스케이프 없이 그대로 받는다(특수 문자는 여전히 따옴표로 감싸진다).
        vec![
            "-c".to_string(),
            "core.quotePath=false".to_string(),
            "diff".to_string(),
            "--unified=0".to_string(),
            "--no-color".to_string(),
            "--no-ext-diff".to_string(),
            format!("{}...HEAD", self.base_ref),
        ]
    }
}

#[async_trait]
impl ChangeSource for GitDiffChanges {
    async fn load(&self) -> Result<ChangeSet, ChangeSourceError> {
        let args = self.diff_arguments();
        tracing::debug!(?args, cwd = %self.workspace_dir.display(), "running git diff");

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.workspace_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| ChangeSourceError::Unreachable(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChangeSourceError::Unreachable(format!(
                "git diff against '{}' failed ({}): {}",
                self.base_ref,
                output.status,
                stderr.trim()
            )));
        }

        let diff = String::from_utf8(output.stdout)
            .map_err(|err| ChangeSourceError::Malformed(format!("git diff is not UTF-8: {err}")))?;
        Ok(ChangeSet::from_records(parse_unified_diff(&diff)))
    }
}
