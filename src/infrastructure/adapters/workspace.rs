//! 작업 공간 파일시스템 포트 구현 어댑터.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::application::ports::{Workspace, WorkspaceFactory};

/// 실제 디렉터리를 루트로 하는 작업 공간.
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    /// 루트를 절대 경로로 고정한다. 디렉터리가 아니면 실패한다.
    pub fn open(root: &Path) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("workspace directory not found: {}", root.display()))?;
        if !root.is_dir() {
            bail!("workspace is not a directory: {}", root.display());
        }
        Ok(Self { root })
    }
}

impl Workspace for FsWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, relative: &str) -> bool {
        let relative = relative.trim();
        !relative.is_empty() && self.resolve(relative).exists()
    }
}

pub struct FsWorkspaceFactory;

impl WorkspaceFactory for FsWorkspaceFactory {
    fn open(&self, root: &Path) -> Result<Box<dyn Workspace>> {
        Ok(Box::new(FsWorkspace::open(root)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existence_is_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/a.md"), "# A\n").unwrap();

        let workspace = FsWorkspace::open(dir.path()).unwrap();
        assert!(workspace.exists("docs"));
        assert!(workspace.exists("./docs/a.md"));
        assert!(!workspace.exists("docs/b.md"));
        assert!(!workspace.exists(""));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsWorkspace::open(&dir.path().join("nope")).is_err());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(FsWorkspace::open(&file).is_err());
    }
}
