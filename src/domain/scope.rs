//! 린트 범위 해석 엔진.
//!
//! ChangeSet + RunConfig로부터 린터 호출 인자와 변경 라인 인덱스를 계산한다.
//! 파일 존재 여부는 호출자가 넘긴 검사 함수로만 확인한다.

use serde::Serialize;

use crate::domain::changeset::{ChangeSet, LineIndex, path_within};
use crate::domain::linter::{EMPTY_TARGET_PLACEHOLDER, base_arguments};
use crate::domain::run_config::{FileSelection, RunConfig};

/// 범위 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeResult {
    /// 플래그 + 대상 목록 순서의 전체 린터 인자
    pub tool_arguments: Vec<String>,
    /// `tool_arguments` 끝에 붙은 위치 인자(대상)
    pub targets: Vec<String>,
    /// 결과 필터링에 쓰는 파일별 변경 라인
    pub line_index: LineIndex,
}

impl ScopeResult {
    /// 실제 대상 대신 자리표시자만 넘기는지 여부.
    pub fn is_placeholder(&self) -> bool {
        self.targets.len() == 1 && self.targets[0] == EMPTY_TARGET_PLACEHOLDER
    }
}

/// `exists`는 작업 공간 기준 상대 경로의 존재 여부를 판단한다.
pub fn resolve_scope(
    change_set: &ChangeSet,
    run_config: &RunConfig,
    exists: impl Fn(&str) -> bool,
) -> ScopeResult {
    let mut tool_arguments = base_arguments(run_config.external_config_path.as_deref());

    let (targets, line_index) = match &run_config.selection {
        FileSelection::OnlyModified => {
            let line_index = change_set.line_index_where(|path| exists(path));
            let mut targets: Vec<String> = line_index.keys().cloned().collect();
            if targets.is_empty() {
                targets.push(EMPTY_TARGET_PLACEHOLDER.to_string());
            }
            (targets, line_index)
        }
        FileSelection::All => (vec![".".to_string()], change_set.line_index()),
        FileSelection::ExplicitPath(target) => (
            vec![target.clone()],
            change_set.line_index_where(|path| path_within(path, target)),
        ),
        FileSelection::ExplicitList(list) => (
            list.clone(),
            change_set.line_index_where(|path| list.iter().any(|target| path_within(path, target))),
        ),
    };

    tool_arguments.extend(targets.iter().cloned());

    ScopeResult {
        tool_arguments,
        targets,
        line_index,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use super::*;
    use crate::domain::changeset::ChangeRecord;

    fn run_config(selection: FileSelection) -> RunConfig {
        RunConfig {
            external_config_path: None,
            style_packages: Vec::new(),
            selection,
            debug: false,
            fail_on_error: false,
        }
    }

    fn change_set() -> ChangeSet {
        ChangeSet::from_records([
            ChangeRecord::new("docs/a.md", [1, 2]),
            ChangeRecord::new("docs/gone.md", [5]),
            ChangeRecord::new("README.md", [10]),
            ChangeRecord::new("docs/a.md", [9]),
        ])
    }

    #[test]
    fn only_modified_keeps_existing_paths() {
        let scope = resolve_scope(
            &change_set(),
            &run_config(FileSelection::OnlyModified),
            |path| path != "docs/gone.md",
        );

        assert_eq!(scope.targets, vec!["README.md", "docs/a.md"]);
        assert_eq!(
            scope.tool_arguments,
            vec!["--no-exit", "--output=JSON", "README.md", "docs/a.md"]
        );
        assert_eq!(
            scope.line_index.get("docs/a.md"),
            Some(&BTreeSet::from([1, 2, 9]))
        );
        assert!(!scope.line_index.contains_key("docs/gone.md"));
    }

    #[test]
    fn only_modified_without_survivors_uses_placeholder() {
        let scope = resolve_scope(
            &change_set(),
            &run_config(FileSelection::OnlyModified),
            |_| false,
        );

        assert!(scope.is_placeholder());
        assert_eq!(
            scope.tool_arguments,
            vec!["--no-exit", "--output=JSON", EMPTY_TARGET_PLACEHOLDER]
        );
        assert!(scope.line_index.is_empty());
    }

    #[test]
    fn all_mode_targets_workspace_root() {
        let scope = resolve_scope(&change_set(), &run_config(FileSelection::All), |_| false);
        assert_eq!(scope.targets, vec!["."]);
        assert_eq!(scope.line_index.len(), 3);
    }

    #[test]
    fn explicit_path_filters_line_index() {
        let scope = resolve_scope(
            &change_set(),
            &run_config(FileSelection::ExplicitPath("docs".to_string())),
            |_| true,
        );
        assert_eq!(scope.targets, vec!["docs"]);
        assert_eq!(
            scope.line_index.keys().collect::<Vec<_>>(),
            vec!["docs/a.md", "docs/gone.md"]
        );
    }

    #[test]
    fn explicit_list_keeps_given_order() {
        let scope = resolve_scope(
            &change_set(),
            &run_config(FileSelection::ExplicitList(vec![
                "b.md".to_string(),
                "README.md".to_string(),
            ])),
            |_| true,
        );
        assert_eq!(
            scope.tool_arguments,
            vec!["--no-exit", "--output=JSON", "b.md", "README.md"]
        );
        assert_eq!(scope.line_index.keys().collect::<Vec<_>>(), vec!["README.md"]);
    }

    #[test]
    fn config_flags_precede_targets() {
        let mut config = run_config(FileSelection::All);
        config.external_config_path = Some(PathBuf::from("/tmp/x.ini"));
        let scope = resolve_scope(&ChangeSet::default(), &config, |_| true);
        assert_eq!(
            scope.tool_arguments,
            vec![
                "--no-exit",
                "--output=JSON",
                "--mode-rev-compat",
                "--config=/tmp/x.ini",
                "."
            ]
        );
    }
}
