//! 변경 파일/라인 목록(ChangeSet) 모델.

use std::collections::{BTreeMap, BTreeSet};

/// 파일 경로 -> 변경 라인 집합.
pub type LineIndex = BTreeMap<String, BTreeSet<usize>>;

/// 변경된 파일 하나와 새로 추가/수정된 라인(1부터 시작).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    pub modified_lines: BTreeSet<usize>,
}

impl ChangeRecord {
    /// 경로를 정규화하고 0번 라인은 버린다.
    pub fn new(path: impl AsRef<str>, lines: impl IntoIterator<Item = usize>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            modified_lines: lines.into_iter().filter(|line| *line > 0).collect(),
        }
    }
}

/// 한 번의 run에서 사용하는 변경 목록. 생성 후에는 변경하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    records: LineIndex,
}

impl ChangeSet {
    /// 같은 경로가 여러 번 보고되면 라인 집합을 합친다(merge).
    pub fn from_records(records: impl IntoIterator<Item = ChangeRecord>) -> Self {
        let mut merged = LineIndex::new();
        for record in records {
            let path = normalize_path(&record.path);
            if path.is_empty() {
                continue;
            }
            merged
                .entry(path)
                .or_default()
                .extend(record.modified_lines.into_iter().filter(|line| *line > 0));
        }
        Self { records: merged }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 경로 오름차순으로 순회한다.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn lines(&self, path: &str) -> Option<&BTreeSet<usize>> {
        self.records.get(&normalize_path(path))
    }

    pub fn line_index(&self) -> LineIndex {
        self.records.clone()
    }

    /// `keep`을 만족하는 경로만 남긴 라인 인덱스를 만든다.
    pub fn line_index_where(&self, keep: impl Fn(&str) -> bool) -> LineIndex {
        self.records
            .iter()
            .filter(|(path, _)| keep(path.as_str()))
            .map(|(path, lines)| (path.clone(), lines.clone()))
            .collect()
    }
}

/// 앞쪽 `./`와 공백을 제거한 저장소 상대 경로.
pub fn normalize_path(raw: &str) -> String {
    let mut path = raw.trim();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.to_string()
}

/// `path`가 `scope`와 같거나 그 하위 경로인지 판단한다.
pub fn path_within(path: &str, scope: &str) -> bool {
    let scope = normalize_path(scope);
    let scope = scope.trim_end_matches('/');
    if scope.is_empty() || scope == "." {
        return true;
    }

    let path = normalize_path(path);
    path == scope
        || path
            .strip_prefix(scope)
            .is_some_and(|rest| rest.starts_with('/'))
}
