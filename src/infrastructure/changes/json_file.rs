//! JSON 변경 파일 기반 제공자.
//!
//! 지원 형식:
//! - `[{"path": "docs/a.md", "lines": [3, 4]}]`
//! - `{"docs/a.md": [3, 4]}`

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::ChangeSource;
use crate::domain::changeset::{ChangeRecord, ChangeSet};
use crate::domain::errors::ChangeSourceError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChangeDocument {
    Records(Vec<RecordEntry>),
    ByPath(BTreeMap<String, Vec<i64>>),
}

#[derive(Debug, Deserialize)]
struct RecordEntry {
    path: String,
    #[serde(default)]
    lines: Vec<i64>,
}

pub struct JsonFileChanges {
    path: PathBuf,
}

impl JsonFileChanges {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ChangeSource for JsonFileChanges {
    async fn load(&self) -> Result<ChangeSet, ChangeSourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            ChangeSourceError::Unreachable(format!("{}: {err}", self.path.display()))
        })?;
        parse_change_document(&content).map_err(|err| {
            ChangeSourceError::Malformed(format!("{}: {err}", self.path.display()))
        })
    }
}

/// 변경 파일 내용을 ChangeSet으로 변환한다. 0 이하 라인 번호는 버린다.
pub fn parse_change_document(content: &str) -> Result<ChangeSet, serde_json::Error> {
    let records: Vec<ChangeRecord> = match serde_json::from_str(content)? {
        ChangeDocument::Records(entries) => entries
            .into_iter()
            .map(|entry| ChangeRecord::new(entry.path, positive(entry.lines)))
            .collect(),
        ChangeDocument::ByPath(map) => map
            .into_iter()
            .map(|(path, lines)| ChangeRecord::new(path, positive(lines)))
            .collect(),
    };
    Ok(ChangeSet::from_records(records))
}

fn positive(lines: Vec<i64>) -> impl Iterator<Item = usize> {
    lines.into_iter().filter_map(|line| usize::try_from(line).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(set: &ChangeSet, path: &str) -> Vec<usize> {
        set.lines(path)
            .map(|l| l.iter().copied().collect())
            .unwrap_or_default()
    }

    #[test]
    fn parses_record_list_and_merges_duplicates() {
        let set = parse_change_document(
            r#"[
                {"path": "./docs/a.md", "lines": [4, 2, -1, 0]},
                {"path": "docs/a.md", "lines": [9]},
                {"path": "docs/renamed.md"}
            ]"#,
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(lines(&set, "docs/a.md"), vec![2, 4, 9]);
        assert!(lines(&set, "docs/renamed.md").is_empty());
    }

    #[test]
    fn parses_path_map() {
        let set = parse_change_document(r#"{"README.md": [1, 3]}"#).unwrap();
        assert_eq!(lines(&set, "README.md"), vec![1, 3]);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_change_document(r#"{"README.md": "all"}"#).is_err());
        assert!(parse_change_document("not json").is_err());
    }

    #[tokio::test]
    async fn missing_file_is_unreachable_and_bad_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileChanges::new(dir.path().join("none.json"));
        assert!(matches!(
            missing.load().await,
            Err(ChangeSourceError::Unreachable(_))
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1, 2").unwrap();
        assert!(matches!(
            JsonFileChanges::new(bad).load().await,
            Err(ChangeSourceError::Malformed(_))
        ));
    }
}
