//! 린터 JSON 결과 모델과 변경 라인 기준 필터.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::changeset::{LineIndex, normalize_path};
use crate::domain::errors::LintError;

/// 린터가 보고한 단일 지적 사항.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Finding {
    pub check: String,
    pub message: String,
    pub severity: String,
    pub line: usize,
    /// 라인 내 시작/끝 컬럼(1부터)
    #[serde(default)]
    pub span: Vec<usize>,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "Match")]
    pub matched: String,
}

impl Finding {
    pub fn is_error(&self) -> bool {
        self.severity.eq_ignore_ascii_case("error")
    }

    pub fn column(&self) -> usize {
        self.span.first().copied().unwrap_or(1).max(1)
    }
}

/// 파일 경로 -> 지적 사항 목록.
pub type LintReport = BTreeMap<String, Vec<Finding>>;

/// 린터 stdout을 파싱한다. 빈 출력은 지적 사항 없음으로 본다.
pub fn parse_report(raw: &str) -> Result<LintReport, LintError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(LintReport::new());
    }

    let parsed: BTreeMap<String, Vec<Finding>> =
        serde_json::from_str(raw).map_err(|err| LintError::InvalidReport(err.to_string()))?;

    let mut report = LintReport::new();
    for (path, findings) in parsed {
        report
            .entry(normalize_path(&path))
            .or_default()
            .extend(findings);
    }
    Ok(report)
}

/// `only_modified`이면 인덱스에 있는 라인의 지적만 남긴다.
pub fn filter_report(report: LintReport, line_index: &LineIndex, only_modified: bool) -> LintReport {
    if !only_modified {
        return report;
    }

    report
        .into_iter()
        .filter_map(|(path, findings)| {
            let lines = line_index.get(&path)?;
            let kept: Vec<Finding> = findings
                .into_iter()
                .filter(|finding| lines.contains(&finding.line))
                .collect();
            if kept.is_empty() { None } else { Some((path, kept)) }
        })
        .collect()
}

pub fn count_errors(report: &LintReport) -> usize {
    report
        .values()
        .flat_map(|findings| findings.iter())
        .filter(|finding| finding.is_error())
        .count()
}
