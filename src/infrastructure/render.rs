//! CI workflow command 형식의 주석(annotation) 렌더링 모듈.

use crate::domain::finding::{Finding, LintReport};

/// 심각도 문자열을 workflow command 레벨로 변환한다.
fn annotation_level(severity: &str) -> &'static str {
    if severity.eq_ignore_ascii_case("error") {
        "error"
    } else if severity.eq_ignore_ascii_case("warning") {
        "warning"
    } else {
        "notice"
    }
}

/// 지적 사항 하나를 `::<level> file=..,line=..,col=..,title=..::<message>` 라인으로 만든다.
pub fn render_annotation(path: &str, finding: &Finding) -> String {
    format!(
        "::{} file={},line={},col={},title={}::{}",
        annotation_level(&finding.severity),
        escape_property(path),
        finding.line,
        finding.column(),
        escape_property(&finding.check),
        escape_data(&finding.message),
    )
}

/// 경로 순, 파일 내 라인 순으로 모든 주석 라인을 생성한다.
pub fn render_report_annotations(report: &LintReport) -> Vec<String> {
    report
        .iter()
        .flat_map(|(path, findings)| {
            let mut ordered: Vec<&Finding> = findings.iter().collect();
            ordered.sort_by_key(|f| (f.line, f.column()));
            ordered
                .into_iter()
                .map(|finding| render_annotation(path, finding))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
