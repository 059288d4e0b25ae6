//! 주석 렌더러 포트 구현 어댑터.

use crate::application::ports::AnnotationRenderer;
use crate::domain::finding::LintReport;
use crate::infrastructure::render;

/// CI workflow command 형식 렌더러 어댑터.
pub struct WorkflowAnnotationRenderer;

impl AnnotationRenderer for WorkflowAnnotationRenderer {
    fn render(&self, report: &LintReport) -> Vec<String> {
        render::render_report_annotations(report)
    }
}
