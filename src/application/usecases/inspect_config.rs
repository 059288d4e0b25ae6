//! 병합된 설정과 린터/변경 목록 준비 상태를 점검하는 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

/// `lintpilot config` 출력용 JSON을 만든다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
