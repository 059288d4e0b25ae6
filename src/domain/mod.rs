//! Domain layer
//! 변경 범위/실행 설정/린터 호출 규칙을 외부 의존성 없이 표현한다.

pub mod changeset;
pub mod errors;
pub mod finding;
pub mod linter;
pub mod run_config;
pub mod scope;
pub mod target;
