//! 유스케이스 모음.

pub mod inspect_config;
pub mod lint_change;
