//! 사용자 진입 계층(CLI).

pub mod cli;
