//! 외부 린터 프로세스 실행 계층.

pub mod command_runner;

pub use command_runner::run_linter_command;
