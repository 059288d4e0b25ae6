//! 외부 린터 CLI 인자 문법.

use std::path::Path;

use crate::domain::run_config::StylePackage;

/// 린터 자체 종료 코드를 실패 신호로 쓰지 않도록 한다.
pub const NO_EXIT_FLAG: &str = "--no-exit";
/// 기계가 읽을 수 있는 JSON 출력.
pub const JSON_OUTPUT_FLAG: &str = "--output=JSON";
/// 외부 설정 파일을 쓸 때 함께 넘기는 호환 플래그.
pub const COMPAT_FLAG: &str = "--mode-rev-compat";
pub const VERSION_FLAG: &str = "-v";
pub const INSTALL_SUBCOMMAND: &str = "install";
/// 대상 파일이 하나도 없을 때 넘기는 자리표시자.
/// 린터는 이를 빈 텍스트로 처리하고 표준 입력을 기다리지 않고 종료한다.
pub const EMPTY_TARGET_PLACEHOLDER: &str = "{}";

/// 외부 설정 파일 경로가 있으면 `[--mode-rev-compat, --config=<path>]`를 만든다.
pub fn config_flags(external_config: Option<&Path>) -> Vec<String> {
    match external_config {
        Some(path) => vec![
            COMPAT_FLAG.to_string(),
            format!("--config={}", path.display()),
        ],
        None => Vec::new(),
    }
}

/// 본 실행의 기본 인자(고정 플래그 + 설정 플래그).
pub fn base_arguments(external_config: Option<&Path>) -> Vec<String> {
    let mut args = vec![NO_EXIT_FLAG.to_string(), JSON_OUTPUT_FLAG.to_string()];
    args.extend(config_flags(external_config));
    args
}

/// 스타일 설치 인자. 설정 플래그가 있으면 앞에 붙인다.
pub fn install_arguments(config_flags: &[String], style: &StylePackage) -> Vec<String> {
    let mut args = config_flags.to_vec();
    args.push(INSTALL_SUBCOMMAND.to_string());
    args.push(style.name.clone());
    args.push(style.source.clone());
    args
}

pub fn version_arguments() -> Vec<String> {
    vec![VERSION_FLAG.to_string()]
}

/// 버전 출력의 마지막 공백 구분 토큰을 버전으로 본다.
pub fn parse_version(output: &str) -> Option<String> {
    output.split_whitespace().last().map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_arguments_without_external_config() {
        assert_eq!(base_arguments(None), vec!["--no-exit", "--output=JSON"]);
    }

    #[test]
    fn base_arguments_with_external_config() {
        let args = base_arguments(Some(Path::new("/tmp/lint.ini")));
        assert_eq!(
            args,
            vec![
                "--no-exit",
                "--output=JSON",
                "--mode-rev-compat",
                "--config=/tmp/lint.ini"
            ]
        );
    }

    #[test]
    fn install_arguments_carry_config_flags_first() {
        let style = StylePackage::from_source("https://x/y/Foo.zip").unwrap();
        let flags = config_flags(Some(Path::new("/tmp/c.ini")));
        assert_eq!(
            install_arguments(&flags, &style),
            vec![
                "--mode-rev-compat",
                "--config=/tmp/c.ini",
                "install",
                "Foo",
                "https://x/y/Foo.zip"
            ]
        );
        assert_eq!(
            install_arguments(&[], &style),
            vec!["install", "Foo", "https://x/y/Foo.zip"]
        );
    }

    #[test]
    fn version_is_last_token() {
        assert_eq!(parse_version("vale version 3.4.1\n"), Some("3.4.1".to_string()));
        assert_eq!(parse_version("   "), None);
    }
}
