//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::run_config::{ALL_FILES, is_enabled};

pub const DEFAULT_LINTER_COMMAND: &str = "vale";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// 린터 실행 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// CI 입력과 같은 형태의 문자열 옵션
    #[serde(default)]
    pub inputs: InputsConfig,
    /// 변경 목록 제공자 설정
    #[serde(default)]
    pub changes: ChangesConfig,
    /// VCS 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// 실행할 린터 명령(기본 vale)
    pub linter_command: Option<String>,
    /// 린터 프로세스 호출 1회당 제한 시간(초). 없으면 제한하지 않는다.
    pub timeout_secs: Option<u64>,
}

/// 느슨한 문자열 입력. 값 해석은 Config Resolver가 담당한다.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct InputsConfig {
    pub debug: Option<String>,
    /// 원격/로컬 린터 설정 파일 위치
    pub config: Option<String>,
    /// 줄바꿈으로 구분된 스타일 패키지 소스
    pub styles: Option<String>,
    /// "all", "__onlyModified", 경로 또는 JSON 경로 배열
    pub files: Option<String>,
    pub only_annotate_modified_lines: Option<String>,
    pub fail_on_error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct ChangesConfig {
    /// none | file | git | github (생략 시 나머지 필드로 추론)
    pub source: Option<String>,
    /// 변경 목록 JSON 파일 경로
    pub path: Option<String>,
    /// git diff 비교 기준 ref
    pub base_ref: Option<String>,
    /// GitHub Pull Request URL
    pub pr_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
    /// 토큰을 stdout으로 출력하는 커맨드(예: ["gh","auth","token"])
    pub token_command: Option<Vec<String>>,
    /// API 베이스 URL(Enterprise 등)
    pub api_base: Option<String>,
}

/// 기본값이 채워진 원시 입력 문자열.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputs {
    pub debug: String,
    pub config: String,
    pub styles: String,
    pub files: String,
    pub only_annotate_modified_lines: String,
    pub fail_on_error: String,
}

/// 변경 목록 제공자 종류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSourceKind {
    None,
    File { path: PathBuf },
    Git { base_ref: String },
    GitHub { pr_url: String },
}

/// CLI 실행 옵션. `overrides`는 설정 파일 위에 마지막으로 병합된다.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub workspace_dir: PathBuf,
    pub dry_run: bool,
    pub overrides: Config,
}

impl RunOptions {
    /// 설정 파일 위에 CLI 값을 병합한 뒤의 debug 입력이 켜져 있는지 확인한다.
    pub fn debug_enabled(&self, mut base: Config) -> bool {
        base.merge_from(self.overrides.clone());
        is_enabled(&base.raw_inputs().debug)
    }
}

impl Config {
    pub fn linter_command(&self) -> String {
        self.defaults
            .linter_command
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_LINTER_COMMAND)
            .to_string()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.defaults
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 지정되지 않은 입력에 기본값을 채운다.
    pub fn raw_inputs(&self) -> RawInputs {
        let inputs = &self.inputs;
        let or = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };
        RawInputs {
            debug: or(&inputs.debug, "false"),
            config: or(&inputs.config, ""),
            styles: or(&inputs.styles, ""),
            files: or(&inputs.files, ALL_FILES),
            only_annotate_modified_lines: or(&inputs.only_annotate_modified_lines, "false"),
            fail_on_error: or(&inputs.fail_on_error, "false"),
        }
    }

    /// `changes.source`를 해석한다. 생략되면 채워진 필드로 종류를 추론한다.
    pub fn change_source_kind(&self) -> Result<ChangeSourceKind> {
        let changes = &self.changes;
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };
        let path = field(&changes.path);
        let base_ref = field(&changes.base_ref);
        let pr_url = field(&changes.pr_url);

        let source = match field(&changes.source) {
            Some(source) => source.to_ascii_lowercase(),
            None if pr_url.is_some() => "github".to_string(),
            None if path.is_some() => "file".to_string(),
            None if base_ref.is_some() => "git".to_string(),
            None => "none".to_string(),
        };

        match source.as_str() {
            "none" => Ok(ChangeSourceKind::None),
            "file" => match path {
                Some(path) => Ok(ChangeSourceKind::File {
                    path: PathBuf::from(path),
                }),
                None => bail!("changes.source is 'file' but changes.path is not set"),
            },
            "git" => Ok(ChangeSourceKind::Git {
                base_ref: base_ref.unwrap_or_else(|| "HEAD~1".to_string()),
            }),
            "github" => match pr_url {
                Some(pr_url) => Ok(ChangeSourceKind::GitHub { pr_url }),
                None => bail!("changes.source is 'github' but changes.pr_url is not set"),
            },
            other => bail!("unsupported changes.source '{other}' (expected none, file, git or github)"),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.inputs.merge_from(other.inputs);
        self.changes.merge_from(other.changes);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.linter_command.is_some() {
            self.linter_command = other.linter_command;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

impl InputsConfig {
    pub fn merge_from(&mut self, other: InputsConfig) {
        if other.debug.is_some() {
            self.debug = other.debug;
        }
        if other.config.is_some() {
            self.config = other.config;
        }
        if other.styles.is_some() {
            self.styles = other.styles;
        }
        if other.files.is_some() {
            self.files = other.files;
        }
        if other.only_annotate_modified_lines.is_some() {
            self.only_annotate_modified_lines = other.only_annotate_modified_lines;
        }
        if other.fail_on_error.is_some() {
            self.fail_on_error = other.fail_on_error;
        }
    }
}

impl ChangesConfig {
    pub fn merge_from(&mut self, other: ChangesConfig) {
        if other.source.is_some() {
            self.source = other.source;
        }
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.base_ref.is_some() {
            self.base_ref = other.base_ref;
        }
        if other.pr_url.is_some() {
            self.pr_url = other.pr_url;
        }
    }
}

impl HostConfig {
    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.token_command.is_some() {
            self.token_command = other.token_command;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}
