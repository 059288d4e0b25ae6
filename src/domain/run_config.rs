//! 한 번의 린트 실행에 쓰이는 정규화된 설정(RunConfig)과 입력 해석 규칙.

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use url::Url;

use crate::domain::changeset::normalize_path;

/// "files" 입력에서 변경 파일만 대상으로 지정하는 예약값.
pub const ONLY_MODIFIED_SENTINEL: &str = "__onlyModified";
/// "files" 입력에서 작업 공간 전체를 대상으로 지정하는 값.
pub const ALL_FILES: &str = "all";

const ARCHIVE_EXTENSIONS: [&str; 3] = [".tar.gz", ".tgz", ".zip"];

/// 린트 대상 파일 선택 방식. 명시 대상은 해당 모드에만 존재한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "target", rename_all = "kebab-case")]
pub enum FileSelection {
    OnlyModified,
    All,
    ExplicitPath(String),
    ExplicitList(Vec<String>),
}

impl FileSelection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnlyModified => "only-modified",
            Self::All => "all",
            Self::ExplicitPath(_) => "explicit-path",
            Self::ExplicitList(_) => "explicit-list",
        }
    }
}

/// 설치할 스타일 패키지(이름 + 원본 설치 소스).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePackage {
    pub name: String,
    pub source: String,
}

impl StylePackage {
    /// 소스의 마지막 경로 조각에서 압축 확장자를 뗀 값을 이름으로 쓴다.
    pub fn from_source(source: &str) -> Option<Self> {
        let source = source.trim();
        let name = derive_style_name(source);
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            source: source.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    /// 원격 설정을 내려받은 로컬 파일 경로
    pub external_config_path: Option<PathBuf>,
    /// 설치 순서대로 나열된 스타일 패키지
    pub style_packages: Vec<StylePackage>,
    pub selection: FileSelection,
    pub debug: bool,
    pub fail_on_error: bool,
}

impl RunConfig {
    /// 변경 라인 밖의 결과를 걸러내야 하는지 여부.
    pub fn filters_to_modified_lines(&self) -> bool {
        self.selection == FileSelection::OnlyModified
    }
}

/// 불리언 성격의 입력은 정확히 `"true"`일 때만 켜진 것으로 본다.
pub fn is_enabled(raw: &str) -> bool {
    raw.trim() == "true"
}

/// `only_annotate`가 리터럴 `"false"`가 아니거나 `files`가 예약값이면 변경 파일 모드다.
pub fn selects_only_modified(only_annotate: &str, files: &str) -> bool {
    only_annotate != "false" || files.trim() == ONLY_MODIFIED_SENTINEL
}

/// 줄바꿈으로 구분된 스타일 소스 목록을 해석한다. 빈 줄은 무시한다.
pub fn parse_style_sources(raw: &str) -> Vec<StylePackage> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(StylePackage::from_source)
        .collect()
}

/// JSON 배열 형태의 경로 목록을 해석한다. 비어 있으면 None.
pub fn parse_explicit_list(raw: &str) -> Option<Vec<String>> {
    let parsed: Vec<String> = serde_json::from_str(raw.trim()).ok()?;
    let paths: Vec<String> = parsed
        .iter()
        .map(|p| normalize_path(p))
        .filter(|p| !p.is_empty())
        .collect();
    if paths.is_empty() { None } else { Some(paths) }
}

fn derive_style_name(source: &str) -> String {
    let path = match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "file") => url.path().to_string(),
        _ => source.to_string(),
    };

    let segment = path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let decoded = percent_decode_str(segment).decode_utf8_lossy().to_string();

    let lower = decoded.to_ascii_lowercase();
    for ext in ARCHIVE_EXTENSIONS {
        if lower.ends_with(ext) {
            return decoded[..decoded.len() - ext.len()].to_string();
        }
    }
    decoded
}
