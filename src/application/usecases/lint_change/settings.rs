//! 원시 입력 문자열을 RunConfig로 정규화하는 단계(Config Resolver).
//!
//! 각 입력은 독립적으로 해석되며, 어떤 입력의 실패도 경고로만 남고 run을 중단하지 않는다.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::application::config::RawInputs;
use crate::application::ports::{ConfigFetcher, Reporter, Workspace};
use crate::domain::run_config::{
    ALL_FILES, FileSelection, RunConfig, is_enabled, parse_explicit_list, parse_style_sources,
    selects_only_modified,
};

const DEFAULT_CONFIG_SUFFIX: &str = ".ini";

/// 해석된 실행 설정과 해석 중 발생한 경고.
pub struct ResolvedSettings {
    pub run_config: RunConfig,
    pub warnings: Vec<String>,
    /// 내려받은 외부 설정 파일. drop 시점에 삭제되므로 run이 끝날 때까지 보관한다.
    pub external_config: Option<NamedTempFile>,
}

/// 입력 전체를 해석한다. 실패하지 않는다.
pub async fn resolve_settings(
    fetcher: &dyn ConfigFetcher,
    reporter: &dyn Reporter,
    workspace: &dyn Workspace,
    raw: &RawInputs,
) -> ResolvedSettings {
    let mut warnings = Vec::new();

    let external_config = fetch_external_config(
        fetcher,
        reporter,
        &raw.config,
        &std::env::temp_dir(),
        &mut warnings,
    )
    .await;
    let selection = resolve_selection(reporter, workspace, raw, &mut warnings);

    let run_config = RunConfig {
        external_config_path: external_config.as_ref().map(|file| file.path().to_path_buf()),
        style_packages: parse_style_sources(&raw.styles),
        selection,
        debug: is_enabled(&raw.debug),
        fail_on_error: is_enabled(&raw.fail_on_error),
    };

    ResolvedSettings {
        run_config,
        warnings,
        external_config,
    }
}

async fn fetch_external_config(
    fetcher: &dyn ConfigFetcher,
    reporter: &dyn Reporter,
    locator: &str,
    temp_dir: &Path,
    warnings: &mut Vec<String>,
) -> Option<NamedTempFile> {
    let locator = locator.trim();
    if locator.is_empty() {
        return None;
    }

    let content = match fetcher.fetch(locator).await {
        Ok(content) => content,
        Err(err) => {
            push_warning(
                reporter,
                warnings,
                format!("failed to fetch config from '{locator}': {err:#}; continuing without it"),
            );
            return None;
        }
    };

    match write_temp_config(temp_dir, locator, &content) {
        Ok(file) => {
            tracing::debug!(path = %file.path().display(), "external config written");
            Some(file)
        }
        Err(err) => {
            push_warning(
                reporter,
                warnings,
                format!("failed to store config fetched from '{locator}': {err:#}; continuing without it"),
            );
            None
        }
    }
}

fn write_temp_config(dir: &Path, locator: &str, content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("lintpilot-config-")
        .suffix(&config_suffix(locator))
        .tempfile_in(dir)
        .context("failed to create temporary config file")?;
    file.write_all(content.as_bytes())
        .context("failed to write temporary config file")?;
    file.flush().context("failed to flush temporary config file")?;
    Ok(file)
}

/// 위치의 마지막 조각에 확장자가 있으면 그대로 쓴다(`.vale.ini` -> `.ini`).
fn config_suffix(locator: &str) -> String {
    let path = locator.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit(['/', '\\']).next().unwrap_or_default();
    match segment.rfind('.') {
        Some(idx) if idx + 1 < segment.len() => segment[idx..].to_string(),
        _ => DEFAULT_CONFIG_SUFFIX.to_string(),
    }
}

fn resolve_selection(
    reporter: &dyn Reporter,
    workspace: &dyn Workspace,
    raw: &RawInputs,
    warnings: &mut Vec<String>,
) -> FileSelection {
    if selects_only_modified(&raw.only_annotate_modified_lines, &raw.files) {
        return FileSelection::OnlyModified;
    }

    let files = raw.files.trim();
    if files == ALL_FILES {
        return FileSelection::All;
    }

    if !files.is_empty() && workspace.exists(files) {
        return FileSelection::ExplicitPath(files.to_string());
    }

    match parse_explicit_list(files) {
        Some(list) => FileSelection::ExplicitList(list),
        None => {
            push_warning(
                reporter,
                warnings,
                format!(
                    "'{files}' is neither an existing path nor a JSON list of paths; linting all files"
                ),
            );
            FileSelection::All
        }
    }
}

/// 경고는 reporter로 한 번만 출력하고, 추적 로그에는 debug로 남긴다.
fn push_warning(reporter: &dyn Reporter, warnings: &mut Vec<String>, message: String) {
    tracing::debug!(warning = %message, "input resolution warning");
    reporter.warn(&message);
    warnings.push(message);
}
