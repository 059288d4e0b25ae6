//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_host_token;
use super::utils::command_exists;
use crate::application::config::{ChangeSourceKind, Config, HostConfig, InputsConfig};
use crate::domain::run_config::{parse_style_sources, selects_only_modified};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub inputs: InputsConfig,
    pub effective: EffectiveSettings,
    pub hosts: BTreeMap<String, HostInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub linter_command: String,
    pub linter_available: bool,
    pub timeout_secs: Option<u64>,
    pub files: String,
    pub only_modified: bool,
    pub external_config: Option<String>,
    pub styles: Vec<String>,
    pub change_source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let hosts = loaded
            .config
            .hosts
            .iter()
            .map(|(host, cfg)| (host.clone(), host_inspection(cfg)))
            .collect();

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            inputs: loaded.config.inputs.clone(),
            effective: EffectiveSettings::from_config(&loaded.config),
            hosts,
        }
    }
}

impl EffectiveSettings {
    fn from_config(config: &Config) -> Self {
        let raw = config.raw_inputs();
        let linter_command = config.linter_command();
        let config_locator = raw.config.trim();

        Self {
            linter_available: command_exists(&linter_command),
            linter_command,
            timeout_secs: config.timeout().map(|t| t.as_secs()),
            only_modified: selects_only_modified(&raw.only_annotate_modified_lines, &raw.files),
            files: raw.files.clone(),
            external_config: (!config_locator.is_empty()).then(|| config_locator.to_string()),
            styles: parse_style_sources(&raw.styles)
                .into_iter()
                .map(|style| style.name)
                .collect(),
            change_source: change_source_label(config),
        }
    }
}

fn change_source_label(config: &Config) -> String {
    match config.change_source_kind() {
        Ok(ChangeSourceKind::None) => "none".to_string(),
        Ok(ChangeSourceKind::File { path }) => format!("file:{}", path.display()),
        Ok(ChangeSourceKind::Git { base_ref }) => format!("git:{base_ref}"),
        Ok(ChangeSourceKind::GitHub { pr_url }) => format!("github:{pr_url}"),
        Err(err) => format!("invalid ({err})"),
    }
}

fn host_inspection(cfg: &HostConfig) -> HostInspection {
    let token_resolution = resolve_host_token(Some(cfg)).ok();
    HostInspection {
        token_source: token_resolution.as_ref().and_then(|r| r.source.clone()),
        token_resolved: token_resolution
            .as_ref()
            .and_then(|r| r.token.as_ref())
            .is_some(),
        api_base: cfg.api_base.clone(),
    }
}
