//! CLI 명령 파싱 모듈.
//!
//! 입력 값은 CI action 입력처럼 `INPUT_*` 환경변수로도 받을 수 있으며,
//! 지정된 값만 설정 파일 위에 덮어쓴다.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::config::{ChangesConfig, Config, DefaultsConfig, InputsConfig, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "lintpilot")]
#[command(about = "Run a prose linter over the files and lines a change touched")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Workspace directory the linter runs in
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Report linter arguments and stderr ("true" enables)
    #[arg(long, env = "INPUT_DEBUG", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    debug: Option<String>,

    /// URL or path of an external linter config file
    #[arg(long, env = "INPUT_CONFIG")]
    config: Option<String>,

    /// Newline-separated style package sources
    #[arg(long, env = "INPUT_STYLES")]
    styles: Option<String>,

    /// "all", "__onlyModified", a path, or a JSON list of paths
    #[arg(long, env = "INPUT_FILES")]
    files: Option<String>,

    /// Lint only changed files and report only changed lines (anything but "false" enables)
    #[arg(long, env = "INPUT_ONLYANNOTATEMODIFIEDLINES", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    only_annotate_modified_lines: Option<String>,

    /// Fail when error-level findings remain ("true" enables)
    #[arg(long, env = "INPUT_FAIL_ON_ERROR", value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    fail_on_error: Option<String>,

    /// Change source: none, file, git or github
    #[arg(long)]
    change_source: Option<String>,

    /// JSON file listing changed paths and lines
    #[arg(long)]
    changes_file: Option<String>,

    /// Git ref to diff against
    #[arg(long)]
    base_ref: Option<String>,

    /// GitHub pull request URL to read changed files from
    #[arg(long)]
    pr_url: Option<String>,

    /// Linter executable
    #[arg(long)]
    linter: Option<String>,

    /// Time limit in seconds for each linter process call
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the resolved scope as JSON and skip installs and the lint run
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config, linter availability and token sources
    Config,
}

pub enum CliAction {
    InspectConfig,
    Lint(RunOptions),
}

impl Cli {
    /// 인자 오류/도움말은 clap이 직접 출력하고 종료한다(오류 시 코드 2).
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        if let Some(Commands::Config) = self.command {
            return CliAction::InspectConfig;
        }

        let overrides = Config {
            defaults: DefaultsConfig {
                linter_command: self.linter,
                timeout_secs: self.timeout_secs,
            },
            inputs: InputsConfig {
                debug: self.debug,
                config: self.config,
                styles: self.styles,
                files: self.files,
                only_annotate_modified_lines: self.only_annotate_modified_lines,
                fail_on_error: self.fail_on_error,
            },
            changes: ChangesConfig {
                source: self.change_source,
                path: self.changes_file,
                base_ref: self.base_ref,
                pr_url: self.pr_url,
            },
            ..Config::default()
        };

        CliAction::Lint(RunOptions {
            workspace_dir: self.workspace,
            dry_run: self.dry_run,
            overrides,
        })
    }
}
