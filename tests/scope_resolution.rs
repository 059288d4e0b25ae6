use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use lintpilot::application::config::{Config, RunOptions};
use lintpilot::application::ports::{
    ConfigFetcher, ConfigRepository, LintRunner, LinterSpec, Reporter, ToolOutput, Workspace,
};
use lintpilot::application::usecases::lint_change::LintChangeUseCase;
use lintpilot::domain::changeset::{ChangeRecord, ChangeSet};
use lintpilot::domain::errors::LintError;
use lintpilot::domain::run_config::{FileSelection, RunConfig};
use lintpilot::domain::scope::resolve_scope;
use lintpilot::infrastructure::adapters::{
    ChangeSourceFactoryAdapter, FsWorkspace, FsWorkspaceFactory, WorkflowAnnotationRenderer,
};

const REPORT: &str = r#"{
  "docs/a.md": [
    {"Check": "Vale.Spelling", "Message": "Did you mean 'the'?", "Severity": "error", "Line": 2, "Span": [1, 3]},
    {"Check": "Vale.Terms", "Message": "Use 'lintpilot'.", "Severity": "warning", "Line": 7, "Span": [4, 9]}
  ],
  "./README.md": [
    {"Check": "Vale.Spelling", "Message": "Typo.", "Severity": "error", "Line": 1, "Span": [1, 2]}
  ]
}"#;

struct StaticConfig(Config);

impl ConfigRepository for StaticConfig {
    fn load(&self) -> Result<Config> {
        Ok(self.0.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

struct NoFetch;

#[async_trait]
impl ConfigFetcher for NoFetch {
    async fn fetch(&self, locator: &str) -> Result<String> {
        bail!("unexpected fetch of {locator}")
    }
}

#[derive(Default)]
struct FakeVale {
    calls: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl LintRunner for FakeVale {
    fn is_available(&self, _spec: &LinterSpec) -> bool {
        true
    }

    async fn run(&self, _spec: &LinterSpec, args: &[String], _cwd: &Path) -> Result<ToolOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        let stdout = if args == ["-v"] {
            "vale version 3.4.1\n".to_string()
        } else {
            REPORT.to_string()
        };
        Ok(ToolOutput {
            success: true,
            exit_code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}

#[derive(Default)]
struct CapturingReporter {
    raw: Mutex<Vec<String>>,
}

impl Reporter for CapturingReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn raw(&self, line: &str) {
        self.raw.lock().unwrap().push(line.to_string());
    }
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/a.md"), "# A\n\nteh text\n").unwrap();
    fs::write(dir.path().join("README.md"), "# Readme\n").unwrap();
    fs::write(
        dir.path().join("changes.json"),
        r#"{"docs/a.md": [2, 3], "docs/deleted.md": [1]}"#,
    )
    .unwrap();
    dir
}

fn only_modified_config(fail_on_error: bool) -> Config {
    let mut config = Config::default();
    config.inputs.files = Some("__onlyModified".to_string());
    config.inputs.fail_on_error = Some(fail_on_error.to_string());
    config.changes.source = Some("file".to_string());
    config.changes.path = Some("changes.json".to_string());
    config
}

fn options(dir: &Path, dry_run: bool) -> RunOptions {
    RunOptions {
        workspace_dir: dir.to_path_buf(),
        dry_run,
        overrides: Config::default(),
    }
}

#[test]
fn only_modified_scope_over_real_workspace() {
    let dir = workspace();
    let ws = FsWorkspace::open(dir.path()).unwrap();
    let changes = ChangeSet::from_records([
        ChangeRecord::new("./docs/a.md", [2]),
        ChangeRecord::new("docs/deleted.md", [1]),
        ChangeRecord::new("docs/a.md", [3]),
    ]);
    let run_config = RunConfig {
        external_config_path: None,
        style_packages: Vec::new(),
        selection: FileSelection::OnlyModified,
        debug: false,
        fail_on_error: false,
    };

    let scope = resolve_scope(&changes, &run_config, |path| ws.exists(path));

    assert_eq!(scope.targets, vec!["docs/a.md"]);
    assert_eq!(
        scope.tool_arguments,
        vec!["--no-exit", "--output=JSON", "docs/a.md"]
    );
    assert_eq!(scope.line_index.len(), 1);
}

#[tokio::test]
async fn dry_run_prints_scope_without_running_linter() {
    let dir = workspace();
    let config_repo = StaticConfig(only_modified_config(false));
    let runner = FakeVale::default();
    let reporter = CapturingReporter::default();
    let usecase = LintChangeUseCase {
        config_repo: &config_repo,
        workspace_factory: &FsWorkspaceFactory,
        change_source_factory: &ChangeSourceFactoryAdapter,
        config_fetcher: &NoFetch,
        runner: &runner,
        renderer: &WorkflowAnnotationRenderer,
        reporter: &reporter,
    };

    let outcome = usecase.execute(options(dir.path(), true)).await.unwrap();

    assert!(runner.calls.lock().unwrap().is_empty());
    assert_eq!(outcome.scope.targets, vec!["docs/a.md"]);
    assert!(outcome.report.is_empty());

    let printed = reporter.raw.lock().unwrap().join("\n");
    let view: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(view["scope"]["targets"], serde_json::json!(["docs/a.md"]));
    assert_eq!(view["run_config"]["selection"]["mode"], "only-modified");
}

#[tokio::test]
async fn full_run_reports_only_modified_lines() {
    let dir = workspace();
    let config_repo = StaticConfig(only_modified_config(false));
    let runner = FakeVale::default();
    let reporter = CapturingReporter::default();
    let usecase = LintChangeUseCase {
        config_repo: &config_repo,
        workspace_factory: &FsWorkspaceFactory,
        change_source_factory: &ChangeSourceFactoryAdapter,
        config_fetcher: &NoFetch,
        runner: &runner,
        renderer: &WorkflowAnnotationRenderer,
        reporter: &reporter,
    };

    let outcome = usecase.execute(options(dir.path(), false)).await.unwrap();

    assert_eq!(outcome.linter_version.as_deref(), Some("3.4.1"));
    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], vec!["--no-exit", "--output=JSON", "docs/a.md"]);

    assert_eq!(
        outcome.annotations,
        vec!["::error file=docs/a.md,line=2,col=1,title=Vale.Spelling::Did you mean 'the'?"]
    );
    assert_eq!(*reporter.raw.lock().unwrap(), outcome.annotations);
}

#[tokio::test]
async fn fail_on_error_rejects_remaining_errors() {
    let dir = workspace();
    let config_repo = StaticConfig(only_modified_config(true));
    let runner = FakeVale::default();
    let reporter = CapturingReporter::default();
    let usecase = LintChangeUseCase {
        config_repo: &config_repo,
        workspace_factory: &FsWorkspaceFactory,
        change_source_factory: &ChangeSourceFactoryAdapter,
        config_fetcher: &NoFetch,
        runner: &runner,
        renderer: &WorkflowAnnotationRenderer,
        reporter: &reporter,
    };

    let err = usecase
        .execute(options(dir.path(), false))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LintError>(),
        Some(LintError::ErrorFindings { count: 1 })
    ));
}

#[tokio::test]
async fn all_files_mode_keeps_every_finding() {
    let dir = workspace();
    let mut config = Config::default();
    config.inputs.files = Some("all".to_string());
    let config_repo = StaticConfig(config);
    let runner = FakeVale::default();
    let reporter = CapturingReporter::default();
    let usecase = LintChangeUseCase {
        config_repo: &config_repo,
        workspace_factory: &FsWorkspaceFactory,
        change_source_factory: &ChangeSourceFactoryAdapter,
        config_fetcher: &NoFetch,
        runner: &runner,
        renderer: &WorkflowAnnotationRenderer,
        reporter: &reporter,
    };

    let outcome = usecase.execute(options(dir.path(), false)).await.unwrap();

    assert_eq!(outcome.scope.targets, vec!["."]);
    assert_eq!(outcome.annotations.len(), 3);
    assert!(outcome.annotations[0].contains("file=README.md"));
}

#[tokio::test]
async fn failed_config_fetch_drops_config_flags() {
    let dir = workspace();
    let mut config = only_modified_config(false);
    config.inputs.config = Some("https://example.com/styles/.vale.ini".to_string());
    let config_repo = StaticConfig(config);
    let runner = FakeVale::default();
    let reporter = CapturingReporter::default();
    let usecase = LintChangeUseCase {
        config_repo: &config_repo,
        workspace_factory: &FsWorkspaceFactory,
        change_source_factory: &ChangeSourceFactoryAdapter,
        config_fetcher: &NoFetch,
        runner: &runner,
        renderer: &WorkflowAnnotationRenderer,
        reporter: &reporter,
    };

    let outcome = usecase.execute(options(dir.path(), true)).await.unwrap();

    assert!(outcome.run_config.external_config_path.is_none());
    assert_eq!(
        outcome.scope.tool_arguments,
        vec!["--no-exit", "--output=JSON", "docs/a.md"]
    );
    assert!(
        !outcome
            .scope
            .tool_arguments
            .iter()
            .any(|arg| arg == "--mode-rev-compat" || arg.starts_with("--config="))
    );
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("https://example.com/styles/.vale.ini"));
}
