//! `lintpilot` 바이너리 진입점.

use lintpilot::interface::cli::{AppComposition, Cli, CliAction};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let action = Cli::parse_action();
    let composition = AppComposition::default();
    init_tracing(&composition, &action);

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Lint(options) => {
            if let Err(err) = composition.lint_usecase().execute(options).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

/// RUST_LOG가 있으면 그대로 쓰고, 없으면 병합된 debug 입력에 따라 필터를 고른다.
fn init_tracing(composition: &AppComposition, action: &CliAction) {
    let debug = match action {
        CliAction::Lint(options) => composition.debug_requested(options),
        CliAction::InspectConfig => false,
    };
    let fallback = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .init();
}
