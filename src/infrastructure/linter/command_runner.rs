//! 린터 CLI 실행기.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::process::Command;

use crate::application::ports::{LinterSpec, ToolOutput};

/// 린터를 한 번 실행하고 종료 코드/출력을 그대로 돌려준다.
/// 실패 종료 코드의 의미 해석은 호출자 몫이며, 실행 자체가 불가능하거나
/// 시간 제한을 넘긴 경우만 오류로 반환한다.
pub async fn run_linter_command(
    spec: &LinterSpec,
    args: &[String],
    cwd: &Path,
) -> Result<ToolOutput> {
    let invocation = describe(&spec.command, args);

    let mut cmd = Command::new(&spec.command);
    cmd.args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn linter command '{invocation}'"))?;

    let output = match spec.timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result,
            // 시간 초과 시 future와 함께 child가 drop되며 프로세스가 종료된다.
            Err(_) => bail!("'{invocation}' timed out after {}s", limit.as_secs()),
        },
        None => child.wait_with_output().await,
    }
    .with_context(|| format!("linter command '{invocation}' execution failed"))?;

    Ok(ToolOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

fn describe(command: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(command);
    parts.extend(args.iter().map(String::as_str));
    parts.join(" ")
}
