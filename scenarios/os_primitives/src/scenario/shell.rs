use std::path::{Path, PathBuf};

use anyhow::Context as _;
use nix::unistd::{access, AccessFlags};
use timing_runner::prelude::*;

/// Where `true` usually lives, in order of preference.
const TRUE_CANDIDATES: &[&str] = &["/bin/true", "/usr/bin/true"];

#[derive(Debug, Default)]
pub struct ShellCommand {
    command: PathBuf,
}

impl UserValuesConstraint for ShellCommand {}

fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}

/// Find a `true` binary to run.
pub fn locate_true() -> anyhow::Result<PathBuf> {
    if let Some(path) = TRUE_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|path| is_executable(path))
    {
        return Ok(path.to_path_buf());
    }

    which::which("true").context("No executable 'true' found in /bin, /usr/bin or PATH")
}

fn prepare_command(ctx: &mut Context<ShellCommand>) -> HookResult {
    let command = locate_true()?;
    log::debug!("Using '{}' for the shell scenario", command.display());
    ctx.get_mut().command = command;
    Ok(())
}

fn run_through_shell(ctx: &mut Context<ShellCommand>) -> HookResult {
    let status = timing_spawn::shell(&ctx.get().command)
        .status()
        .map_err(|e| PlatformError::new("system", e))?;
    sink(status);
    Ok(())
}

/// Time `system("true")`: a shell is forked, execs `true`, and is waited for.
pub fn system_true(
    builder: ScenarioDefinitionBuilder<ShellCommand>,
) -> ScenarioDefinitionBuilder<ShellCommand> {
    builder
        .use_prepare(prepare_command)
        .use_action(run_through_shell)
}
