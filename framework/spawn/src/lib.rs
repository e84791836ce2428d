use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use anyhow::{bail, Context};

/// The interpreter used to run shell commands.
pub const SHELL: &str = "/bin/sh";

/// A command that runs `command` through `/bin/sh -c`, inheriting this process's stdio.
///
/// This is what `system(3)` does, minus the signal handling.
pub fn shell<S: AsRef<OsStr>>(command: S) -> Command {
    let mut shell = Command::new(SHELL);
    shell.arg("-c").arg(command);
    shell
}

fn create_output(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("Failed to open output file {}", path.display()))
}

/// Run `command` through `/bin/sh -c`, with stdout and stderr written to the given files.
///
/// Both files are created or truncated. Blocks until the shell has exited and been reaped.
pub fn write_output(command: &str, out_path: &Path, err_path: &Path) -> anyhow::Result<ExitStatus> {
    let out = create_output(out_path)?;
    let err = create_output(err_path)?;

    log::debug!("Running '{command}' with output to {}", out_path.display());
    let status = shell(command)
        .stdout(Stdio::from(out))
        .stderr(Stdio::from(err))
        .status()
        .with_context(|| format!("Failed to run '{command}'"))?;

    if !status.success() {
        log::warn!("'{command}' exited with {status}");
    }

    Ok(status)
}

/// Start `count` copies of the program `argv_base[0]`, all writing to one output file.
///
/// Each copy receives `argv_base[1..]` followed by its index, `0..count`, as the final argument.
/// The output file is created or truncated once and shared by every worker. Blocks until every
/// started worker has been reaped, including when a later worker fails to start.
pub fn parallel_write_output<S: AsRef<OsStr>>(
    count: usize,
    argv_base: &[S],
    out_path: &Path,
) -> anyhow::Result<Vec<ExitStatus>> {
    let Some((program, args)) = argv_base.split_first() else {
        bail!("No program given to run in parallel");
    };
    let out = create_output(out_path)?;

    let mut children: Vec<Child> = Vec::with_capacity(count);
    let mut spawn_error = None;
    for index in 0..count {
        let stdout = match out.try_clone() {
            Ok(stdout) => stdout,
            Err(e) => {
                spawn_error = Some(anyhow::Error::from(e).context("Failed to share output file"));
                break;
            }
        };

        match Command::new(program)
            .args(args)
            .arg(index.to_string())
            .stdout(Stdio::from(stdout))
            .spawn()
        {
            Ok(child) => children.push(child),
            Err(e) => {
                spawn_error = Some(
                    anyhow::Error::from(e)
                        .context(format!("Failed to start worker {index} of {count}")),
                );
                break;
            }
        }
    }
    drop(out);

    log::debug!("Waiting for {} worker(s)", children.len());
    let mut statuses = Vec::with_capacity(children.len());
    let mut wait_error = None;
    for mut child in children {
        match child.wait() {
            Ok(status) => statuses.push(status),
            Err(e) => {
                wait_error
                    .get_or_insert(anyhow::Error::from(e).context("Failed to wait for worker"));
            }
        }
    }

    if let Some(e) = spawn_error.or(wait_error) {
        return Err(e);
    }

    Ok(statuses)
}
