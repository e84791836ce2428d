use std::io;

use anyhow::Context as _;
use nix::errno::Errno;
use nix::sys::wait::{waitid, waitpid, Id, WaitPidFlag, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};
use timing_runner::prelude::*;

use crate::scenario::NoState;

/// The child a trial left behind, if any. `None` is the empty slot.
#[derive(Debug, Default)]
pub struct ChildSlot {
    pid: Option<Pid>,
}

impl ChildSlot {
    pub fn is_empty(&self) -> bool {
        self.pid.is_none()
    }
}

impl UserValuesConstraint for ChildSlot {}

/// Fork a child that exits immediately and return its pid in the parent.
#[allow(unsafe_code)]
fn fork_exiting_child() -> Result<Pid, PlatformError> {
    // SAFETY: the child only calls `_exit`, which is async-signal-safe, so forking is sound even
    // when the parent has other threads.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => Ok(child),
        Ok(ForkResult::Child) => unsafe { libc::_exit(0) },
        Err(errno) => Err(PlatformError::new("fork", errno)),
    }
}

/// Block until `child` is reaped. Reaping anything else is an error.
fn reap(child: Pid) -> Result<WaitStatus, PlatformError> {
    let status = waitpid(child, None).map_err(|e| PlatformError::new("waitpid", e))?;
    if status.pid() != Some(child) {
        return Err(PlatformError::new(
            "waitpid",
            io::Error::other(format!("reaped {:?}, expected {child}", status.pid())),
        ));
    }
    Ok(status)
}

fn spawn_child(ctx: &mut Context<ChildSlot>) -> HookResult {
    let child = fork_exiting_child()?;
    ctx.get_mut().pid = Some(child);
    Ok(())
}

fn reap_spawned_child(ctx: &mut Context<ChildSlot>) -> HookResult {
    if let Some(child) = ctx.get_mut().pid.take() {
        reap(child)?;
    }
    Ok(())
}

fn spawn_terminated_child(ctx: &mut Context<ChildSlot>) -> HookResult {
    let child = fork_exiting_child()?;
    ctx.get_mut().pid = Some(child);

    // Wait for the child to exit without reaping it, so the timed wait always finds a zombie.
    waitid(Id::Pid(child), WaitPidFlag::WEXITED | WaitPidFlag::WNOWAIT)
        .map_err(|e| PlatformError::new("waitid", e))?;
    Ok(())
}

fn reap_terminated_child(ctx: &mut Context<ChildSlot>) -> HookResult {
    let child = ctx
        .get_mut()
        .pid
        .take()
        .context("No terminated child to reap")?;
    sink(reap(child)?);
    Ok(())
}

fn reap_leftover_child(ctx: &mut Context<ChildSlot>) -> HookResult {
    if let Some(child) = ctx.get_mut().pid.take() {
        match waitpid(child, None) {
            Ok(_) | Err(Errno::ECHILD) => {}
            Err(e) => return Err(PlatformError::new("waitpid", e).into()),
        }
    }
    Ok(())
}

fn spawn_and_reap(_ctx: &mut Context<NoState>) -> HookResult {
    let child = fork_exiting_child()?;
    sink(reap(child)?);
    Ok(())
}

/// Time only the parent's return from `fork`. The child is reaped in teardown.
pub fn fork_parent_return(
    builder: ScenarioDefinitionBuilder<ChildSlot>,
) -> ScenarioDefinitionBuilder<ChildSlot> {
    builder
        .use_action(spawn_child)
        .use_teardown(reap_spawned_child)
}

/// Time reaping a child that has already exited.
pub fn waitpid_already_terminated(
    builder: ScenarioDefinitionBuilder<ChildSlot>,
) -> ScenarioDefinitionBuilder<ChildSlot> {
    builder
        .use_setup(spawn_terminated_child)
        .use_action(reap_terminated_child)
        .use_teardown(reap_leftover_child)
}

/// Time `fork` and the blocking reap of the child together.
pub fn fork_child_exit_waitpid(
    builder: ScenarioDefinitionBuilder<NoState>,
) -> ScenarioDefinitionBuilder<NoState> {
    builder.use_action(spawn_and_reap)
}
