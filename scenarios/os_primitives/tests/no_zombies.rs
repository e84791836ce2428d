//! Kept to a single test: other tests in the same process would have children of their own.

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::Pid;
use os_primitives::dispatch::Scenario;
use os_primitives::scenario::{process, NoState};
use timing_runner::prelude::*;

const ITERATIONS: u64 = 200;

fn cli() -> TimingsScenarioCli {
    TimingsScenarioCli {
        iterations: Some(ITERATIONS),
        reporter: ReporterOpt::Noop,
        ..Default::default()
    }
}

fn assert_no_children_left() {
    assert_eq!(
        Err(Errno::ECHILD),
        waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)),
        "a child process was left unreaped"
    );
}

#[test]
fn process_scenarios_leave_no_zombies() -> anyhow::Result<()> {
    let clock = MonotonicClock::new()?;

    let definition =
        process::fork_parent_return(Scenario::ForkParentReturn.builder(cli())).build()?;
    let mut ctx = Context::new(&definition.name);
    let report = measure(&definition, &clock, &mut ctx)?;
    assert_eq!(ITERATIONS, report.iterations());
    assert!(report.mean_ns_overhead().is_some());
    assert!(ctx.get().is_empty());
    assert_no_children_left();

    let definition =
        process::waitpid_already_terminated(Scenario::WaitpidAlreadyTerminated.builder(cli()))
            .build()?;
    let mut ctx = Context::new(&definition.name);
    let report = measure(&definition, &clock, &mut ctx)?;
    assert_eq!(ITERATIONS, report.iterations());
    assert!(ctx.get().is_empty());
    assert_no_children_left();

    let definition =
        process::fork_child_exit_waitpid(Scenario::ForkChildExitWaitpid.builder::<NoState>(cli()))
            .build()?;
    let mut ctx = Context::new(&definition.name);
    let report = measure(&definition, &clock, &mut ctx)?;
    assert_eq!(ITERATIONS, report.iterations());
    assert!(report.mean_ns_overhead().is_none());
    assert!(report.mean_ns_total() > 0.0);
    assert_no_children_left();

    Ok(())
}
