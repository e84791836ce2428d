use std::process::ExitCode;

use os_primitives::dispatch::{dispatch, GetTimingsCli};
use timing_runner::prelude::*;

fn main() -> ExitCode {
    let cli = init::<GetTimingsCli>();

    match dispatch(cli.scenario, cli.runner) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_fatal(&e)),
    }
}
