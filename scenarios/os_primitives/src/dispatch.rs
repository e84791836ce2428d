use clap::Parser;
use timing_runner::prelude::*;

use crate::scenario::{baseline, filesystem, process, shell};

const SCENARIO_HELP: &str = "Scenarios:
  1  empty function call
  2  pseudo-random draw (drand48)
  3  getppid
  4  fork, parent-side return
  5  waitpid on an already terminated child
  6  fork + child exit + waitpid
  7  system(\"true\")
  8  mkdtemp + rmdir";

#[derive(Parser, Debug)]
#[command(
    about = "Measure the latency of basic operating system primitives",
    long_about = None,
    after_help = SCENARIO_HELP
)]
pub struct GetTimingsCli {
    /// The scenario to measure, from 1 to 8
    #[clap(value_parser = parse_scenario)]
    pub scenario: Scenario,

    #[command(flatten)]
    pub runner: TimingsScenarioCli,
}

/// The closed set of measurable scenarios, numbered as on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    EmptyFunctionCall = 1,
    Drand48 = 2,
    Getppid = 3,
    ForkParentReturn = 4,
    WaitpidAlreadyTerminated = 5,
    ForkChildExitWaitpid = 6,
    SystemTrue = 7,
    MkdirRmdir = 8,
}

impl Scenario {
    pub const ALL: [Scenario; 8] = [
        Scenario::EmptyFunctionCall,
        Scenario::Drand48,
        Scenario::Getppid,
        Scenario::ForkParentReturn,
        Scenario::WaitpidAlreadyTerminated,
        Scenario::ForkChildExitWaitpid,
        Scenario::SystemTrue,
        Scenario::MkdirRmdir,
    ];

    pub fn from_selector(selector: u8) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.selector() == selector)
    }

    pub fn selector(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::EmptyFunctionCall => "scenario_1_empty_function_call",
            Scenario::Drand48 => "scenario_2_drand48",
            Scenario::Getppid => "scenario_3_getppid",
            Scenario::ForkParentReturn => "scenario_4_fork_parent_return",
            Scenario::WaitpidAlreadyTerminated => "scenario_5_waitpid_already_terminated",
            Scenario::ForkChildExitWaitpid => "scenario_6_fork_child_exit_waitpid",
            Scenario::SystemTrue => "scenario_7_system_true",
            Scenario::MkdirRmdir => "scenario_8_mkdir_rmdir",
        }
    }

    /// Tuned so that cheap calls average out timer granularity and process scenarios finish in
    /// reasonable time without exhausting process limits.
    pub fn iterations(self) -> u64 {
        match self {
            Scenario::EmptyFunctionCall | Scenario::Drand48 | Scenario::Getppid => 200_000,
            Scenario::ForkParentReturn => 8_000,
            Scenario::WaitpidAlreadyTerminated => 2_000,
            Scenario::ForkChildExitWaitpid => 4_000,
            Scenario::SystemTrue => 2_500,
            Scenario::MkdirRmdir => 20_000,
        }
    }

    pub fn subtract_overhead(self) -> bool {
        !matches!(
            self,
            Scenario::ForkChildExitWaitpid | Scenario::SystemTrue
        )
    }

    /// A definition builder with this scenario's label, iterations and overhead policy.
    pub fn builder<V: UserValuesConstraint>(
        self,
        cli: TimingsScenarioCli,
    ) -> ScenarioDefinitionBuilder<V> {
        ScenarioDefinitionBuilder::new(self.label(), cli)
            .with_default_iterations(self.iterations())
            .with_subtract_overhead(self.subtract_overhead())
    }
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    s.parse::<u8>()
        .ok()
        .and_then(Scenario::from_selector)
        .ok_or_else(|| format!("'{s}' is not a scenario, expected a number from 1 to 8"))
}

/// Measure the selected scenario once.
pub fn dispatch(scenario: Scenario, cli: TimingsScenarioCli) -> TimingsResult<Report> {
    match scenario {
        Scenario::EmptyFunctionCall => run(baseline::empty_function_call(scenario.builder(cli))),
        Scenario::Drand48 => run(baseline::random_draw(scenario.builder(cli))),
        Scenario::Getppid => run(baseline::parent_pid_query(scenario.builder(cli))),
        Scenario::ForkParentReturn => run(process::fork_parent_return(scenario.builder(cli))),
        Scenario::WaitpidAlreadyTerminated => {
            run(process::waitpid_already_terminated(scenario.builder(cli)))
        }
        Scenario::ForkChildExitWaitpid => {
            run(process::fork_child_exit_waitpid(scenario.builder(cli)))
        }
        Scenario::SystemTrue => run(shell::system_true(scenario.builder(cli))),
        Scenario::MkdirRmdir => run(filesystem::mkdir_rmdir(scenario.builder(cli))),
    }
}
