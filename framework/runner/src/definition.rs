use std::path::PathBuf;

use anyhow::Context as _;
use timing_core::prelude::ConfigError;

use crate::cli::{ReporterOpt, TimingsScenarioCli};
use crate::context::{Context, UserValuesConstraint};

pub type HookResult = anyhow::Result<()>;

pub type HookMut<V> = fn(&mut Context<V>) -> HookResult;

/// The builder for a scenario definition.
///
/// Each scenario binary builds one of these and hands it to [crate::run::run].
pub struct ScenarioDefinitionBuilder<V: UserValuesConstraint> {
    /// The label of the scenario. It is the first line of the text report.
    name: String,
    /// Options from the command line, which may override the defaults set on this builder.
    cli: TimingsScenarioCli,
    /// Iteration count to use unless `--iterations` is given.
    default_iterations: Option<u64>,
    /// Whether to calibrate and subtract the harness overhead.
    subtract_overhead: bool,
    /// Run once before warm-up. Use it for work that can fail but should not be repeated per trial,
    /// such as locating a binary.
    prepare_fn: Option<HookMut<V>>,
    /// Run before every trial, outside the timed region.
    setup_fn: Option<HookMut<V>>,
    /// The operation being measured.
    action_fn: Option<HookMut<V>>,
    /// Run after every trial, outside the timed region. Must release whatever the trial created.
    teardown_fn: Option<HookMut<V>>,
}

pub struct ScenarioDefinition<V: UserValuesConstraint> {
    pub name: String,
    pub iterations: u64,
    pub subtract_overhead: bool,
    pub prepare_fn: Option<HookMut<V>>,
    pub setup_fn: Option<HookMut<V>>,
    pub action_fn: HookMut<V>,
    pub teardown_fn: Option<HookMut<V>>,
    pub reporter: ReporterOpt,
    pub summary_file: Option<PathBuf>,
    pub run_id: Option<String>,
}

impl<V: UserValuesConstraint> ScenarioDefinitionBuilder<V> {
    pub fn new(name: &str, cli: TimingsScenarioCli) -> Self {
        Self {
            name: name.to_string(),
            cli,
            default_iterations: None,
            subtract_overhead: false,
            prepare_fn: None,
            setup_fn: None,
            action_fn: None,
            teardown_fn: None,
        }
    }

    /// Set the iteration count used when none is given on the command line.
    pub fn with_default_iterations(mut self, iterations: u64) -> Self {
        self.default_iterations = Some(iterations);
        self
    }

    pub fn with_subtract_overhead(mut self, subtract_overhead: bool) -> Self {
        self.subtract_overhead = subtract_overhead;
        self
    }

    /// Set the once-per-run hook [ScenarioDefinitionBuilder::prepare_fn].
    pub fn use_prepare(mut self, prepare_fn: HookMut<V>) -> Self {
        self.prepare_fn = Some(prepare_fn);
        self
    }

    /// Set the per-trial hook [ScenarioDefinitionBuilder::setup_fn].
    pub fn use_setup(mut self, setup_fn: HookMut<V>) -> Self {
        self.setup_fn = Some(setup_fn);
        self
    }

    /// Set the measured operation [ScenarioDefinitionBuilder::action_fn].
    pub fn use_action(mut self, action_fn: HookMut<V>) -> Self {
        if self.action_fn.is_some() {
            panic!("Action for scenario [{}] is already defined", self.name);
        }

        self.action_fn = Some(action_fn);
        self
    }

    /// Set the per-trial hook [ScenarioDefinitionBuilder::teardown_fn].
    pub fn use_teardown(mut self, teardown_fn: HookMut<V>) -> Self {
        self.teardown_fn = Some(teardown_fn);
        self
    }

    pub fn build(self) -> anyhow::Result<ScenarioDefinition<V>> {
        let action_fn = self
            .action_fn
            .with_context(|| format!("No action defined for scenario [{}]", self.name))?;

        let iterations = self
            .cli
            .iterations
            .or(self.default_iterations)
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "No iteration count for scenario [{}], pass --iterations",
                    self.name
                ))
            })?;

        Ok(ScenarioDefinition {
            name: self.name,
            iterations,
            subtract_overhead: self.subtract_overhead,
            prepare_fn: self.prepare_fn,
            setup_fn: self.setup_fn,
            action_fn,
            teardown_fn: self.teardown_fn,
            reporter: self.cli.reporter,
            summary_file: self.cli.summary_file,
            run_id: self.cli.run_id,
        })
    }
}
