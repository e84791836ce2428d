use anyhow::Context as _;
use timing_core::prelude::MonotonicClock;
use timing_instruments::Report;
use timing_summary_model::{append_run_summary, RunSummary};

use crate::{
    context::{Context, UserValuesConstraint},
    definition::{ScenarioDefinition, ScenarioDefinitionBuilder},
    harness::{ensure_iterations, measure},
};

/// Environment variables that change what a scenario measures and so belong in the run summary.
const CAPTURED_ENV: &[&str] = &["TMPDIR"];

/// Measure a scenario once and emit its report.
///
/// The prepare hook runs first, then the harness, then the selected reporter. If a summary file
/// was requested, a summary of the run is appended to it. Nothing is reported if any step fails.
pub fn run<V: UserValuesConstraint>(
    definition: ScenarioDefinitionBuilder<V>,
) -> anyhow::Result<Report> {
    let definition = definition.build()?;
    ensure_iterations(&definition)?;

    log::info!("Running scenario: {}", definition.name);
    let started_at = chrono::Utc::now().timestamp();

    let clock = MonotonicClock::new()?;
    let mut context = Context::<V>::new(&definition.name);

    if let Some(prepare_fn) = definition.prepare_fn {
        prepare_fn(&mut context)?;
    }

    let report = measure(&definition, &clock, &mut context)?;

    let mut reporter = definition.reporter.init();
    reporter.add_report(&report);
    reporter.finalize()?;

    if let Some(path) = &definition.summary_file {
        let summary = build_run_summary(&definition, &report, started_at);
        log::debug!(
            "[{}] appending run summary to {}",
            context.scenario_name(),
            path.display()
        );
        append_run_summary(summary, path.clone())
            .with_context(|| format!("Failed to write run summary to {}", path.display()))?;
    }

    Ok(report)
}

fn build_run_summary<V: UserValuesConstraint>(
    definition: &ScenarioDefinition<V>,
    report: &Report,
    started_at: i64,
) -> RunSummary {
    let run_id = definition
        .run_id
        .clone()
        .unwrap_or_else(|| nanoid::nanoid!());

    let mut summary = RunSummary::new(
        run_id,
        definition.name.clone(),
        started_at,
        report.iterations(),
        definition.subtract_overhead,
        env!("CARGO_PKG_VERSION").to_string(),
    );
    summary.set_means(report.mean_ns_total(), report.mean_ns_overhead());

    for key in CAPTURED_ENV {
        if let Ok(value) = std::env::var(key) {
            summary.add_env(key.to_string(), value);
        }
    }

    summary
}
