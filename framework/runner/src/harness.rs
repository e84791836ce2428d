use timing_core::prelude::{barrier, Clock, ConfigError};
use timing_instruments::Report;

use crate::context::{Context, UserValuesConstraint};
use crate::definition::{HookMut, ScenarioDefinition};
use crate::types::TimingsResult;

/// Number of untimed cycles run before measuring `iterations` trials.
pub fn warm_up_cycles(iterations: u64) -> u64 {
    iterations / 10 + 1
}

/// Reject a definition that would time nothing.
///
/// Must pass before any hook runs or the clock is read.
pub(crate) fn ensure_iterations<V: UserValuesConstraint>(
    definition: &ScenarioDefinition<V>,
) -> TimingsResult<()> {
    if definition.iterations == 0 {
        return Err(ConfigError::new("iterations must be > 0").into());
    }
    Ok(())
}

#[inline(always)]
fn run_hook<V: UserValuesConstraint>(
    hook: Option<HookMut<V>>,
    context: &mut Context<V>,
) -> TimingsResult<()> {
    match hook {
        Some(hook) => hook(context),
        None => Ok(()),
    }
}

/// Measure the mean latency of a scenario's action.
///
/// Runs [warm_up_cycles] untimed cycles, then `iterations` timed trials of
/// setup, barrier, `t0`, action, `t1`, barrier, teardown. Only the span between the two clock
/// reads is accumulated. If the definition asks for it, the same sequence is repeated with an
/// empty critical section in place of the action to calibrate the harness overhead.
///
/// Any hook or clock error stops the measurement immediately and no report is produced.
pub fn measure<V, C>(
    definition: &ScenarioDefinition<V>,
    clock: &C,
    context: &mut Context<V>,
) -> TimingsResult<Report>
where
    V: UserValuesConstraint,
    C: Clock,
{
    ensure_iterations(definition)?;
    let iterations = definition.iterations;

    let setup = definition.setup_fn;
    let action = definition.action_fn;
    let teardown = definition.teardown_fn;

    let warm_up = warm_up_cycles(iterations);
    log::debug!("[{}] warming up for {} cycles", definition.name, warm_up);
    for _ in 0..warm_up {
        run_hook(setup, context)?;
        barrier();
        action(context)?;
        barrier();
        run_hook(teardown, context)?;
    }

    log::debug!("[{}] timing {} iterations", definition.name, iterations);
    let mut total_ns: u64 = 0;
    for _ in 0..iterations {
        run_hook(setup, context)?;
        barrier();
        let t0 = clock.now()?;
        action(context)?;
        let t1 = clock.now()?;
        barrier();
        run_hook(teardown, context)?;
        total_ns += t1.nanos_since(t0);
    }
    let mean_ns = total_ns as f64 / iterations as f64;

    let mut report = Report::new(definition.name.clone(), iterations, mean_ns);

    if definition.subtract_overhead {
        log::debug!("[{}] calibrating overhead", definition.name);
        let mut total_overhead_ns: u64 = 0;
        for _ in 0..iterations {
            run_hook(setup, context)?;
            barrier();
            let t0 = clock.now()?;
            barrier();
            let t1 = clock.now()?;
            barrier();
            run_hook(teardown, context)?;
            total_overhead_ns += t1.nanos_since(t0);
        }
        report = report.with_overhead(total_overhead_ns as f64 / iterations as f64);
    }

    log::info!(
        "[{}] mean {:.3}ns over {} iterations (overhead {:?})",
        definition.name,
        report.mean_ns_total(),
        iterations,
        report.mean_ns_overhead()
    );

    Ok(report)
}
