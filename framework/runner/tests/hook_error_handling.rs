use pretty_assertions::assert_eq;
use timing_runner::prelude::{
    exit_status, run, Context, HookResult, ReporterOpt, ScenarioDefinitionBuilder,
    TimingsScenarioCli, UserValuesConstraint, EXIT_CONFIG_ERROR, EXIT_PLATFORM_FAILURE,
};
use timing_summary_model::load_summary_runs;

#[derive(Default, Debug)]
struct ScenarioValue {
    prepared: bool,
    value: i32,
}

impl UserValuesConstraint for ScenarioValue {}

fn sample_cli_cfg() -> TimingsScenarioCli {
    TimingsScenarioCli {
        iterations: None,
        reporter: ReporterOpt::Noop,
        summary_file: None,
        run_id: None,
    }
}

fn ok_action(_ctx: &mut Context<ScenarioValue>) -> HookResult {
    Ok(())
}

#[test]
fn propagate_error_in_prepare_hook() {
    fn prepare(_ctx: &mut Context<ScenarioValue>) -> HookResult {
        Err(anyhow::anyhow!("Error in prepare hook"))
    }

    let scenario = ScenarioDefinitionBuilder::<ScenarioValue>::new(
        "propagate_error_in_prepare_hook",
        sample_cli_cfg(),
    )
    .with_default_iterations(10)
    .use_prepare(prepare)
    .use_action(ok_action);

    let result = run(scenario);

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "Error in prepare hook");
}

#[test]
fn propagate_error_in_setup_hook() {
    fn setup(_ctx: &mut Context<ScenarioValue>) -> HookResult {
        Err(anyhow::anyhow!("Error in setup hook"))
    }

    let scenario = ScenarioDefinitionBuilder::<ScenarioValue>::new(
        "propagate_error_in_setup_hook",
        sample_cli_cfg(),
    )
    .with_default_iterations(10)
    .use_setup(setup)
    .use_action(ok_action);

    let result = run(scenario);

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "Error in setup hook");
}

#[test]
fn propagate_error_in_action_after_some_trials() {
    fn action(ctx: &mut Context<ScenarioValue>) -> HookResult {
        ctx.get_mut().value += 1;
        if ctx.get().value > 5 {
            return Err(anyhow::anyhow!("Error in action"));
        }
        Ok(())
    }

    let scenario = ScenarioDefinitionBuilder::<ScenarioValue>::new(
        "propagate_error_in_action_after_some_trials",
        sample_cli_cfg(),
    )
    .with_default_iterations(10)
    .use_action(action);

    let result = run(scenario);

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Error in action");
    assert_eq!(EXIT_PLATFORM_FAILURE, exit_status(&err));
}

#[test]
fn propagate_error_in_teardown_hook() {
    fn teardown(_ctx: &mut Context<ScenarioValue>) -> HookResult {
        Err(anyhow::anyhow!("Error in teardown hook"))
    }

    let scenario = ScenarioDefinitionBuilder::<ScenarioValue>::new(
        "propagate_error_in_teardown_hook",
        sample_cli_cfg(),
    )
    .with_default_iterations(10)
    .use_action(ok_action)
    .use_teardown(teardown);

    let result = run(scenario);

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "Error in teardown hook");
}

#[test]
fn prepare_hook_runs_before_trials() {
    fn prepare(ctx: &mut Context<ScenarioValue>) -> HookResult {
        ctx.get_mut().prepared = true;
        Ok(())
    }

    fn action(ctx: &mut Context<ScenarioValue>) -> HookResult {
        anyhow::ensure!(ctx.get().prepared, "action ran before prepare");
        Ok(())
    }

    let scenario = ScenarioDefinitionBuilder::<ScenarioValue>::new(
        "prepare_hook_runs_before_trials",
        sample_cli_cfg(),
    )
    .with_default_iterations(10)
    .use_prepare(prepare)
    .use_action(action);

    let report = run(scenario).unwrap();

    assert_eq!("prepare_hook_runs_before_trials", report.label());
    assert_eq!(10, report.iterations());
}

#[test]
fn zero_iterations_is_a_config_error() {
    let mut cfg = sample_cli_cfg();
    cfg.iterations = Some(0);

    let scenario =
        ScenarioDefinitionBuilder::<ScenarioValue>::new("zero_iterations_is_a_config_error", cfg)
            .with_default_iterations(10)
            .use_action(ok_action);

    let err = run(scenario).unwrap_err();

    assert_eq!(EXIT_CONFIG_ERROR, exit_status(&err));
}

#[test]
fn zero_iterations_rejected_before_prepare_hook() {
    fn prepare(_ctx: &mut Context<ScenarioValue>) -> HookResult {
        Err(anyhow::anyhow!("prepare hook ran"))
    }

    let mut cfg = sample_cli_cfg();
    cfg.iterations = Some(0);

    let scenario = ScenarioDefinitionBuilder::<ScenarioValue>::new(
        "zero_iterations_rejected_before_prepare_hook",
        cfg,
    )
    .with_default_iterations(10)
    .use_prepare(prepare)
    .use_action(ok_action);

    let err = run(scenario).unwrap_err();

    assert_eq!("iterations must be > 0", err.to_string());
    assert_eq!(EXIT_CONFIG_ERROR, exit_status(&err));
}

#[test]
fn overhead_fields_follow_definition() {
    let with = ScenarioDefinitionBuilder::<ScenarioValue>::new("with_overhead", sample_cli_cfg())
        .with_default_iterations(100)
        .with_subtract_overhead(true)
        .use_action(ok_action);
    let without =
        ScenarioDefinitionBuilder::<ScenarioValue>::new("without_overhead", sample_cli_cfg())
            .with_default_iterations(100)
            .use_action(ok_action);

    let with = run(with).unwrap();
    let without = run(without).unwrap();

    assert!(with.mean_ns_overhead().is_some());
    assert_eq!(
        with.mean_ns_subtracted(),
        Some(with.mean_ns_total() - with.mean_ns_overhead().unwrap())
    );
    assert!(without.mean_ns_overhead().is_none());
    assert!(without.mean_ns_subtracted().is_none());
}

#[test]
fn summary_file_is_appended() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("runs.jsonl");

    for run_id in ["run-a", "run-b"] {
        let mut cfg = sample_cli_cfg();
        cfg.summary_file = Some(path.clone());
        cfg.run_id = Some(run_id.to_string());

        let scenario =
            ScenarioDefinitionBuilder::<ScenarioValue>::new("summary_file_is_appended", cfg)
                .with_default_iterations(20)
                .with_subtract_overhead(true)
                .use_action(ok_action);
        run(scenario)?;
    }

    let runs = load_summary_runs(path)?;
    assert_eq!(2, runs.len());
    assert_eq!("run-a", runs[0].run_id);
    assert_eq!("run-b", runs[1].run_id);
    assert_eq!("summary_file_is_appended", runs[0].scenario_name);
    assert_eq!(20, runs[0].iterations);
    assert!(runs[0].subtract_overhead);
    assert!(runs[0].mean_ns_overhead.is_some());
    assert_eq!(runs[0].fingerprint(), runs[1].fingerprint());

    Ok(())
}
