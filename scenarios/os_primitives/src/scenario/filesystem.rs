use std::path::PathBuf;

use nix::unistd::mkdtemp;
use timing_runner::prelude::*;

/// Name of the directories created in the temp dir. `mkdtemp` replaces the `X`s.
pub const TEMPLATE_NAME: &str = "gtXXXXXX";

#[derive(Debug, Default)]
pub struct DirTemplate {
    template: PathBuf,
    workdir: PathBuf,
}

impl UserValuesConstraint for DirTemplate {}

fn prepare_template(ctx: &mut Context<DirTemplate>) -> HookResult {
    let template = std::env::temp_dir().join(TEMPLATE_NAME);
    log::debug!("Creating directories from template {}", template.display());
    ctx.get_mut().template = template;
    Ok(())
}

fn reset_workdir(ctx: &mut Context<DirTemplate>) -> HookResult {
    let state = ctx.get_mut();
    state.workdir.clone_from(&state.template);
    Ok(())
}

fn create_and_remove_dir(ctx: &mut Context<DirTemplate>) -> HookResult {
    let dir = mkdtemp(ctx.get().workdir.as_path()).map_err(|e| PlatformError::new("mkdtemp", e))?;
    std::fs::remove_dir(&dir).map_err(|e| PlatformError::new("rmdir", e))?;
    Ok(())
}

/// Time creating a uniquely named directory and removing it again.
pub fn mkdir_rmdir(
    builder: ScenarioDefinitionBuilder<DirTemplate>,
) -> ScenarioDefinitionBuilder<DirTemplate> {
    builder
        .use_prepare(prepare_template)
        .use_setup(reset_workdir)
        .use_action(create_and_remove_dir)
}
