use nix::unistd::getppid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use timing_runner::prelude::*;

use crate::scenario::NoState;

/// Seed for the generator, fixed so that every run draws the same sequence.
pub const PRNG_SEED: u64 = 0xC0FFEE;

#[derive(Debug)]
pub struct Prng {
    rng: StdRng,
}

impl Default for Prng {
    fn default() -> Self {
        Self {
            rng: StdRng::seed_from_u64(PRNG_SEED),
        }
    }
}

impl UserValuesConstraint for Prng {}

fn call_empty(_ctx: &mut Context<NoState>) -> HookResult {
    empty_function();
    Ok(())
}

fn draw_random(ctx: &mut Context<Prng>) -> HookResult {
    sink(ctx.get_mut().rng.gen::<f64>());
    Ok(())
}

fn query_parent_pid(_ctx: &mut Context<NoState>) -> HookResult {
    sink(getppid());
    Ok(())
}

/// The floor: a call that does nothing.
pub fn empty_function_call(
    builder: ScenarioDefinitionBuilder<NoState>,
) -> ScenarioDefinitionBuilder<NoState> {
    builder.use_action(call_empty)
}

/// One draw of a uniform `f64` in `[0, 1)` from a seeded generator.
pub fn random_draw(builder: ScenarioDefinitionBuilder<Prng>) -> ScenarioDefinitionBuilder<Prng> {
    builder.use_action(draw_random)
}

/// The cheapest real system call.
pub fn parent_pid_query(
    builder: ScenarioDefinitionBuilder<NoState>,
) -> ScenarioDefinitionBuilder<NoState> {
    builder.use_action(query_parent_pid)
}
