use std::fmt::Debug;

/// Marker for scenario state types. The state is created with [Default] at the start of a run.
pub trait UserValuesConstraint: Default + Debug + 'static {}

/// Owns the state that a scenario threads through its hooks.
///
/// A fresh context is created for each run. The setup hook initialises the state, the action may
/// read or clear it, and the teardown hook must release anything the action left behind before the
/// next trial starts.
#[derive(Debug)]
pub struct Context<V: UserValuesConstraint> {
    scenario_name: String,
    value: V,
}

impl<V: UserValuesConstraint> Context<V> {
    pub fn new(scenario_name: &str) -> Self {
        Self {
            scenario_name: scenario_name.to_string(),
            value: Default::default(),
        }
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn get_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn get(&self) -> &V {
        &self.value
    }
}
