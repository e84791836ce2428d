//! The fixed catalog of measured operations.
//!
//! Each module exposes the state its hooks share and a function that wires those hooks into a
//! [ScenarioDefinitionBuilder](timing_runner::prelude::ScenarioDefinitionBuilder).

pub mod baseline;
pub mod filesystem;
pub mod process;
pub mod shell;

use timing_runner::prelude::UserValuesConstraint;

/// For scenarios whose hooks share nothing.
#[derive(Debug, Default)]
pub struct NoState;

impl UserValuesConstraint for NoState {}
