mod cli;
mod context;
mod definition;
mod exit;
mod harness;
mod init;
mod run;
mod types;

pub mod prelude {
    pub use crate::cli::{ReporterOpt, TimingsScenarioCli};
    pub use crate::context::{Context, UserValuesConstraint};
    pub use crate::definition::{
        HookMut, HookResult, ScenarioDefinition, ScenarioDefinitionBuilder,
    };
    pub use crate::exit::{
        exit_status, report_fatal, EXIT_CONFIG_ERROR, EXIT_PLATFORM_FAILURE, EXIT_USAGE_ERROR,
    };
    pub use crate::harness::{measure, warm_up_cycles};
    pub use crate::init::init;
    pub use crate::run::run;
    pub use crate::types::TimingsResult;

    pub use timing_core::prelude::*;
    pub use timing_instruments::Report;
}
