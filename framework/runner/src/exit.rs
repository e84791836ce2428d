use timing_core::prelude::ConfigError;

/// A primitive operation or the clock failed, or any other runtime error.
pub const EXIT_PLATFORM_FAILURE: u8 = 1;
/// Missing or invalid command line arguments. This is also the status clap uses.
pub const EXIT_USAGE_ERROR: u8 = 2;
/// The measurement was misconfigured, e.g. zero iterations.
pub const EXIT_CONFIG_ERROR: u8 = 3;

/// Map an error that ended a run to the process exit status.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    if err.chain().any(|cause| cause.is::<ConfigError>()) {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_PLATFORM_FAILURE
    }
}

/// Print the diagnostic for a fatal error to stderr and return the exit status to use.
///
/// The whole cause chain is printed on one line, so a platform failure reads as
/// `<call> failed: <os reason>`.
pub fn report_fatal(err: &anyhow::Error) -> u8 {
    eprintln!("{err:#}");
    exit_status(err)
}
