use clap::error::ErrorKind;
use clap::Parser;

use crate::exit::EXIT_USAGE_ERROR;

/// Initialise logging and parse the command line for a scenario binary.
///
/// Logging goes to stderr and is controlled by `RUST_LOG`, so stdout only ever carries reports.
/// Invalid arguments print the error and usage to stderr and exit with [EXIT_USAGE_ERROR].
pub fn init<C: Parser>() -> C {
    env_logger::init();

    C::try_parse().unwrap_or_else(|e| {
        // clap only prints usage for some kinds of error, a rejected value is not one of them.
        if matches!(e.kind(), ErrorKind::InvalidValue | ErrorKind::ValueValidation) {
            let _ = e.print();
            eprintln!("\n{}", C::command().render_usage());
            std::process::exit(EXIT_USAGE_ERROR.into());
        }
        e.exit()
    })
}
