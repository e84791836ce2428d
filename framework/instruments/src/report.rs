mod noop_reporter;
mod table_reporter;
mod text_reporter;

use crate::Report;

pub use noop_reporter::NoopReporter;
pub use table_reporter::TableReporter;
pub use text_reporter::{write_report, TextReporter};

pub trait ReportCollector {
    fn add_report(&mut self, report: &Report);

    /// Emit everything collected. Called once, after the measurement has finished.
    fn finalize(&mut self) -> anyhow::Result<()>;
}
