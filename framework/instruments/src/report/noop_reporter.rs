use crate::report::ReportCollector;
use crate::Report;

/// Discards every report. Useful when only the run summary file is wanted.
#[derive(Debug, Default)]
pub struct NoopReporter;

impl ReportCollector for NoopReporter {
    fn add_report(&mut self, _report: &Report) {
        // no-op
    }

    fn finalize(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
