mod report_table;

use tabled::settings::Style;
use tabled::Table;

use crate::report::table_reporter::report_table::ReportRow;
use crate::report::ReportCollector;
use crate::Report;

/// Prints the collected reports as a table for people reading a terminal.
#[derive(Debug, Default)]
pub struct TableReporter {
    reports: Vec<Report>,
}

impl TableReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn render(&self) -> String {
        let rows = self
            .reports
            .iter()
            .map(|report| ReportRow {
                scenario: report.label().to_string(),
                iters: report.iterations(),
                mean_ns_total: report.mean_ns_total(),
                mean_ns_overhead: report.mean_ns_overhead(),
                mean_ns_subtracted: report.mean_ns_subtracted(),
            })
            .collect::<Vec<_>>();

        let mut table = Table::new(rows);
        table.with(Style::modern());
        table.to_string()
    }
}

impl ReportCollector for TableReporter {
    fn add_report(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }

    fn finalize(&mut self) -> anyhow::Result<()> {
        println!("{}", self.render());
        Ok(())
    }
}
