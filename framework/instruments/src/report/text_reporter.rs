use std::io::{Stdout, Write};

use crate::report::ReportCollector;
use crate::Report;

/// Write a report in the line-oriented `key,value` format.
///
/// The label comes first, then `iters`, `mean_ns_total` and, only when overhead was calibrated,
/// `mean_ns_overhead` and `mean_ns_subtracted`. A blank line terminates the block.
pub fn write_report<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", report.label())?;
    writeln!(out, "iters,{}", report.iterations())?;
    writeln!(out, "mean_ns_total,{:.3}", report.mean_ns_total())?;
    if let (Some(overhead), Some(subtracted)) =
        (report.mean_ns_overhead(), report.mean_ns_subtracted())
    {
        writeln!(out, "mean_ns_overhead,{overhead:.3}")?;
        writeln!(out, "mean_ns_subtracted,{subtracted:.3}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// The default reporter. Output is meant to be parsed by scripts, so nothing else is written to
/// the same stream.
pub struct TextReporter<W: Write> {
    out: W,
    reports: Vec<Report>,
}

impl TextReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            reports: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportCollector for TextReporter<W> {
    fn add_report(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }

    fn finalize(&mut self) -> anyhow::Result<()> {
        for report in self.reports.drain(..) {
            write_report(&report, &mut self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
