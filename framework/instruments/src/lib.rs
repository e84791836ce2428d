mod report;

pub use report::{write_report, NoopReporter, ReportCollector, TableReporter, TextReporter};

/// The aggregated outcome of measuring one scenario.
///
/// Produced once per harness invocation, handed to a [ReportCollector] and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    label: String,
    iterations: u64,
    mean_ns_total: f64,
    mean_ns_overhead: Option<f64>,
}

impl Report {
    pub fn new(label: impl Into<String>, iterations: u64, mean_ns_total: f64) -> Self {
        Self {
            label: label.into(),
            iterations,
            mean_ns_total,
            mean_ns_overhead: None,
        }
    }

    /// Attach the calibrated harness overhead, which enables [Report::mean_ns_subtracted].
    pub fn with_overhead(mut self, mean_ns_overhead: f64) -> Self {
        self.mean_ns_overhead = Some(mean_ns_overhead);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn mean_ns_total(&self) -> f64 {
        self.mean_ns_total
    }

    pub fn mean_ns_overhead(&self) -> Option<f64> {
        self.mean_ns_overhead
    }

    /// Mean latency with the overhead removed.
    ///
    /// Not clamped: a negative value means the scenario is dominated by harness overhead.
    pub fn mean_ns_subtracted(&self) -> Option<f64> {
        self.mean_ns_overhead
            .map(|overhead| self.mean_ns_total - overhead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracted_is_total_minus_overhead() {
        let report = Report::new("r", 10, 125.5).with_overhead(25.25);
        assert_eq!(Some(125.5 - 25.25), report.mean_ns_subtracted());
    }

    #[test]
    fn no_overhead_means_no_subtracted() {
        let report = Report::new("r", 10, 125.5);
        assert_eq!(None, report.mean_ns_overhead());
        assert_eq!(None, report.mean_ns_subtracted());
    }

    #[test]
    fn subtracted_may_be_negative() {
        let report = Report::new("r", 10, 20.0).with_overhead(30.0);
        assert_eq!(Some(-10.0), report.mean_ns_subtracted());
    }
}
