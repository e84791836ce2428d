use std::path::PathBuf;

use clap::{Args, ValueEnum};
use timing_instruments::{NoopReporter, ReportCollector, TableReporter, TextReporter};

/// Options shared by every scenario binary. Flatten this into the binary's own parser.
#[derive(Args, Debug, Clone, Default)]
pub struct TimingsScenarioCli {
    /// Override the number of timed iterations.
    ///
    /// Every scenario has an iteration count tuned to its cost, so this is mostly useful for quick
    /// smoke runs. Zero is rejected because a mean over no trials is undefined.
    #[clap(long)]
    pub iterations: Option<u64>,

    /// How the report is printed. The `text` format is stable and meant for scripts.
    #[clap(long, value_enum, default_value_t = ReporterOpt::Text)]
    pub reporter: ReporterOpt,

    /// Append a JSON line describing this run to the given file.
    #[clap(long)]
    pub summary_file: Option<PathBuf>,

    /// The run id recorded in the summary file. A random id is generated if not given.
    #[clap(long)]
    pub run_id: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReporterOpt {
    /// Comma separated `key,value` lines
    #[default]
    Text,
    /// A table for reading in a terminal
    Table,
    /// Print nothing
    Noop,
}

impl ReporterOpt {
    pub(crate) fn init(self) -> Box<dyn ReportCollector> {
        match self {
            ReporterOpt::Text => Box::new(TextReporter::stdout()),
            ReporterOpt::Table => Box::new(TableReporter::new()),
            ReporterOpt::Noop => Box::new(NoopReporter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        runner: TimingsScenarioCli,
    }

    #[test]
    fn defaults_to_text_reporter() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(ReporterOpt::Text, cli.runner.reporter);
        assert_eq!(None, cli.runner.iterations);
        assert!(cli.runner.summary_file.is_none());
    }

    #[test]
    fn parses_all_options() {
        let cli = TestCli::parse_from([
            "test",
            "--iterations",
            "50",
            "--reporter",
            "table",
            "--summary-file",
            "runs.jsonl",
            "--run-id",
            "abc",
        ]);
        assert_eq!(Some(50), cli.runner.iterations);
        assert_eq!(ReporterOpt::Table, cli.runner.reporter);
        assert_eq!(Some(PathBuf::from("runs.jsonl")), cli.runner.summary_file);
        assert_eq!(Some("abc".to_string()), cli.runner.run_id);
    }

    #[test]
    fn rejects_unknown_reporter() {
        assert!(TestCli::try_parse_from(["test", "--reporter", "influx"]).is_err());
    }
}
