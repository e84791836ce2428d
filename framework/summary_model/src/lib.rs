use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha3::Digest;
use std::collections::HashMap;
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

/// Summary of a single measurement run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// The unique run id
    ///
    /// Either supplied on the command line or generated by the runner.
    pub run_id: String,
    /// The label of the scenario that was measured
    pub scenario_name: String,
    /// The time the run started
    ///
    /// This is a Unix timestamp in seconds.
    pub started_at: i64,
    /// The number of timed iterations
    pub iterations: u64,
    /// Whether the harness overhead was calibrated and subtracted
    pub subtract_overhead: bool,
    /// Mean latency of one timed trial, in nanoseconds
    pub mean_ns_total: f64,
    /// Mean latency of an empty trial, in nanoseconds
    ///
    /// Only set when [RunSummary::subtract_overhead] is true.
    pub mean_ns_overhead: Option<f64>,
    /// [RunSummary::mean_ns_total] minus [RunSummary::mean_ns_overhead]
    pub mean_ns_subtracted: Option<f64>,
    /// Environment variables that affect the run
    ///
    /// Only the variables the runner knows about are captured, for example `TMPDIR`, which
    /// decides where the filesystem scenario creates its directories.
    pub env: HashMap<String, String>,
    /// The version of os-timings that produced this run
    pub version: String,
}

impl RunSummary {
    /// Create a new run summary with no results recorded yet
    pub fn new(
        run_id: String,
        scenario_name: String,
        started_at: i64,
        iterations: u64,
        subtract_overhead: bool,
        version: String,
    ) -> Self {
        Self {
            run_id,
            scenario_name,
            started_at,
            iterations,
            subtract_overhead,
            mean_ns_total: 0.0,
            mean_ns_overhead: None,
            mean_ns_subtracted: None,
            env: HashMap::with_capacity(0),
            version,
        }
    }

    /// Record the measured means
    pub fn set_means(&mut self, mean_ns_total: f64, mean_ns_overhead: Option<f64>) {
        self.mean_ns_total = mean_ns_total;
        self.mean_ns_overhead = mean_ns_overhead;
        self.mean_ns_subtracted = mean_ns_overhead.map(|overhead| mean_ns_total - overhead);
    }

    /// Add an environment variable
    pub fn add_env(&mut self, key: String, value: String) {
        self.env.insert(key, value);
    }

    /// Compute a fingerprint for this run summary
    ///
    /// The fingerprint identifies the configuration that was measured, not the results. It uses
    ///     - Scenario name
    ///     - Iterations
    ///     - Overhead subtraction flag
    ///     - Captured environment variables
    ///     - os-timings version
    ///
    /// The fingerprint is computed using [sha3::Sha3_256].
    pub fn fingerprint(&self) -> String {
        let mut hasher = sha3::Sha3_256::new();
        Digest::update(&mut hasher, self.scenario_name.as_bytes());
        Digest::update(&mut hasher, self.iterations.to_le_bytes());
        Digest::update(&mut hasher, [self.subtract_overhead as u8]);
        self.env
            .iter()
            .sorted_by_key(|(k, _)| k.to_owned())
            .for_each(|(k, v)| {
                Digest::update(&mut hasher, k.as_bytes());
                Digest::update(&mut hasher, v.as_bytes());
            });
        Digest::update(&mut hasher, self.version.as_bytes());

        format!("{:x}", hasher.finalize())
    }
}

/// Append the run summary to a file
///
/// The summary will be serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`.
pub fn append_run_summary(run_summary: RunSummary, path: PathBuf) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_run_summary(run_summary, &mut file)?;
    file.write_all("\n".as_bytes())?;
    Ok(())
}

/// Serialize the run summary to a writer
pub fn store_run_summary<W: Write>(run_summary: RunSummary, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, &run_summary)?;
    Ok(())
}

/// Load a run summary from a reader
pub fn load_run_summary<R: Read>(reader: R) -> anyhow::Result<RunSummary> {
    let reader = std::io::BufReader::new(reader);
    let run_summary: RunSummary = serde_json::from_reader(reader)?;
    Ok(run_summary)
}

/// Load run summaries from a file
///
/// The file should contain one JSON object per line. This is the format produced by
/// [append_run_summary].
pub fn load_summary_runs(path: PathBuf) -> anyhow::Result<Vec<RunSummary>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut runs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let run: RunSummary = serde_json::from_str(&line)?;
        runs.push(run);
    }
    Ok(runs)
}
