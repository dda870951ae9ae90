use std::path::PathBuf;

use clap::Parser;

/// Detect drift between redundant sensors.
///
/// Reads a JSON analysis input (a list of time series), aligns the numeric
/// series, runs CUSUM over their pairwise differences and prints the
/// resulting event frames as JSON.
#[derive(Parser, Debug)]
#[command(name = "driftframe", version, about = "Detect drift between redundant sensors")]
pub struct CliArgs {
    /// JSON input file (`-` reads stdin)
    pub input: PathBuf,

    /// DriftConfig rule file (YAML). Falls back to environment settings.
    #[arg(long, env = "DRIFTFRAME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail instead of warning when the input does not meet the declared applicability
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,
}

impl CliArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
