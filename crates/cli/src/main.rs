mod cli;
mod config;
mod io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use driftframe_compute::{evaluate_applicability, SensorDriftAnalysis};
use driftframe_core::config::load_dotenv;

use crate::cli::CliArgs;
use crate::config::resolve_settings;
use crate::io::{read_input, write_result};

fn main() -> Result<()> {
    load_dotenv();

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let settings = resolve_settings(args.config.as_deref())?;
    let input = read_input(&args.input, args.reads_stdin())?;
    info!(series = input.series.len(), "analysis input loaded");

    let report = evaluate_applicability(&settings.applicability, &input);
    if !report.is_applicable() {
        for unmet in &report.unmet {
            warn!(?unmet, "input outside declared applicability");
        }
        if args.strict {
            bail!(
                "input does not meet {} applicability requirement(s)",
                report.unmet.len()
            );
        }
    }

    let mut analysis = SensorDriftAnalysis::new(settings.detector);
    let result = analysis.run(&input).context("sensor drift analysis failed")?;
    debug!(metrics = ?analysis.metrics, "pipeline metrics");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, &result, args.pretty).context("failed to write result")?;

    Ok(())
}
