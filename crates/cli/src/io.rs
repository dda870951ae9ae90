use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use driftframe_core::{AnalysisResult, MultivariateAnalysisInput};

/// Parse an analysis input from any reader.
pub fn parse_input(reader: impl Read) -> Result<MultivariateAnalysisInput> {
    serde_json::from_reader(reader).context("invalid analysis input JSON")
}

/// Read the analysis input from `path`, or stdin when `from_stdin` is set.
pub fn read_input(path: &Path, from_stdin: bool) -> Result<MultivariateAnalysisInput> {
    if from_stdin {
        return parse_input(io::stdin().lock());
    }
    let file = File::open(path)
        .with_context(|| format!("failed to open input '{}'", path.display()))?;
    parse_input(BufReader::new(file))
        .with_context(|| format!("failed to read input '{}'", path.display()))
}

/// Serialize `result` to `out`, followed by a newline.
pub fn write_result(out: &mut impl Write, result: &AnalysisResult, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}
