//! Command line front end: parses a population-node trace and prints,
//! per line, the raw line, its depth and the resulting node, followed by a
//! dump of all nodes.
//!
//! ```text
//! popdag trace.txt
//! popdag --quiet --check < trace.txt
//! RUST_LOG=debug popdag trace.txt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use popdag::parser::LineSource;
use popdag::trace::{DagReport, StepReport, TraceParser};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Rebuild and inspect the population DAG of an indented node trace
#[derive(Parser, Debug)]
#[command(name = "popdag")]
#[command(version)]
struct Cli {
    /// Trace file; reads stdin if omitted or `-`
    input: Option<PathBuf>,

    /// Number of indentation characters per depth level
    #[arg(long, default_value_t = popdag::parser::DEFAULT_INDENT_WIDTH)]
    indent_width: usize,

    /// Only print the final node dump
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Check structure and interval continuity after parsing
    #[arg(long, default_value_t = false)]
    check: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = read_source(cli.input.as_ref())?;
    info!(lines = source.num_lines(), "read trace");

    let mut parser = TraceParser::new()
        .with_indent_width(cli.indent_width)
        .context("Invalid parser configuration")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (line_number, line) in source.lines() {
        let step = parser
            .parse_line(line_number, line)
            .context("Failed to parse trace")?;
        if !cli.quiet {
            writeln!(out, "{}\n", StepReport::new(parser.dag(), step, line))?;
        }
    }

    let dag = parser.into_dag();
    write!(out, "{}", DagReport::new(&dag))?;
    out.flush()?;

    if cli.check {
        for mismatch in dag.interval_mismatches() {
            warn!(
                parent_key = dag.key_of(mismatch.parent),
                child_key = dag.key_of(mismatch.child),
                parent_start = mismatch.parent_start,
                child_end = mismatch.child_end,
                "child interval does not end at parent start"
            );
        }
        anyhow::ensure!(dag.is_valid(), "Parsed DAG failed the structure check");
        info!("structure check passed");
    }

    Ok(())
}

/// Logs go to stderr, so stdout carries only the diagnostic trace.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(input: Option<&PathBuf>) -> Result<LineSource> {
    match input {
        Some(path) if path.as_os_str() != "-" => LineSource::from_file(path)
            .with_context(|| format!("Failed to read trace file {}", path.display())),
        _ => LineSource::from_reader(io::stdin().lock()).context("Failed to read trace from stdin"),
    }
}
