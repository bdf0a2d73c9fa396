use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{compare, BenchmarkSet, DiffReport, RenderOptions, DEFAULT_THRESHOLD};

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    /// Color only when stdout is a terminal.
    Auto,
    Always,
    Never,
}

/// CLI arguments for the `bench_diff` binary.
///
/// This lives in the library crate so the binary is a thin wrapper and the
/// whole command-line surface stays testable through `run_with_args`.
#[derive(Parser)]
#[command(about = "Compare two Catch2 benchmark XML reports.")]
pub struct Args {
    /// Baseline benchmark report.
    baseline: PathBuf,

    /// New benchmark report to compare against the baseline.
    new: PathBuf,

    /// Highlight threshold in percent (exclusive on both sides).
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// When to color flagged change cells.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit with status 2 when any benchmark regresses past the threshold.
    #[arg(long)]
    fail_on_regression: bool,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    baseline: Option<f64>,
    new: Option<f64>,
    percent_change: Option<f64>,
    change: &'static str,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    baseline: &'a str,
    new: &'a str,
    threshold: f64,
    rows: Vec<JsonRow<'a>>,
}

pub fn run() -> Result<()> {
    run_with_args(Args::parse())
}

pub fn run_with_args(args: Args) -> Result<()> {
    if !args.threshold.is_finite() || args.threshold < 0.0 {
        anyhow::bail!(
            "invalid --threshold {} (expected a non-negative percentage)",
            args.threshold
        );
    }

    let baseline = BenchmarkSet::parse_file(&args.baseline)?;
    let updated = BenchmarkSet::parse_file(&args.new)?;
    let report = compare(&baseline, &updated);

    match args.format {
        OutputFormat::Text => {
            let color = match args.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => io::stdout().is_terminal(),
            };
            let rendered = report.render(&RenderOptions {
                threshold: args.threshold,
                color,
            });
            write_stdout(&rendered)?;
        }
        OutputFormat::Json => {
            let json = json_report(&args, &report)?;
            write_stdout(&json)?;
        }
    }

    if args.fail_on_regression && report.has_regression(args.threshold) {
        std::process::exit(2);
    }

    Ok(())
}

fn json_report(args: &Args, report: &DiffReport) -> Result<String> {
    let baseline = args.baseline.to_string_lossy().into_owned();
    let new = args.new.to_string_lossy().into_owned();

    let rows = report
        .rows
        .iter()
        .map(|row| JsonRow {
            name: row.name.as_str(),
            baseline: row.baseline,
            new: row.updated,
            percent_change: row.percent_change,
            change: row.change(args.threshold).as_str(),
        })
        .collect();

    let mut json = serde_json::to_string(&JsonReport {
        baseline: &baseline,
        new: &new,
        threshold: args.threshold,
        rows,
    })?;
    json.push('\n');
    Ok(json)
}

/// Write the report, treating a closed pipe as success so `bench_diff ... |
/// head` exits cleanly.
fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match handle.write_all(text.as_bytes()).and_then(|()| handle.flush()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write report to stdout"),
    }
}
