use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    bench_diff::cli::run_with_args(bench_diff::cli::Args::parse())
}
