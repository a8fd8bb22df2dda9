//! Trim a zstd-compressed CSV feed to its header and first N rows.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use orderbook_depth::feed::{default_output_path, trim_zst_file, DEFAULT_TRIM_ROWS};

#[derive(Debug, Parser)]
#[command(name = "trim-feed", about = "Cut a .csv.zst feed down to an uploadable CSV")]
struct Args {
    /// Compressed feed, e.g. data/glbx-mdp3-20250611.mbp-10.csv.zst
    input: PathBuf,

    /// Data rows to keep after the header
    #[arg(short, long, default_value_t = DEFAULT_TRIM_ROWS)]
    rows: usize,

    /// Output CSV (defaults to output_<rows>.csv beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let args = Args::parse();
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, args.rows));

    let summary = trim_zst_file(&args.input, &output, args.rows)?;
    info!(
        rows = summary.rows_written,
        output = %output.display(),
        "Saved trimmed feed"
    );

    Ok(())
}
