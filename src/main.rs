//! csat-bands: clean scraped restaurant listings and classify them A-E
//!
//! Entry point that wires loading, the cleaning and scoring pipeline, CSV
//! output and the console report.

use anyhow::Result;
use clap::Parser;
use csat_bands::{data, load_raw_batch, report, run_pipeline, write_csv, Args};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.pipeline_config()?;
    let start_time = Instant::now();

    // Step 1: Load raw listings
    let raw = load_raw_batch(&args.input)?;

    // Step 2: Clean, score and classify
    let output = run_pipeline(&raw, &config)?;

    // Step 3: Write tables
    if let Some(path) = &args.cleaned_output {
        let mut cleaned = data::cleaned_frame(&output.cleaned)?;
        write_csv(&mut cleaned, path)?;
    }

    let mut classified = data::classified_frame(&output.classified)?;
    write_csv(&mut classified, &args.output)?;

    report::print_report(&output);

    info!(
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "pipeline complete"
    );
    println!("\nClassified listings saved to: {}", args.output.display());

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
