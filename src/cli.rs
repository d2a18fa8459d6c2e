//! Command-line interface definitions and argument parsing

use crate::config::PipelineConfig;
use clap::Parser;
use std::path::PathBuf;

/// Clean scraped restaurant listings and band them into A-E satisfaction classes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the scraped listings CSV
    #[arg(short, long, default_value = "restaurants.csv")]
    pub input: PathBuf,

    /// Output path for the classified listings CSV
    #[arg(short, long, default_value = "classified_restaurants.csv")]
    pub output: PathBuf,

    /// Also write the cleaned Name/Location/Rate/Review snapshot here
    #[arg(long)]
    pub cleaned_output: Option<PathBuf>,

    /// TOML file with pipeline settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for K-Means initialisation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum iterations for K-Means algorithm
    #[arg(long)]
    pub max_iters: Option<u64>,

    /// Tolerance for K-Means convergence
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the pipeline configuration: config file (or defaults) first,
    /// then any flags given on the command line.
    pub fn pipeline_config(&self) -> crate::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_iters) = self.max_iters {
            config.max_iterations = max_iters;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["csat-bands"]);
        assert_eq!(args.input, PathBuf::from("restaurants.csv"));
        assert_eq!(args.output, PathBuf::from("classified_restaurants.csv"));
        assert!(args.cleaned_output.is_none());
        assert_eq!(args.pipeline_config().unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "csat-bands",
            "--seed",
            "7",
            "--max-iters",
            "50",
            "--tolerance",
            "0.001",
        ]);

        let config = args.pipeline_config().unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.tolerance, 0.001);

        let args = Args::parse_from(["csat-bands", "--tolerance=-1"]);
        assert!(args.pipeline_config().is_err());
    }
}
