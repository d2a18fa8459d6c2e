//! csat_bands: restaurant listing cleaner and satisfaction banding
//!
//! Cleans a scraped batch of restaurant listings (Persian digits, missing
//! values, free-text prices, duplicates), scores each listing with a weighted
//! rate/review composite and bands the scores into classes A-E using
//! K-Means clustering.

pub mod classify;
pub mod clean;
pub mod cli;
pub mod config;
pub mod correlation;
pub mod data;
pub mod digits;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod score;

// Re-export public items for easier access
pub use classify::{derive_bounds, ClassificationBounds};
pub use clean::clean_batch;
pub use cli::Args;
pub use config::PipelineConfig;
pub use data::{load_raw_batch, write_csv};
pub use digits::normalize_digits;
pub use error::{ParseError, PipelineError};
pub use model::{fit_score_clusters, ScoreClusters};
pub use pipeline::{classify_scores, run_pipeline, PipelineOutput};
pub use record::{Class, ClassifiedRecord, RawRecord, Record, ScoredRecord};
pub use score::{score_batch, MinMaxScaler};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
