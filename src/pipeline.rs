//! Pipeline entry point: raw batch to classified batch

use crate::classify::{derive_bounds, ClassificationBounds};
use crate::clean::{clean_batch, CleaningStats};
use crate::config::PipelineConfig;
use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::error::PipelineError;
use crate::model::{fit_score_clusters, ScoreClusters, N_CLASSES};
use crate::record::{Class, ClassifiedRecord, RawRecord, Record, ScoredRecord};
use crate::score::score_batch;
use tracing::{debug, info, warn};

/// Everything a run produces
#[derive(Debug)]
pub struct PipelineOutput {
    /// Cleaned batch before scoring
    pub cleaned: Vec<Record>,
    pub cleaning_stats: CleaningStats,
    pub correlations: CorrelationMatrix,
    pub clusters: ScoreClusters,
    pub bounds: ClassificationBounds,
    pub classified: Vec<ClassifiedRecord>,
}

impl PipelineOutput {
    /// Number of records in each tier, `A` first, `Unknown` last.
    pub fn class_counts(&self) -> Vec<(Class, usize)> {
        let mut tiers: Vec<Class> = Class::ORDERED.iter().rev().copied().collect();
        tiers.push(Class::Unknown);

        tiers
            .into_iter()
            .map(|class| {
                let count = self.classified.iter().filter(|r| r.class == class).count();
                (class, count)
            })
            .collect()
    }
}

/// Cluster normalized scores and assign each a tier.
///
/// Returns the fitted clusters, the derived bounds and one `(cluster, class)`
/// pair per score.
pub fn classify_scores(
    scores: &[f64],
    config: &PipelineConfig,
) -> Result<(ScoreClusters, ClassificationBounds, Vec<(usize, Class)>), PipelineError> {
    let clusters = fit_score_clusters(scores, config)?;

    let extents: [(f64, f64); N_CLASSES] = clusters
        .extents(scores)?
        .try_into()
        .map_err(|_| PipelineError::Clustering("unexpected cluster count".to_string()))?;
    debug!(?extents, "cluster score extents");
    let bounds = derive_bounds(extents);
    info!(%bounds, "derived classification bounds");

    let assignments = clusters
        .labels
        .iter()
        .zip(scores)
        .map(|(&cluster, &score)| {
            let class = bounds.classify(score);
            if class == Class::Unknown {
                warn!(score, "score outside classification bounds");
            }
            (cluster, class)
        })
        .collect();

    Ok((clusters, bounds, assignments))
}

/// Run both stages over one batch.
///
/// A malformed field anywhere in the batch aborts the run.
pub fn run_pipeline(
    raw: &[RawRecord],
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;

    let (cleaned, cleaning_stats) = clean_batch(raw, config)?;
    let correlations = correlation_matrix(&cleaned);

    let scored: Vec<ScoredRecord> = score_batch(cleaned.clone(), config)?;
    let scores: Vec<f64> = scored.iter().map(|s| s.normalized_csat).collect();
    let (clusters, bounds, assignments) = classify_scores(&scores, config)?;

    let classified = scored
        .into_iter()
        .zip(assignments)
        .map(|(scored, (cluster, class))| ClassifiedRecord {
            scored,
            cluster,
            class,
        })
        .collect();

    Ok(PipelineOutput {
        cleaned,
        cleaning_stats,
        correlations,
        clusters,
        bounds,
        classified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_spread_scores_get_distinct_classes() {
        let scores = [0.05, 0.25, 0.45, 0.65, 0.95];
        let (clusters, bounds, assignments) =
            classify_scores(&scores, &PipelineConfig::default()).unwrap();

        assert_eq!(clusters.cluster_sizes(), vec![1; 5]);
        let expected = [0.0, 0.15, 0.35, 0.55, 0.80, 1.0];
        for (b, e) in bounds.as_slice().iter().zip(expected) {
            assert!((b - e).abs() < 1e-9);
        }

        let classes: Vec<Class> = assignments.iter().map(|&(_, class)| class).collect();
        assert_eq!(classes, vec![Class::E, Class::D, Class::C, Class::B, Class::A]);
    }

    #[test]
    fn test_run_pipeline_rejects_invalid_config() {
        let config = PipelineConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let result = run_pipeline(&[], &config);
        assert!(matches!(result, Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_pipeline_empty_after_cleaning() {
        let raw = vec![RawRecord {
            name: Some("Only new".to_string()),
            rate: Some("جدید".to_string()),
            minimum_purchase: Some("10".to_string()),
            ..Default::default()
        }];
        let result = run_pipeline(&raw, &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::EmptyBatch)));
    }
}
