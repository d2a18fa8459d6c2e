//! K-Means clustering of normalized satisfaction scores

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use linfa::prelude::*;
use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::debug;

/// Number of satisfaction tiers, one cluster each.
pub const N_CLASSES: usize = 5;

/// Fitted clustering of a one-dimensional score column
#[derive(Debug)]
pub struct ScoreClusters {
    /// Number of clusters
    pub n_clusters: usize,
    /// Cluster label of each score, in input order
    pub labels: Array1<usize>,
    /// Cluster centroids on the score axis
    pub centroids: Array1<f64>,
    /// Within-cluster sum of squares (inertia)
    pub inertia: f64,
}

impl ScoreClusters {
    /// Get cluster sizes
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &label in self.labels.iter() {
            if label < self.n_clusters {
                sizes[label] += 1;
            }
        }
        sizes
    }

    /// Smallest and largest score of each cluster, indexed by label.
    ///
    /// Fails when a cluster has no members.
    pub fn extents(&self, scores: &[f64]) -> Result<Vec<(f64, f64)>, PipelineError> {
        let mut extents = vec![(f64::INFINITY, f64::NEG_INFINITY); self.n_clusters];
        for (&label, &score) in self.labels.iter().zip(scores) {
            let (min, max) = &mut extents[label];
            *min = min.min(score);
            *max = max.max(score);
        }

        match extents.iter().position(|(min, _)| min.is_infinite()) {
            Some(empty) => Err(PipelineError::EmptyCluster(empty)),
            None => Ok(extents),
        }
    }

    /// Silhouette coefficient computed on the first `sample_size` scores
    pub fn compute_silhouette_sample(&self, scores: &[f64], sample_size: usize) -> f64 {
        let n_samples = scores.len().min(sample_size);
        if n_samples < 2 {
            return 0.0;
        }

        let mut silhouette_sum = 0.0;

        for i in 0..n_samples {
            let cluster_label = self.labels[i];

            let mut same_cluster_distances = Vec::new();
            let mut other_cluster_distances: Vec<Vec<f64>> = vec![Vec::new(); self.n_clusters];

            for j in 0..n_samples {
                if i == j {
                    continue;
                }

                let distance = (scores[i] - scores[j]).abs();
                let other_label = self.labels[j];

                if other_label == cluster_label {
                    same_cluster_distances.push(distance);
                } else if other_label < self.n_clusters {
                    other_cluster_distances[other_label].push(distance);
                }
            }

            let a_i = mean(&same_cluster_distances).unwrap_or(0.0);

            // b(i): smallest mean distance to another cluster
            let b_i = other_cluster_distances
                .iter()
                .filter_map(|distances| mean(distances))
                .fold(f64::INFINITY, f64::min);

            let silhouette_i = if b_i.is_infinite() || (a_i == 0.0 && b_i == 0.0) {
                0.0
            } else {
                (b_i - a_i) / a_i.max(b_i)
            };

            silhouette_sum += silhouette_i;
        }

        silhouette_sum / n_samples as f64
    }
}

/// Cluster the scores into [`N_CLASSES`] groups with a seeded K-Means.
///
/// The same scores and seed always produce the same labels.
pub fn fit_score_clusters(
    scores: &[f64],
    config: &PipelineConfig,
) -> Result<ScoreClusters, PipelineError> {
    let distinct = count_distinct(scores);
    if distinct < N_CLASSES {
        return Err(PipelineError::InsufficientScores {
            required: N_CLASSES,
            found: distinct,
        });
    }

    let n_samples = scores.len();
    let records = Array2::from_shape_vec((n_samples, 1), scores.to_vec())
        .map_err(|e| PipelineError::Clustering(e.to_string()))?;
    let targets: Array1<usize> = Array1::zeros(n_samples); // unused by K-Means
    let dataset = Dataset::new(records.clone(), targets);

    let rng = Xoshiro256Plus::seed_from_u64(config.seed);
    let model = KMeans::params_with(N_CLASSES, rng, L2Dist)
        .max_n_iterations(config.max_iterations)
        .tolerance(config.tolerance)
        .fit(&dataset)
        .map_err(|e| PipelineError::Clustering(e.to_string()))?;

    let labels: Array1<usize> = model.predict(&records);
    let centroids = model.centroids().column(0).to_owned();
    let inertia = compute_inertia(scores, &labels, &centroids);

    debug!(?centroids, inertia, "fitted score clusters");

    Ok(ScoreClusters {
        n_clusters: N_CLASSES,
        labels,
        centroids,
        inertia,
    })
}

fn count_distinct(scores: &[f64]) -> usize {
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Within-cluster sum of squares
fn compute_inertia(scores: &[f64], labels: &Array1<usize>, centroids: &Array1<f64>) -> f64 {
    scores
        .iter()
        .zip(labels.iter())
        .filter(|&(_, &cluster)| cluster < centroids.len())
        .map(|(&score, &cluster)| (score - centroids[cluster]).powi(2))
        .sum()
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
