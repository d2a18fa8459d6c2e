//! Composite satisfaction score with batch-relative min-max normalization

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::record::{Record, ScoredRecord};
use ndarray::Array1;
use tracing::info;

/// Min-max scaler fitted on a single column.
///
/// Bounds come from the batch it was fitted on, so scaled values are only
/// comparable within that batch. A constant column scales to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    pub min: f64,
    pub max: f64,
}

impl MinMaxScaler {
    /// Fit on the given values. Returns `None` for an empty column.
    pub fn fit(values: &Array1<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    pub fn transform_value(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            0.0
        } else {
            (value - self.min) / range
        }
    }

    pub fn transform(&self, values: &Array1<f64>) -> Array1<f64> {
        values.mapv(|v| self.transform_value(v))
    }
}

/// Fit a scaler on `values` and return the scaled column.
fn fit_transform(values: &Array1<f64>) -> Array1<f64> {
    match MinMaxScaler::fit(values) {
        Some(scaler) => scaler.transform(values),
        None => Array1::zeros(0),
    }
}

/// Score a cleaned batch.
///
/// The composite combines the raw rate and raw review count,
/// `csat = rate_weight * rate + review_weight * review`, and is then min-max
/// normalized over the batch. Rate and review are also normalized on their
/// own and kept alongside.
pub fn score_batch(
    records: Vec<Record>,
    config: &PipelineConfig,
) -> Result<Vec<ScoredRecord>, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::EmptyBatch);
    }

    let rates: Array1<f64> = records.iter().map(|r| r.rate).collect();
    let reviews: Array1<f64> = records.iter().map(|r| r.review as f64).collect();

    let rate_normalized = fit_transform(&rates);
    let review_normalized = fit_transform(&reviews);

    let csat = &rates * config.rate_weight + &reviews * config.review_weight;
    let normalized_csat = fit_transform(&csat);

    info!(
        records = records.len(),
        csat_min = csat.iter().copied().fold(f64::INFINITY, f64::min),
        csat_max = csat.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        "scored batch"
    );

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, record)| ScoredRecord {
            record,
            rate_normalized: rate_normalized[i],
            review_normalized: review_normalized[i],
            csat: csat[i],
            normalized_csat: normalized_csat[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn record(name: &str, rate: f64, review: u64) -> Record {
        Record {
            name: name.to_string(),
            location: String::new(),
            rate,
            review,
            category: "Unknown".to_string(),
            discount: false,
            minimum_purchase: 0,
        }
    }

    #[test]
    fn test_min_max_scaler() {
        let values = array![2.0, 4.0, 6.0];
        let scaler = MinMaxScaler::fit(&values).unwrap();
        assert_eq!(scaler.min, 2.0);
        assert_eq!(scaler.max, 6.0);
        assert_eq!(scaler.transform(&values), array![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let values = array![3.0, 3.0];
        let scaler = MinMaxScaler::fit(&values).unwrap();
        assert_eq!(scaler.transform(&values), array![0.0, 0.0]);
        assert!(MinMaxScaler::fit(&Array1::zeros(0)).is_none());
    }

    #[test]
    fn test_csat_uses_raw_values() {
        let records = vec![record("a", 4.0, 10), record("b", 2.0, 0), record("c", 5.0, 100)];
        let scored = score_batch(records, &PipelineConfig::default()).unwrap();

        let expected = [0.7 * 4.0 + 0.3 * 10.0, 0.7 * 2.0, 0.7 * 5.0 + 0.3 * 100.0];
        for (s, e) in scored.iter().zip(expected) {
            assert!((s.csat - e).abs() < 1e-12);
        }

        assert_eq!(scored[1].normalized_csat, 0.0);
        assert_eq!(scored[2].normalized_csat, 1.0);
        assert_eq!(scored[1].rate_normalized, 0.0);
        assert!((scored[0].rate_normalized - 2.0 / 3.0).abs() < 1e-12);
        assert!((scored[0].review_normalized - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_csat_in_unit_interval() {
        let records: Vec<Record> = (0..50)
            .map(|i| record(&format!("r{i}"), 1.0 + (i % 9) as f64 * 0.5, (i * 37 % 400) as u64))
            .collect();

        let scored = score_batch(records, &PipelineConfig::default()).unwrap();
        assert!(scored
            .iter()
            .all(|s| (0.0..=1.0).contains(&s.normalized_csat)));
    }

    #[test]
    fn test_empty_batch_is_error() {
        let result = score_batch(Vec::new(), &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::EmptyBatch)));
    }
}
