//! Pearson correlation between the cleaned numeric features

use crate::record::Record;
use ndarray::{Array1, Array2};
use tracing::debug;

/// Feature names, in matrix order.
pub const FEATURES: [&str; 4] = ["Discount", "Rate", "Review", "Minimum Purchase"];

/// Symmetric correlation matrix over [`FEATURES`].
///
/// Entries involving a constant feature are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = FEATURES.iter().position(|&f| f == a)?;
        let j = FEATURES.iter().position(|&f| f == b)?;
        Some(self.values[[i, j]])
    }
}

/// Compute the correlation matrix of a cleaned batch.
pub fn correlation_matrix(records: &[Record]) -> CorrelationMatrix {
    let columns: [Array1<f64>; 4] = [
        records.iter().map(|r| f64::from(u8::from(r.discount))).collect(),
        records.iter().map(|r| r.rate).collect(),
        records.iter().map(|r| r.review as f64).collect(),
        records.iter().map(|r| r.minimum_purchase as f64).collect(),
    ];

    let n = FEATURES.len();
    let mut values = Array2::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            values[[i, j]] = r;
            values[[j, i]] = r;
        }
    }

    debug!(features = ?FEATURES, correlations = ?values, "computed feature correlations");
    CorrelationMatrix { values }
}

fn pearson(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let (Some(mean_x), Some(mean_y)) = (x.mean(), y.mean()) else {
        return f64::NAN;
    };

    let dx = x - mean_x;
    let dy = y - mean_y;
    let covariance = (&dx * &dy).sum();
    let denominator = (dx.mapv(|v| v * v).sum() * dy.mapv(|v| v * v).sum()).sqrt();

    if denominator == 0.0 {
        f64::NAN
    } else {
        covariance / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rate: f64, review: u64, discount: bool, minimum_purchase: u64) -> Record {
        Record {
            name: format!("{rate}-{review}"),
            location: String::new(),
            rate,
            review,
            category: "Unknown".to_string(),
            discount,
            minimum_purchase,
        }
    }

    #[test]
    fn test_perfect_correlations() {
        let records = vec![
            record(1.0, 10, false, 300),
            record(2.0, 20, true, 200),
            record(3.0, 30, false, 100),
        ];
        let matrix = correlation_matrix(&records);

        assert!((matrix.get("Rate", "Review").unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get("Rate", "Minimum Purchase").unwrap() + 1.0).abs() < 1e-12);
        assert!((matrix.get("Review", "Review").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(
            matrix.get("Rate", "Discount"),
            matrix.get("Discount", "Rate")
        );
    }

    #[test]
    fn test_constant_feature_is_nan() {
        let records = vec![record(1.0, 5, true, 100), record(2.0, 6, true, 200)];
        let matrix = correlation_matrix(&records);

        assert!(matrix.get("Discount", "Rate").unwrap().is_nan());
        assert!(matrix.get("Unknown", "Rate").is_none());
    }
}
