//! Banding of normalized scores into A-E tiers from cluster extents
//!
//! Bounds are derived from the score range each cluster covers. This assumes
//! clusters do not interleave along the score axis, which holds for K-Means
//! on a single dimension. Records at an interleaved edge could otherwise land
//! in a neighbouring tier.

use crate::model::N_CLASSES;
use crate::record::Class;
use std::fmt;

/// Six ascending thresholds bounding the five tier intervals on `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationBounds([f64; N_CLASSES + 1]);

impl ClassificationBounds {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Tier of a score. Intervals are closed on both ends, so a score on a
    /// shared threshold falls into the lower tier. Scores outside `[0, 1]`
    /// are `Unknown`.
    pub fn classify(&self, score: f64) -> Class {
        self.0
            .windows(2)
            .zip(Class::ORDERED)
            .find(|(bounds, _)| bounds[0] <= score && score <= bounds[1])
            .map_or(Class::Unknown, |(_, class)| class)
    }
}

impl fmt::Display for ClassificationBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|b| format!("{b:.4}")).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Derive tier thresholds from the `(min, max)` score extent of each cluster.
///
/// Extents are ordered by their minimum. The outer thresholds are fixed at 0
/// and 1; each inner threshold is the midpoint between the maximum of one
/// cluster and the minimum of the next.
pub fn derive_bounds(mut extents: [(f64, f64); N_CLASSES]) -> ClassificationBounds {
    extents.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut bounds = [0.0; N_CLASSES + 1];
    bounds[N_CLASSES] = 1.0;
    for i in 1..N_CLASSES {
        bounds[i] = (extents[i - 1].1 + extents[i].0) / 2.0;
    }

    ClassificationBounds(bounds)
}
