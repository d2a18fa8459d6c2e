//! Pipeline configuration: weights, clustering parameters and sentinel texts

use crate::error::PipelineError;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Settings passed into the pipeline entry point.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Weight of the raw rate in the composite score
    pub rate_weight: f64,
    /// Weight of the raw review count in the composite score
    pub review_weight: f64,
    /// Seed for K-Means initialisation
    pub seed: u64,
    /// Maximum iterations for K-Means
    pub max_iterations: u64,
    /// Convergence tolerance for K-Means
    pub tolerance: f64,
    /// Discount text meaning "no discount present"
    pub no_discount_text: String,
    /// Rate text meaning "newly listed, not yet rated"
    pub new_listing_rate: String,
    /// Category used when the listing has none
    pub default_category: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rate_weight: 0.7,
            review_weight: 0.3,
            seed: 42,
            max_iterations: 300,
            tolerance: 1e-4,
            no_discount_text: "No Discount".to_string(),
            new_listing_rate: "جدید".to_string(),
            default_category: "Unknown".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a TOML file, falling back to defaults for
    /// missing keys.
    pub fn from_toml_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: PipelineConfig = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the scoring stage cannot work with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        for (name, weight) in [
            ("rate_weight", self.rate_weight),
            ("review_weight", self.review_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PipelineError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {weight}"
                )));
            }
        }

        if self.rate_weight + self.review_weight == 0.0 {
            return Err(PipelineError::InvalidConfig(
                "rate_weight and review_weight cannot both be zero".to_string(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_weight, 0.7);
        assert_eq!(config.review_weight, 0.3);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7").unwrap();
        writeln!(file, "no_discount_text = \"None\"").unwrap();

        let config = PipelineConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.no_discount_text, "None");
        assert_eq!(config.rate_weight, 0.7);
        assert_eq!(config.new_listing_rate, "جدید");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = PipelineConfig::default();
        config.rate_weight = -1.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.rate_weight = 0.0;
        config.review_weight = 0.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.tolerance = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();
        assert!(PipelineConfig::from_toml_file(file.path()).is_err());
    }
}
