//! Synthesis Configuration

use crate::SynthesisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weighting of neighbouring alleles during synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Added to the weight total, shrinks weakly supported affinities towards 0
    pub smoothing: f64,
    /// Power applied to each similarity
    pub exponent: f64,
    /// Alleles never used as evidence
    pub exclude_alleles: BTreeSet<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.005,
            exponent: 2.0,
            exclude_alleles: BTreeSet::new(),
        }
    }
}

impl SynthesisConfig {
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    pub fn excluding<I, S>(mut self, alleles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_alleles.extend(alleles.into_iter().map(Into::into));
        self
    }

    pub fn validate(&self) -> Result<(), SynthesisError> {
        if !(self.smoothing >= 0.0) || !self.smoothing.is_finite() {
            return Err(SynthesisError::InvalidConfig(format!(
                "smoothing must be finite and >= 0, got {}",
                self.smoothing
            )));
        }
        if !self.exponent.is_finite() {
            return Err(SynthesisError::InvalidConfig(format!(
                "exponent must be finite, got {}",
                self.exponent
            )));
        }
        Ok(())
    }

    pub(crate) fn is_excluded(&self, allele: &str) -> bool {
        self.exclude_alleles.contains(allele)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SynthesisConfig::default();
        assert_eq!(config.smoothing, 0.005);
        assert_eq!(config.exponent, 2.0);
        assert!(config.exclude_alleles.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_smoothing() {
        let config = SynthesisConfig::default().with_smoothing(-1.0);
        assert!(config.validate().is_err());
        assert!(SynthesisConfig::default().with_smoothing(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_excluding() {
        let config = SynthesisConfig::default().excluding(["A0201", "B0702"]);
        assert!(config.is_excluded("A0201"));
        assert!(!config.is_excluded("A0301"));
    }
}
