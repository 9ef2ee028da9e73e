//! Allele Eligibility Filter

use crate::allele::{is_malformed_allele_name, normalize_allele_name};
use crate::record::AlleleDataset;
use crate::AlleleDatasets;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Why an allele was left out of evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Purely numeric or shorter than a gene letter plus four digits
    MalformedName,
    /// Fewer samples than the configured minimum
    TooFewSamples { count: usize, min: usize },
    /// Every measurement is a binder
    NoNegatives,
    /// No measurement is a binder
    NoPositives,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedName => write!(f, "malformed allele name"),
            SkipReason::TooFewSamples { count, min } => {
                write!(f, "too few samples: {} < {}", count, min)
            }
            SkipReason::NoNegatives => write!(f, "no negative examples"),
            SkipReason::NoPositives => write!(f, "no positive examples"),
        }
    }
}

/// Eligibility rules for per-allele evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlleleFilter {
    /// Minimum number of measurements an allele needs
    pub min_samples_per_allele: usize,
}

impl Default for AlleleFilter {
    fn default() -> Self {
        Self {
            min_samples_per_allele: 5,
        }
    }
}

impl AlleleFilter {
    pub fn new(min_samples_per_allele: usize) -> Self {
        Self {
            min_samples_per_allele,
        }
    }

    /// Check one allele, returning its normalized name when eligible
    pub fn check(&self, allele_name: &str, dataset: &AlleleDataset) -> Result<String, SkipReason> {
        if is_malformed_allele_name(allele_name) {
            return Err(SkipReason::MalformedName);
        }
        let count = dataset.len();
        if count < self.min_samples_per_allele {
            return Err(SkipReason::TooFewSamples {
                count,
                min: self.min_samples_per_allele,
            });
        }
        match dataset.class_counts() {
            (_, 0) => Err(SkipReason::NoNegatives),
            (0, _) => Err(SkipReason::NoPositives),
            _ => Ok(normalize_allele_name(allele_name)),
        }
    }
}

/// Eligible alleles in sorted name order, paired with their normalized names
pub fn filter_alleles<'a>(
    datasets: &'a AlleleDatasets,
    filter: &AlleleFilter,
) -> Vec<(String, &'a AlleleDataset)> {
    datasets
        .iter()
        .filter_map(|(name, dataset)| match filter.check(name, dataset) {
            Ok(normalized) => Some((normalized, dataset)),
            Err(reason) => {
                info!(allele = %name, %reason, "Skipping allele");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BindingRecord;

    fn dataset(allele: &str, ic50s: &[f64]) -> AlleleDataset {
        let records = ic50s
            .iter()
            .enumerate()
            .map(|(i, &ic50)| {
                BindingRecord::from_ic50(allele, format!("PEPTIDE{:02}", i), ic50, 5000.0).unwrap()
            });
        AlleleDataset::from_records(allele, records).unwrap()
    }

    #[test]
    fn test_eligible_allele_is_normalized() {
        let filter = AlleleFilter::default();
        let data = dataset("HLA-A*02:01", &[10.0, 100.0, 1000.0, 2000.0, 30.0]);
        assert_eq!(filter.check("HLA-A*02:01", &data), Ok("A0201".to_string()));
    }

    #[test]
    fn test_skip_reasons() {
        let filter = AlleleFilter::new(3);
        let mixed = dataset("0201", &[10.0, 1000.0, 10.0]);
        assert_eq!(filter.check("0201", &mixed), Err(SkipReason::MalformedName));

        let small = dataset("A0201", &[10.0, 1000.0]);
        assert_eq!(
            filter.check("A0201", &small),
            Err(SkipReason::TooFewSamples { count: 2, min: 3 })
        );

        let binders = dataset("A0201", &[10.0, 20.0, 500.0]);
        assert_eq!(filter.check("A0201", &binders), Err(SkipReason::NoNegatives));

        let non_binders = dataset("A0201", &[501.0, 2000.0, 5000.0]);
        assert_eq!(filter.check("A0201", &non_binders), Err(SkipReason::NoPositives));
    }

    #[test]
    fn test_filter_alleles_sorted() {
        let mut datasets = AlleleDatasets::new();
        let ic50s = [10.0, 100.0, 1000.0, 2000.0, 30.0];
        datasets.insert("B0702".to_string(), dataset("B0702", &ic50s));
        datasets.insert("A0201".to_string(), dataset("A0201", &ic50s));
        datasets.insert("A02".to_string(), dataset("A02", &ic50s));

        let eligible = filter_alleles(&datasets, &AlleleFilter::default());
        let names: Vec<_> = eligible.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["A0201", "B0702"]);
    }
}
