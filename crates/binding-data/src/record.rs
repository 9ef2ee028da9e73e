//! Binding Records and Allele Datasets

use crate::affinity::{ic50_to_regression_target, is_binder};
use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// One peptide-MHC binding measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Allele the peptide was measured against
    pub allele: String,
    /// Peptide amino-acid sequence
    pub peptide: String,
    /// Normalized affinity in [0, 1], 1.0 = strongest binding
    pub affinity: f64,
    /// Sample weight
    pub weight: f64,
    /// Raw IC50 (nM)
    pub ic50: f64,
}

impl BindingRecord {
    /// Create a record from a raw IC50, normalized against `max_ic50`, with unit weight
    pub fn from_ic50(
        allele: impl Into<String>,
        peptide: impl Into<String>,
        ic50: f64,
        max_ic50: f64,
    ) -> Result<Self, DataError> {
        if !(ic50 > 0.0) {
            return Err(DataError::OutOfRange {
                field: "ic50",
                value: ic50,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        Ok(Self {
            allele: allele.into(),
            peptide: peptide.into(),
            affinity: ic50_to_regression_target(ic50, max_ic50),
            weight: 1.0,
            ic50,
        })
    }

    /// Replace the sample weight
    pub fn with_weight(mut self, weight: f64) -> Result<Self, DataError> {
        if !(weight >= 0.0) {
            return Err(DataError::OutOfRange {
                field: "weight",
                value: weight,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        self.weight = weight;
        Ok(self)
    }

    /// Whether this measurement is a binder (IC50 <= 500 nM)
    pub fn is_binder(&self) -> bool {
        is_binder(self.ic50)
    }
}

/// All binding records measured against a single allele
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlleleDataset {
    allele: String,
    records: Vec<BindingRecord>,
}

impl AlleleDataset {
    /// Create an empty dataset for an allele
    pub fn new(allele: impl Into<String>) -> Self {
        Self {
            allele: allele.into(),
            records: Vec::new(),
        }
    }

    /// Build a dataset from records that all belong to `allele`
    pub fn from_records(
        allele: impl Into<String>,
        records: impl IntoIterator<Item = BindingRecord>,
    ) -> Result<Self, DataError> {
        let mut dataset = Self::new(allele);
        for record in records {
            dataset.push(record)?;
        }
        Ok(dataset)
    }

    /// Append a record
    pub fn push(&mut self, record: BindingRecord) -> Result<(), DataError> {
        if record.allele != self.allele {
            return Err(DataError::AlleleMismatch {
                expected: self.allele.clone(),
                actual: record.allele,
            });
        }
        if !(0.0..=1.0).contains(&record.affinity) {
            return Err(DataError::OutOfRange {
                field: "affinity",
                value: record.affinity,
                min: 0.0,
                max: 1.0,
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn allele(&self) -> &str {
        &self.allele
    }

    pub fn records(&self) -> &[BindingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn peptides(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.peptide.as_str())
    }

    /// Normalized affinities (regression targets)
    pub fn affinities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.affinity).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.weight).collect()
    }

    pub fn ic50(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.ic50).collect()
    }

    /// Count of binders and non-binders
    pub fn class_counts(&self) -> (usize, usize) {
        let binders = self.records.iter().filter(|r| r.is_binder()).count();
        (binders, self.records.len() - binders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_ic50() {
        let record = BindingRecord::from_ic50("A0201", "SIINFEKLL", 50.0, 5000.0).unwrap();
        assert!(record.affinity > 0.5 && record.affinity < 1.0);
        assert_eq!(record.weight, 1.0);
        assert!(record.is_binder());
    }

    #[test]
    fn test_invalid_ic50_rejected() {
        assert!(BindingRecord::from_ic50("A0201", "SIINFEKLL", 0.0, 5000.0).is_err());
        assert!(BindingRecord::from_ic50("A0201", "SIINFEKLL", f64::NAN, 5000.0).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let record = BindingRecord::from_ic50("A0201", "SIINFEKLL", 50.0, 5000.0).unwrap();
        assert!(record.clone().with_weight(-1.0).is_err());
        assert_eq!(record.with_weight(0.0).unwrap().weight, 0.0);
    }

    #[test]
    fn test_dataset_rejects_other_allele() {
        let mut dataset = AlleleDataset::new("A0201");
        let record = BindingRecord::from_ic50("B0702", "SIINFEKLL", 50.0, 5000.0).unwrap();
        assert!(matches!(
            dataset.push(record),
            Err(DataError::AlleleMismatch { .. })
        ));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_class_counts() {
        let records = [20.0, 400.0, 800.0, 20_000.0]
            .iter()
            .map(|&ic50| BindingRecord::from_ic50("A0201", "SIINFEKLL", ic50, 5000.0).unwrap());
        let dataset = AlleleDataset::from_records("A0201", records).unwrap();
        assert_eq!(dataset.class_counts(), (2, 2));
        assert_eq!(dataset.ic50().len(), 4);
    }
}
