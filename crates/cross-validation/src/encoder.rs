//! Encoded Allele Datasets

use crate::EvalError;
use binding_data::{
    ic50_to_regression_target, is_binder, normalize_allele_name, AlleleDataset, AlleleDatasets,
};
use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Peptide feature encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeptideEncoding {
    /// 1-of-k binary vector per residue
    OneHot,
    /// Amino-acid index per residue, for learned embeddings
    Index,
}

/// Converts peptide sequences into a feature matrix, one row per peptide
pub trait PeptideEncoder {
    fn encode(
        &self,
        peptides: &[&str],
        encoding: PeptideEncoding,
    ) -> Result<Array2<f64>, EvalError>;
}

/// Features, regression targets and raw IC50s of one allele
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    pub ic50: Array1<f64>,
}

impl EncodedDataset {
    /// Assemble from parts with matching row counts
    pub fn new(x: Array2<f64>, y: Array1<f64>, ic50: Array1<f64>) -> Result<Self, EvalError> {
        if x.nrows() != y.len() || y.len() != ic50.len() {
            return Err(EvalError::InvalidInputShape {
                expected: format!("{} rows", x.nrows()),
                actual: format!("y={}, ic50={}", y.len(), ic50.len()),
            });
        }
        Ok(Self { x, y, ic50 })
    }

    /// Encode an allele dataset, deriving targets from IC50 on the `max_ic50` scale
    pub fn encode<E: PeptideEncoder + ?Sized>(
        dataset: &AlleleDataset,
        encoder: &E,
        max_ic50: f64,
        encoding: PeptideEncoding,
    ) -> Result<Self, EvalError> {
        let peptides: Vec<&str> = dataset.peptides().collect();
        let x = encoder.encode(&peptides, encoding)?;
        let ic50 = Array1::from(dataset.ic50());
        let y = ic50.mapv(|v| ic50_to_regression_target(v, max_ic50));
        Self::new(x, y, ic50)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Rows at the given indices
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            ic50: self.ic50.select(Axis(0), indices),
        }
    }

    /// Binder labels (IC50 <= 500 nM)
    pub fn labels(&self) -> Vec<bool> {
        self.ic50.iter().map(|&v| is_binder(v)).collect()
    }

    /// Stack datasets vertically; `None` when there is nothing to stack
    pub fn stack<'a, I>(datasets: I) -> Result<Option<Self>, EvalError>
    where
        I: IntoIterator<Item = &'a EncodedDataset>,
    {
        let parts: Vec<&EncodedDataset> = datasets.into_iter().collect();
        if parts.is_empty() {
            return Ok(None);
        }
        let xs: Vec<ArrayView2<'_, f64>> = parts.iter().map(|d| d.x.view()).collect();
        let ys: Vec<_> = parts.iter().map(|d| d.y.view()).collect();
        let ic50s: Vec<_> = parts.iter().map(|d| d.ic50.view()).collect();
        Ok(Some(Self {
            x: concatenate(Axis(0), &xs)?,
            y: concatenate(Axis(0), &ys)?,
            ic50: concatenate(Axis(0), &ic50s)?,
        }))
    }
}

/// Encoded datasets keyed by normalized allele name
pub type EncodedDatasets = BTreeMap<String, EncodedDataset>;

/// Encode every allele dataset, keyed by normalized allele name
pub fn encode_allele_datasets<E: PeptideEncoder + ?Sized>(
    datasets: &AlleleDatasets,
    encoder: &E,
    max_ic50: f64,
    encoding: PeptideEncoding,
) -> Result<EncodedDatasets, EvalError> {
    let mut encoded = EncodedDatasets::new();
    let mut raw_names: BTreeMap<String, &str> = BTreeMap::new();
    for (name, dataset) in datasets {
        let normalized = normalize_allele_name(name);
        if let Some(first) = raw_names.insert(normalized.clone(), name) {
            return Err(EvalError::DuplicateAllele {
                first: first.to_string(),
                second: name.clone(),
            });
        }
        let data = EncodedDataset::encode(dataset, encoder, max_ic50, encoding)?;
        debug!("Encoded {} as {}: X shape {:?}", name, normalized, data.x.shape());
        encoded.insert(normalized, data);
    }
    Ok(encoded)
}
