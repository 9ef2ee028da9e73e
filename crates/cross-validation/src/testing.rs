//! Test doubles for models and encoders

use crate::encoder::{PeptideEncoder, PeptideEncoding};
use crate::model::{FitParams, ModelError, Regressor};
use crate::EvalError;
use binding_data::{AlleleDataset, BindingRecord};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Dataset with one synthetic peptide per IC50
pub fn dataset(allele: &str, ic50s: &[f64]) -> AlleleDataset {
    let records = ic50s.iter().enumerate().map(|(i, &ic50)| {
        BindingRecord::from_ic50(allele, format!("SLYNTVATL{:03}", i), ic50, 5000.0).unwrap()
    });
    AlleleDataset::from_records(allele, records).unwrap()
}

/// Two features per peptide: length and first byte
pub struct FirstResidueEncoder;

impl PeptideEncoder for FirstResidueEncoder {
    fn encode(
        &self,
        peptides: &[&str],
        _encoding: PeptideEncoding,
    ) -> Result<Array2<f64>, EvalError> {
        let mut x = Array2::zeros((peptides.len(), 2));
        for (row, peptide) in peptides.iter().enumerate() {
            x[[row, 0]] = peptide.len() as f64;
            x[[row, 1]] = peptide.bytes().next().map(f64::from).unwrap_or(0.0);
        }
        Ok(x)
    }
}

/// One recorded `fit` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitCall {
    pub rows: usize,
    pub epochs: usize,
    pub bias_before: f64,
}

/// Predicts the mean training target; records every fit and restore
#[derive(Debug, Default)]
pub struct MeanRegressor {
    pub bias: f64,
    pub fits: Vec<FitCall>,
    pub restores: usize,
    pub fail_fit: bool,
    /// Predict NaN, as a diverged network would
    pub predict_nan: bool,
}

impl Regressor for MeanRegressor {
    type Weights = f64;

    fn weights(&self) -> f64 {
        self.bias
    }

    fn set_weights(&mut self, weights: &f64) -> Result<(), ModelError> {
        self.bias = *weights;
        self.restores += 1;
        Ok(())
    }

    fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        params: FitParams,
    ) -> Result<(), ModelError> {
        if self.fail_fit {
            return Err(ModelError::Training("diverged".to_string()));
        }
        self.fits.push(FitCall {
            rows: x.nrows(),
            epochs: params.epochs,
            bias_before: self.bias,
        });
        if params.epochs > 0 {
            self.bias = y.mean().unwrap_or(0.0);
        }
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        let value = if self.predict_nan { f64::NAN } else { self.bias };
        Ok(Array1::from_elem(x.nrows(), value))
    }
}
