//! Trainable Regressor Interface

use ndarray::{Array1, ArrayView1, ArrayView2};
use thiserror::Error;

/// Errors raised by a model implementation
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model build failed: {0}")]
    Build(String),
    #[error("Training failed: {0}")]
    Training(String),
    #[error("Prediction failed: {0}")]
    Prediction(String),
    #[error("Weights rejected: {0}")]
    Weights(String),
}

/// Training schedule for one `fit` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitParams {
    pub epochs: usize,
    pub batch_size: usize,
}

impl FitParams {
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        Self { epochs, batch_size }
    }
}

/// Opaque trainable regressor mapping encoded peptides to regression targets
///
/// Evaluation drivers snapshot [`Regressor::weights`] once and restore it with
/// [`Regressor::set_weights`] before every allele or fold.
pub trait Regressor {
    /// Snapshot of all trainable parameters
    type Weights: Clone;

    fn weights(&self) -> Self::Weights;

    fn set_weights(&mut self, weights: &Self::Weights) -> Result<(), ModelError>;

    fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        params: FitParams,
    ) -> Result<(), ModelError>;

    /// One prediction per row of `x`
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError>;
}
