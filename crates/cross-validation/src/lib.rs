//! Cross-Validation Drivers
//!
//! Evaluates peptide-MHC binding regressors per allele:
//! - k-fold cross-validation of a single allele
//! - leave-one-allele-out cross-validation with optional pretraining on the
//!   remaining alleles
//! - train/test split evaluation with per-allele fine-tuning
//!
//! Models and peptide encoders are supplied by the caller through the
//! [`Regressor`], [`ModelFactory`] and [`PeptideEncoder`] traits.

mod allele_cv;
mod config;
mod encoder;
mod factory;
mod kfold;
mod leave_out;
mod model;

#[cfg(test)]
mod testing;

pub use allele_cv::kfold_cross_validation_for_single_allele;
pub use config::{EvaluationConfig, ModelConfig, NetworkKind, NetworkSpec, DEFAULT_PEPTIDE_LENGTH};
pub use encoder::{
    encode_allele_datasets, EncodedDataset, EncodedDatasets, PeptideEncoder, PeptideEncoding,
};
pub use factory::{evaluate_config_by_cross_validation, evaluate_config_train_vs_test, ModelFactory};
pub use kfold::{Fold, KFold};
pub use leave_out::leave_out_allele_cross_validation;
pub use model::{FitParams, ModelError, Regressor};
pub use train_test::evaluate_train_vs_test;

use thiserror::Error;

/// Errors during model evaluation
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
    #[error("Encoding failed: {0}")]
    Encoding(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Non-finite prediction for {allele} at row {row}: {value}")]
    NonFinitePrediction { allele: String, row: usize, value: f64 },
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("Alleles {first} and {second} normalize to the same name")]
    DuplicateAllele { first: String, second: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Result table error: {0}")]
    Table(#[from] model_eval::TableError),
}
