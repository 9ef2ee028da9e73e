//! Binding Data Error Types

use thiserror::Error;

/// Errors while building or loading binding data
#[derive(Debug, Error)]
pub enum DataError {
    /// Affinity outside the normalized range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Record belongs to a different allele than the dataset
    #[error("Record for allele {actual} added to dataset of {expected}")]
    AlleleMismatch { expected: String, actual: String },

    /// Required column missing from an input table
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// CSV parse or IO failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
