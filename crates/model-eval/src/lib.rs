//! Model Evaluation
//!
//! Provides binder classification metrics computed from regression outputs,
//! summary statistics over fold scores, and the tabular results produced by
//! every evaluation driver.

mod metrics;
mod scores;
mod statistics;
mod table;

pub use metrics::{
    binder_labels, majority_baseline, roc_auc, score_predictions, ConfusionMatrix, FoldScores,
};
pub use scores::{AlleleScoreSummary, ScoreCollection};
pub use statistics::{median, SummaryStatistics};
pub use table::{Cell, ResultTable};

use thiserror::Error;

/// Errors while assembling or writing result tables
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Row has {actual} cells, table has {expected} columns")]
    RowLength { expected: usize, actual: usize },
    #[error("Column mismatch: expected {expected:?}, got {actual:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
