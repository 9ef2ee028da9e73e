//! Sweep Errors

use model_eval::TableError;
use thiserror::Error;

pub type TrainingError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Training failed for config {config_idx}: {source}")]
    Training {
        config_idx: usize,
        #[source]
        source: TrainingError,
    },
    #[error("Config {0} does not serialize to named fields")]
    NotAStruct(usize),
    #[error("Config {config_idx} produced columns {actual:?}, results file has {expected:?}")]
    ColumnMismatch {
        config_idx: usize,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Result table error: {0}")]
    Table(#[from] TableError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] cross_validation::EvalError),
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] synthetic_data::SynthesisError),
    #[error("Data error: {0}")]
    Data(#[from] binding_data::DataError),
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("Invalid log level: {0}")]
    LogLevel(String),
    #[error("Logging already initialized: {0}")]
    Logging(String),
}
