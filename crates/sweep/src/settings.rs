//! Experiment Settings

use crate::SweepError;
use binding_data::SimilarityMatrix;
use config::{Config, Environment, File};
use cross_validation::{EvaluationConfig, ModelConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use synthetic_data::SynthesisConfig;
use tracing::Level;

/// Environment variable prefix, e.g. `MHC_EVAL_EVALUATION__CV_FOLDS=10`
pub const ENV_PREFIX: &str = "MHC_EVAL";

/// Settings of one experiment run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSettings {
    /// Sweep results CSV
    pub results_path: PathBuf,
    /// Allele similarity CSV for synthetic data
    pub similarity_path: Option<PathBuf>,
    /// One of `trace`, `debug`, `info`, `warn`, `error`
    pub log_level: String,
    pub evaluation: EvaluationConfig,
    pub synthesis: SynthesisConfig,
    /// Configurations to sweep, empty = only the defaults
    pub models: Vec<ModelConfig>,
}

impl Default for ExperimentSettings {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("results.csv"),
            similarity_path: None,
            log_level: "info".to_string(),
            evaluation: EvaluationConfig::default(),
            synthesis: SynthesisConfig::default(),
            models: Vec::new(),
        }
    }
}

impl ExperimentSettings {
    /// Load from an optional TOML file, overridden by `MHC_EVAL_*` variables
    ///
    /// Nested keys use a double underscore: `MHC_EVAL_SYNTHESIS__SMOOTHING`.
    pub fn load(path: Option<&Path>) -> Result<Self, SweepError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        self.level()?;
        self.evaluation.validate()?;
        self.synthesis.validate()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level, SweepError> {
        Level::from_str(&self.log_level).map_err(|_| SweepError::LogLevel(self.log_level.clone()))
    }

    /// Configurations to sweep
    pub fn model_configs(&self) -> Vec<ModelConfig> {
        if self.models.is_empty() {
            vec![ModelConfig::default()]
        } else {
            self.models.clone()
        }
    }

    /// Load the similarity matrix named by `similarity_path`, if any
    pub fn load_similarities(&self) -> Result<Option<SimilarityMatrix>, SweepError> {
        self.similarity_path
            .as_deref()
            .map(SimilarityMatrix::from_csv_path)
            .transpose()
            .map_err(SweepError::from)
    }
}
