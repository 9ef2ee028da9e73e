//! Evaluation and Model Configuration

use crate::encoder::PeptideEncoding;
use crate::model::FitParams;
use crate::EvalError;
use binding_data::AlleleFilter;
use serde::{Deserialize, Serialize};

/// Settings shared by the cross-validation and train/test drivers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Allele eligibility rules
    pub filter: AlleleFilter,
    /// Number of folds per allele
    pub cv_folds: usize,
    /// Seed of the fold shuffle
    pub seed: u64,
    /// IC50 mapped to regression target 0.0
    pub max_ic50: f64,
    /// Feature encoding requested from the peptide encoder
    pub encoding: PeptideEncoding,
    /// Epochs of pretraining on the other alleles (0 = none)
    pub n_pretrain_epochs: usize,
    /// Epochs of training per fold or allele
    pub n_training_epochs: usize,
    pub minibatch_size: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            filter: AlleleFilter::default(),
            cv_folds: 5,
            seed: 0,
            max_ic50: 5000.0,
            encoding: PeptideEncoding::Index,
            n_pretrain_epochs: 0,
            n_training_epochs: 100,
            minibatch_size: 128,
        }
    }
}

impl EvaluationConfig {
    /// Driver settings for a hyperparameter configuration
    pub fn from_model_config(
        config: &ModelConfig,
        min_samples_per_allele: usize,
        cv_folds: usize,
    ) -> Self {
        Self {
            filter: AlleleFilter::new(min_samples_per_allele),
            cv_folds,
            max_ic50: config.max_ic50,
            encoding: config.encoding(),
            n_pretrain_epochs: config.n_pretrain_epochs,
            n_training_epochs: config.n_epochs,
            minibatch_size: config.minibatch_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        if self.cv_folds < 2 {
            return Err(EvalError::InvalidConfig(format!(
                "cv_folds must be >= 2, got {}",
                self.cv_folds
            )));
        }
        if !(self.max_ic50 > 1.0) {
            return Err(EvalError::InvalidConfig(format!(
                "max_ic50 must be > 1, got {}",
                self.max_ic50
            )));
        }
        if self.minibatch_size == 0 {
            return Err(EvalError::InvalidConfig("minibatch_size must be > 0".to_string()));
        }
        Ok(())
    }

    pub(crate) fn pretrain_params(&self) -> FitParams {
        FitParams::new(self.n_pretrain_epochs, self.minibatch_size)
    }

    pub(crate) fn training_params(&self) -> FitParams {
        FitParams::new(self.n_training_epochs, self.minibatch_size)
    }
}

/// One point of a hyperparameter sweep
///
/// Every field becomes a column of the sweep results, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Learned amino-acid embedding width; 0 selects one-hot input
    pub embedding_size: usize,
    pub hidden_layer_size: usize,
    pub activation: String,
    pub init: String,
    pub loss: String,
    pub dropout_probability: f64,
    pub learning_rate: f64,
    pub optimizer: String,
    pub max_ic50: f64,
    pub n_pretrain_epochs: usize,
    pub n_epochs: usize,
    pub minibatch_size: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            embedding_size: 32,
            hidden_layer_size: 100,
            activation: "tanh".to_string(),
            init: "glorot_uniform".to_string(),
            loss: "mse".to_string(),
            dropout_probability: 0.0,
            learning_rate: 0.001,
            optimizer: "rmsprop".to_string(),
            max_ic50: 5000.0,
            n_pretrain_epochs: 0,
            n_epochs: 100,
            minibatch_size: 128,
        }
    }
}

/// Amino-acid alphabet size of index-encoded peptides
const AMINO_ACID_COUNT: usize = 20;

/// Default peptide length of the network input
pub const DEFAULT_PEPTIDE_LENGTH: usize = 9;

/// Input layer family of a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkKind {
    /// Index input through a learned embedding
    Embedding { input_dim: usize, output_dim: usize },
    /// 1-of-k binary input
    OneHot,
}

/// Architecture handed to a [`crate::ModelFactory`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub peptide_length: usize,
    pub kind: NetworkKind,
    pub layer_sizes: Vec<usize>,
    pub activation: String,
    pub init: String,
    pub loss: String,
    pub dropout_probability: f64,
    pub learning_rate: f64,
    pub optimizer: String,
}

impl ModelConfig {
    /// Encoding the network expects
    pub fn encoding(&self) -> PeptideEncoding {
        if self.embedding_size == 0 {
            PeptideEncoding::OneHot
        } else {
            PeptideEncoding::Index
        }
    }

    /// Network architecture for peptides of `peptide_length`
    pub fn network(&self, peptide_length: usize) -> NetworkSpec {
        let kind = if self.embedding_size > 0 {
            NetworkKind::Embedding {
                input_dim: AMINO_ACID_COUNT,
                output_dim: self.embedding_size,
            }
        } else {
            NetworkKind::OneHot
        };
        NetworkSpec {
            peptide_length,
            kind,
            layer_sizes: vec![self.hidden_layer_size],
            activation: self.activation.clone(),
            init: self.init.clone(),
            loss: self.loss.clone(),
            dropout_probability: self.dropout_probability,
            learning_rate: self.learning_rate,
            optimizer: self.optimizer.clone(),
        }
    }
}
