//! Model Construction from Hyperparameters

use crate::config::{EvaluationConfig, ModelConfig, NetworkSpec, DEFAULT_PEPTIDE_LENGTH};
use crate::encoder::PeptideEncoder;
use crate::leave_out::leave_out_allele_cross_validation;
use crate::model::{ModelError, Regressor};
use crate::train_test::evaluate_train_vs_test;
use crate::EvalError;
use binding_data::AlleleDatasets;
use model_eval::ResultTable;
use tracing::info;

/// Builds fresh models for a network architecture
pub trait ModelFactory {
    type Model: Regressor;

    fn build(&self, network: &NetworkSpec) -> Result<Self::Model, ModelError>;
}

fn make_model<F: ModelFactory + ?Sized>(
    factory: &F,
    config: &ModelConfig,
) -> Result<F::Model, EvalError> {
    info!("===");
    info!("{:?}", config);
    Ok(factory.build(&config.network(DEFAULT_PEPTIDE_LENGTH))?)
}

/// Leave-one-allele-out cross-validation of a freshly built model
pub fn evaluate_config_by_cross_validation<F, E>(
    config: &ModelConfig,
    datasets: &AlleleDatasets,
    factory: &F,
    encoder: &E,
    min_samples_per_allele: usize,
    cv_folds: usize,
) -> Result<ResultTable, EvalError>
where
    F: ModelFactory + ?Sized,
    E: PeptideEncoder + ?Sized,
{
    let mut model = make_model(factory, config)?;
    let eval = EvaluationConfig::from_model_config(config, min_samples_per_allele, cv_folds);
    leave_out_allele_cross_validation(&mut model, datasets, encoder, &eval)
}

/// Train/test evaluation of a freshly built model
pub fn evaluate_config_train_vs_test<F, E>(
    config: &ModelConfig,
    training: &AlleleDatasets,
    testing: &AlleleDatasets,
    factory: &F,
    encoder: &E,
    min_samples_per_allele: usize,
) -> Result<ResultTable, EvalError>
where
    F: ModelFactory + ?Sized,
    E: PeptideEncoder + ?Sized,
{
    let mut model = make_model(factory, config)?;
    let cv_folds = EvaluationConfig::default().cv_folds;
    let eval = EvaluationConfig::from_model_config(config, min_samples_per_allele, cv_folds);
    evaluate_train_vs_test(&mut model, training, testing, encoder, &eval)
}
