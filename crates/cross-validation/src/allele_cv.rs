//! Single-Allele K-Fold Cross-Validation

use crate::config::EvaluationConfig;
use crate::encoder::EncodedDataset;
use crate::kfold::KFold;
use crate::model::Regressor;
use crate::EvalError;
use metrics::counter;
use model_eval::{majority_baseline, score_predictions, FoldScores};
use ndarray::Array1;
use tracing::{info, warn};

/// Reject predictions of the wrong length or with NaN / infinite values
pub(crate) fn check_predictions(
    allele_name: &str,
    predicted: &Array1<f64>,
    n_expected: usize,
) -> Result<(), EvalError> {
    if predicted.len() != n_expected {
        return Err(EvalError::InvalidInputShape {
            expected: format!("{} predictions", n_expected),
            actual: predicted.len().to_string(),
        });
    }
    if let Some((row, &value)) = predicted.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(EvalError::NonFinitePrediction {
            allele: allele_name.to_string(),
            row,
            value,
        });
    }
    Ok(())
}

/// Estimate per-fold AUC, accuracy and F1 of `model` on one allele
///
/// Weights are snapshotted on entry and restored before each scored fold.
/// Folds whose held-out labels are all binders or all non-binders are
/// skipped. Returns one entry per scored fold, possibly none.
pub fn kfold_cross_validation_for_single_allele<M: Regressor>(
    allele_name: &str,
    model: &mut M,
    data: &EncodedDataset,
    config: &EvaluationConfig,
) -> Result<Vec<FoldScores>, EvalError> {
    let kfold = KFold::new(config.cv_folds)?.with_seed(config.seed);
    let n_samples = data.len();
    if n_samples < kfold.n_splits() {
        warn!(
            "Skipping {}: {} samples cannot fill {} folds",
            allele_name,
            n_samples,
            kfold.n_splits()
        );
        return Ok(Vec::new());
    }

    let initial_weights = model.weights();
    let n_folds = kfold.n_splits();
    let mut fold_scores = Vec::with_capacity(n_folds);

    for (cv_iter, fold) in kfold.split(n_samples)?.into_iter().enumerate() {
        let test = data.select(&fold.test);
        let labels = test.labels();
        if labels.iter().all(|&l| l) || !labels.iter().any(|&l| l) {
            warn!(
                "Skipping CV iter {} of {} since all outputs are the same",
                cv_iter, allele_name
            );
            counter!("cv_folds_skipped_total").increment(1);
            continue;
        }

        model.set_weights(&initial_weights)?;
        let train = data.select(&fold.train);
        model.fit(train.x.view(), train.y.view(), config.training_params())?;

        let predicted = model.predict(test.x.view())?;
        check_predictions(allele_name, &predicted, test.len())?;

        let scores = score_predictions(&predicted.to_vec(), &labels, config.max_ic50);
        info!(
            "-- {}/{}: AUC: {:.5} Accuracy: {:.5} (baseline {:.5}) F1-score: {:.5}",
            cv_iter + 1,
            n_folds,
            scores.auc,
            scores.accuracy,
            majority_baseline(&labels),
            scores.f1
        );
        counter!("cv_folds_scored_total").increment(1);
        fold_scores.push(scores);
    }

    Ok(fold_scores)
}
