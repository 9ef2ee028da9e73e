//! Leave-One-Allele-Out Cross-Validation

use crate::allele_cv::kfold_cross_validation_for_single_allele;
use crate::config::EvaluationConfig;
use crate::encoder::{encode_allele_datasets, EncodedDataset, PeptideEncoder};
use crate::model::Regressor;
use crate::EvalError;
use binding_data::{filter_alleles, AlleleDatasets};
use metrics::counter;
use model_eval::{ResultTable, ScoreCollection};
use tracing::{debug, info};

/// Cross-validate `model` on every eligible allele
///
/// For each allele the model is reset to the weights it had on entry,
/// optionally pretrained on all other alleles, then k-fold cross-validated.
/// Alleles without a single scored fold are dropped.
///
/// Columns: `allele_name, dataset_size, {auc,accuracy,f1}_{mean,median,std,min,max}`.
pub fn leave_out_allele_cross_validation<M, E>(
    model: &mut M,
    datasets: &AlleleDatasets,
    encoder: &E,
    config: &EvaluationConfig,
) -> Result<ResultTable, EvalError>
where
    M: Regressor,
    E: PeptideEncoder + ?Sized,
{
    config.validate()?;
    let encoded = encode_allele_datasets(datasets, encoder, config.max_ic50, config.encoding)?;
    let initial_weights = model.weights();
    let mut scores = ScoreCollection::new();

    for (allele_name, _) in filter_alleles(datasets, &config.filter) {
        let Some(allele_data) = encoded.get(&allele_name) else {
            continue;
        };
        model.set_weights(&initial_weights)?;

        if config.n_pretrain_epochs > 0 {
            let others = encoded
                .iter()
                .filter(|(other, _)| **other != allele_name)
                .map(|(_, data)| data);
            match EncodedDataset::stack(others)? {
                Some(pretrain) => {
                    debug!("Pre-training X shape: {:?}", pretrain.x.shape());
                    debug!("Pre-training Y shape: {:?}", pretrain.y.shape());
                    model.fit(pretrain.x.view(), pretrain.y.view(), config.pretrain_params())?;
                }
                None => debug!("No other alleles to pre-train {} on", allele_name),
            }
        }

        info!("Cross-validation for {} ({}):", allele_name, allele_data.len());
        let fold_scores =
            kfold_cross_validation_for_single_allele(&allele_name, model, allele_data, config)?;
        if fold_scores.is_empty() {
            info!("Skipping allele {}", allele_name);
            counter!("cv_alleles_skipped_total").increment(1);
            continue;
        }
        scores.add(allele_name, allele_data.len(), fold_scores);
    }

    Ok(scores.to_table()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, FirstResidueEncoder, MeanRegressor};
    use binding_data::AlleleFilter;

    fn alternating(n: usize) -> Vec<f64> {
        (0..n).map(|i| if i % 2 == 0 { 50.0 } else { 5000.0 }).collect()
    }

    fn datasets() -> AlleleDatasets {
        let mut datasets = AlleleDatasets::new();
        datasets.insert("A0201".to_string(), dataset("A0201", &alternating(30)));
        datasets.insert("B0702".to_string(), dataset("B0702", &alternating(20)));
        // Below the minimum sample count
        datasets.insert("C0401".to_string(), dataset("C0401", &alternating(4)));
        // Malformed name
        datasets.insert("0201".to_string(), dataset("0201", &alternating(30)));
        // Only binders
        datasets.insert("A0301".to_string(), dataset("A0301", &[10.0; 30]));
        datasets
    }

    fn run(
        model: &mut MeanRegressor,
        datasets: &AlleleDatasets,
        config: &EvaluationConfig,
    ) -> Result<ResultTable, EvalError> {
        leave_out_allele_cross_validation(model, datasets, &FirstResidueEncoder, config)
    }

    fn allele_names(table: &ResultTable) -> Vec<String> {
        table
            .column("allele_name")
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_only_eligible_alleles_reported() {
        let mut model = MeanRegressor::default();
        let table = leave_out_allele_cross_validation(
            &mut model,
            &datasets(),
            &FirstResidueEncoder,
            &EvaluationConfig::default(),
        )
        .unwrap();

        assert_eq!(allele_names(&table), vec!["A0201", "B0702"]);
        assert_eq!(table.column("dataset_size").unwrap()[0].as_u64(), Some(30));
    }

    #[test]
    fn test_min_samples_threshold() {
        let config = EvaluationConfig {
            filter: AlleleFilter::new(25),
            ..Default::default()
        };
        let mut model = MeanRegressor::default();
        let table = run(&mut model, &datasets(), &config).unwrap();
        assert_eq!(allele_names(&table), vec!["A0201"]);
    }

    #[test]
    fn test_pretraining_uses_other_alleles() {
        let config = EvaluationConfig {
            n_pretrain_epochs: 3,
            ..Default::default()
        };
        let mut model = MeanRegressor::default();
        run(&mut model, &datasets(), &config).unwrap();

        let pretrain: Vec<_> = model.fits.iter().filter(|f| f.epochs == 3).collect();
        // Total encoded rows: 30 + 20 + 4 + 30 + 30 = 114
        assert_eq!(pretrain.len(), 2);
        assert_eq!(pretrain[0].rows, 114 - 30);
        assert_eq!(pretrain[1].rows, 114 - 20);
        // Pretraining always starts from the initial weights
        assert!(pretrain.iter().all(|f| f.bias_before == 0.0));
    }

    #[test]
    fn test_allele_with_uniform_folds_dropped() {
        let mut ic50s = vec![10.0; 9];
        ic50s.push(5000.0);
        let mut datasets = AlleleDatasets::new();
        datasets.insert("A0201".to_string(), dataset("A0201", &ic50s));

        let config = EvaluationConfig {
            cv_folds: 10,
            ..Default::default()
        };
        let mut model = MeanRegressor::default();
        let table = run(&mut model, &datasets, &config).unwrap();
        // Single-sample held-out folds are always uniform
        assert!(table.is_empty());
        assert!(model.fits.is_empty());
    }
}
