//! Hyperparameter Sweeps
//!
//! Runs a training function over a sequence of hyperparameter
//! configurations, tags every result row with its configuration and appends
//! it to a CSV file as soon as the configuration finishes.

mod error;
mod logging;
mod runner;
mod settings;

pub use error::{SweepError, TrainingError};
pub use logging::{init_json_logging, init_logging};
pub use runner::{evaluate_model_configs, SweepProgress, SweepRunner};
pub use settings::ExperimentSettings;

#[cfg(test)]
mod tests {
    use super::*;
    use binding_data::{AlleleDataset, AlleleDatasets, BindingRecord};
    use cross_validation::{
        evaluate_config_by_cross_validation, EvalError, FitParams, ModelConfig, ModelError,
        ModelFactory, NetworkSpec, PeptideEncoder, PeptideEncoding, Regressor,
    };
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

    struct ConstantModel(f64);

    impl Regressor for ConstantModel {
        type Weights = f64;

        fn weights(&self) -> f64 {
            self.0
        }

        fn set_weights(&mut self, weights: &f64) -> Result<(), ModelError> {
            self.0 = *weights;
            Ok(())
        }

        fn fit(
            &mut self,
            _x: ArrayView2<'_, f64>,
            y: ArrayView1<'_, f64>,
            _params: FitParams,
        ) -> Result<(), ModelError> {
            self.0 = y.mean().unwrap_or(0.0);
            Ok(())
        }

        fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
            Ok(Array1::from_elem(x.nrows(), self.0))
        }
    }

    struct ConstantFactory;

    impl ModelFactory for ConstantFactory {
        type Model = ConstantModel;

        fn build(&self, _network: &NetworkSpec) -> Result<ConstantModel, ModelError> {
            Ok(ConstantModel(0.0))
        }
    }

    struct LengthEncoder;

    impl PeptideEncoder for LengthEncoder {
        fn encode(
            &self,
            peptides: &[&str],
            _encoding: PeptideEncoding,
        ) -> Result<Array2<f64>, EvalError> {
            let lengths = |(i, _): (usize, usize)| peptides[i].len() as f64;
            Ok(Array2::from_shape_fn((peptides.len(), 1), lengths))
        }
    }

    fn datasets() -> AlleleDatasets {
        let mut datasets = AlleleDatasets::new();
        for allele in ["A0201", "B0702"] {
            let records = (0..20).map(|i| {
                let ic50 = if i % 2 == 0 { 20.0 } else { 20000.0 };
                BindingRecord::from_ic50(allele, format!("SIINFEKL{:02}", i), ic50, 5000.0).unwrap()
            });
            let dataset = AlleleDataset::from_records(allele, records).unwrap();
            datasets.insert(allele.to_string(), dataset);
        }
        datasets
    }

    #[test]
    fn test_cross_validation_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let datasets = datasets();
        let configs = vec![
            ModelConfig::default(),
            ModelConfig {
                embedding_size: 0,
                ..Default::default()
            },
        ];

        let combined = evaluate_model_configs(&configs, &path, |config: &ModelConfig| {
            evaluate_config_by_cross_validation(
                config,
                &datasets,
                &ConstantFactory,
                &LengthEncoder,
                5,
                5,
            )
        })
        .unwrap();

        // Two alleles per configuration
        assert_eq!(combined.len(), 4);
        let columns = combined.columns();
        assert_eq!(columns[0], "allele_name");
        assert_eq!(columns[17], "config_idx");
        assert_eq!(columns[18], "embedding_size");
        assert_eq!(columns.last().map(String::as_str), Some("minibatch_size"));

        let config_idx: Vec<u64> = combined
            .column("config_idx")
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap())
            .collect();
        assert_eq!(config_idx, vec![0, 0, 1, 1]);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 5);
    }
}
