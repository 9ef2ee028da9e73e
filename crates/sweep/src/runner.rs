//! Sweep Runner

use crate::error::TrainingError;
use crate::settings::ExperimentSettings;
use crate::SweepError;
use metrics::{counter, histogram};
use model_eval::{median, Cell, ResultTable};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Timing after one configuration finished
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepProgress {
    /// Zero-based index of the finished configuration
    pub config_idx: usize,
    pub n_configs: usize,
    pub elapsed: Duration,
    /// Remaining configurations times the median elapsed time so far
    pub estimated_remaining: Duration,
}

type ProgressCallback<'a> = Box<dyn FnMut(&SweepProgress) + 'a>;

/// Sequential hyperparameter sweep writing results to a CSV file
///
/// The first configuration truncates the file and writes the header, later
/// configurations append rows only. Each configuration's rows are on disk
/// before the next configuration starts.
pub struct SweepRunner<'a> {
    results_path: PathBuf,
    on_progress: Option<ProgressCallback<'a>>,
}

impl<'a> SweepRunner<'a> {
    pub fn new(results_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            on_progress: None,
        }
    }

    pub fn from_settings(settings: &ExperimentSettings) -> Self {
        Self::new(&settings.results_path)
    }

    /// Call `callback` after every configuration
    pub fn with_progress(mut self, callback: impl FnMut(&SweepProgress) + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Train every configuration in order and return all tagged rows
    ///
    /// Rows gain a `config_idx` column followed by one column per
    /// configuration field. A training failure aborts the sweep; rows of
    /// earlier configurations remain in the results file.
    pub fn run<C, F, E>(
        &mut self,
        configs: &[C],
        mut train_fn: F,
    ) -> Result<ResultTable, SweepError>
    where
        C: Serialize + Debug,
        F: FnMut(&C) -> Result<ResultTable, E>,
        E: Into<TrainingError>,
    {
        let n_configs = configs.len();
        let mut combined = ResultTable::default();
        let mut header: Option<Vec<String>> = None;
        let mut elapsed_times = Vec::with_capacity(n_configs);

        for (config_idx, config) in configs.iter().enumerate() {
            let start = Instant::now();
            info!("=== Config {}/{}: {:?}", config_idx + 1, n_configs, config);

            let fields = config_fields(config, config_idx)?;
            let mut table = train_fn(config).map_err(|e| SweepError::Training {
                config_idx,
                source: e.into(),
            })?;
            table.add_constant_column("config_idx", Value::from(config_idx))?;
            for (name, value) in fields {
                table.add_constant_column(name, value)?;
            }

            if let Some(expected) = &header {
                if expected.as_slice() != table.columns() {
                    return Err(SweepError::ColumnMismatch {
                        config_idx,
                        expected: expected.clone(),
                        actual: table.columns().to_vec(),
                    });
                }
                self.append_rows(&table)?;
            } else {
                self.write_first(&table)?;
                header = Some(table.columns().to_vec());
            }

            let elapsed = start.elapsed();
            elapsed_times.push(elapsed.as_secs_f64());
            let median_elapsed = median(&elapsed_times).unwrap_or(0.0);
            let remaining = (n_configs - config_idx - 1) as f64 * median_elapsed;
            let progress = SweepProgress {
                config_idx,
                n_configs,
                elapsed,
                estimated_remaining: Duration::from_secs_f64(remaining),
            };
            info!(
                "-- Time for config = {:.2}s, estimated remaining: {:.2} hours",
                elapsed.as_secs_f64(),
                remaining / 3600.0
            );
            histogram!("sweep_config_duration_seconds").record(elapsed.as_secs_f64());
            counter!("sweep_configs_completed_total").increment(1);
            if let Some(callback) = self.on_progress.as_mut() {
                callback(&progress);
            }

            combined.append(table)?;
        }

        Ok(combined)
    }

    fn write_first(&self, table: &ResultTable) -> Result<(), SweepError> {
        let file = File::create(&self.results_path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        table.write_csv(&mut writer, true)?;
        Ok(())
    }

    fn append_rows(&self, table: &ResultTable) -> Result<(), SweepError> {
        let file = OpenOptions::new().create(true).append(true).open(&self.results_path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        table.write_csv(&mut writer, false)?;
        Ok(())
    }
}

/// Run a sweep writing to `results_path` without a progress callback
pub fn evaluate_model_configs<C, F, E>(
    configs: &[C],
    results_path: impl Into<PathBuf>,
    train_fn: F,
) -> Result<ResultTable, SweepError>
where
    C: Serialize + Debug,
    F: FnMut(&C) -> Result<ResultTable, E>,
    E: Into<TrainingError>,
{
    SweepRunner::new(results_path).run(configs, train_fn)
}

/// Field name/value pairs of a configuration in declaration order
fn config_fields<C: Serialize>(
    config: &C,
    config_idx: usize,
) -> Result<Vec<(String, Cell)>, SweepError> {
    match serde_json::to_value(config)? {
        Value::Object(fields) => Ok(fields.into_iter().collect()),
        _ => Err(SweepError::NotAStruct(config_idx)),
    }
}
