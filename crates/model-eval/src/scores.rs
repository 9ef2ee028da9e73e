//! Per-Allele Score Collection

use crate::metrics::FoldScores;
use crate::statistics::SummaryStatistics;
use crate::table::ResultTable;
use crate::TableError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

const METRICS: [&str; 3] = ["auc", "accuracy", "f1"];
const STATISTICS: [&str; 5] = ["mean", "median", "std", "min", "max"];

/// Aggregated fold scores of one allele
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlleleScoreSummary {
    pub allele_name: String,
    pub dataset_size: usize,
    pub n_folds: usize,
    pub auc: SummaryStatistics,
    pub accuracy: SummaryStatistics,
    pub f1: SummaryStatistics,
}

/// Fold scores accumulated per allele, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ScoreCollection {
    entries: Vec<(String, usize, Vec<FoldScores>)>,
}

impl ScoreCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the fold scores of an allele; alleles without folds are ignored
    pub fn add(
        &mut self,
        allele_name: impl Into<String>,
        dataset_size: usize,
        folds: Vec<FoldScores>,
    ) {
        let allele_name = allele_name.into();
        if folds.is_empty() {
            debug!("No fold scores for {}, not recorded", allele_name);
            return;
        }
        self.entries.push((allele_name, dataset_size, folds));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary statistics for each recorded allele
    pub fn summaries(&self) -> Vec<AlleleScoreSummary> {
        self.entries
            .iter()
            .filter_map(|(allele_name, dataset_size, folds)| {
                let aucs: Vec<f64> = folds.iter().map(|f| f.auc).collect();
                let accuracies: Vec<f64> = folds.iter().map(|f| f.accuracy).collect();
                let f1s: Vec<f64> = folds.iter().map(|f| f.f1).collect();
                Some(AlleleScoreSummary {
                    allele_name: allele_name.clone(),
                    dataset_size: *dataset_size,
                    n_folds: folds.len(),
                    auc: SummaryStatistics::compute(&aucs)?,
                    accuracy: SummaryStatistics::compute(&accuracies)?,
                    f1: SummaryStatistics::compute(&f1s)?,
                })
            })
            .collect()
    }

    /// Table with one row per allele
    ///
    /// Columns: `allele_name, dataset_size`, then `{auc,accuracy,f1}_{mean,median,std,min,max}`.
    pub fn to_table(&self) -> Result<ResultTable, TableError> {
        let mut columns = vec!["allele_name".to_string(), "dataset_size".to_string()];
        for metric in METRICS {
            for stat in STATISTICS {
                columns.push(format!("{}_{}", metric, stat));
            }
        }

        let mut table = ResultTable::new(columns)?;
        for summary in self.summaries() {
            let mut row = vec![json!(summary.allele_name), json!(summary.dataset_size)];
            for stats in [&summary.auc, &summary.accuracy, &summary.f1] {
                row.extend([
                    json!(stats.mean),
                    json!(stats.median),
                    json!(stats.std_dev),
                    json!(stats.min),
                    json!(stats.max),
                ]);
            }
            table.push_row(row)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(auc: f64) -> FoldScores {
        FoldScores {
            auc,
            accuracy: 0.5,
            f1: 0.25,
        }
    }

    #[test]
    fn test_empty_folds_dropped() {
        let mut scores = ScoreCollection::new();
        scores.add("A0201", 10, vec![]);
        assert!(scores.is_empty());
        assert_eq!(scores.to_table().unwrap().len(), 0);
    }

    #[test]
    fn test_table_layout() {
        let mut scores = ScoreCollection::new();
        scores.add("A0201", 10, vec![fold(0.6), fold(0.8)]);
        scores.add("B0702", 7, vec![fold(0.9)]);

        let table = scores.to_table().unwrap();
        assert_eq!(table.columns().len(), 17);
        assert_eq!(table.columns()[2], "auc_mean");
        assert_eq!(table.columns()[16], "f1_max");
        assert_eq!(table.len(), 2);

        let auc_means = table.column("auc_mean").unwrap();
        assert!((auc_means[0].as_f64().unwrap() - 0.7).abs() < 1e-12);
        assert_eq!(table.column("dataset_size").unwrap()[1], &json!(7));
    }

    #[test]
    fn test_summaries() {
        let mut scores = ScoreCollection::new();
        scores.add("A0201", 10, vec![fold(0.6), fold(0.8), fold(0.7)]);
        let summary = &scores.summaries()[0];
        assert_eq!(summary.n_folds, 3);
        assert!((summary.auc.median - 0.7).abs() < 1e-12);
        assert_eq!(summary.auc.min, 0.6);
        assert_eq!(summary.f1.std_dev, 0.0);
    }
}
