//! Binder Classification Metrics

use binding_data::{is_binder, regression_target_to_ic50};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scores of one evaluated fold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldScores {
    /// Area under the ROC curve
    pub auc: f64,
    /// Fraction of correctly classified binders / non-binders
    pub accuracy: f64,
    /// F1 score of the binder class
    pub f1: f64,
}

/// Binary confusion matrix, binder = positive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    pub fn_count: usize,
}

impl ConfusionMatrix {
    /// Tally predicted against true labels
    pub fn from_labels(predicted: &[bool], actual: &[bool]) -> Self {
        let mut matrix = Self::default();
        for (&p, &a) in predicted.iter().zip(actual) {
            match (p, a) {
                (true, true) => matrix.tp += 1,
                (false, false) => matrix.tn += 1,
                (true, false) => matrix.fp += 1,
                (false, true) => matrix.fn_count += 1,
            }
        }
        matrix
    }

    /// Precision = TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        if self.tp + self.fp == 0 {
            0.0
        } else {
            self.tp as f64 / (self.tp + self.fp) as f64
        }
    }

    /// Recall = TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        if self.tp + self.fn_count == 0 {
            0.0
        } else {
            self.tp as f64 / (self.tp + self.fn_count) as f64
        }
    }

    /// F1 = 2PR / (P + R)
    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.tp + self.tn + self.fp + self.fn_count;
        if total == 0 {
            0.0
        } else {
            (self.tp + self.tn) as f64 / total as f64
        }
    }
}

/// Area under the ROC curve of `scores` ranking `labels` (higher score = positive)
///
/// Tied scores advance the curve together, so a constant predictor scores 0.5.
/// Returns 0.5 when either class is absent. Scores are ranked by
/// [`f64::total_cmp`], which gives NaN a fixed rank.
pub fn roc_auc(scores: &[f64], labels: &[bool]) -> f64 {
    let total_positive = labels.iter().filter(|&&l| l).count() as f64;
    let total_negative = labels.len() as f64 - total_positive;
    if total_positive == 0.0 || total_negative == 0.0 {
        return 0.5;
    }

    let mut ranked: Vec<(f64, bool)> = scores.iter().copied().zip(labels.iter().copied()).collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut auc = 0.0;
    let (mut tp, mut fp) = (0.0, 0.0);
    let (mut prev_tpr, mut prev_fpr) = (0.0, 0.0);
    let mut i = 0;
    while i < ranked.len() {
        let threshold = ranked[i].0;
        while i < ranked.len() && ranked[i].0.total_cmp(&threshold) == Ordering::Equal {
            if ranked[i].1 {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            i += 1;
        }
        let tpr = tp / total_positive;
        let fpr = fp / total_negative;
        auc += (fpr - prev_fpr) * (tpr + prev_tpr) / 2.0;
        prev_tpr = tpr;
        prev_fpr = fpr;
    }

    auc.clamp(0.0, 1.0)
}

/// Accuracy of always predicting the majority class
pub fn majority_baseline(labels: &[bool]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let positive_rate = labels.iter().filter(|&&l| l).count() as f64 / labels.len() as f64;
    positive_rate.max(1.0 - positive_rate)
}

/// Binder labels of regression targets on the `max_ic50` scale
pub fn binder_labels(targets: &[f64], max_ic50: f64) -> Vec<bool> {
    targets
        .iter()
        .map(|&t| is_binder(regression_target_to_ic50(t, max_ic50)))
        .collect()
}

/// Score regression outputs against true binder labels
///
/// Predictions are regression targets on the `max_ic50` scale; a prediction
/// is a binder when its implied IC50 is at most 500 nM.
pub fn score_predictions(predicted: &[f64], true_labels: &[bool], max_ic50: f64) -> FoldScores {
    let predicted_labels = binder_labels(predicted, max_ic50);
    let matrix = ConfusionMatrix::from_labels(&predicted_labels, true_labels);

    FoldScores {
        auc: roc_auc(predicted, true_labels),
        accuracy: matrix.accuracy(),
        f1: matrix.f1(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binding_data::ic50_to_regression_target;

    #[test]
    fn test_perfect_ranking() {
        let scores = [0.9, 0.8, 0.3, 0.1];
        let labels = [true, true, false, false];
        assert!((roc_auc(&scores, &labels) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_ranking() {
        let scores = [0.1, 0.2, 0.8, 0.9];
        let labels = [true, true, false, false];
        assert!(roc_auc(&scores, &labels).abs() < 1e-12);
    }

    #[test]
    fn test_ties_count_half() {
        let scores = [0.5, 0.5, 0.5, 0.5];
        let labels = [true, false, true, false];
        assert!((roc_auc(&scores, &labels) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_auc() {
        assert_eq!(roc_auc(&[0.1, 0.9], &[true, true]), 0.5);
    }

    #[test]
    fn test_nan_scores_terminate() {
        let auc = roc_auc(&[f64::NAN, 0.2, 0.8, f64::NAN], &[true, false, true, false]);
        assert!((0.0..=1.0).contains(&auc));
    }

    #[test]
    fn test_confusion_metrics() {
        let predicted = [true, true, false, false];
        let actual = [true, false, true, false];
        let matrix = ConfusionMatrix::from_labels(&predicted, &actual);
        assert_eq!(matrix, ConfusionMatrix { tp: 1, tn: 1, fp: 1, fn_count: 1 });
        assert!((matrix.accuracy() - 0.5).abs() < 1e-12);
        assert!((matrix.f1() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_majority_baseline() {
        assert!((majority_baseline(&[true, false, false, false]) - 0.75).abs() < 1e-12);
        assert_eq!(majority_baseline(&[]), 0.0);
    }

    #[test]
    fn test_binder_labels() {
        let targets = [
            ic50_to_regression_target(499.0, 5000.0),
            ic50_to_regression_target(501.0, 5000.0),
            0.0,
            1.0,
        ];
        assert_eq!(binder_labels(&targets, 5000.0), vec![true, false, false, true]);
    }

    #[test]
    fn test_score_predictions_threshold() {
        let max_ic50 = 5000.0;
        let predicted = [
            ic50_to_regression_target(50.0, max_ic50),
            ic50_to_regression_target(400.0, max_ic50),
            ic50_to_regression_target(4000.0, max_ic50),
        ];
        let labels = [true, true, false];
        let scores = score_predictions(&predicted, &labels, max_ic50);
        assert!((scores.accuracy - 1.0).abs() < 1e-12);
        assert!((scores.f1 - 1.0).abs() < 1e-12);
        assert!((scores.auc - 1.0).abs() < 1e-12);
    }
}
