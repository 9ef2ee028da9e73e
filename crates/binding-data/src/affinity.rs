//! IC50 Transforms

/// Conventional binder / non-binder cutoff (nM)
pub const BINDER_THRESHOLD_NM: f64 = 500.0;

/// Whether an IC50 counts as a binder
pub fn is_binder(ic50: f64) -> bool {
    ic50 <= BINDER_THRESHOLD_NM
}

/// Map an IC50 (nM) onto the [0, 1] regression target, 1.0 = strongest binding
///
/// `1 - ln(ic50) / ln(max_ic50)`, clipped to the unit interval.
pub fn ic50_to_regression_target(ic50: f64, max_ic50: f64) -> f64 {
    let log_ratio = ic50.ln() / max_ic50.ln();
    (1.0 - log_ratio).clamp(0.0, 1.0)
}

/// Inverse of [`ic50_to_regression_target`] for in-range targets
pub fn regression_target_to_ic50(target: f64, max_ic50: f64) -> f64 {
    max_ic50.powf(1.0 - target)
}
