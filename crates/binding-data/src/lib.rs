//! Binding Data
//!
//! Provides the in-memory data model shared by the evaluation crates:
//! peptide-MHC binding records grouped per allele, allele-name normalization
//! and eligibility filtering, and pairwise allele similarity matrices.

mod affinity;
mod allele;
mod error;
mod filter;
mod record;
mod similarity;

pub use affinity::{
    ic50_to_regression_target, is_binder, regression_target_to_ic50, BINDER_THRESHOLD_NM,
};
pub use allele::{is_malformed_allele_name, normalize_allele_name};
pub use error::DataError;
pub use filter::{filter_alleles, AlleleFilter, SkipReason};
pub use record::{AlleleDataset, BindingRecord};
pub use similarity::{AlleleSimilarities, SimilarityMatrix};

use std::collections::BTreeMap;

/// Binding datasets keyed by allele name, iterated in sorted order
pub type AlleleDatasets = BTreeMap<String, AlleleDataset>;
